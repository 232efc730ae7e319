use indexmap::{map::Entry, IndexMap};
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    document::{DesignTokens, Token, TokenGroup, TokenOrGroup, TokenValue},
    error::FlattenError,
    name::{flat_name, normalize_key},
    options::{CollisionPolicy, NormalizeOptions},
};

/// Flat tokens keyed by name, in document traversal order.
pub type FlatTokens = IndexMap<String, FlatToken>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatToken {
    pub value: TokenValue,
    #[serde(rename = "type")]
    pub type_: String,
    /// Normalized path the token was found under.
    pub path: Vec<String>,
    pub original: Token,
}

pub fn flatten(tokens: &DesignTokens, options: &NormalizeOptions) -> Result<FlatTokens, FlattenError> {
    let mut flat = FlatTokens::new();
    flatten_group(&tokens.root, &[], options, &mut flat)?;
    Ok(flat)
}

fn flatten_group(
    group: &TokenGroup,
    prefix: &[String],
    options: &NormalizeOptions,
    flat: &mut FlatTokens,
) -> Result<(), FlattenError> {
    for (key, node) in group {
        if key.starts_with('$') {
            continue;
        }
        let mut path = prefix.to_vec();
        path.push(normalize_key(key, &options.category_folds));

        match node {
            TokenOrGroup::Token(token) if token.type_.is_empty() => {
                skip(options, FlattenError::MalformedToken {
                    path: path.join("."),
                    reason: "empty $type".to_string(),
                })?;
            }
            TokenOrGroup::Token(token) => insert(token, path, options, flat)?,
            TokenOrGroup::Group(children) => {
                if children.contains_key("$value") {
                    skip(options, FlattenError::MalformedToken {
                        path: path.join("."),
                        reason: "$value without a string $type, or with an array value".to_string(),
                    })?;
                }
                flatten_group(children, &path, options, flat)?;
            }
            TokenOrGroup::Other(value) => {
                let kind = if value.is_array() { "array" } else { "bare value" };
                skip(options, FlattenError::UnsupportedNode {
                    path: path.join("."),
                    kind,
                })?;
            }
        }
    }
    Ok(())
}

fn insert(
    token: &Token,
    path: Vec<String>,
    options: &NormalizeOptions,
    flat: &mut FlatTokens,
) -> Result<(), FlattenError> {
    let name = flat_name(&path)?;
    if name.is_empty() {
        if options.is_strict() {
            return Err(FlattenError::EmptyName { path: path.join(".") });
        }
        warn!(path = %path.join("."), "skipping token with an empty name");
        return Ok(());
    }

    let token = FlatToken {
        value: token.value.clone(),
        type_: token.type_.clone(),
        path,
        original: token.clone(),
    };
    match flat.entry(name) {
        Entry::Vacant(entry) => {
            entry.insert(token);
        }
        Entry::Occupied(mut entry) => {
            let first = entry.get().path.join(".");
            let second = token.path.join(".");
            match options.collisions {
                CollisionPolicy::Overwrite => {
                    warn!(name = %entry.key(), %first, %second, "token name collision, keeping the later token");
                    entry.insert(token);
                }
                CollisionPolicy::KeepFirst => {
                    warn!(name = %entry.key(), %first, %second, "token name collision, keeping the earlier token");
                }
                CollisionPolicy::Reject => {
                    return Err(FlattenError::Collision {
                        name: entry.key().clone(),
                        first,
                        second,
                    });
                }
            }
        }
    }
    Ok(())
}

fn skip(options: &NormalizeOptions, err: FlattenError) -> Result<(), FlattenError> {
    if options.is_strict() {
        return Err(err);
    }
    debug!("skipping: {err}");
    Ok(())
}
