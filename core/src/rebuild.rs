use indexmap::{map::Entry, IndexMap};
use serde::Serialize;
use tracing::warn;

use crate::{
    document::{format_number, TokenValue},
    error::RebuildError,
    flatten::{FlatToken, FlatTokens},
    options::{CollisionPolicy, NormalizeOptions},
};

pub type RebuiltTree = IndexMap<String, RebuiltNode>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RebuiltNode {
    Token(RebuiltToken),
    Group(RebuiltTree),
}

impl RebuiltNode {
    fn kind(&self) -> &'static str {
        match self {
            RebuiltNode::Token(_) => "token",
            RebuiltNode::Group(_) => "group",
        }
    }
}

/// A renderer-ready token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RebuiltToken {
    pub value: TokenValue,
    #[serde(rename = "type")]
    pub type_: String,
}

impl RebuiltToken {
    pub fn new(value: impl Into<String>, type_: impl Into<String>) -> Self {
        Self {
            value: TokenValue::String(value.into()),
            type_: type_.into(),
        }
    }
}

impl From<&FlatToken> for RebuiltToken {
    fn from(token: &FlatToken) -> Self {
        let value = match &token.value {
            TokenValue::Number(n) if token.type_ == "number" => {
                TokenValue::String(format!("{}px", format_number(n)))
            }
            other => other.clone(),
        };
        Self {
            value,
            type_: token.type_.clone(),
        }
    }
}

pub fn rebuild(flat: &FlatTokens, options: &NormalizeOptions) -> Result<RebuiltTree, RebuildError> {
    let mut tree = RebuiltTree::new();
    for (name, token) in flat {
        let segments = name
            .split('-')
            .filter(|segment| !options.rebuild_segment_filter.iter().any(|f| f == segment))
            .collect::<Vec<_>>();
        let Some((last, parents)) = segments.split_last() else {
            if options.is_strict() {
                return Err(RebuildError::EmptyPath { name: name.clone() });
            }
            warn!(%name, "skipping token with no segments left after filtering");
            continue;
        };

        if let Some(level) = walk(&mut tree, parents, name, options)? {
            place(level, last, name, RebuiltToken::from(token), options)?;
        }
    }
    Ok(tree)
}

fn walk<'a>(
    mut level: &'a mut RebuiltTree,
    parents: &[&str],
    name: &str,
    options: &NormalizeOptions,
) -> Result<Option<&'a mut RebuiltTree>, RebuildError> {
    for segment in parents {
        match descend(level, segment, name, options)? {
            Some(next) => level = next,
            None => return Ok(None),
        }
    }
    Ok(Some(level))
}

/// Returns the group at `segment`, creating it if needed. `None` means a token
/// is in the way and the collision policy keeps it.
fn descend<'a>(
    level: &'a mut RebuiltTree,
    segment: &str,
    name: &str,
    options: &NormalizeOptions,
) -> Result<Option<&'a mut RebuiltTree>, RebuildError> {
    let node = level
        .entry(segment.to_string())
        .or_insert_with(|| RebuiltNode::Group(RebuiltTree::new()));
    if let RebuiltNode::Token(_) = node {
        match options.collisions {
            CollisionPolicy::Overwrite => {
                warn!(%name, %segment, "replacing a token with a group");
                *node = RebuiltNode::Group(RebuiltTree::new());
            }
            CollisionPolicy::KeepFirst => {
                warn!(%name, %segment, "a token is in the way, skipping");
                return Ok(None);
            }
            CollisionPolicy::Reject => {
                return Err(RebuildError::LeafInPath {
                    name: name.to_string(),
                    segment: segment.to_string(),
                });
            }
        }
    }
    match node {
        RebuiltNode::Group(children) => Ok(Some(children)),
        RebuiltNode::Token(_) => unreachable!("tokens in the path are replaced above"),
    }
}

fn place(
    level: &mut RebuiltTree,
    segment: &str,
    name: &str,
    token: RebuiltToken,
    options: &NormalizeOptions,
) -> Result<(), RebuildError> {
    match level.entry(segment.to_string()) {
        Entry::Vacant(entry) => {
            entry.insert(RebuiltNode::Token(token));
        }
        Entry::Occupied(mut entry) => {
            let existing = entry.get().kind();
            match options.collisions {
                CollisionPolicy::Overwrite => {
                    warn!(%name, %segment, existing, "overwriting");
                    entry.insert(RebuiltNode::Token(token));
                }
                CollisionPolicy::KeepFirst => {
                    warn!(%name, %segment, existing, "segment already taken, skipping");
                }
                CollisionPolicy::Reject => {
                    return Err(RebuildError::Occupied {
                        name: name.to_string(),
                        segment: segment.to_string(),
                        existing,
                    });
                }
            }
        }
    }
    Ok(())
}
