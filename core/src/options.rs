use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How nodes that are neither a valid token nor a group are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strictness {
    /// Skip them, logging at debug level.
    #[default]
    Lenient,
    /// Fail the whole run.
    Strict,
}

/// What happens when two tokens end up at the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// The token visited last wins.
    #[default]
    Overwrite,
    /// The token visited first wins.
    KeepFirst,
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NormalizeOptions {
    pub strictness: Strictness,
    pub collisions: CollisionPolicy,
    /// Plural group names folded to their singular category, matched against
    /// the already normalized key.
    pub category_folds: IndexMap<String, String>,
    /// Name segments dropped when re-nesting flat names.
    pub rebuild_segment_filter: Vec<String>,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            strictness: Strictness::default(),
            collisions: CollisionPolicy::default(),
            category_folds: default_category_folds(),
            rebuild_segment_filter: vec!["mode".to_string(), "1".to_string()],
        }
    }
}

impl NormalizeOptions {
    pub fn strict() -> Self {
        Self {
            strictness: Strictness::Strict,
            ..Self::default()
        }
    }
    pub fn is_strict(&self) -> bool {
        self.strictness == Strictness::Strict
    }
}

pub fn default_category_folds() -> IndexMap<String, String> {
    [
        ("colors", "color"),
        ("spacings", "spacing"),
        ("typographies", "typography"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_options_fill_in_defaults() {
        let options: NormalizeOptions =
            serde_json::from_str(r#"{"collisions": "keep-first"}"#).unwrap();
        assert_eq!(options.collisions, CollisionPolicy::KeepFirst);
        assert_eq!(options.strictness, Strictness::Lenient);
        assert_eq!(options.category_folds, default_category_folds());
        assert_eq!(options.rebuild_segment_filter, vec!["mode", "1"]);
    }

    #[test]
    fn folds_can_be_replaced() {
        let options: NormalizeOptions =
            serde_json::from_str(r#"{"category_folds": {"sizes": "size"}}"#).unwrap();
        assert_eq!(options.category_folds.len(), 1);
        assert_eq!(options.category_folds["sizes"], "size");
    }
}
