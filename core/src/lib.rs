//! Normalization core: flattens a DTCG token document into uniquely named
//! tokens, then re-nests the names into a tree a variable renderer can walk.

pub mod document;
pub mod error;
pub mod flatten;
pub mod name;
pub mod options;
pub mod rebuild;

pub use document::{parse_tokens, DesignTokens, Token, TokenOrGroup, TokenValue};
pub use error::{Error, FlattenError, RebuildError};
pub use flatten::{flatten, FlatToken, FlatTokens};
pub use options::{CollisionPolicy, NormalizeOptions, Strictness};
pub use rebuild::{rebuild, RebuiltNode, RebuiltToken, RebuiltTree};

/// Runs both stages on a parsed document.
pub fn tokens_to_tree(tokens: &DesignTokens, options: &NormalizeOptions) -> Result<RebuiltTree, Error> {
    let flat = flatten(tokens, options)?;
    Ok(rebuild(&flat, options)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn end_to_end() {
        let tokens: DesignTokens = serde_json::from_value(json!({
            "Colors": {"Brand": {"Primary": {"$type": "color", "$value": "#112233"}}},
            "Spacings": {"Small": {"Mode 1": {"$type": "number", "$value": 4}}}
        }))
        .unwrap();
        let options = NormalizeOptions::default();

        let flat = flatten(&tokens, &options).unwrap();
        let summary: serde_json::Value = flat
            .iter()
            .map(|(name, token)| {
                (
                    name.clone(),
                    json!({"value": token.value, "type": token.type_}),
                )
            })
            .collect::<serde_json::Map<_, _>>()
            .into();
        assert_eq!(
            summary,
            json!({
                "color-brand-primary": {"value": "#112233", "type": "color"},
                "spacing-small": {"value": 4, "type": "number"}
            })
        );

        let tree = rebuild(&flat, &options).unwrap();
        assert_eq!(
            serde_json::to_value(&tree).unwrap(),
            json!({
                "color": {"brand": {"primary": {"value": "#112233", "type": "color"}}},
                "spacing": {"small": {"value": "4px", "type": "number"}}
            })
        );
    }

    fn key_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            "[A-Za-z][A-Za-z0-9 ]{0,8}",
            Just("Mode 1".to_string()),
            Just("Colors".to_string()),
            Just("$description".to_string()),
        ]
    }

    fn node_strategy() -> impl Strategy<Value = serde_json::Value> {
        let leaf = prop_oneof![
            (0u32..64).prop_map(|n| json!({"$type": "number", "$value": n})),
            "#[0-9a-f]{6}".prop_map(|c| json!({"$type": "color", "$value": c})),
            Just(json!([1, 2])),
        ];
        leaf.prop_recursive(4, 32, 4, |inner| {
            prop::collection::vec((key_strategy(), inner), 0..4).prop_map(|entries| {
                serde_json::Value::Object(entries.into_iter().collect())
            })
        })
    }

    proptest! {
        #[test]
        fn pipeline_is_deterministic(value in node_strategy()) {
            let tokens: DesignTokens = match serde_json::from_value(value) {
                Ok(tokens) => tokens,
                Err(_) => return Ok(()),
            };
            let options = NormalizeOptions::default();
            let first = serde_json::to_string(&tokens_to_tree(&tokens, &options).unwrap()).unwrap();
            let second = serde_json::to_string(&tokens_to_tree(&tokens, &options).unwrap()).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn flat_names_carry_no_mode_qualifier(value in node_strategy()) {
            let tokens: DesignTokens = match serde_json::from_value(value) {
                Ok(tokens) => tokens,
                Err(_) => return Ok(()),
            };
            let flat = flatten(&tokens, &NormalizeOptions::default()).unwrap();
            for name in flat.keys() {
                prop_assert!(!name.split('-').collect::<Vec<_>>().windows(2).any(|w| w == ["mode", "1"]));
                prop_assert!(!name.is_empty());
            }
        }
    }
}
