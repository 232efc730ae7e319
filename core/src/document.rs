use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A parsed design-token document. The root is always a group.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct DesignTokens {
    pub root: TokenGroup,
}

pub type TokenGroup = IndexMap<String, TokenOrGroup>;

/// A node of the token tree.
///
/// Classification follows the DTCG shape: an object carrying both `$type` and
/// a non-array `$value` is a token; any other object is a group; arrays and
/// bare primitives end up in `Other`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TokenOrGroup {
    Token(Token),
    Group(TokenGroup),
    Other(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Token {
    #[serde(rename = "$type")]
    pub type_: String,
    #[serde(rename = "$value")]
    pub value: TokenValue,
    /// Every other key of the token object (`$description`, `$extensions`, ...).
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TokenValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    /// Composite values are carried through opaquely.
    Composite(IndexMap<String, serde_json::Value>),
}

impl TokenValue {
    pub fn as_number(&self) -> Option<&serde_json::Number> {
        match self {
            TokenValue::Number(n) => Some(n),
            _ => None,
        }
    }
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TokenValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Null => f.write_str("null"),
            TokenValue::Bool(b) => write!(f, "{b}"),
            TokenValue::Number(n) => f.write_str(&format_number(n)),
            TokenValue::String(s) => f.write_str(s),
            TokenValue::Composite(map) => {
                let json = serde_json::to_string(map).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

/// Prints a number the way a JavaScript toolchain would: integral floats lose
/// their fraction (`4.0` -> `4`), and magnitudes outside `[1e-6, 1e21)` use
/// exponent notation with an explicit sign (`1e+21`, `1.5e-7`).
pub fn format_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map(format_f64).unwrap_or_else(|| n.to_string())
    }
}

fn format_f64(f: f64) -> String {
    let magnitude = f.abs();
    if f == 0.0 || (1e-6..1e21).contains(&magnitude) || !f.is_finite() {
        return f.to_string();
    }
    let exp = format!("{f:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

pub fn parse_tokens(json: &str) -> Result<DesignTokens, serde_json::Error> {
    serde_json::from_str(json)
}
