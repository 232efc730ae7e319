//! Key and flat-name normalization.
//!
//! Precedence, applied in one pass per name:
//!
//! 1. join the path with `-`, lowercase, and collapse whitespace runs to `-`;
//! 2. split into `-` separated words;
//! 3. drop every mode qualifier: the words `mode` `1`, or a `/mode-1` tail
//!    glued to a word (the word itself is kept);
//! 4. join what is left with `-`, and repeat 2-4 until nothing changes, so
//!    a qualifier formed by a removal (`mode-mode-1-1`) goes too.
//!
//! Qualifiers only match whole words, so `episode-1` or `mode-12` survive.

use indexmap::IndexMap;
use itertools::Itertools;

use crate::error::FlattenError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Word<'a> {
    Plain(&'a str),
    /// A word that carried a `/mode-1` tail, with the tail removed.
    Glued(&'a str),
    Qualifier,
}

peg::parser! {
  grammar name_parser() for str {
    rule qualifier() = "mode-1" &("-" / ![_])
    rule glued() = "/" qualifier()

    rule word() -> Word<'input>
        = qualifier() { Word::Qualifier }
        / w:$((!"-" !glued() [_])*) glued() { Word::Glued(w) }
        / w:$((!"-" [_])*) { Word::Plain(w) }

    pub(crate) rule words() -> Vec<Word<'input>> = word() ** "-"
  }
}

/// Lowercases and replaces each run of whitespace with a single dash.
pub fn dasherize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_space = false;
    for c in s.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('-');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// Normalizes one group or token key into a path segment.
pub fn normalize_key(key: &str, category_folds: &IndexMap<String, String>) -> String {
    let key = dasherize(key).replace("/mode-1", "");
    match category_folds.get(&key) {
        Some(singular) => singular.clone(),
        None => key,
    }
}

/// Derives the flat name of a token from its normalized path.
pub fn flat_name(path: &[String]) -> Result<String, FlattenError> {
    let mut name = dasherize(&path.iter().join("-"));
    loop {
        let stripped = strip_qualifiers(&name)?;
        if stripped == name {
            return Ok(name);
        }
        name = stripped;
    }
}

fn strip_qualifiers(name: &str) -> Result<String, FlattenError> {
    let words = name_parser::words(name).map_err(|err| FlattenError::Tokenize {
        name: name.to_string(),
        reason: err.to_string(),
    })?;
    Ok(words
        .into_iter()
        .filter_map(|word| match word {
            Word::Plain(w) | Word::Glued(w) => Some(w),
            Word::Qualifier => None,
        })
        .join("-"))
}
