use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlattenError {
    #[error("Malformed token at '{path}': {reason}")]
    MalformedToken { path: String, reason: String },

    #[error("Unsupported {kind} at '{path}'")]
    UnsupportedNode { path: String, kind: &'static str },

    #[error("Token at '{path}' normalizes to an empty name")]
    EmptyName { path: String },

    #[error("Token name '{name}' is produced by both '{first}' and '{second}'")]
    Collision {
        name: String,
        first: String,
        second: String,
    },

    #[error("Failed to tokenize name '{name}': {reason}")]
    Tokenize { name: String, reason: String },
}

#[derive(Debug, Error)]
pub enum RebuildError {
    #[error("Token '{name}' needs '{segment}' to be a group, but it is a token")]
    LeafInPath { name: String, segment: String },

    #[error("Token '{name}' would replace the existing {existing} at '{segment}'")]
    Occupied {
        name: String,
        segment: String,
        existing: &'static str,
    },

    #[error("Token '{name}' has no segments left after filtering")]
    EmptyPath { name: String },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Flatten(#[from] FlattenError),
    #[error(transparent)]
    Rebuild(#[from] RebuildError),
}
