use std::{
    fs, io,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;
use token_vars_core::{parse_tokens, tokens_to_tree, DesignTokens, RebuiltTree};
use tracing::{debug, info};

use crate::{config::Config, render::render};

/// Bumped whenever the layout of [`Intermediate`] changes.
pub const INTERMEDIATE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Failed to read token source '{path}': {source}")]
    ReadSource { path: PathBuf, source: io::Error },

    #[error("Token source '{path}' is not valid JSON: {source}")]
    ParseSource {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Normalize(#[from] token_vars_core::Error),

    #[error("Failed to serialize the intermediate tree: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write '{path}': {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// The rebuilt tree as written to disk for other tools.
#[derive(Debug, Serialize)]
pub struct Intermediate<'a> {
    pub version: u32,
    pub tokens: &'a RebuiltTree,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltFile {
    pub platform: String,
    pub path: PathBuf,
}

pub fn load_tokens(path: &Path) -> Result<DesignTokens, BuildError> {
    let json = fs::read_to_string(path).map_err(|source| BuildError::ReadSource {
        path: path.to_path_buf(),
        source,
    })?;
    parse_tokens(&json).map_err(|source| BuildError::ParseSource {
        path: path.to_path_buf(),
        source,
    })
}

/// Renders every platform in memory, keyed by platform name.
pub fn render_platforms(
    tokens: &DesignTokens,
    config: &Config,
) -> Result<(RebuiltTree, IndexMap<String, String>), BuildError> {
    let tree = tokens_to_tree(tokens, &config.normalize)?;
    let rendered = config
        .platforms
        .iter()
        .map(|(name, platform)| (name.clone(), render(&tree, platform)))
        .collect();
    Ok((tree, rendered))
}

pub fn build(config: &Config) -> Result<Vec<BuiltFile>, BuildError> {
    let tokens = load_tokens(&config.source)?;
    debug!(source = %config.source.display(), "loaded tokens");
    let (tree, rendered) = render_platforms(&tokens, config)?;

    if let Some(path) = &config.intermediate {
        let json = serde_json::to_string_pretty(&Intermediate {
            version: INTERMEDIATE_VERSION,
            tokens: &tree,
        })?;
        write(path, &json)?;
        info!(path = %path.display(), "wrote intermediate tokens");
    }

    let mut built = Vec::new();
    for (name, text) in rendered {
        let path = config.platforms[&name].output_path();
        write(&path, &text)?;
        info!(platform = %name, path = %path.display(), "wrote variables");
        built.push(BuiltFile { platform: name, path });
    }
    Ok(built)
}

fn write(path: &Path, contents: &str) -> Result<(), BuildError> {
    let to_err = |source| BuildError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(to_err)?;
    }
    fs::write(path, contents).map_err(to_err)
}
