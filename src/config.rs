use std::{
    fs, io,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use token_vars_core::NormalizeOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Platform '{platform}' asks for output_references, which are never emitted")]
    OutputReferences { platform: String },

    #[error("Platform '{platform}' has an empty destination")]
    EmptyDestination { platform: String },
}

/// Output syntax of a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// `--name: value;` inside `:root`.
    Css,
    /// `$name: value;`
    Scss,
}

/// A pass applied to every variable before it is rendered, in list order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Transform {
    /// Category / type / item attributes from the first three path segments.
    #[serde(rename = "attribute/cti")]
    AttributeCti,
    #[serde(rename = "name/kebab")]
    NameKebab,
    #[serde(rename = "name/snake")]
    NameSnake,
    #[serde(rename = "name/camel")]
    NameCamel,
    #[serde(rename = "name/constant")]
    NameConstant,
    /// Normalizes color values to hex, or `rgba()` when translucent.
    #[serde(rename = "color/css")]
    ColorCss,
}

pub fn default_transforms() -> Vec<Transform> {
    vec![Transform::AttributeCti, Transform::NameKebab, Transform::ColorCss]
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlatformConfig {
    pub dialect: Dialect,
    pub build_path: PathBuf,
    pub destination: String,
    #[serde(default = "default_transforms")]
    pub transforms: Vec<Transform>,
    #[serde(default)]
    pub output_references: bool,
}

impl PlatformConfig {
    pub fn new(dialect: Dialect, build_path: impl Into<PathBuf>, destination: impl Into<String>) -> Self {
        Self {
            dialect,
            build_path: build_path.into(),
            destination: destination.into(),
            transforms: default_transforms(),
            output_references: false,
        }
    }
    pub fn output_path(&self) -> PathBuf {
        self.build_path.join(&self.destination)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub source: PathBuf,
    /// Where to write the versioned intermediate tree, if anywhere.
    pub intermediate: Option<PathBuf>,
    pub normalize: NormalizeOptions,
    pub platforms: IndexMap<String, PlatformConfig>,
}

impl Default for Config {
    fn default() -> Self {
        let mut platforms = IndexMap::new();
        platforms.insert(
            "css".to_string(),
            PlatformConfig::new(Dialect::Css, "build/css/", "variables.css"),
        );
        platforms.insert(
            "scss".to_string(),
            PlatformConfig::new(Dialect::Scss, "build/scss/", "variables.scss"),
        );
        Self {
            source: PathBuf::from("tokens/tokens.json"),
            intermediate: None,
            normalize: NormalizeOptions::default(),
            platforms,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config file. Relative paths inside it are taken relative to
    /// the file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_json(&json)?;
        if let Some(dir) = path.parent() {
            config.rebase(dir);
        }
        Ok(config)
    }

    fn rebase(&mut self, dir: &Path) {
        self.source = dir.join(&self.source);
        if let Some(intermediate) = &mut self.intermediate {
            *intermediate = dir.join(&*intermediate);
        }
        for platform in self.platforms.values_mut() {
            platform.build_path = dir.join(&platform.build_path);
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, platform) in &self.platforms {
            if platform.output_references {
                return Err(ConfigError::OutputReferences {
                    platform: name.clone(),
                });
            }
            if platform.destination.is_empty() {
                return Err(ConfigError::EmptyDestination {
                    platform: name.clone(),
                });
            }
        }
        Ok(())
    }
}
