//! Turns DTCG design tokens into CSS custom properties and SCSS variables.

pub mod config;
pub mod pipeline;
pub mod render;
pub mod transform;

pub use config::{Config, ConfigError, Dialect, PlatformConfig, Transform};
pub use pipeline::{build, load_tokens, render_platforms, BuildError, BuiltFile};
pub use token_vars_core as normalize;
