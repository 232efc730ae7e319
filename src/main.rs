use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use token_vars::{
    build, load_tokens,
    normalize::{flatten, Strictness},
    Config,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "token-vars", version, about = "Turns DTCG design tokens into CSS and SCSS variables")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build every configured platform
    Build {
        /// JSON config file; built-in css/scss platforms when omitted
        #[arg(long, short)]
        config: Option<PathBuf>,
        /// Token document, overriding the config
        #[arg(long)]
        source: Option<PathBuf>,
        /// Fail on malformed tokens and empty names instead of skipping them
        #[arg(long)]
        strict: bool,
        /// Also write the versioned intermediate tree here
        #[arg(long)]
        intermediate: Option<PathBuf>,
    },
    /// Print the flattened tokens as JSON
    Flatten {
        source: PathBuf,
        #[arg(long, short)]
        config: Option<PathBuf>,
        #[arg(long)]
        strict: bool,
    },
    /// List the configured platforms and their outputs
    ListPlatforms {
        #[arg(long, short)]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<&Path>, strict: bool) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if strict {
        config.normalize.strictness = Strictness::Strict;
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Build {
            config,
            source,
            strict,
            intermediate,
        } => {
            let mut config = load_config(config.as_deref(), strict)?;
            if let Some(source) = source {
                config.source = source;
            }
            if intermediate.is_some() {
                config.intermediate = intermediate;
            }
            let built = build(&config).context("build failed")?;
            for file in built {
                println!("{}: {}", file.platform, file.path.display());
            }
        }
        Command::Flatten {
            source,
            config,
            strict,
        } => {
            let config = load_config(config.as_deref(), strict)?;
            let tokens = load_tokens(&source)?;
            let flat = flatten(&tokens, &config.normalize)?;
            println!("{}", serde_json::to_string_pretty(&flat)?);
        }
        Command::ListPlatforms { config } => {
            let config = load_config(config.as_deref(), false)?;
            for (name, platform) in &config.platforms {
                println!(
                    "{name} ({:?}): {}",
                    platform.dialect,
                    platform.output_path().display()
                );
            }
        }
    }
    Ok(())
}
