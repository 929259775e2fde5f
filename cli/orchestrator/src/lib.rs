#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
//! Command-line surface of lspgen: argument parsing and config resolution.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use config::{Config, ModelSchema};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or saved.
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    /// The pipeline failed before producing artifacts.
    #[error(transparent)]
    Pipeline(#[from] pipeline::PipelineError),
    /// Some artifacts were not written.
    #[error("{0} artifact(s) failed")]
    ArtifactsFailed(usize),
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Command-line interface of lspgen.
#[derive(Parser, Debug)]
#[command(name = "lspgen", about = "Generate C++ LSP bindings from a protocol metamodel", version)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate all artifacts
    Generate(GenerateArgs),
    /// Print the order in which aliases and structures are declared
    Order(ModelArgs),
    /// Write the default configuration file
    InitConfig {
        /// Destination; defaults to the user config directory
        path: Option<PathBuf>,
    },
}

/// Model selection flags.
#[derive(Args, Debug, Default)]
pub struct ModelArgs {
    /// Configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Model file, overriding the configuration
    #[arg(long)]
    pub model: Option<PathBuf>,
    /// Read the model in the legacy flat schema
    #[arg(long)]
    pub legacy: bool,
    /// Fail when model validation reports anything
    #[arg(long)]
    pub strict: bool,
    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Flags of the `generate` command.
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Model selection
    #[command(flatten)]
    pub model: ModelArgs,
    /// Output directory
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Namespace wrapping the generated code
    #[arg(long)]
    pub namespace: Option<String>,
}

impl ModelArgs {
    /// Load the configuration and apply the flags on top.
    ///
    /// Without `--config` the user config file is used when present.
    pub fn resolve(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => match Config::default_path() {
                Ok(path) if path.is_file() => Config::from_file(path)?,
                _ => Config::default(),
            },
        };

        if let Some(model) = &self.model {
            config.model.path = model.clone();
        }
        if self.legacy {
            config.model.schema = ModelSchema::Legacy;
        }
        if self.strict {
            config.model.strict = true;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        Ok(config)
    }
}

impl GenerateArgs {
    /// Resolve the configuration including output overrides.
    pub fn resolve(&self) -> Result<Config> {
        let mut config = self.model.resolve()?;
        if let Some(output) = &self.output {
            config.output.dir = output.clone();
        }
        if let Some(namespace) = &self.namespace {
            config.output.namespace = namespace.clone();
        }
        Ok(config)
    }
}
