#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! lspgen Configuration
//!
//! This crate provides configuration management for lspgen.
//! It handles loading, saving, and managing configuration files that specify:
//! - Which model file to load, and in which schema
//! - Where the artifacts go and how they are named
//! - Logging configuration
//! - Overrides for the cleanup and emission name lists
//!
//! Configuration is stored in TOML format. Every section has defaults, so a
//! file only needs to name what differs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    /// Failed to parse the TOML configuration file
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize configuration to TOML format
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Could not locate the user's configuration directory
    #[error("Could not find user config directory")]
    ConfigDirUnavailable,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model input settings
    pub model: ModelConfig,
    /// Artifact output settings
    pub output: OutputConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Name list overrides
    pub rules: RulesConfig,
}

/// Schema of the model file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelSchema {
    /// Structured metamodel with typed expressions
    #[default]
    Meta,
    /// Flat model with string-typed expressions
    Legacy,
}

/// Model input configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the model JSON file
    pub path: PathBuf,
    /// Schema of the model file
    pub schema: ModelSchema,
    /// Treat validation findings as errors
    pub strict: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self { path: PathBuf::from("model.json"), schema: ModelSchema::Meta, strict: false }
    }
}

/// Artifact output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where to write the artifacts
    pub dir: PathBuf,
    /// Namespace wrapping the generated code
    pub namespace: String,
    /// Type declarations file name
    pub declarations: String,
    /// Serialization bindings file name
    pub bindings: String,
    /// Notification wrappers file name
    pub notifications: String,
    /// Request wrappers file name
    pub requests: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("generated"),
            namespace: "Lsp".to_string(),
            declarations: "types.h".to_string(),
            bindings: "types_json.h".to_string(),
            notifications: "notifications.h".to_string(),
            requests: "requests.h".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self { Self { level: "info".to_string() } }
}

/// Overrides for the built-in name lists. An absent entry keeps the default list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Enumeration renames, old name to new name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_renames: Option<BTreeMap<String, String>>,
    /// Interfaces removed during cleanup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed_interfaces: Option<Vec<String>>,
    /// Type aliases removed during cleanup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed_type_aliases: Option<Vec<String>>,
    /// Alias names the target language already provides
    #[serde(skip_serializing_if = "Option::is_none")]
    pub builtin_aliases: Option<Vec<String>>,
    /// Interfaces whose bindings are only forward-declared
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forward_declared: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from a TOML file at `path`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save this configuration as a pretty-printed TOML file at `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Returns the default config file path:
    /// `{config_dir()}/lspgen/config.toml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir =
            dirs::config_dir().ok_or(ConfigError::ConfigDirUnavailable)?.join("lspgen");
        Ok(config_dir.join("config.toml"))
    }
}
