//! Generation context for the pipeline.
//!
//! Resolves a [`Config`] into the concrete settings every stage needs: where the
//! model lives, which cleanup rules apply and how the artifacts are emitted.

use std::path::PathBuf;

use analysis::CleanupRules;
use codegen::EmitOptions;
use config::{Config, ModelSchema};

/// Context containing everything a run needs
#[derive(Debug, Clone)]
pub struct GenerationContext {
    /// Path to the model file
    pub model_path: PathBuf,
    /// Schema of the model file
    pub schema: ModelSchema,
    /// Fail on validation findings
    pub strict: bool,
    /// Where the artifacts are written
    pub output_dir: PathBuf,
    /// Cleanup rename table and denylists
    pub cleanup_rules: CleanupRules,
    /// Emission settings; the checksum is filled in during the run
    pub emit: EmitOptions,
}

impl GenerationContext {
    /// Resolve a configuration, applying `[rules]` overrides to the defaults.
    pub fn from_config(config: &Config) -> Self {
        let mut cleanup_rules = CleanupRules::default();
        let mut emit = EmitOptions {
            namespace: config.output.namespace.clone(),
            declarations_file: config.output.declarations.clone(),
            bindings_file: config.output.bindings.clone(),
            notifications_file: config.output.notifications.clone(),
            requests_file: config.output.requests.clone(),
            ..EmitOptions::default()
        };

        let rules = &config.rules;
        if let Some(renames) = &rules.enum_renames {
            cleanup_rules.enum_renames = renames.clone();
        }
        if let Some(names) = &rules.removed_interfaces {
            cleanup_rules.removed_interfaces = names.iter().cloned().collect();
        }
        if let Some(names) = &rules.removed_type_aliases {
            cleanup_rules.removed_type_aliases = names.iter().cloned().collect();
        }
        if let Some(names) = &rules.builtin_aliases {
            emit.builtin_aliases = names.iter().cloned().collect();
        }
        if let Some(names) = &rules.forward_declared {
            emit.forward_declared = names.iter().cloned().collect();
        }

        Self {
            model_path: config.model.path.clone(),
            schema: config.model.schema,
            strict: config.model.strict,
            output_dir: config.output.dir.clone(),
            cleanup_rules,
            emit,
        }
    }

    /// Path of an artifact inside the output directory
    pub fn artifact_path(&self, file_name: &str) -> PathBuf { self.output_dir.join(file_name) }
}

impl Default for GenerationContext {
    fn default() -> Self { Self::from_config(&Config::default()) }
}
