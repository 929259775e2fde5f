//! Model Compiler
//!
//! Loads a model file in either schema and runs the model passes over it.

use std::path::Path;

use analysis::{CleanupRules, CompilerContext, CompilerPhase, ModelCleanup, ModelValidator};
use config::ModelSchema;
use ir::{LegacyModel, MetaModel};
use tracing::{info, warn};

use crate::Result;

/// Load a model file, converting the legacy schema on the fly.
pub fn load_model(path: &Path, schema: ModelSchema) -> Result<MetaModel> {
    let model = match schema {
        ModelSchema::Meta => MetaModel::from_file(path)?,
        ModelSchema::Legacy => MetaModel::from(LegacyModel::from_file(path)?),
    };
    info!(
        "Loaded {} enumerations, {} aliases, {} interfaces, {} requests and {} notifications \
         from {}",
        model.enumerations.len(),
        model.type_aliases.len(),
        model.interfaces.len(),
        model.requests.len(),
        model.notifications.len(),
        path.display()
    );
    Ok(model)
}

/// Runs the model passes in order: cleanup, then validation.
pub struct LspCompiler {
    phases: Vec<Box<dyn CompilerPhase>>,
}

impl Default for LspCompiler {
    fn default() -> Self { Self::new(CleanupRules::default(), false) }
}

impl LspCompiler {
    /// Create a compiler with the given cleanup rules. A strict compiler
    /// fails when validation finds anything.
    pub fn new(rules: CleanupRules, strict: bool) -> Self {
        let validator = if strict { ModelValidator::strict() } else { ModelValidator::new() };
        Self { phases: vec![Box::new(ModelCleanup::new(rules)), Box::new(validator)] }
    }

    /// Run compiler passes on the model
    pub fn run_compiler_passes(&self, model: MetaModel) -> Result<CompilerContext> {
        let mut ctx = CompilerContext::new(model);
        for phase in &self.phases {
            info!("Running phase {}: {}", phase.name(), phase.description());
            phase.run(&mut ctx)?;
        }

        if !ctx.diagnostics.warnings.is_empty() {
            warn!("Model passes reported {} warnings", ctx.diagnostics.warnings.len());
        }
        Ok(ctx)
    }
}
