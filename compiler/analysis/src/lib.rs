#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! lspgen Compiler Analysis and Transformation
//!
//! This crate provides the model-level passes of the generator: the cleanup
//! pass that prepares the loaded metamodel, the dependency resolver that
//! orders aliases and structures for emission, the interface flattener used by
//! serialization bindings, a warn-only validator and the model checksum.

use std::collections::BTreeMap;

use ir::MetaModel;
use thiserror::Error;

pub mod checksum;
pub mod cleanup;
pub mod flatten;
pub mod resolver;
pub mod validator;

// Re-export analysis types
pub use checksum::model_checksum;
pub use cleanup::{CleanupReport, CleanupRules, ModelCleanup};
pub use flatten::InterfaceFlattener;
pub use resolver::{resolve_order, BlockedNode, DependencyResolver, ResolveError};
pub use validator::ModelValidator;

/// Compiler context shared by the model passes
#[derive(Debug)]
pub struct CompilerContext {
    /// The metamodel - single source of truth
    pub model: MetaModel,
    /// Compiler diagnostics
    pub diagnostics: CompilerDiagnostics,
}

impl CompilerContext {
    /// Create a new compiler context around a loaded model
    pub fn new(model: MetaModel) -> Self {
        Self { model, diagnostics: CompilerDiagnostics::default() }
    }

    /// Add diagnostic warning
    pub fn add_warning(&mut self, warning: String) { self.diagnostics.warnings.push(warning); }

    /// Add diagnostic error
    pub fn add_error(&mut self, error: String) { self.diagnostics.errors.push(error); }

    /// Add `count` to a named statistic
    pub fn record_stat(&mut self, name: &str, count: usize) {
        *self.diagnostics.stats.entry(name.to_string()).or_insert(0) += count;
    }
}

/// Compiler diagnostics
#[derive(Debug, Default, Clone)]
pub struct CompilerDiagnostics {
    /// Warnings generated
    pub warnings: Vec<String>,
    /// Errors generated
    pub errors: Vec<String>,
    /// Statistics, keyed by name
    pub stats: BTreeMap<String, usize>,
}

#[derive(Debug, Error)]
/// Errors produced by individual compiler phases.
pub enum PhaseError {
    /// Dependency ordering failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    /// JSON serialization error.
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    /// Strict validation found problems; they are listed in the diagnostics.
    #[error("model validation failed with {count} error(s)")]
    Validation {
        /// Number of findings
        count: usize,
    },
}

/// Result alias for phase execution.
pub type Result<T> = std::result::Result<T, PhaseError>;

/// Result of a compiler phase
/// Empty Ok indicates success; errors carry context.
pub type PhaseResult = Result<()>;

/// Trait for compiler phases (cleanup, validation)
///
/// Every phase gets the whole context, may rewrite the model and reports
/// through the diagnostics.
pub trait CompilerPhase {
    /// Name of the phase
    fn name(&self) -> &str;

    /// Description of what this phase does
    fn description(&self) -> &str;

    /// Execute this phase on the compiler context
    fn run(&self, ctx: &mut CompilerContext) -> PhaseResult;
}
