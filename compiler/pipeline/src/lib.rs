#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! High-level pipeline that regenerates the LSP C++ bindings from a model file.
//!
//! ## Module Organization
//!
//! - `generation_context` - Settings resolved from the configuration
//! - `model_compiler` - Model loading and the cleanup/validation passes
//! - `orchestration` - Main entry points (`run`, `emission_order`)
//! - `report` - Per-artifact outcome of a run

use thiserror::Error;

/// Convenient result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can occur while running the generation pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The model file could not be loaded.
    #[error(transparent)]
    Model(#[from] ir::ModelError),
    /// Error from a compiler phase.
    #[error(transparent)]
    Phase(#[from] analysis::PhaseError),
    /// I/O error while creating the output directory.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// Module declarations
pub mod generation_context;
pub mod model_compiler;
pub mod orchestration;
pub mod report;

pub use generation_context::GenerationContext;
pub use model_compiler::{load_model, LspCompiler};
pub use orchestration::{emission_order, run, write_artifact};
pub use report::{ArtifactFailure, GenerationReport};
