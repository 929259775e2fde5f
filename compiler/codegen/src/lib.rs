#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Code generation for LSP C++ bindings.
//!
//! This crate turns a cleaned [`MetaModel`] into header text: type declarations in
//! dependency order, serialization bindings and request/notification wrappers.
//! Writing the artifacts to disk is left to the pipeline crate.

pub mod generators;

use std::collections::BTreeSet;

use analysis::ResolveError;
use ir::MetaModel;
use thiserror::Error;

pub use generators::{BindingsGenerator, DeclarationsGenerator, MessagesGenerator};

/// Error type for code generation operations in this crate.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// The aliases and structures could not be ordered.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Convenient result type for codegen functions in this crate.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Settings shared by every generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Namespace wrapping every artifact
    pub namespace: String,
    /// Declarations file name, also used for includes
    pub declarations_file: String,
    /// Bindings file name
    pub bindings_file: String,
    /// Notification wrappers file name
    pub notifications_file: String,
    /// Request wrappers file name
    pub requests_file: String,
    /// Model checksum written into the banner
    pub checksum: Option<String>,
    /// Alias names the target already provides
    pub builtin_aliases: BTreeSet<String>,
    /// Interfaces that only get a forward-declared binding
    pub forward_declared: BTreeSet<String>,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            namespace: "Lsp".to_string(),
            declarations_file: "types.h".to_string(),
            bindings_file: "types_json.h".to_string(),
            notifications_file: "notifications.h".to_string(),
            requests_file: "requests.h".to_string(),
            checksum: None,
            builtin_aliases: ["integer", "uinteger", "decimal"]
                .into_iter()
                .map(String::from)
                .collect(),
            forward_declared: ["SelectionRange", "FormattingOptions", "ChangeAnnotationsType"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Defines the core interface for rendering one artifact from the cleaned model.
pub trait CodeGenerator {
    /// File name of the artifact this generator renders.
    fn artifact(&self) -> &str;

    /// Render the complete artifact text.
    fn generate(&self, model: &MetaModel) -> Result<String>;
}

/// All four generators, in artifact order.
pub fn all_generators(options: &EmitOptions) -> Vec<Box<dyn CodeGenerator>> {
    vec![
        Box::new(DeclarationsGenerator::new(options.clone())),
        Box::new(BindingsGenerator::new(options.clone())),
        Box::new(MessagesGenerator::notifications(options.clone())),
        Box::new(MessagesGenerator::requests(options.clone())),
    ]
}

/// Sub-crate: **`utils`**
///
/// Utility functions for code generation.
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_artifacts() {
        let names: Vec<String> = all_generators(&EmitOptions::default())
            .iter()
            .map(|g| g.artifact().to_string())
            .collect();
        assert_eq!(names, vec!["types.h", "types_json.h", "notifications.h", "requests.h"]);
    }
}
