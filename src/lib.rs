// SPDX-License-Identifier: CC0-1.0

//! lspgen umbrella crate.
//!
//! This crate primarily serves as the workspace root and re-exports the entry
//! points most callers need: the entity model and the generation pipeline.
//!
//! All functional code lives in the workspace member crates under
//! `primitives`, `compiler` and `cli`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![warn(deprecated_in_future)]
#![doc(test(attr(warn(unused))))]

pub use ir::{LegacyModel, MetaModel};
pub use pipeline::{emission_order, run, GenerationContext, GenerationReport, PipelineError};

/// Miscellaneous metadata about the lspgen workspace.
pub mod lspgen_meta {
    /// Version string for the umbrella crate, as reported by Cargo.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}
