#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! lspgen Entity Model
//!
//! This crate defines the in-memory representation of the protocol metamodel:
//! enumerations, type aliases, interfaces (with properties and nested child
//! structures) and the request/notification descriptors. The model is produced
//! by an external loader and consumed here as JSON; every later compiler phase
//! works on these structures.

pub mod legacy;
pub mod meta_model;
pub mod node;

// Re-export the main model types for convenience
pub use legacy::LegacyModel;
pub use meta_model::*;
pub use node::{Node, TypedNode, Versioned};
