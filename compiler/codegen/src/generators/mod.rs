//! Artifact generators.
//!
//! Each generator renders one output artifact from the cleaned model.

/// Sub-crate generates: **`doc_comment`**
///
/// Produces `/** ... */` documentation blocks for declarations.
pub mod doc_comment;

/// Field materialization and union ordering
pub mod property;
pub use property::{MetadataIndex, UnionKey};

/// Dependency-ordered type declarations
pub mod declarations;
pub use declarations::DeclarationsGenerator;

/// Serialization bindings
pub mod bindings;
pub use bindings::BindingsGenerator;

/// Request and notification wrappers
pub mod messages;
pub use messages::{method_to_name, MessagesGenerator};
