#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Shared value types for the lspgen compiler.
//!
//! Entities of the protocol metamodel carry a `since` tag naming the protocol
//! version that introduced them. This crate parses those tags into an ordered
//! [`ProtocolVersion`] so the code generator can sort union alternatives by age.

/// Protocol version representation and parsing
pub mod version;

/// Re-export the `ProtocolVersion` type for convenience.
pub use version::{ProtocolVersion, VersionError};
