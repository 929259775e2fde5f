//! Outcome of a generation run

use std::fmt;
use std::path::PathBuf;

/// An artifact that could not be produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactFailure {
    /// Artifact file name
    pub artifact: String,
    /// What went wrong
    pub error: String,
}

impl fmt::Display for ArtifactFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.artifact, self.error)
    }
}

/// Per-artifact results of a run.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Checksum of the cleaned model
    pub checksum: String,
    /// Artifacts written, in generation order
    pub written: Vec<PathBuf>,
    /// Artifacts that failed
    pub failed: Vec<ArtifactFailure>,
    /// Model validation warnings
    pub warnings: Vec<String>,
}

impl GenerationReport {
    /// Whether every artifact was written.
    pub fn is_success(&self) -> bool { self.failed.is_empty() }
}
