//! Protocol version tags.
//!
//! The metamodel marks enumerations, aliases, interfaces and individual type
//! expressions with the protocol version that introduced them (`"3.16.0"`).
//! Some tags carry a trailing annotation such as `"3.18.0 - proposed"`; only
//! the leading `MAJOR.MINOR[.PATCH]` part takes part in ordering.
use std::cmp::Ordering;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A parsed protocol version.
///
/// Accepts formats like:
/// - `3.17.0` or `v3.17.0`
/// - `3.17` (patch defaults to `0`)
/// - `3.18.0 - proposed` (trailing annotation is kept in `version_string` only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolVersion {
    /// Original tag as found in the metamodel.
    pub version_string: String,
    /// Major version component (e.g., `3` in `3.17.0`).
    pub major: u32,
    /// Minor version component (e.g., `17` in `3.17.0`).
    pub minor: u32,
    /// Patch component (e.g., `0` in `3.17.0`).
    pub patch: u32,
}

// Equality follows the numeric components so it agrees with `Ord`.
impl PartialEq for ProtocolVersion {
    fn eq(&self, other: &Self) -> bool { self.cmp(other) == Ordering::Equal }
}

impl Eq for ProtocolVersion {}

impl PartialOrd for ProtocolVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for ProtocolVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch))
    }
}

/// Errors that can occur while parsing or handling versions.
#[derive(Error, Debug)]
pub enum VersionError {
    /// The provided string did not match the expected version format.
    #[error("Invalid version format: {0}")]
    InvalidFormat(String),
    /// A numeric parse or regex error occurred.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ProtocolVersion {
    /// Parse a `ProtocolVersion` from a string in the `[v]MAJOR.MINOR[.PATCH]` format.
    pub fn from_string(s: &str) -> std::result::Result<Self, VersionError> {
        let re = Regex::new(r"^\s*(?:v)?(\d+)\.(\d+)(?:\.(\d+))?(?:\s.*)?$")
            .map_err(|e: regex::Error| VersionError::Parse(e.to_string()))?;
        let caps = re.captures(s).ok_or_else(|| VersionError::InvalidFormat(s.to_string()))?;

        Ok(Self {
            version_string: s.to_string(),
            major: caps[1]
                .parse()
                .map_err(|e: std::num::ParseIntError| VersionError::Parse(e.to_string()))?,
            minor: caps[2]
                .parse()
                .map_err(|e: std::num::ParseIntError| VersionError::Parse(e.to_string()))?,
            patch: caps.get(3).map(|m| m.as_str().parse().unwrap_or(0)).unwrap_or(0),
        })
    }

    /// Return the original version string.
    pub fn as_str(&self) -> &str { &self.version_string }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.version_string) }
}

impl std::str::FromStr for ProtocolVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Self::from_string(s) }
}
