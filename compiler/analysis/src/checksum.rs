//! Deterministic content hash of a model

use ir::MetaModel;
use sha2::{Digest, Sha256};

/// SHA-256 of the model's JSON serialization, as lowercase hex.
pub fn model_checksum(model: &MetaModel) -> Result<String, serde_json::Error> {
    let json_repr = serde_json::to_string(model)?;
    let mut hasher = Sha256::new();
    hasher.update(json_repr.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}
