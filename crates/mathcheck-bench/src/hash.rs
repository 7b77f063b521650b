use mathcheck_core::errors::MathcheckError;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::serde::to_canonical_json_bytes;

/// Lowercase hex SHA-256 of the canonical JSON encoding of `value`.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, MathcheckError> {
    let bytes = to_canonical_json_bytes(value)?;
    Ok(format!("{:x}", Sha256::digest(&bytes)))
}
