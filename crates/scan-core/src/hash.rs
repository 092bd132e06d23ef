use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::errors::{ErrorInfo, ScanError};

/// Serializes `value` to JSON with object keys in sorted order.
///
/// Values are routed through [`serde_json::Value`], whose map type keeps
/// keys ordered, so two structurally equal payloads always produce the same
/// bytes regardless of the insertion order of their maps.
pub fn to_canonical_json_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, ScanError> {
    let tree = serde_json::to_value(value)
        .map_err(|err| ScanError::Serde(ErrorInfo::new("json-encode", err.to_string())))?;
    serde_json::to_vec_pretty(&tree)
        .map_err(|err| ScanError::Serde(ErrorInfo::new("json-encode", err.to_string())))
}

/// Parses a JSON payload produced by [`to_canonical_json_bytes`].
pub fn from_json_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ScanError> {
    serde_json::from_slice(bytes)
        .map_err(|err| ScanError::Serde(ErrorInfo::new("json-decode", err.to_string())))
}

/// Computes a stable hexadecimal hash for the provided serializable payload.
pub fn stable_hash_string<T: Serialize + ?Sized>(value: &T) -> Result<String, ScanError> {
    let bytes = to_canonical_json_bytes(value)?;
    let digest = Sha256::digest(bytes);
    Ok(format!("{:x}", digest))
}
