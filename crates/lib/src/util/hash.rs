//! Configuration fingerprinting.
//!
//! This module provides:
//! - `ConfigHash`: A truncated 20-character hash identifying a configuration
//! - `Hashable`: Hashing of any serializable value via its JSON form

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::consts::FINGERPRINT_LEN;

pub type HashError = serde_json::Error;

/// A content hash identifying a configuration.
///
/// The hash is a 20-character truncated SHA-256 of the JSON-serialized value.
///
/// # Format
///
/// The hash is a lowercase hexadecimal string, e.g., `"a1b2c3d4e5f6789012ab"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ConfigHash(pub String);

impl std::fmt::Display for ConfigHash {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

pub trait Hashable: Serialize {
  fn compute_hash(&self) -> Result<ConfigHash, HashError> {
    let serialized = serde_json::to_string(self)?;
    let mut hasher = Sha256::new();
    hasher.update(serialized.as_bytes());
    let full = format!("{:x}", hasher.finalize());
    Ok(ConfigHash(full[..FINGERPRINT_LEN].to_string()))
  }
}
