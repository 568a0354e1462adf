//! Canonical hashing for fingerprints and cache keys.
//!
//! ## Determinism Guarantees
//!
//! - Struct fields serialize in declaration order
//! - Maps in hashed data are BTreeMaps, never HashMaps
//! - Streamed parts are length-prefixed so `("ab", "c")` and `("a", "bc")`
//!   hash differently

use std::hash::Hasher;

use serde::Serialize;
use xxhash_rust::xxh64::{xxh64, Xxh64};

/// Error type for canonical serialization.
#[derive(Debug, thiserror::Error)]
pub enum CanonicalError {
    /// The value could not be serialized.
    #[error("Canonical serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Serialize a value to canonical JSON bytes.
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, CanonicalError> {
    Ok(serde_json::to_vec(value)?)
}

/// Hash the canonical form of a serializable value.
pub fn canonical_hash<T: Serialize>(value: &T) -> Result<u64, CanonicalError> {
    Ok(xxh64(&to_canonical_bytes(value)?, 0))
}

/// Hash the canonical form of a value as a 16-digit hex string.
pub fn canonical_hash_hex<T: Serialize>(value: &T) -> Result<String, CanonicalError> {
    Ok(to_hex(canonical_hash(value)?))
}

/// Hash a sequence of byte strings without serializing them.
pub fn hash_parts<'a, I>(parts: I) -> u64
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let mut hasher = Xxh64::new(0);
    for part in parts {
        hasher.write(&(part.len() as u64).to_le_bytes());
        hasher.write(part);
    }
    hasher.finish()
}

/// Render a hash as a 16-digit hex string.
pub fn to_hex(hash: u64) -> String {
    format!("{:016x}", hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        name: String,
        grade: u8,
    }

    #[test]
    fn test_determinism() {
        let s = Sample { name: "Abuela".to_string(), grade: 2 };
        assert_eq!(canonical_hash(&s).unwrap(), canonical_hash(&s).unwrap());
        assert_eq!(canonical_hash_hex(&s).unwrap().len(), 16);
    }

    #[test]
    fn test_parts_are_length_prefixed() {
        let a = hash_parts([b"ab".as_slice(), b"c".as_slice()]);
        let b = hash_parts([b"a".as_slice(), b"bc".as_slice()]);
        assert_ne!(a, b);
        assert_eq!(a, hash_parts([b"ab".as_slice(), b"c".as_slice()]));
    }
}
