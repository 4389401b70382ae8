use std::fmt;

use sha1::{Digest, Sha1};

use crate::error::{Error, Result};
use crate::object::ObjectType;

/// SHA-1 content address, stored as its 40-char lowercase hex rendering.
///
/// equality is string equality. the empty value stands for an object id
/// that has not been assigned yet (objects get their hash in
/// `hash_object_write`).
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hash(String);

impl Hash {
    /// parse from a 40-char lowercase hex string
    pub fn from_hex(s: &str) -> Result<Self> {
        if s.len() != 40 || !s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)) {
            return Err(Error::InvalidHashHex(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    /// wrap a raw 20-byte SHA-1 digest
    pub fn from_digest(digest: [u8; 20]) -> Self {
        Self(hex::encode(digest))
    }

    /// wrap a decoded hash value without validation.
    /// the wire format round-trips whatever value was encoded, including
    /// the empty stand-in for an unassigned id.
    pub(crate) fn from_raw(value: String) -> Self {
        Self(value)
    }

    /// the hex value
    pub fn value(&self) -> &str {
        &self.0
    }

    /// true once an object id has been assigned
    pub fn is_set(&self) -> bool {
        !self.0.is_empty()
    }

    /// split into index components for the object store fan-out
    /// returns (first 2 hex chars, remaining 38 hex chars)
    pub fn split_prefix(&self) -> (&str, &str) {
        self.0.split_at(2)
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "Hash(unset)")
        } else {
            write!(f, "Hash({})", self.0.get(..12).unwrap_or(&self.0))
        }
    }
}

impl serde::Serialize for Hash {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Hash {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// compute the object id for a typed payload without touching any repo.
///
/// the digest covers `<tag> <length>\0<payload>` where `<length>` is the
/// single character '0' for an empty payload and the decimal length
/// otherwise. this framing is part of the contract: changing it changes
/// every object id in every repository.
pub fn hash_object(object_type: ObjectType, payload: &[u8]) -> Hash {
    let mut hasher = Sha1::new();
    hasher.update(object_type.tag().as_bytes());
    hasher.update(b" ");
    if payload.is_empty() {
        hasher.update(b"0");
        hasher.update([0u8]);
    } else {
        hasher.update(payload.len().to_string().as_bytes());
        hasher.update([0u8]);
        hasher.update(payload);
    }
    Hash::from_digest(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_hex_roundtrip() {
        let original = Hash::from_hex("da39a3ee5e6b4b0d3255bfef95601890afd80709").unwrap();
        let parsed = Hash::from_hex(original.value()).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_hash_invalid_hex() {
        assert!(Hash::from_hex("not valid hex").is_err());
        assert!(Hash::from_hex("abcd").is_err()); // too short
        assert!(Hash::from_hex("da39a3ee5e6b4b0d3255bfef95601890afd80709ff").is_err()); // too long
        assert!(Hash::from_hex("DA39A3EE5E6B4B0D3255BFEF95601890AFD80709").is_err()); // uppercase
    }

    #[test]
    fn test_hash_split_prefix() {
        let h = Hash::from_hex("da39a3ee5e6b4b0d3255bfef95601890afd80709").unwrap();
        let (dir, rest) = h.split_prefix();
        assert_eq!(dir, "da");
        assert_eq!(rest, "39a3ee5e6b4b0d3255bfef95601890afd80709");
    }

    #[test]
    fn test_hash_default_is_unset() {
        let h = Hash::default();
        assert!(!h.is_set());
        assert_eq!(h.value(), "");
    }

    #[test]
    fn test_hash_object_determinism() {
        let h1 = hash_object(ObjectType::Blob, b"hello");
        let h2 = hash_object(ObjectType::Blob, b"hello");
        assert_eq!(h1, h2);
        assert_eq!(h1.value().len(), 40);
    }

    #[test]
    fn test_hash_object_type_is_part_of_id() {
        let blob = hash_object(ObjectType::Blob, b"hello");
        let tree = hash_object(ObjectType::Tree, b"hello");
        assert_ne!(blob, tree);
    }

    #[test]
    fn test_hash_object_empty_payload_marker() {
        // an empty payload hashes the literal header "<tag> 0\0"
        let mut hasher = Sha1::new();
        hasher.update(b"blob 0\0");
        let expected = Hash::from_digest(hasher.finalize().into());
        assert_eq!(hash_object(ObjectType::Blob, b""), expected);
    }

    #[test]
    fn test_hash_object_header_layout() {
        let mut hasher = Sha1::new();
        hasher.update(b"commit 5\0hello");
        let expected = Hash::from_digest(hasher.finalize().into());
        assert_eq!(hash_object(ObjectType::Commit, b"hello"), expected);
    }

    #[test]
    fn test_hash_serde_json() {
        let h = Hash::from_hex("da39a3ee5e6b4b0d3255bfef95601890afd80709").unwrap();
        let json = serde_json::to_string(&h).unwrap();
        assert!(json.contains("da39a3ee"));
        let parsed: Hash = serde_json::from_str(&json).unwrap();
        assert_eq!(h, parsed);
    }
}
