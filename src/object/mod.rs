//! the object model: blobs, trees and commits, plus their binary codec

mod blob;
mod commit;
mod tree;
pub(crate) mod wire;

pub use blob::Blob;
pub use commit::Commit;
pub use tree::{Tree, TreeEntry};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::hash::Hash;

/// the kinds of objects that can live in the object store
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Blob,
    Commit,
    Tree,
}

impl ObjectType {
    /// the ascii tag used when hashing objects of this type
    pub fn tag(&self) -> &'static str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Commit => "commit",
            ObjectType::Tree => "tree",
        }
    }

    /// the one-byte tag used in the tree entry wire format
    pub fn tag_byte(&self) -> u8 {
        match self {
            ObjectType::Blob => b'b',
            ObjectType::Commit => b'c',
            ObjectType::Tree => b't',
        }
    }

    /// decode a tree entry tag byte; unknown tags decode to `None`
    pub fn from_tag_byte(byte: u8) -> Option<Self> {
        match byte {
            b'b' => Some(ObjectType::Blob),
            b'c' => Some(ObjectType::Commit),
            b't' => Some(ObjectType::Tree),
            _ => None,
        }
    }
}

/// an object in the repository
#[derive(Clone, Debug, PartialEq)]
pub enum RepoObject {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
}

impl RepoObject {
    pub fn object_type(&self) -> ObjectType {
        match self {
            RepoObject::Blob(_) => ObjectType::Blob,
            RepoObject::Tree(_) => ObjectType::Tree,
            RepoObject::Commit(_) => ObjectType::Commit,
        }
    }

    pub fn hash(&self) -> &Hash {
        match self {
            RepoObject::Blob(b) => &b.hash,
            RepoObject::Tree(t) => &t.hash,
            RepoObject::Commit(c) => &c.hash,
        }
    }

    pub(crate) fn set_hash(&mut self, hash: Hash) {
        match self {
            RepoObject::Blob(b) => b.hash = hash,
            RepoObject::Tree(t) => t.hash = hash,
            RepoObject::Commit(c) => c.hash = hash,
        }
    }

    /// serialize the object content (the hash is not part of the encoding;
    /// it is computed over it)
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        match self {
            RepoObject::Blob(b) => b.encode(&mut out)?,
            RepoObject::Tree(t) => t.encode(&mut out)?,
            RepoObject::Commit(c) => c.encode(&mut out)?,
        }
        Ok(out)
    }

    /// deserialize object content of a known type
    pub fn decode(object_type: ObjectType, bytes: &[u8]) -> Result<Self> {
        let mut reader = bytes;
        Ok(match object_type {
            ObjectType::Blob => RepoObject::Blob(Blob::decode(&mut reader)?),
            ObjectType::Tree => RepoObject::Tree(Tree::decode(&mut reader)?),
            ObjectType::Commit => RepoObject::Commit(Commit::decode(&mut reader)?),
        })
    }

    pub fn as_blob(&self) -> Option<&Blob> {
        match self {
            RepoObject::Blob(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_tree(&self) -> Option<&Tree> {
        match self {
            RepoObject::Tree(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_commit(&self) -> Option<&Commit> {
        match self {
            RepoObject::Commit(c) => Some(c),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_type_tags() {
        assert_eq!(ObjectType::Blob.tag(), "blob");
        assert_eq!(ObjectType::Commit.tag(), "commit");
        assert_eq!(ObjectType::Tree.tag(), "tree");
    }

    #[test]
    fn test_tag_byte_roundtrip() {
        for ty in [ObjectType::Blob, ObjectType::Commit, ObjectType::Tree] {
            assert_eq!(ObjectType::from_tag_byte(ty.tag_byte()), Some(ty));
        }
        assert_eq!(ObjectType::from_tag_byte(b'?'), None);
        assert_eq!(ObjectType::from_tag_byte(b'x'), None);
    }

    #[test]
    fn test_decode_dispatches_on_type() {
        let blob = RepoObject::Blob(Blob::new(&b"payload"[..]));
        let bytes = blob.encode().unwrap();
        let decoded = RepoObject::decode(ObjectType::Blob, &bytes).unwrap();
        assert_eq!(decoded, blob);
        assert_eq!(decoded.object_type(), ObjectType::Blob);
    }
}
