use std::io::{Read, Write};

use crate::error::Result;
use crate::hash::Hash;
use crate::object::{wire, ObjectType};

/// an entry in a tree, associating a name with a blob or another tree.
///
/// `kind` is `None` when an unknown tag byte was decoded; such entries are
/// skipped by readers.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeEntry {
    pub kind: Option<ObjectType>,
    pub hash: Hash,
    pub name: String,
}

impl TreeEntry {
    pub fn new(kind: ObjectType, hash: Hash, name: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            hash,
            name: name.into(),
        }
    }

    /// an entry whose hash gets filled in later by the tree builder
    pub fn unresolved(kind: ObjectType, name: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            hash: Hash::default(),
            name: name.into(),
        }
    }
}

/// a group of named entries pointing at blobs and subtrees.
///
/// entry order is insertion order; it is part of the encoding and so part
/// of the tree's identity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tree {
    /// assigned when the tree is written to the object store
    pub hash: Hash,
    pub entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// look up an entry by name
    pub fn get(&self, name: &str) -> Option<&TreeEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// wire format: a 4-byte big-endian entry count, then per entry a
    /// one-byte type tag ('b', 'c', 't', or '?' for unknown), the
    /// length-prefixed name and the length-prefixed hash value
    pub fn encode(&self, writer: &mut impl Write) -> Result<()> {
        wire::write_u32(writer, self.entries.len() as u32)?;
        for entry in &self.entries {
            let tag = entry.kind.map(|k| k.tag_byte()).unwrap_or(b'?');
            wire::write_u8(writer, tag)?;
            wire::write_string(writer, &entry.name)?;
            wire::write_string(writer, entry.hash.value())?;
        }
        Ok(())
    }

    pub fn decode(reader: &mut impl Read) -> Result<Self> {
        let entry_count = wire::read_u32(reader)?;
        let mut entries = Vec::with_capacity(entry_count as usize);
        for _ in 0..entry_count {
            let kind = ObjectType::from_tag_byte(wire::read_u8(reader)?);
            let name = wire::read_string(reader)?;
            let hash = Hash::from_raw(wire::read_string(reader)?);
            entries.push(TreeEntry { kind, hash, name });
        }
        Ok(Self {
            hash: Hash::default(),
            entries,
        })
    }
}
