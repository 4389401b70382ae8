use std::io::{Read, Write};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::hash::Hash;
use crate::object::wire;

/// a commit: a tree snapshot plus who saved it, when and why.
///
/// the author originally wrote the change; the committer recorded it on
/// the author's behalf. no parents marks a root commit, one parent an
/// ordinary commit, two or more a merge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    /// assigned when the commit is written to the object store
    pub hash: Hash,
    pub tree_hash: Hash,
    pub author: String,
    pub author_timestamp: DateTime<FixedOffset>,
    pub committer: String,
    pub committer_timestamp: DateTime<FixedOffset>,
    pub message: String,
    pub parent_hashes: Vec<Hash>,
}

impl Commit {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tree_hash: Hash,
        message: impl Into<String>,
        author: impl Into<String>,
        author_timestamp: DateTime<FixedOffset>,
        committer: impl Into<String>,
        committer_timestamp: DateTime<FixedOffset>,
        parent_hashes: Vec<Hash>,
    ) -> Self {
        Self {
            hash: Hash::default(),
            tree_hash,
            author: author.into(),
            author_timestamp,
            committer: committer.into(),
            committer_timestamp,
            message: message.into(),
            parent_hashes,
        }
    }

    /// is this an initial commit (no parents)
    pub fn is_root(&self) -> bool {
        self.parent_hashes.is_empty()
    }

    /// is this a merge commit (multiple parents)
    pub fn is_merge(&self) -> bool {
        self.parent_hashes.len() > 1
    }

    /// wire format: a 4-byte big-endian parent count and one
    /// length-prefixed hash per parent, then the length-prefixed tree
    /// hash, author, author timestamp (ISO-8601 with offset), committer,
    /// committer timestamp and message
    pub fn encode(&self, writer: &mut impl Write) -> Result<()> {
        wire::write_u32(writer, self.parent_hashes.len() as u32)?;
        for parent in &self.parent_hashes {
            wire::write_string(writer, parent.value())?;
        }
        wire::write_string(writer, self.tree_hash.value())?;
        wire::write_string(writer, &self.author)?;
        wire::write_string(writer, &self.author_timestamp.to_rfc3339())?;
        wire::write_string(writer, &self.committer)?;
        wire::write_string(writer, &self.committer_timestamp.to_rfc3339())?;
        wire::write_string(writer, &self.message)?;
        Ok(())
    }

    pub fn decode(reader: &mut impl Read) -> Result<Self> {
        let parent_count = wire::read_u32(reader)?;
        let mut parent_hashes = Vec::with_capacity(parent_count as usize);
        for _ in 0..parent_count {
            parent_hashes.push(Hash::from_raw(wire::read_string(reader)?));
        }
        let tree_hash = Hash::from_raw(wire::read_string(reader)?);
        let author = wire::read_string(reader)?;
        let author_timestamp = DateTime::parse_from_rfc3339(&wire::read_string(reader)?)?;
        let committer = wire::read_string(reader)?;
        let committer_timestamp = DateTime::parse_from_rfc3339(&wire::read_string(reader)?)?;
        let message = wire::read_string(reader)?;
        Ok(Self {
            hash: Hash::default(),
            tree_hash,
            author,
            author_timestamp,
            committer,
            committer_timestamp,
            message,
            parent_hashes,
        })
    }
}
