use std::collections::HashMap;
use std::rc::Rc;

use crate::object::{Commit, ObjectType, RepoObject};

/// the object store: every blob, tree and commit, keyed by hash.
///
/// a primary map carries all objects; a secondary index groups them by
/// the first two hex characters of the hash, mirroring git's on-disk
/// fan-out so tooling can iterate one bucket at a time. both structures
/// hold the same `Rc` and agree on membership at all times.
#[derive(Default)]
pub struct ObjectStore {
    map: HashMap<String, Rc<RepoObject>>,
    index: HashMap<String, HashMap<String, Rc<RepoObject>>>,
}

impl ObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// insert an object under its hash.
    ///
    /// insertion is idempotent: if an object with this hash is already
    /// present the store keeps the first instance and the incoming one is
    /// dropped.
    pub fn put(&mut self, object: Rc<RepoObject>) {
        debug_assert!(object.hash().is_set());
        let hash_value = object.hash().value().to_string();
        if self.map.contains_key(&hash_value) {
            return;
        }
        let (prefix, rest) = object.hash().split_prefix();
        self.index
            .entry(prefix.to_string())
            .or_default()
            .insert(rest.to_string(), object.clone());
        self.map.insert(hash_value, object);
    }

    pub fn get(&self, hash_value: &str) -> Option<&Rc<RepoObject>> {
        self.map.get(hash_value)
    }

    pub fn contains(&self, hash_value: &str) -> bool {
        self.map.contains_key(hash_value)
    }

    /// remove the object with the given hash, pruning its index bucket
    /// when it becomes empty
    pub fn remove(&mut self, hash_value: &str) {
        if self.map.remove(hash_value).is_some() {
            let (prefix, rest) = hash_value.split_at(2);
            if let Some(bucket) = self.index.get_mut(prefix) {
                bucket.remove(rest);
                if bucket.is_empty() {
                    self.index.remove(prefix);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.map.clear();
        self.index.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<RepoObject>> {
        self.map.values()
    }

    /// the objects whose hashes start with the given 2-character prefix
    pub fn bucket(&self, prefix: &str) -> Option<&HashMap<String, Rc<RepoObject>>> {
        self.index.get(prefix)
    }

    /// all commits currently in the store, in no particular order
    pub fn commits(&self) -> Vec<Commit> {
        self.map
            .values()
            .filter(|o| o.object_type() == ObjectType::Commit)
            .filter_map(|o| o.as_commit().cloned())
            .collect()
    }
}
