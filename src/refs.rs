use std::fmt;

use crate::hash::Hash;
use crate::repo::Repo;

/// a named reference to an object, usually a commit
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashReference {
    /// eg: master
    pub name: String,
    pub hash: Hash,
}

impl HashReference {
    pub fn new(name: impl Into<String>, hash: Hash) -> Self {
        Self {
            name: name.into(),
            hash,
        }
    }
}

impl fmt::Display for HashReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.name, self.hash)
    }
}

/// a symbolic reference: HEAD pointing at another reference by name.
///
/// after a checkout by hash this carries the raw hash string instead of a
/// branch name; `resolve_commit` still resolves it through the object
/// store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolicReference {
    pub reference_name: String,
}

impl SymbolicReference {
    pub fn new(reference_name: impl Into<String>) -> Self {
        Self {
            reference_name: reference_name.into(),
        }
    }
}

/// a collection of hash references with name lookup.
///
/// kept as a list; lookups scan for the first matching name.
#[derive(Default)]
pub struct RefCollection {
    refs: Vec<HashReference>,
}

impl RefCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, reference_name: &str) -> Option<&HashReference> {
        self.refs.iter().find(|r| r.name == reference_name)
    }

    pub fn has(&self, reference_name: &str) -> bool {
        self.find(reference_name).is_some()
    }

    /// create the reference if absent, otherwise overwrite its hash
    pub fn update(&mut self, reference_name: &str, hash: Hash) -> &HashReference {
        if let Some(position) = self.refs.iter().position(|r| r.name == reference_name) {
            self.refs[position].hash = hash;
            &self.refs[position]
        } else {
            self.refs.push(HashReference::new(reference_name, hash));
            self.refs.last().expect("just pushed")
        }
    }

    /// remove the reference with the given name; false if it was absent
    pub fn remove(&mut self, reference_name: &str) -> bool {
        let before = self.refs.len();
        self.refs.retain(|r| r.name != reference_name);
        self.refs.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &HashReference> {
        self.refs.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.refs.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }
}

/// the named reference collections of a repository
#[derive(Default)]
pub struct Refs {
    pub heads: RefCollection,
    pub tags: RefCollection,
}

/// update or create a branch reference in `heads`
pub fn update_ref_in_heads(repo: &mut Repo, reference_name: &str, hash: Hash) {
    repo.database.refs.heads.update(reference_name, hash);
}

/// update or create a tag reference in `tags`
pub fn update_ref_in_tags(repo: &mut Repo, reference_name: &str, hash: Hash) {
    repo.database.refs.tags.update(reference_name, hash);
}

/// point HEAD at the given reference name, creating HEAD if needed
pub fn symbolic_ref(repo: &mut Repo, reference_name: &str) {
    match &mut repo.database.head {
        Some(head) => head.reference_name = reference_name.to_string(),
        None => repo.database.head = Some(SymbolicReference::new(reference_name)),
    }
}
