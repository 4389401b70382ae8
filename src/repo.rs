use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::content::{CommittedArea, MutableArea};
use crate::refs::{Refs, SymbolicReference};
use crate::store::ObjectStore;

/// the name of the HEAD revision
pub const HEAD: &str = "HEAD";

/// the default branch a fresh repository points at
pub const MASTER_BRANCH: &str = "master";

/// project-level configuration options
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub repository_format_version: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repository_format_version: 0,
        }
    }
}

/// a script that runs when something happens in the repo
#[derive(Clone, Debug, Default)]
pub struct Script {
    pub code: String,
    pub enabled: bool,
}

/// client and server side hooks
#[derive(Default)]
pub struct Hooks {
    pub scripts: Vec<Script>,
}

/// repository metadata: paths excluded from tracking
#[derive(Default)]
pub struct Info {
    pub exclude: BTreeSet<String>,
}

/// the version control database behind a repository.
/// this is what the `.git` directory would hold on disk.
#[derive(Default)]
pub struct Database {
    /// the branch currently checked out; `None` before any checkout
    pub head: Option<SymbolicReference>,
    pub config: Config,
    pub description: Option<String>,
    pub name: Option<String>,
    pub hooks: Hooks,
    pub info: Info,
    pub objects: ObjectStore,
    pub refs: Refs,
}

/// a repository of version controlled data, entirely in memory.
///
/// content moves through three areas: callers edit the working area,
/// `add_all` stages it, and a commit snapshots the staging area into the
/// committed area (frozen) and the object store. a repo owns all of its
/// state; dropping it releases everything.
///
/// a repo is not thread-safe. for parallel workloads, give each thread
/// its own repo.
#[derive(Default)]
pub struct Repo {
    pub working_area: MutableArea,
    pub staging_area: MutableArea,
    pub committed_area: CommittedArea,
    pub database: Database,
}

impl Repo {
    /// create an empty repo with no HEAD and no description
    pub fn new() -> Self {
        Self::default()
    }

    /// create a repo and initialize it: HEAD points symbolically at
    /// `master` (the branch ref itself appears on the first commit) and
    /// the description defaults to empty
    pub fn init() -> Self {
        let mut repo = Self::new();
        if repo.database.description.is_none() {
            repo.database.description = Some(String::new());
        }
        repo.database.head = Some(SymbolicReference::new(MASTER_BRANCH));
        repo
    }

    /// create a repo with a description, useful for telling repos apart
    pub fn with_description(description: impl Into<String>) -> Self {
        let mut repo = Self::new();
        repo.database.description = Some(description.into());
        repo
    }

    /// clear the working, staging and committed areas in one step
    pub fn clear_areas(&mut self) {
        self.working_area.clear();
        self.staging_area.clear();
        self.committed_area.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_points_head_at_master() {
        let repo = Repo::init();
        assert_eq!(repo.database.head.as_ref().unwrap().reference_name, MASTER_BRANCH);
        // the branch ref itself is created lazily, on the first commit
        assert!(repo.database.refs.heads.is_empty());
        assert_eq!(repo.database.description.as_deref(), Some(""));
    }

    #[test]
    fn test_new_repo_has_no_head() {
        let repo = Repo::new();
        assert!(repo.database.head.is_none());
        assert!(repo.database.objects.is_empty());
    }

    #[test]
    fn test_with_description() {
        let repo = Repo::with_description("invoice #42");
        assert_eq!(repo.database.description.as_deref(), Some("invoice #42"));
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.repository_format_version, 0);
    }

    #[test]
    fn test_clear_areas() {
        let mut repo = Repo::new();
        repo.working_area.put_content("/a", &b"x"[..]);
        repo.staging_area.put_content("/a", &b"x"[..]);
        repo.committed_area.put_content("/a", &b"x"[..]).unwrap();
        repo.committed_area.freeze();

        repo.clear_areas();

        assert!(repo.working_area.is_empty());
        assert!(repo.staging_area.is_empty());
        assert!(repo.committed_area.is_empty());
        assert!(!repo.committed_area.is_frozen());
    }
}
