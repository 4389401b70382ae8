//! memvc - in-memory content-addressed version control
//!
//! a git-shaped repository engine that runs entirely over process memory:
//! no disk, no network, no persistence. each logical entity a caller
//! wants to version gets its own independent repo that can snapshot,
//! branch, merge and restore structured byte content keyed by path.
//!
//! # Core concepts
//!
//! - **Blob**: content-addressed byte payload
//! - **Tree**: named entries pointing at blobs and subtrees
//! - **Commit**: a tree snapshot with author/committer/message metadata
//! - **Areas**: content flows working -> staging -> committed; the
//!   committed area freezes after every commit and checkout
//! - **Refs**: branches in `heads`, tags in `tags`, and a symbolic HEAD
//!
//! objects are addressed by SHA-1 over `<type> <length>\0<payload>` and
//! stored once; identical content is shared structurally by hash.
//!
//! # Example usage
//!
//! ```
//! use memvc::RepoHandle;
//!
//! let mut repo = RepoHandle::init()
//!     .with_author("alice")
//!     .with_committer("alice");
//!
//! repo.put_working_area_content("/notes.txt", &b"Hello World"[..]);
//! repo.add_all(true);
//! let commit = repo.commit_all("first commit", true).unwrap();
//!
//! repo.branch("feature");
//! assert_eq!(repo.log("master").unwrap().len(), 1);
//! assert!(commit.is_root());
//! ```
//!
//! a repo is deliberately not thread-safe: parallelism comes from owning
//! many independent repos, one per thread, not from sharing one.

mod content;
mod error;
mod handle;
mod hash;
mod object;
mod path;
mod refs;
mod repo;
mod store;

pub mod ops;

pub use content::{CommittedArea, ContentHandle, ImmutableContent, MutableArea, MutableContent};
pub use error::{Error, Result};
pub use handle::RepoHandle;
pub use hash::{hash_object, Hash};
pub use object::{Blob, Commit, ObjectType, RepoObject, Tree, TreeEntry};
pub use ops::{
    add_all, ancestor_hashes, branch, branch_commit_reference_map, branch_delete, branch_names, cat_file,
    cat_file_type, checkout, checkout_path, checkout_pattern, checkout_revision, commit_all,
    commit_all_with_parents, commit_tree, compute_diffs, current_branch_name,
    find_common_ancestor, get_working_area_content, hash_object_write, hash_object_write_blob,
    hash_object_write_bytes, hash_object_write_string, log, log_from_commit_hash,
    log_from_reference_name, merge_commits_into_branch, put_working_area_content, read_tree,
    resolve_commit, resolve_reference, rev_list, stage, status, update_index_add,
    update_index_add_cache_info, write_tree, ChangeKind, ContentState, DiffEntry, LogEntry,
    Status, StatusEntry,
};
pub use path::{RepoPath, DELIMITER};
pub use refs::{
    symbolic_ref, update_ref_in_heads, update_ref_in_tags, HashReference, RefCollection, Refs,
    SymbolicReference,
};
pub use repo::{Config, Database, Hooks, Info, Repo, Script, HEAD, MASTER_BRANCH};
pub use store::ObjectStore;
