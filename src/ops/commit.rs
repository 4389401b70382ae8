use chrono::{DateTime, FixedOffset};
use tracing::debug;

use crate::error::Result;
use crate::hash::Hash;
use crate::object::{Commit, RepoObject};
use crate::ops::{hash_object_write, resolve_commit, resolve_reference, write_tree};
use crate::refs::update_ref_in_heads;
use crate::repo::{Repo, HEAD};

/// create a commit object for an existing root tree and write it into the
/// object store. no parents marks a root commit; several parents a merge.
#[allow(clippy::too_many_arguments)]
pub fn commit_tree(
    repo: &mut Repo,
    root_tree_hash: &Hash,
    message: &str,
    author: &str,
    author_timestamp: DateTime<FixedOffset>,
    committer: &str,
    committer_timestamp: DateTime<FixedOffset>,
    parent_hashes: &[Hash],
) -> Result<Commit> {
    let mut commit = Commit::new(
        root_tree_hash.clone(),
        message,
        author,
        author_timestamp,
        committer,
        committer_timestamp,
        parent_hashes.to_vec(),
    );
    let hash = hash_object_write(repo, RepoObject::Commit(commit.clone()))?;
    commit.hash = hash;
    Ok(commit)
}

/// record the staging area as a new commit on the current branch.
///
/// the parent is the commit the current branch points at; a repo whose
/// branch ref does not exist yet (the pre-first-commit state) produces a
/// root commit. the committed area is rebuilt from the staging area and
/// frozen, and the branch ref named by HEAD advances to the new commit.
#[allow(clippy::too_many_arguments)]
pub fn commit_all(
    repo: &mut Repo,
    message: &str,
    author: &str,
    author_timestamp: DateTime<FixedOffset>,
    committer: &str,
    committer_timestamp: DateTime<FixedOffset>,
    create_snapshots: bool,
) -> Result<Commit> {
    let parent_hashes: Vec<Hash> = if resolve_reference(repo, HEAD).is_some() {
        match resolve_commit(repo, HEAD)? {
            Some(parent) => vec![parent.hash],
            None => vec![],
        }
    } else {
        vec![]
    };
    commit_all_with_parents(
        repo,
        message,
        author,
        author_timestamp,
        committer,
        committer_timestamp,
        create_snapshots,
        &parent_hashes,
    )
}

/// record the staging area as a new commit with explicit parents.
/// merge flows use this to supply both sides of the merge.
#[allow(clippy::too_many_arguments)]
pub fn commit_all_with_parents(
    repo: &mut Repo,
    message: &str,
    author: &str,
    author_timestamp: DateTime<FixedOffset>,
    committer: &str,
    committer_timestamp: DateTime<FixedOffset>,
    create_snapshots: bool,
    parent_hashes: &[Hash],
) -> Result<Commit> {
    let root_tree = write_tree(repo)?;

    // rebuild the committed area from staging, then freeze it
    repo.committed_area.clear();
    for handle in repo.staging_area.snapshot_as_list() {
        let (path, bytes) = {
            let content = handle.borrow();
            let bytes = if create_snapshots {
                content.clone_bytes()
            } else {
                content.bytes.clone()
            };
            (content.absolute_path.clone(), bytes)
        };
        repo.committed_area.put_content(&path, bytes)?;
    }
    repo.committed_area.freeze();

    let commit = commit_tree(
        repo,
        &root_tree.hash,
        message,
        author,
        author_timestamp,
        committer,
        committer_timestamp,
        parent_hashes,
    )?;

    // advance the branch HEAD names; HEAD itself is never created here
    if let Some(head) = &repo.database.head {
        let reference_name = head.reference_name.clone();
        update_ref_in_heads(repo, &reference_name, commit.hash.clone());
    }

    debug!(
        commit = %commit.hash,
        parents = commit.parent_hashes.len(),
        "committed staging area"
    );
    Ok(commit)
}
