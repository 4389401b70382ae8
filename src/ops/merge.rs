use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use crate::content::{ContentHandle, MutableArea};
use crate::error::{Error, Result};
use crate::handle::RepoHandle;
use crate::hash::Hash;
use crate::object::Commit;
use crate::ops::resolve_commit;
use crate::repo::Repo;

/// the kind of change a path underwent between two content areas
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Changed,
    Deleted,
}

/// one changed path
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffEntry {
    pub path: String,
    pub kind: ChangeKind,
}

/// compute the per-path differences from one content snapshot to another.
///
/// a path missing from `to` is `Deleted`, a path missing from `from` is
/// `Added`, and a path present in both with unequal bytes is `Changed`.
/// deletions and changes come first, then additions.
pub fn compute_diffs(
    from: &BTreeMap<String, ContentHandle>,
    to: &BTreeMap<String, ContentHandle>,
) -> Vec<DiffEntry> {
    let mut diffs = Vec::new();
    for (path, from_content) in from {
        match to.get(path) {
            None => diffs.push(DiffEntry {
                path: path.clone(),
                kind: ChangeKind::Deleted,
            }),
            Some(to_content) => {
                if from_content.borrow().bytes[..] != to_content.borrow().bytes[..] {
                    diffs.push(DiffEntry {
                        path: path.clone(),
                        kind: ChangeKind::Changed,
                    });
                }
            }
        }
    }
    for path in to.keys() {
        if !from.contains_key(path) {
            diffs.push(DiffEntry {
                path: path.clone(),
                kind: ChangeKind::Added,
            });
        }
    }
    diffs
}

/// apply a diff to a content area, pulling added and changed payloads out
/// of the given snapshot
pub fn apply_diffs(
    content: &BTreeMap<String, ContentHandle>,
    diffs: &[DiffEntry],
    area: &mut MutableArea,
) {
    for diff in diffs {
        match diff.kind {
            ChangeKind::Added | ChangeKind::Changed => {
                let bytes = content[&diff.path].borrow().bytes.clone();
                area.put_content(&diff.path, bytes);
            }
            ChangeKind::Deleted => area.remove_content(&diff.path),
        }
    }
}

/// every ancestor hash of a commit, the commit itself included, in
/// depth-first first-visit order with duplicates dropped
pub fn ancestor_hashes(repo: &Repo, commit: &Commit) -> Result<Vec<Hash>> {
    let mut ancestors = Vec::new();
    collect_ancestors(repo, commit, &mut ancestors)?;
    Ok(ancestors)
}

fn collect_ancestors(repo: &Repo, commit: &Commit, ancestors: &mut Vec<Hash>) -> Result<()> {
    ancestors.push(commit.hash.clone());
    for parent_hash in &commit.parent_hashes {
        if ancestors.contains(parent_hash) {
            continue;
        }
        if let Some(parent) = resolve_commit(repo, parent_hash.value())? {
            collect_ancestors(repo, &parent, ancestors)?;
        }
    }
    Ok(())
}

/// find the first commit that both histories share: the first hash in
/// `commit1`'s ancestor set that appears in `commit2`'s. `None` when the
/// histories are disjoint.
pub fn find_common_ancestor(
    repo: &Repo,
    commit1: &Commit,
    commit2: &Commit,
) -> Result<Option<Commit>> {
    let ancestors1 = ancestor_hashes(repo, commit1)?;
    let ancestors2 = ancestor_hashes(repo, commit2)?;
    let lookup: HashSet<&str> = ancestors2.iter().map(|h| h.value()).collect();

    for hash in &ancestors1 {
        if lookup.contains(hash.value()) {
            return resolve_commit(repo, hash.value());
        }
    }
    Ok(None)
}

/// three-way merge of two commits into a branch.
///
/// the content of both commits is diffed against their common ancestor;
/// both diffs are applied to the destination branch's working area with
/// `commit2`'s diff applied last so it wins overlapping paths, and the
/// result is staged and committed onto the branch.
pub fn merge_commits_into_branch(
    handle: &mut RepoHandle,
    commit1: &Commit,
    commit2: &Commit,
    branch_name: &str,
    message: &str,
) -> Result<Commit> {
    let ancestor = find_common_ancestor(&handle.repo, commit1, commit2)?.ok_or_else(|| {
        Error::CommitNotFound(format!(
            "common ancestor of {} and {}",
            commit1.hash, commit2.hash
        ))
    })?;

    handle.checkout(ancestor.hash.value())?;
    let common_content = handle.repo.working_area.snapshot_as_map();

    handle.checkout(commit1.hash.value())?;
    let commit1_content = handle.repo.working_area.snapshot_as_map();

    handle.checkout(commit2.hash.value())?;
    let commit2_content = handle.repo.working_area.snapshot_as_map();

    let commit1_diffs = compute_diffs(&common_content, &commit1_content);
    let commit2_diffs = compute_diffs(&common_content, &commit2_content);

    handle.checkout(branch_name)?;
    apply_diffs(&commit1_content, &commit1_diffs, &mut handle.repo.working_area);
    apply_diffs(&commit2_content, &commit2_diffs, &mut handle.repo.working_area);

    handle.add_all(true);
    let merge_commit = handle.commit_all(message, true)?;
    debug!(
        ancestor = %ancestor.hash,
        merge = %merge_commit.hash,
        branch = branch_name,
        "merged commits into branch"
    );
    Ok(merge_commit)
}
