use std::collections::BTreeMap;

use tracing::debug;

use crate::hash::Hash;
use crate::ops::resolve_reference;
use crate::refs::update_ref_in_heads;
use crate::repo::{Repo, HEAD};

/// create a branch at the current commit, or move it there if it exists.
/// nothing happens while HEAD does not resolve to an existing head.
pub fn branch(repo: &mut Repo, branch_name: &str) {
    if let Some(current) = resolve_reference(repo, HEAD) {
        update_ref_in_heads(repo, branch_name, current.hash);
        debug!(branch = branch_name, "created branch");
    }
}

/// delete the branches with the given names; absent names are skipped
pub fn branch_delete(repo: &mut Repo, branch_names: &[&str]) {
    for branch_name in branch_names {
        repo.database.refs.heads.remove(branch_name);
    }
}

/// the name of the currently checked out branch, if any
pub fn current_branch_name(repo: &Repo) -> Option<&str> {
    repo.database
        .head
        .as_ref()
        .map(|head| head.reference_name.as_str())
}

/// the names of all branches in the repo
pub fn branch_names(repo: &Repo) -> Vec<&str> {
    repo.database.refs.heads.names()
}

/// every branch with the commit hash it points at
pub fn branch_commit_reference_map(repo: &Repo) -> BTreeMap<String, Hash> {
    repo.database
        .refs
        .heads
        .iter()
        .map(|r| (r.name.clone(), r.hash.clone()))
        .collect()
}
