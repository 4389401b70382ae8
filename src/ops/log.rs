use std::collections::HashSet;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::hash::Hash;
use crate::object::Commit;
use crate::repo::Repo;
use crate::store::ObjectStore;

/// an entry in a history log
#[derive(Clone, Debug, Serialize)]
pub struct LogEntry {
    pub commit_hash: Hash,
    pub author: String,
    pub author_timestamp: DateTime<FixedOffset>,
    pub committer: String,
    pub committer_timestamp: DateTime<FixedOffset>,
    pub message: String,
}

/// list every commit reachable from the given commit by parent edges.
///
/// commits are yielded in depth-first pre-order of first visit, each
/// exactly once. note that pre-order over parent links is not a strict
/// chronological sort; sort by committer timestamp if you need one.
pub fn rev_list(repo: &Repo, commit_hash_value: &str) -> Result<Vec<Commit>> {
    rev_list_depth(&repo.database.objects, commit_hash_value, i64::MAX)
}

/// rev-list bounded by a walk depth; a negative depth visits nothing
pub(crate) fn rev_list_depth(
    objects: &ObjectStore,
    commit_hash_value: &str,
    depth: i64,
) -> Result<Vec<Commit>> {
    let mut seen = HashSet::new();
    let mut commits = Vec::new();
    walk_rev_list(objects, commit_hash_value, &mut seen, &mut commits, depth)?;
    Ok(commits)
}

fn walk_rev_list(
    objects: &ObjectStore,
    commit_hash_value: &str,
    seen: &mut HashSet<String>,
    commits: &mut Vec<Commit>,
    depth_left: i64,
) -> Result<()> {
    if depth_left < 0 {
        return Ok(());
    }
    if commit_hash_value.is_empty() {
        return Ok(());
    }
    if seen.contains(commit_hash_value) {
        return Ok(());
    }

    let commit = objects
        .get(commit_hash_value)
        .and_then(|o| o.as_commit())
        .ok_or_else(|| Error::InvalidCommit(commit_hash_value.to_string()))?
        .clone();

    seen.insert(commit.hash.value().to_string());
    commits.push(commit.clone());

    for parent in &commit.parent_hashes {
        walk_rev_list(objects, parent.value(), seen, commits, depth_left - 1)?;
    }
    Ok(())
}

/// log the history leading up to a commit named by hash or branch name
pub fn log(repo: &Repo, commit_hash_or_reference: &str) -> Result<Vec<LogEntry>> {
    let is_commit_hash = repo
        .database
        .objects
        .get(commit_hash_or_reference)
        .map(|o| o.as_commit().is_some())
        .unwrap_or(false);
    if is_commit_hash {
        log_from_commit_hash(repo, commit_hash_or_reference)
    } else {
        log_from_reference_name(repo, commit_hash_or_reference)
    }
}

/// log the history leading up to the commit with the given hash
pub fn log_from_commit_hash(repo: &Repo, commit_hash_value: &str) -> Result<Vec<LogEntry>> {
    let commits = rev_list(repo, commit_hash_value)?;
    Ok(commits
        .into_iter()
        .map(|commit| LogEntry {
            commit_hash: commit.hash,
            author: commit.author,
            author_timestamp: commit.author_timestamp,
            committer: commit.committer,
            committer_timestamp: commit.committer_timestamp,
            message: commit.message,
        })
        .collect())
}

/// log the history of the branch with the given name
pub fn log_from_reference_name(repo: &Repo, reference_name: &str) -> Result<Vec<LogEntry>> {
    let reference = repo
        .database
        .refs
        .heads
        .find(reference_name)
        .ok_or_else(|| Error::ReferenceNotFound(reference_name.to_string()))?;
    let hash_value = reference.hash.value().to_string();
    log_from_commit_hash(repo, &hash_value)
}
