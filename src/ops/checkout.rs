use tracing::debug;

use crate::error::{Error, Result};
use crate::object::ObjectType;
use crate::ops::log::rev_list_depth;
use crate::ops::resolve_commit;
use crate::path::RepoPath;
use crate::refs::SymbolicReference;
use crate::repo::{Repo, HEAD};

/// check out the commit named by hash, branch name or `"HEAD"`
pub fn checkout(repo: &mut Repo, commit_hash_or_reference: &str) -> Result<()> {
    checkout_revision(repo, commit_hash_or_reference, 0)
}

/// check out a commit at an offset along its first-parent chain.
///
/// offset 0 restores the named commit, -1 the commit before it, and so
/// on; a positive offset finds no commits and fails with
/// `CommitsNotFound`. all three content areas are cleared and rebuilt
/// from the commit's tree, the committed area is frozen, and HEAD is
/// pointed at the supplied identifier unless it was literally `"HEAD"`.
/// note that a hash identifier lands in HEAD as-is.
pub fn checkout_revision(
    repo: &mut Repo,
    commit_hash_or_reference: &str,
    revision_offset: i64,
) -> Result<()> {
    let starting_commit = resolve_commit(repo, commit_hash_or_reference)?
        .ok_or_else(|| Error::CommitNotFound(commit_hash_or_reference.to_string()))?;

    let commits = rev_list_depth(
        &repo.database.objects,
        starting_commit.hash.value(),
        -revision_offset,
    )?;
    // the last commit visited is the one to restore
    let commit = commits
        .last()
        .cloned()
        .ok_or_else(|| Error::CommitsNotFound(commit_hash_or_reference.to_string()))?;

    repo.clear_areas();
    walk_and_checkout_tree(repo, commit.tree_hash.value(), &RepoPath::at_root())?;
    repo.committed_area.freeze();

    if commit_hash_or_reference != HEAD {
        match &mut repo.database.head {
            Some(head) => head.reference_name = commit_hash_or_reference.to_string(),
            None => {
                repo.database.head = Some(SymbolicReference::new(commit_hash_or_reference));
            }
        }
    }

    debug!(commit = %commit.hash, target = commit_hash_or_reference, "checked out");
    Ok(())
}

/// restore a tree into all three content areas, sharing each blob's byte
/// reference between them
fn walk_and_checkout_tree(
    repo: &mut Repo,
    tree_hash_value: &str,
    current_path: &RepoPath,
) -> Result<()> {
    let object = repo
        .database
        .objects
        .get(tree_hash_value)
        .cloned()
        .ok_or_else(|| Error::InvalidTree(tree_hash_value.to_string()))?;
    let tree = object
        .as_tree()
        .ok_or_else(|| Error::InvalidTree(tree_hash_value.to_string()))?;

    for entry in &tree.entries {
        let entry_path = current_path.resolve(&entry.name);
        match entry.kind {
            Some(ObjectType::Blob) => {
                let blob_object = repo
                    .database
                    .objects
                    .get(entry.hash.value())
                    .cloned()
                    .ok_or_else(|| Error::ObjectNotFound(entry.hash.value().to_string()))?;
                let blob = blob_object
                    .as_blob()
                    .ok_or_else(|| Error::UnexpectedTreeEntry(blob_object.object_type().tag().to_string()))?;

                let content_path = entry_path.to_absolute();
                let path = content_path.as_str();
                let bytes = blob.bytes.clone();
                repo.committed_area.put_content(path, bytes.clone())?;
                repo.staging_area.put_content(path, bytes.clone());
                repo.working_area.put_content(path, bytes);
            }
            Some(ObjectType::Tree) => {
                walk_and_checkout_tree(repo, entry.hash.value(), &entry_path)?;
            }
            Some(ObjectType::Commit) => {
                return Err(Error::UnexpectedTreeEntry("commit".to_string()));
            }
            None => {
                return Err(Error::UnexpectedTreeEntry("unknown".to_string()));
            }
        }
    }
    Ok(())
}

/// restore one path from the committed area into the working area.
/// the bytes are deep-copied so the frozen content stays isolated.
pub fn checkout_path(repo: &mut Repo, path: &RepoPath) {
    let absolute = path.to_absolute();
    let restored = repo
        .committed_area
        .get_content(absolute.as_str())
        .map(|content| (content.absolute_path().to_string(), content.clone_bytes()));
    if let Some((content_path, bytes)) = restored {
        repo.working_area.put_content(&content_path, bytes);
    }
}

/// restore every committed path accepted by the predicate
pub fn checkout_pattern(repo: &mut Repo, matches: impl Fn(&str) -> bool) {
    let paths: Vec<String> = repo
        .committed_area
        .iter()
        .filter(|content| matches(content.absolute_path()))
        .map(|content| content.absolute_path().to_string())
        .collect();
    for path in paths {
        checkout_path(repo, &RepoPath::at(path));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::RepoHandle;
    use crate::object::Commit;

    fn handle() -> RepoHandle {
        RepoHandle::init().with_author("alice").with_committer("alice")
    }

    fn commit_file(handle: &mut RepoHandle, path: &str, bytes: &[u8], message: &str) -> Commit {
        handle.put_working_area_content(path, bytes.to_vec());
        handle.add_all(true);
        handle.commit_all(message, true).unwrap()
    }

    fn working_bytes(repo: &Repo, path: &str) -> Vec<u8> {
        repo.working_area
            .get_content(path)
            .map(|c| c.borrow().bytes.to_vec())
            .unwrap()
    }

    #[test]
    fn test_checkout_restores_all_three_areas() {
        let mut handle = handle();
        let commit = commit_file(&mut handle, "/path.txt", b"Hello World", "first");

        handle.repo.working_area.clear();
        handle.repo.staging_area.clear();
        checkout(&mut handle.repo, commit.hash.value()).unwrap();

        assert_eq!(working_bytes(&handle.repo, "/path.txt"), b"Hello World");
        let staged = handle.repo.staging_area.get_content("/path.txt").unwrap();
        assert_eq!(&staged.borrow().bytes[..], b"Hello World");
        let committed = handle.repo.committed_area.get_content("/path.txt").unwrap();
        assert_eq!(&committed.bytes()[..], b"Hello World");
        assert!(handle.repo.committed_area.is_frozen());
    }

    #[test]
    fn test_checkout_fidelity_with_head() {
        let mut handle = handle();
        commit_file(&mut handle, "/a/b/deep.txt", b"nested", "first");

        checkout(&mut handle.repo, HEAD).unwrap();

        for content in handle.repo.committed_area.snapshot_as_list() {
            let working = working_bytes(&handle.repo, content.absolute_path());
            assert_eq!(&working[..], &content.bytes()[..]);
        }
    }

    #[test]
    fn test_checkout_by_hash_lands_in_head() {
        let mut handle = handle();
        let commit = commit_file(&mut handle, "/path.txt", b"v1", "first");

        checkout(&mut handle.repo, commit.hash.value()).unwrap();

        // the raw input string is stored, even though it is a hash
        assert_eq!(
            handle.repo.database.head.as_ref().unwrap().reference_name,
            commit.hash.value()
        );
    }

    #[test]
    fn test_checkout_head_leaves_head_untouched() {
        let mut handle = handle();
        commit_file(&mut handle, "/path.txt", b"v1", "first");

        checkout(&mut handle.repo, HEAD).unwrap();

        assert_eq!(handle.repo.database.head.as_ref().unwrap().reference_name, "master");
    }

    #[test]
    fn test_checkout_negative_offset_restores_ancestor() {
        let mut handle = handle();
        commit_file(&mut handle, "/path.txt", b"v1", "first");
        commit_file(&mut handle, "/path.txt", b"v2", "second");

        checkout_revision(&mut handle.repo, "master", -1).unwrap();

        assert_eq!(working_bytes(&handle.repo, "/path.txt"), b"v1");
    }

    #[test]
    fn test_checkout_positive_offset_fails() {
        let mut handle = handle();
        commit_file(&mut handle, "/path.txt", b"v1", "first");

        let result = checkout_revision(&mut handle.repo, "master", 1);
        assert!(matches!(result, Err(Error::CommitsNotFound(_))));
    }

    #[test]
    fn test_checkout_unknown_reference_fails() {
        let mut handle = handle();
        commit_file(&mut handle, "/path.txt", b"v1", "first");

        let result = checkout(&mut handle.repo, "no-such-branch");
        assert!(matches!(result, Err(Error::ReferenceNotFound(_))));
    }

    #[test]
    fn test_checkout_head_before_any_commit_fails() {
        let mut repo = Repo::init();
        let result = checkout(&mut repo, HEAD);
        assert!(matches!(result, Err(Error::CommitNotFound(_))));
    }

    #[test]
    fn test_checkout_replaces_previous_working_state() {
        let mut handle = handle();
        let c1 = commit_file(&mut handle, "/path.txt", b"v1", "first");
        commit_file(&mut handle, "/other.txt", b"extra", "second");

        checkout(&mut handle.repo, c1.hash.value()).unwrap();

        assert_eq!(working_bytes(&handle.repo, "/path.txt"), b"v1");
        assert!(handle.repo.working_area.get_content("/other.txt").is_none());
    }

    #[test]
    fn test_checkout_path_deep_copies() {
        let mut handle = handle();
        commit_file(&mut handle, "/path.txt", b"committed", "first");

        handle.repo.working_area.put_content("/path.txt", &b"dirty"[..]);
        checkout_path(&mut handle.repo, &RepoPath::at("/path.txt"));

        assert_eq!(working_bytes(&handle.repo, "/path.txt"), b"committed");
        let committed = handle.repo.committed_area.get_content("/path.txt").unwrap();
        let working = handle.repo.working_area.get_content("/path.txt").unwrap();
        assert!(!std::rc::Rc::ptr_eq(committed.bytes(), &working.borrow().bytes));
    }

    #[test]
    fn test_checkout_path_missing_is_noop() {
        let mut handle = handle();
        commit_file(&mut handle, "/path.txt", b"v1", "first");

        checkout_path(&mut handle.repo, &RepoPath::at("/absent.txt"));
        assert!(handle.repo.working_area.get_content("/absent.txt").is_none());
    }

    #[test]
    fn test_checkout_pattern_restores_matches() {
        let mut handle = handle();
        handle.put_working_area_content("/src/a.c", &b"a"[..]);
        handle.put_working_area_content("/src/b.c", &b"b"[..]);
        handle.put_working_area_content("/readme.md", &b"r"[..]);
        handle.add_all(true);
        handle.commit_all("first", true).unwrap();

        handle.repo.working_area.clear();
        checkout_pattern(&mut handle.repo, |path| path.starts_with("/src/"));

        assert!(handle.repo.working_area.get_content("/src/a.c").is_some());
        assert!(handle.repo.working_area.get_content("/src/b.c").is_some());
        assert!(handle.repo.working_area.get_content("/readme.md").is_none());
    }
}
