use crate::error::{Error, Result};
use crate::object::Commit;
use crate::refs::HashReference;
use crate::repo::{Repo, HEAD};

/// resolve a reference name to a head ref.
///
/// `"HEAD"` dereferences once through the symbolic reference; `None` when
/// HEAD has not been set, when HEAD points at the literal name `"HEAD"`
/// (cycle guard), or when no head carries the name.
pub fn resolve_reference(repo: &Repo, reference_or_head: &str) -> Option<HashReference> {
    if reference_or_head.is_empty() {
        return None;
    }
    if reference_or_head == HEAD {
        let head = repo.database.head.as_ref()?;
        if head.reference_name == HEAD {
            return None;
        }
        let reference_name = head.reference_name.clone();
        return resolve_reference(repo, &reference_name);
    }
    repo.database.refs.heads.find(reference_or_head).cloned()
}

/// resolve a commit by hash, branch name or `"HEAD"`.
///
/// `"HEAD"` dereferences the symbolic reference and resolves again
/// (`None` before the first checkout). otherwise the input is tried as an
/// object hash first and as a head name second; anything else fails with
/// `ReferenceNotFound`.
pub fn resolve_commit(repo: &Repo, commit_hash_or_reference: &str) -> Result<Option<Commit>> {
    if commit_hash_or_reference.is_empty() {
        return Ok(None);
    }
    if commit_hash_or_reference == HEAD {
        return match &repo.database.head {
            None => Ok(None),
            Some(head) if head.reference_name == HEAD => Ok(None),
            Some(head) => {
                let reference_name = head.reference_name.clone();
                resolve_commit(repo, &reference_name)
            }
        };
    }

    if let Some(object) = repo.database.objects.get(commit_hash_or_reference) {
        if let Some(commit) = object.as_commit() {
            return Ok(Some(commit.clone()));
        }
    }

    if let Some(reference) = repo.database.refs.heads.find(commit_hash_or_reference) {
        if let Some(object) = repo.database.objects.get(reference.hash.value()) {
            if let Some(commit) = object.as_commit() {
                return Ok(Some(commit.clone()));
            }
        }
    }

    Err(Error::ReferenceNotFound(commit_hash_or_reference.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::RepoHandle;
    use crate::refs::{symbolic_ref, update_ref_in_heads};

    fn repo_with_commit() -> (RepoHandle, Commit) {
        let mut handle = RepoHandle::init().with_author("alice").with_committer("alice");
        handle.put_working_area_content("/a.txt", &b"one"[..]);
        handle.add_all(true);
        let commit = handle.commit_all("first", true).unwrap();
        (handle, commit)
    }

    #[test]
    fn test_resolve_reference_head_dereferences_once() {
        let (handle, commit) = repo_with_commit();
        let reference = resolve_reference(&handle.repo, HEAD).unwrap();
        assert_eq!(reference.name, "master");
        assert_eq!(reference.hash, commit.hash);
    }

    #[test]
    fn test_resolve_reference_unset_head() {
        let repo = Repo::new();
        assert!(resolve_reference(&repo, HEAD).is_none());
    }

    #[test]
    fn test_resolve_reference_head_cycle_guard() {
        let mut repo = Repo::new();
        symbolic_ref(&mut repo, HEAD);
        assert!(resolve_reference(&repo, HEAD).is_none());
    }

    #[test]
    fn test_resolve_reference_unknown_name() {
        let (handle, _) = repo_with_commit();
        assert!(resolve_reference(&handle.repo, "no-such-branch").is_none());
    }

    #[test]
    fn test_resolve_commit_by_hash() {
        let (handle, commit) = repo_with_commit();
        let found = resolve_commit(&handle.repo, commit.hash.value()).unwrap().unwrap();
        assert_eq!(found.hash, commit.hash);
    }

    #[test]
    fn test_resolve_commit_by_branch_name() {
        let (handle, commit) = repo_with_commit();
        let found = resolve_commit(&handle.repo, "master").unwrap().unwrap();
        assert_eq!(found.hash, commit.hash);
    }

    #[test]
    fn test_resolve_commit_by_head() {
        let (handle, commit) = repo_with_commit();
        let found = resolve_commit(&handle.repo, HEAD).unwrap().unwrap();
        assert_eq!(found.hash, commit.hash);
    }

    #[test]
    fn test_resolve_commit_head_before_checkout() {
        let repo = Repo::new();
        assert!(resolve_commit(&repo, HEAD).unwrap().is_none());
    }

    #[test]
    fn test_resolve_commit_unknown_name_fails() {
        let (handle, _) = repo_with_commit();
        let result = resolve_commit(&handle.repo, "no-such-branch");
        assert!(matches!(result, Err(Error::ReferenceNotFound(_))));
    }

    #[test]
    fn test_resolve_commit_dangling_reference_fails() {
        let mut repo = Repo::init();
        let missing = crate::hash::hash_object(crate::object::ObjectType::Commit, b"missing");
        update_ref_in_heads(&mut repo, "dangling", missing);

        let result = resolve_commit(&repo, "dangling");
        assert!(matches!(result, Err(Error::ReferenceNotFound(_))));
    }
}
