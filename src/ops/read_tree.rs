use std::cell::RefCell;
use std::rc::Rc;

use crate::content::{ContentHandle, MutableContent};
use crate::error::{Error, Result};
use crate::object::{ObjectType, Tree};
use crate::path::RepoPath;
use crate::repo::Repo;
use crate::store::ObjectStore;

/// expand a tree out of the object store into the staging area.
///
/// every blob reachable from the root tree becomes a mutable content item
/// at `prefix + path`, placed in the staging area (overwriting whatever
/// was staged at that path) and collected into the returned list. commit
/// entries and entries of unknown type are skipped. fails with
/// `InvalidTree` when the hash does not name a tree.
pub fn read_tree(
    repo: &mut Repo,
    root_tree_hash_value: &str,
    prefix_path: &str,
) -> Result<Vec<ContentHandle>> {
    let object = repo
        .database
        .objects
        .get(root_tree_hash_value)
        .cloned()
        .ok_or_else(|| Error::InvalidTree(root_tree_hash_value.to_string()))?;
    let tree = object
        .as_tree()
        .ok_or_else(|| Error::InvalidTree(root_tree_hash_value.to_string()))?;

    let start = if prefix_path.is_empty() {
        RepoPath::at_root()
    } else {
        RepoPath::at(prefix_path)
    };

    let mut content_list = Vec::new();
    read_tree_recursively(&repo.database.objects, tree, &start, &mut content_list)?;

    for handle in &content_list {
        repo.staging_area.put_handle(handle.clone());
    }
    Ok(content_list)
}

fn read_tree_recursively(
    objects: &ObjectStore,
    tree: &Tree,
    tree_path: &RepoPath,
    content_list: &mut Vec<ContentHandle>,
) -> Result<()> {
    for entry in &tree.entries {
        let entry_path = tree_path.resolve(&entry.name);
        match entry.kind {
            Some(ObjectType::Blob) => {
                let blob = objects
                    .get(entry.hash.value())
                    .and_then(|o| o.as_blob())
                    .ok_or_else(|| Error::ObjectNotFound(entry.hash.value().to_string()))?;
                content_list.push(Rc::new(RefCell::new(MutableContent::new(
                    entry_path.to_absolute().as_str(),
                    blob.bytes.clone(),
                ))));
            }
            Some(ObjectType::Tree) => {
                let child = objects
                    .get(entry.hash.value())
                    .and_then(|o| o.as_tree())
                    .ok_or_else(|| Error::InvalidTree(entry.hash.value().to_string()))?;
                read_tree_recursively(objects, child, &entry_path, content_list)?;
            }
            // commit entries and unknown tags carry no content
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{hash_object_write_blob, stage, write_tree};

    #[test]
    fn test_read_tree_restores_staged_content() {
        let mut repo = Repo::init();
        stage(&mut repo, "/docs/readme.md", &b"readme"[..]);
        stage(&mut repo, "/main.c", &b"main"[..]);
        let root = write_tree(&mut repo).unwrap();
        repo.staging_area.clear();

        let contents = read_tree(&mut repo, root.hash.value(), "").unwrap();

        assert_eq!(contents.len(), 2);
        assert_eq!(repo.staging_area.len(), 2);
        let readme = repo.staging_area.get_content("/docs/readme.md").unwrap();
        assert_eq!(&readme.borrow().bytes[..], b"readme");
    }

    #[test]
    fn test_read_tree_with_prefix() {
        let mut repo = Repo::init();
        stage(&mut repo, "/file.txt", &b"payload"[..]);
        let root = write_tree(&mut repo).unwrap();
        repo.staging_area.clear();

        read_tree(&mut repo, root.hash.value(), "/vendored/").unwrap();

        assert!(repo.staging_area.get_content("/vendored/file.txt").is_some());
        assert!(repo.staging_area.get_content("/file.txt").is_none());
    }

    #[test]
    fn test_read_tree_overwrites_staged_path() {
        let mut repo = Repo::init();
        stage(&mut repo, "/file.txt", &b"old"[..]);
        let root = write_tree(&mut repo).unwrap();

        stage(&mut repo, "/file.txt", &b"edited"[..]);
        read_tree(&mut repo, root.hash.value(), "").unwrap();

        let staged = repo.staging_area.get_content("/file.txt").unwrap();
        assert_eq!(&staged.borrow().bytes[..], b"old");
        assert_eq!(repo.staging_area.len(), 1);
    }

    #[test]
    fn test_read_tree_shares_blob_bytes() {
        let mut repo = Repo::init();
        stage(&mut repo, "/file.txt", &b"shared"[..]);
        let root = write_tree(&mut repo).unwrap();
        repo.staging_area.clear();

        let contents = read_tree(&mut repo, root.hash.value(), "").unwrap();

        let blob_hash = root.get("file.txt").unwrap().hash.clone();
        let blob = repo
            .database
            .objects
            .get(blob_hash.value())
            .and_then(|o| o.as_blob().cloned())
            .unwrap();
        assert!(Rc::ptr_eq(&contents[0].borrow().bytes, &blob.bytes));
    }

    #[test]
    fn test_read_tree_rejects_non_tree_hash() {
        let mut repo = Repo::init();
        let blob_hash = hash_object_write_blob(&mut repo, &b"not a tree"[..]).unwrap();

        let result = read_tree(&mut repo, blob_hash.value(), "");
        assert!(matches!(result, Err(Error::InvalidTree(_))));
    }

    #[test]
    fn test_read_tree_rejects_unknown_hash() {
        let mut repo = Repo::init();
        let result = read_tree(&mut repo, "0000000000000000000000000000000000000000", "");
        assert!(matches!(result, Err(Error::InvalidTree(_))));
    }
}
