use std::collections::HashMap;
use std::rc::Rc;

use crate::error::Result;
use crate::object::{Blob, ObjectType, RepoObject, Tree, TreeEntry};
use crate::ops::hash_object_write;
use crate::path::RepoPath;
use crate::repo::Repo;

/// fold the staging area into a tree-of-trees and write every tree and
/// blob into the object store.
///
/// the root tree is always written, even for an empty staging area, and
/// is returned carrying its hash. intermediate trees are created lazily
/// while walking each staged path, blobs are hashed in staging order, and
/// trees are hashed deepest-first so that every hash a tree references is
/// already resolvable when the tree itself is written. identical subtrees
/// collapse automatically through the store's idempotent insert.
pub fn write_tree(repo: &mut Repo) -> Result<Tree> {
    // trees under construction, root first; parents always precede their
    // children in this arena, so walking it backwards is deepest-first
    let mut trees: Vec<Tree> = vec![Tree::new()];
    let mut tree_paths: Vec<String> = vec![RepoPath::at_root().as_str().to_string()];
    let mut path_to_tree: HashMap<String, usize> = HashMap::new();
    path_to_tree.insert(tree_paths[0].clone(), 0);

    // tree entries by the absolute path they name, as (tree, entry) indices
    let mut path_to_entry: HashMap<String, (usize, usize)> = HashMap::new();

    // blob payloads waiting to be hashed, bound to the entry to update
    let mut pending_blobs: Vec<(Rc<[u8]>, (usize, usize))> = Vec::new();

    for handle in repo.staging_area.snapshot_as_list() {
        let content = handle.borrow();
        let path = RepoPath::at(content.absolute_path.as_str());
        let parts = path.split_into_parts();
        if parts.is_empty() {
            continue;
        }

        // walk the intermediate segments, creating trees and entries as
        // needed; the last segment is the content itself
        let mut current_path = RepoPath::at_root();
        let mut current_tree = 0usize;
        for part in &parts[..parts.len() - 1] {
            let parent_tree = current_tree;
            current_path = current_path.resolve(part);
            let key = current_path.as_str().to_string();

            let tree_index = match path_to_tree.get(&key) {
                Some(&index) => index,
                None => {
                    trees.push(Tree::new());
                    tree_paths.push(key.clone());
                    let index = trees.len() - 1;
                    path_to_tree.insert(key.clone(), index);
                    index
                }
            };

            if !path_to_entry.contains_key(&key) {
                trees[parent_tree]
                    .entries
                    .push(TreeEntry::unresolved(ObjectType::Tree, *part));
                path_to_entry.insert(key, (parent_tree, trees[parent_tree].entries.len() - 1));
            }

            current_tree = tree_index;
        }

        let leaf_name = parts[parts.len() - 1];
        let leaf_key = current_path.resolve(leaf_name).as_str().to_string();
        if !path_to_entry.contains_key(&leaf_key) {
            trees[current_tree]
                .entries
                .push(TreeEntry::unresolved(ObjectType::Blob, leaf_name));
            path_to_entry.insert(
                leaf_key.clone(),
                (current_tree, trees[current_tree].entries.len() - 1),
            );
        }
        pending_blobs.push((content.bytes.clone(), path_to_entry[&leaf_key]));
    }

    // hash the blobs in staging order and fill in their entries
    for (bytes, (tree_index, entry_index)) in pending_blobs {
        let blob_hash = hash_object_write(repo, RepoObject::Blob(Blob::new(bytes)))?;
        trees[tree_index].entries[entry_index].hash = blob_hash;
    }

    // hash the trees deepest-first and fill in the parent entries
    let mut root = Tree::new();
    for index in (0..trees.len()).rev() {
        let tree = std::mem::take(&mut trees[index]);
        let returned = if index == 0 { Some(tree.clone()) } else { None };
        let tree_hash = hash_object_write(repo, RepoObject::Tree(tree))?;
        if let Some(&(parent_tree, parent_entry)) = path_to_entry.get(&tree_paths[index]) {
            trees[parent_tree].entries[parent_entry].hash = tree_hash.clone();
        }
        if let Some(mut kept) = returned {
            kept.hash = tree_hash;
            root = kept;
        }
    }
    Ok(root)
}

/// true when every hash reachable from the tree resolves in the store
#[cfg(test)]
fn tree_is_closed(repo: &Repo, tree: &Tree) -> bool {
    tree.entries.iter().all(|entry| {
        match repo.database.objects.get(entry.hash.value()) {
            None => false,
            Some(object) => match object.as_tree() {
                Some(subtree) => tree_is_closed(repo, subtree),
                None => true,
            },
        }
    })
}
