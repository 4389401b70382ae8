use std::rc::Rc;

use crate::content::ContentHandle;
use crate::error::{Error, Result};
use crate::repo::Repo;

/// put content in the working area at the given absolute path
pub fn put_working_area_content(
    repo: &mut Repo,
    absolute_path: &str,
    bytes: impl Into<Rc<[u8]>>,
) -> ContentHandle {
    repo.working_area.put_content(absolute_path, bytes)
}

/// get the working area content at the given absolute path
pub fn get_working_area_content(repo: &Repo, absolute_path: &str) -> Option<ContentHandle> {
    repo.working_area.get_content(absolute_path)
}

/// place content directly in the staging area, bypassing the working area
pub fn stage(repo: &mut Repo, absolute_path: &str, bytes: impl Into<Rc<[u8]>>) -> ContentHandle {
    repo.staging_area.put_content(absolute_path, bytes)
}

/// copy working area content at the given path into the staging area.
///
/// the byte payload is shared, not copied.
pub fn update_index_add(repo: &mut Repo, absolute_path: &str) -> Result<ContentHandle> {
    let working = repo
        .working_area
        .get_content(absolute_path)
        .ok_or_else(|| Error::ObjectNotFound(absolute_path.to_string()))?;
    let bytes = working.borrow().bytes.clone();
    Ok(repo.staging_area.put_content(absolute_path, bytes))
}

/// stage the content of an existing object at the given path.
///
/// a blob contributes its payload; any other object contributes its
/// serialized bytes.
pub fn update_index_add_cache_info(
    repo: &mut Repo,
    hash_value: &str,
    staging_path: &str,
) -> Result<ContentHandle> {
    let object = repo
        .database
        .objects
        .get(hash_value)
        .cloned()
        .ok_or_else(|| Error::ObjectNotFound(hash_value.to_string()))?;
    let bytes: Rc<[u8]> = match object.as_blob() {
        Some(blob) => blob.bytes.clone(),
        None => Rc::from(object.encode()?),
    };
    Ok(repo.staging_area.put_content(staging_path, bytes))
}

/// stage every content item in the working area.
///
/// with `create_snapshots` each payload is deep-copied at this instant;
/// without it the staging area aliases the working payload, so later
/// in-place edits are visible to both. content removed from the working
/// area is never removed from staging here; deletions need an explicit
/// remove from both areas.
pub fn add_all(repo: &mut Repo, create_snapshots: bool) {
    for handle in repo.working_area.snapshot_as_list() {
        let (path, bytes) = {
            let content = handle.borrow();
            let bytes = if create_snapshots {
                content.clone_bytes()
            } else {
                content.bytes.clone()
            };
            (content.absolute_path.clone(), bytes)
        };
        repo.staging_area.put_content(&path, bytes);
    }
}
