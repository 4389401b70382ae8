use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::error::{Error, Result};

/// a shared handle to mutable content.
///
/// the handle returned by `MutableArea::put_content` is the canonical
/// aliased reference: a later put at the same path swaps the byte
/// reference inside the same cell, so every holder of the handle observes
/// the new bytes. holders of the previous `Rc<[u8]>` payload are not
/// affected by the swap.
pub type ContentHandle = Rc<RefCell<MutableContent>>;

/// content at a path in the working or staging area.
///
/// both fields may be reassigned in place by holders of a handle; the
/// byte payload itself is shared and must not be modified.
#[derive(Clone, Debug)]
pub struct MutableContent {
    /// the absolute path of this content in the repo
    pub absolute_path: String,
    /// the byte payload, shared by reference
    pub bytes: Rc<[u8]>,
}

impl MutableContent {
    pub fn new(absolute_path: impl Into<String>, bytes: impl Into<Rc<[u8]>>) -> Self {
        Self {
            absolute_path: absolute_path.into(),
            bytes: bytes.into(),
        }
    }

    /// a fresh copy of the payload, detached from the shared reference
    pub fn clone_bytes(&self) -> Rc<[u8]> {
        Rc::from(&self.bytes[..])
    }
}

/// content in the committed area, frozen at construction
#[derive(Clone, Debug)]
pub struct ImmutableContent {
    absolute_path: String,
    bytes: Rc<[u8]>,
}

impl ImmutableContent {
    pub fn new(absolute_path: impl Into<String>, bytes: impl Into<Rc<[u8]>>) -> Self {
        Self {
            absolute_path: absolute_path.into(),
            bytes: bytes.into(),
        }
    }

    pub fn absolute_path(&self) -> &str {
        &self.absolute_path
    }

    pub fn bytes(&self) -> &Rc<[u8]> {
        &self.bytes
    }

    /// a fresh copy of the payload
    pub fn clone_bytes(&self) -> Rc<[u8]> {
        Rc::from(&self.bytes[..])
    }
}

/// an area of mutable content: the working area and the staging area.
///
/// content is kept as a list because paths are mutable; every lookup by
/// path scans the list.
#[derive(Default)]
pub struct MutableArea {
    contents: Vec<ContentHandle>,
}

impl MutableArea {
    pub fn new() -> Self {
        Self::default()
    }

    /// put content at a path.
    ///
    /// if the path already holds content, the existing entry's byte
    /// reference is swapped in place and the existing handle is returned;
    /// otherwise a new entry is appended.
    pub fn put_content(&mut self, absolute_path: &str, bytes: impl Into<Rc<[u8]>>) -> ContentHandle {
        let bytes = bytes.into();
        if let Some(existing) = self.get_content(absolute_path) {
            existing.borrow_mut().bytes = bytes;
            return existing;
        }
        let handle = Rc::new(RefCell::new(MutableContent::new(absolute_path, bytes)));
        self.contents.push(handle.clone());
        handle
    }

    /// put an existing handle into the area.
    ///
    /// if the handle's path is already present, the existing entry is
    /// mutated to carry the handle's bytes and the given handle stays
    /// outside the area.
    pub fn put_handle(&mut self, handle: ContentHandle) {
        let path = handle.borrow().absolute_path.clone();
        if let Some(existing) = self.get_content(&path) {
            if !Rc::ptr_eq(&existing, &handle) {
                existing.borrow_mut().bytes = handle.borrow().bytes.clone();
            }
            return;
        }
        self.contents.push(handle);
    }

    pub fn get_content(&self, absolute_path: &str) -> Option<ContentHandle> {
        self.contents
            .iter()
            .find(|c| c.borrow().absolute_path == absolute_path)
            .cloned()
    }

    pub fn remove_content(&mut self, absolute_path: &str) {
        self.contents.retain(|c| c.borrow().absolute_path != absolute_path);
    }

    /// snapshot of the area as a path-indexed map; the handles are live
    pub fn snapshot_as_map(&self) -> BTreeMap<String, ContentHandle> {
        self.contents
            .iter()
            .map(|c| (c.borrow().absolute_path.clone(), c.clone()))
            .collect()
    }

    /// snapshot of the area as a list, in insertion order; the handles are live
    pub fn snapshot_as_list(&self) -> Vec<ContentHandle> {
        self.contents.clone()
    }

    pub fn has_content(&self) -> bool {
        !self.contents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn clear(&mut self) {
        self.contents.clear();
    }
}

/// the committed area: path-indexed immutable content with a one-way
/// freeze. once frozen, puts and removes fail until `clear` unfreezes it.
#[derive(Default)]
pub struct CommittedArea {
    contents: BTreeMap<String, ImmutableContent>,
    frozen: bool,
}

impl CommittedArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// freeze the area against further puts and removes
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// put content at a path, wrapping it in a fresh immutable entry
    pub fn put_content(
        &mut self,
        absolute_path: &str,
        bytes: impl Into<Rc<[u8]>>,
    ) -> Result<ImmutableContent> {
        if self.frozen {
            return Err(Error::ImmutableContentModified);
        }
        let content = ImmutableContent::new(absolute_path, bytes);
        self.contents.insert(absolute_path.to_string(), content.clone());
        Ok(content)
    }

    pub fn get_content(&self, absolute_path: &str) -> Option<&ImmutableContent> {
        self.contents.get(absolute_path)
    }

    pub fn remove_content(&mut self, absolute_path: &str) -> Result<()> {
        if self.frozen {
            return Err(Error::ImmutableContentModified);
        }
        self.contents.remove(absolute_path);
        Ok(())
    }

    pub fn snapshot_as_map(&self) -> BTreeMap<String, ImmutableContent> {
        self.contents.clone()
    }

    pub fn snapshot_as_list(&self) -> Vec<ImmutableContent> {
        self.contents.values().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImmutableContent> {
        self.contents.values()
    }

    pub fn has_content(&self) -> bool {
        !self.contents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// unfreeze and empty the area in one step
    pub fn clear(&mut self) {
        self.frozen = false;
        self.contents.clear();
    }
}
