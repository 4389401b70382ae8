use serde::Serialize;

use crate::repo::Repo;

/// the state of one piece of content relative to the committed area
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum ContentState {
    #[default]
    Unmodified,
    Added,
    Modified,
    Deleted,
    Untracked,
}

/// the status of one path
#[derive(Clone, Debug, Serialize)]
pub struct StatusEntry {
    pub absolute_path: String,
    pub state: ContentState,
}

/// the working tree status.
///
/// currently a placeholder shape: both entry lists come back empty.
/// TODO: diff the working and staging areas against the committed area
/// the way the merge driver diffs content snapshots.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Status {
    pub working_area_entries: Vec<StatusEntry>,
    pub staging_area_entries: Vec<StatusEntry>,
}

/// report the status of the repository
pub fn status(_repo: &Repo) -> Status {
    Status::default()
}
