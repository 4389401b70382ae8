//! operations on repositories, from plumbing to porcelain

mod branch;
mod checkout;
mod commit;
mod log;
mod merge;
mod objects;
mod read_tree;
mod resolve;
mod stage;
mod status;
mod write_tree;

pub use branch::{branch, branch_commit_reference_map, branch_delete, branch_names, current_branch_name};
pub use checkout::{checkout, checkout_path, checkout_pattern, checkout_revision};
pub use commit::{commit_all, commit_all_with_parents, commit_tree};
pub use log::{log, log_from_commit_hash, log_from_reference_name, rev_list, LogEntry};
pub use merge::{
    ancestor_hashes, apply_diffs, compute_diffs, find_common_ancestor, merge_commits_into_branch,
    ChangeKind, DiffEntry,
};
pub use objects::{
    cat_file, cat_file_type, hash_object_write, hash_object_write_blob, hash_object_write_bytes,
    hash_object_write_string,
};
pub use read_tree::read_tree;
pub use resolve::{resolve_commit, resolve_reference};
pub use stage::{
    add_all, get_working_area_content, put_working_area_content, stage, update_index_add,
    update_index_add_cache_info,
};
pub use status::{status, ContentState, Status, StatusEntry};
pub use write_tree::write_tree;
