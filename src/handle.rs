use std::rc::Rc;

use chrono::{DateTime, FixedOffset, Local};

use crate::content::ContentHandle;
use crate::error::Result;
use crate::hash::Hash;
use crate::object::{Commit, Tree};
use crate::ops;
use crate::path::RepoPath;
use crate::refs::HashReference;
use crate::repo::Repo;

/// a repository plus the identity and clock used for its commits.
///
/// the handle is the porcelain surface: it owns one repo and fills in the
/// author, committer and timestamps that the lower-level operations take
/// explicitly. the clock can be pinned with `with_now` for deterministic
/// histories. create one handle per repo; a handle is single-threaded
/// like the repo it owns.
pub struct RepoHandle {
    pub repo: Repo,
    author: String,
    committer: String,
    now_override: Option<DateTime<FixedOffset>>,
}

impl RepoHandle {
    /// wrap an existing repo
    pub fn new(repo: Repo) -> Self {
        Self {
            repo,
            author: String::new(),
            committer: String::new(),
            now_override: None,
        }
    }

    /// create and initialize a fresh repo
    pub fn init() -> Self {
        Self::new(Repo::init())
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_committer(mut self, committer: impl Into<String>) -> Self {
        self.committer = committer.into();
        self
    }

    /// pin the clock used for new commits
    pub fn with_now(mut self, now: DateTime<FixedOffset>) -> Self {
        self.now_override = Some(now);
        self
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn committer(&self) -> &str {
        &self.committer
    }

    pub fn set_author(&mut self, author: impl Into<String>) {
        self.author = author.into();
    }

    pub fn set_committer(&mut self, committer: impl Into<String>) {
        self.committer = committer.into();
    }

    fn now(&self) -> DateTime<FixedOffset> {
        self.now_override
            .unwrap_or_else(|| Local::now().fixed_offset())
    }

    pub fn put_working_area_content(
        &mut self,
        absolute_path: &str,
        bytes: impl Into<Rc<[u8]>>,
    ) -> ContentHandle {
        ops::put_working_area_content(&mut self.repo, absolute_path, bytes)
    }

    pub fn get_working_area_content(&self, absolute_path: &str) -> Option<ContentHandle> {
        ops::get_working_area_content(&self.repo, absolute_path)
    }

    pub fn stage(&mut self, absolute_path: &str, bytes: impl Into<Rc<[u8]>>) -> ContentHandle {
        ops::stage(&mut self.repo, absolute_path, bytes)
    }

    pub fn add_all(&mut self, create_snapshots: bool) {
        ops::add_all(&mut self.repo, create_snapshots);
    }

    pub fn update_index_add(&mut self, absolute_path: &str) -> Result<ContentHandle> {
        ops::update_index_add(&mut self.repo, absolute_path)
    }

    pub fn update_index_add_cache_info(
        &mut self,
        hash_value: &str,
        staging_path: &str,
    ) -> Result<ContentHandle> {
        ops::update_index_add_cache_info(&mut self.repo, hash_value, staging_path)
    }

    pub fn write_tree(&mut self) -> Result<Tree> {
        ops::write_tree(&mut self.repo)
    }

    pub fn read_tree(
        &mut self,
        root_tree_hash_value: &str,
        prefix_path: &str,
    ) -> Result<Vec<ContentHandle>> {
        ops::read_tree(&mut self.repo, root_tree_hash_value, prefix_path)
    }

    /// commit the staging area onto the current branch
    pub fn commit_all(&mut self, message: &str, create_snapshots: bool) -> Result<Commit> {
        let now = self.now();
        let author = self.author.clone();
        let committer = self.committer.clone();
        ops::commit_all(
            &mut self.repo,
            message,
            &author,
            now,
            &committer,
            now,
            create_snapshots,
        )
    }

    /// commit the staging area with explicit parents
    pub fn commit_all_with_parents(
        &mut self,
        message: &str,
        create_snapshots: bool,
        parent_hashes: &[Hash],
    ) -> Result<Commit> {
        let now = self.now();
        let author = self.author.clone();
        let committer = self.committer.clone();
        ops::commit_all_with_parents(
            &mut self.repo,
            message,
            &author,
            now,
            &committer,
            now,
            create_snapshots,
            parent_hashes,
        )
    }

    pub fn log(&self, commit_hash_or_reference: &str) -> Result<Vec<ops::LogEntry>> {
        ops::log(&self.repo, commit_hash_or_reference)
    }

    pub fn rev_list(&self, commit_hash_value: &str) -> Result<Vec<Commit>> {
        ops::rev_list(&self.repo, commit_hash_value)
    }

    pub fn checkout(&mut self, commit_hash_or_reference: &str) -> Result<()> {
        ops::checkout(&mut self.repo, commit_hash_or_reference)
    }

    pub fn checkout_revision(
        &mut self,
        commit_hash_or_reference: &str,
        revision_offset: i64,
    ) -> Result<()> {
        ops::checkout_revision(&mut self.repo, commit_hash_or_reference, revision_offset)
    }

    pub fn checkout_path(&mut self, path: &str) {
        ops::checkout_path(&mut self.repo, &RepoPath::at(path));
    }

    pub fn checkout_pattern(&mut self, matches: impl Fn(&str) -> bool) {
        ops::checkout_pattern(&mut self.repo, matches);
    }

    pub fn branch(&mut self, branch_name: &str) {
        ops::branch(&mut self.repo, branch_name);
    }

    pub fn branch_delete(&mut self, branch_names: &[&str]) {
        ops::branch_delete(&mut self.repo, branch_names);
    }

    pub fn current_branch_name(&self) -> Option<String> {
        ops::current_branch_name(&self.repo).map(|name| name.to_string())
    }

    pub fn resolve_commit(&self, commit_hash_or_reference: &str) -> Result<Option<Commit>> {
        ops::resolve_commit(&self.repo, commit_hash_or_reference)
    }

    pub fn resolve_reference(&self, reference_or_head: &str) -> Option<HashReference> {
        ops::resolve_reference(&self.repo, reference_or_head)
    }

    pub fn status(&self) -> ops::Status {
        ops::status(&self.repo)
    }

    /// three-way merge of two commits into a branch
    pub fn merge(
        &mut self,
        commit1: &Commit,
        commit2: &Commit,
        branch_name: &str,
        message: &str,
    ) -> Result<Commit> {
        ops::merge_commits_into_branch(self, commit1, commit2, branch_name, message)
    }
}
