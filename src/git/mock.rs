use crate::error::{ReleaseError, Result};
use crate::git::{Repository, TagLookup};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// A call made against the mock, in the order it happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
    Status,
    FindTag(String),
    Stage(PathBuf),
    Commit(String),
    Tag { name: String, message: String },
    PushHead(String),
    PushTag { remote: String, tag: String },
}

impl GitCall {
    /// True for calls that change the repository or a remote
    pub fn is_mutation(&self) -> bool {
        !matches!(self, GitCall::Status | GitCall::FindTag(_))
    }
}

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    status_output: String,
    status_error: Option<String>,
    lookup_error: Option<String>,
    fail_on: Option<fn(&GitCall) -> bool>,
    tags: Mutex<HashSet<String>>,
    calls: Mutex<Vec<GitCall>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockRepository {
    /// Create a clean repository with no tags
    pub fn new() -> Self {
        MockRepository {
            status_output: String::new(),
            status_error: None,
            lookup_error: None,
            fail_on: None,
            tags: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Report pending changes from `status`
    pub fn set_status(&mut self, porcelain: impl Into<String>) {
        self.status_output = porcelain.into();
    }

    /// Make `status` fail as if git were unavailable
    pub fn fail_status(&mut self, reason: impl Into<String>) {
        self.status_error = Some(reason.into());
    }

    /// Make `find_tag` fail instead of answering
    pub fn fail_lookup(&mut self, reason: impl Into<String>) {
        self.lookup_error = Some(reason.into());
    }

    /// Fail every mutating call matching `matcher`
    pub fn fail_on(&mut self, matcher: fn(&GitCall) -> bool) {
        self.fail_on = Some(matcher);
    }

    /// Add an existing tag
    pub fn add_tag(&mut self, name: impl Into<String>) {
        lock(&self.tags).insert(name.into());
    }

    pub fn has_tag(&self, name: &str) -> bool {
        lock(&self.tags).contains(name)
    }

    /// Every call recorded so far
    pub fn calls(&self) -> Vec<GitCall> {
        lock(&self.calls).clone()
    }

    /// Recorded calls that changed the repository or a remote
    pub fn mutations(&self) -> Vec<GitCall> {
        self.calls()
            .into_iter()
            .filter(GitCall::is_mutation)
            .collect()
    }

    fn record(&self, call: GitCall) -> Result<()> {
        let failed = self.fail_on.is_some_and(|matcher| matcher(&call));
        let command = format!("{:?}", call);
        lock(&self.calls).push(call);
        if failed {
            return Err(ReleaseError::command_failure(command));
        }
        Ok(())
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn status(&self) -> Result<String> {
        lock(&self.calls).push(GitCall::Status);
        match &self.status_error {
            Some(reason) => Err(ReleaseError::environment(reason.as_str())),
            None => Ok(self.status_output.clone()),
        }
    }

    fn find_tag(&self, tag_name: &str) -> Result<TagLookup> {
        lock(&self.calls).push(GitCall::FindTag(tag_name.to_string()));
        if let Some(reason) = &self.lookup_error {
            return Err(ReleaseError::environment(reason.as_str()));
        }
        if self.has_tag(tag_name) {
            Ok(TagLookup::Present)
        } else {
            Ok(TagLookup::Absent)
        }
    }

    fn stage(&self, path: &Path) -> Result<()> {
        self.record(GitCall::Stage(path.to_path_buf()))
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.record(GitCall::Commit(message.to_string()))
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        self.record(GitCall::Tag {
            name: name.to_string(),
            message: message.to_string(),
        })?;
        lock(&self.tags).insert(name.to_string());
        Ok(())
    }

    fn push_head(&self, remote: &str) -> Result<()> {
        self.record(GitCall::PushHead(remote.to_string()))
    }

    fn push_tag(&self, remote: &str, tag_name: &str) -> Result<()> {
        self.record(GitCall::PushTag {
            remote: remote.to_string(),
            tag: tag_name.to_string(),
        })
    }
}
