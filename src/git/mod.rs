//! Version-control capability
//!
//! The release pipeline only ever talks to git through the [Repository]
//! trait, so the whole workflow can run against an in-memory double.
//!
//! - [system::SystemGit]: spawns the `git` executable in the project root
//! - [mock::MockRepository]: records calls for tests
//!
//! ```rust
//! # use git_release::git::{Repository, TagLookup};
//! # fn example<R: Repository>(repo: &R) -> git_release::Result<()> {
//! if repo.find_tag("v1.0.0")? == TagLookup::Absent {
//!     repo.create_annotated_tag("v1.0.0", "Release v1.0.0")?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod system;

pub use mock::{GitCall, MockRepository};
pub use system::SystemGit;

use crate::error::Result;
use std::path::Path;

/// Outcome of a tag lookup that completed.
///
/// A lookup that could not be answered is an `Err`, never `Absent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagLookup {
    Present,
    Absent,
}

/// Git operations needed to cut a release
///
/// Queries (`status`, `find_tag`) must not change the repository. The
/// mutating operations run in the order the release executor calls them and
/// report a non-zero exit as [crate::error::ReleaseError::CommandFailure].
pub trait Repository: Send + Sync {
    /// Porcelain status of the working tree; empty when clean
    ///
    /// # Returns
    /// * `Ok(String)` - Raw status listing
    /// * `Err(Environment)` - git is unavailable or this is not a repository
    fn status(&self) -> Result<String>;

    /// Look up `refs/tags/<tag_name>`
    ///
    /// # Returns
    /// * `Ok(TagLookup::Present)` - The tag exists
    /// * `Ok(TagLookup::Absent)` - The tag does not exist
    /// * `Err(Environment)` - The lookup itself failed
    fn find_tag(&self, tag_name: &str) -> Result<TagLookup>;

    /// Stage a path relative to the repository root
    fn stage(&self, path: &Path) -> Result<()>;

    /// Commit staged changes
    fn commit(&self, message: &str) -> Result<()>;

    /// Create an annotated tag on HEAD
    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()>;

    /// Push the current branch to `remote`
    fn push_head(&self, remote: &str) -> Result<()>;

    /// Push a single tag to `remote`
    fn push_tag(&self, remote: &str, tag_name: &str) -> Result<()>;
}
