//! Git operations abstraction layer
//!
//! The release pipeline only talks to the [Repository] trait. Implementations:
//!
//! - [repository::Git2Repository]: a real implementation using the `git2` crate
//! - [mock::MockRepository]: an in-memory implementation for tests
//!
//! ```rust
//! # use git_changerelease::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> git_changerelease::Result<()> {
//! let since = repo.latest_tag()?;
//! let lines = repo.log_lines(since.as_deref())?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Common git operation trait for abstraction
pub trait Repository {
    /// Root of the working tree
    fn workdir(&self) -> Result<PathBuf>;

    /// Most recent tag reachable from HEAD, or `None` if there is none
    fn latest_tag(&self) -> Result<Option<String>>;

    /// Commits reachable from HEAD but not from `since_tag`, newest first.
    ///
    /// Each line has four tab-separated fields: short hash, subject, author
    /// name, author email. With no tag the whole history is returned.
    fn log_lines(&self, since_tag: Option<&str>) -> Result<Vec<String>>;

    /// Stage `path` (relative to the working tree) and commit it on HEAD
    fn commit_file(&self, path: &Path, message: &str) -> Result<()>;

    /// Create an annotated tag on HEAD, or a GPG-signed one when `signed`
    fn create_tag(&self, name: &str, message: &str, signed: bool) -> Result<()>;
}
