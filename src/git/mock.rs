use crate::error::{ChangeReleaseError, Result};
use crate::git::Repository;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

/// A tag created through the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedTag {
    pub name: String,
    pub message: String,
    pub signed: bool,
}

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    workdir: PathBuf,
    latest_tag: Option<String>,
    log: Vec<String>,
    commits: RefCell<Vec<(PathBuf, String)>>,
    tags: RefCell<Vec<CreatedTag>>,
}

impl MockRepository {
    /// Create a new mock repository rooted at `workdir`
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        MockRepository {
            workdir: workdir.into(),
            latest_tag: None,
            log: Vec::new(),
            commits: RefCell::new(Vec::new()),
            tags: RefCell::new(Vec::new()),
        }
    }

    /// Set the tag reported as the latest release
    pub fn with_latest_tag(mut self, tag: impl Into<String>) -> Self {
        self.latest_tag = Some(tag.into());
        self
    }

    /// Add a commit to the log (newest first)
    pub fn with_commit(mut self, hash: &str, subject: &str) -> Self {
        self.log.push(format!(
            "{}\t{}\tTest Author\ttest@example.com",
            hash, subject
        ));
        self
    }

    /// Add a raw log line, bypassing the field format
    pub fn with_raw_line(mut self, line: impl Into<String>) -> Self {
        self.log.push(line.into());
        self
    }

    /// Commits made through [`Repository::commit_file`] as (path, message)
    pub fn commits(&self) -> Vec<(PathBuf, String)> {
        self.commits.borrow().clone()
    }

    /// Tags made through [`Repository::create_tag`]
    pub fn tags(&self) -> Vec<CreatedTag> {
        self.tags.borrow().clone()
    }
}

impl Repository for MockRepository {
    fn workdir(&self) -> Result<PathBuf> {
        Ok(self.workdir.clone())
    }

    fn latest_tag(&self) -> Result<Option<String>> {
        Ok(self.latest_tag.clone())
    }

    fn log_lines(&self, since_tag: Option<&str>) -> Result<Vec<String>> {
        if since_tag != self.latest_tag.as_deref() {
            return Err(ChangeReleaseError::from(git2::Error::from_str(
                "log requested from an unknown tag",
            )));
        }
        Ok(self.log.clone())
    }

    fn commit_file(&self, path: &Path, message: &str) -> Result<()> {
        self.commits
            .borrow_mut()
            .push((path.to_path_buf(), message.to_string()));
        Ok(())
    }

    fn create_tag(&self, name: &str, message: &str, signed: bool) -> Result<()> {
        let mut tags = self.tags.borrow_mut();
        if tags.iter().any(|t| t.name == name) {
            return Err(ChangeReleaseError::from(git2::Error::from_str(&format!(
                "tag '{}' already exists",
                name
            ))));
        }
        tags.push(CreatedTag {
            name: name.to_string(),
            message: message.to_string(),
            signed,
        });
        Ok(())
    }
}
