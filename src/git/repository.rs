use crate::domain::commit::LOG_FIELD_SEPARATOR;
use crate::error::{ChangeReleaseError, Result};
use git2::{
    Commit, DescribeFormatOptions, DescribeOptions, ErrorCode, Repository as Git2Repo, Sort,
};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn head_commit(&self) -> Result<Option<Commit<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?)),
            Err(e) if e.code() == ErrorCode::UnbornBranch => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl super::Repository for Git2Repository {
    fn workdir(&self) -> Result<PathBuf> {
        self.repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| {
                ChangeReleaseError::from(git2::Error::from_str(
                    "bare repositories are not supported",
                ))
            })
    }

    fn latest_tag(&self) -> Result<Option<String>> {
        let mut options = DescribeOptions::new();
        options.describe_tags();

        match self.repo.describe(&options) {
            Ok(describe) => {
                let mut format = DescribeFormatOptions::new();
                format.abbreviated_size(0);
                let tag = describe.format(Some(&format))?;
                debug!(%tag, "found latest tag");
                Ok(Some(tag))
            }
            Err(e) if matches!(e.code(), ErrorCode::NotFound | ErrorCode::UnbornBranch) => {
                debug!("repository has no tags");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn log_lines(&self, since_tag: Option<&str>) -> Result<Vec<String>> {
        if self.head_commit()?.is_none() {
            return Ok(Vec::new());
        }

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push_head()?;

        if let Some(tag) = since_tag {
            let target = self
                .repo
                .find_reference(&format!("refs/tags/{}", tag))?
                .peel_to_commit()?;
            revwalk.hide(target.id())?;
        }

        let separator = LOG_FIELD_SEPARATOR.to_string();
        let mut lines = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            let short_id = commit.as_object().short_id()?;
            let author = commit.author();

            let fields = [
                short_id.as_str().unwrap_or_default(),
                commit.summary().unwrap_or_default(),
                author.name().unwrap_or_default(),
                author.email().unwrap_or_default(),
            ];
            lines.push(fields.join(separator.as_str()));
        }

        debug!(count = lines.len(), since = ?since_tag, "read commit log");
        Ok(lines)
    }

    fn commit_file(&self, path: &Path, message: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        index.add_path(path)?;
        index.write()?;

        let tree = self.repo.find_tree(index.write_tree()?)?;
        let signature = self.repo.signature()?;
        let parent = self.head_commit()?;
        let parents: Vec<&Commit<'_>> = parent.iter().collect();

        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;
        debug!(%oid, path = %path.display(), "committed changelog");
        Ok(())
    }

    fn create_tag(&self, name: &str, message: &str, signed: bool) -> Result<()> {
        if signed {
            // libgit2 cannot produce GPG signatures, hand over to git itself
            let workdir = super::Repository::workdir(self)?;
            let output = Command::new("git")
                .arg("-C")
                .arg(&workdir)
                .args(["tag", "-s", "-m", message, name])
                .output()?;

            if !output.status.success() {
                return Err(git2::Error::from_str(&format!(
                    "git tag -s {} failed: {}",
                    name,
                    String::from_utf8_lossy(&output.stderr).trim()
                ))
                .into());
            }
            debug!(tag = name, "created signed tag");
            return Ok(());
        }

        let head = self.head_commit()?.ok_or_else(|| {
            ChangeReleaseError::from(git2::Error::from_str("HEAD has no commit to tag"))
        })?;
        let signature = self.repo.signature()?;
        self.repo
            .tag(name, head.as_object(), &signature, message, false)?;
        debug!(tag = name, "created annotated tag");
        Ok(())
    }
}
