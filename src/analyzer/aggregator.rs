use crate::domain::{CommitRecord, Severity};
use crate::error::{ChangeReleaseError, Result};

/// Reduce classified commits to the single release bump.
///
/// The loudest commit wins. An empty sequence yields
/// [`ChangeReleaseError::NoCommits`], which callers treat as "nothing to
/// release" rather than a failure.
pub fn select_bump(commits: &[CommitRecord]) -> Result<Severity> {
    commits
        .iter()
        .map(CommitRecord::severity)
        .fold(None, |loudest: Option<Severity>, severity| {
            loudest.max(Some(severity))
        })
        .ok_or(ChangeReleaseError::NoCommits)
}
