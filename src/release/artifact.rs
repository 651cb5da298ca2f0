use crate::domain::SemanticVersion;
use crate::error::{ChangeReleaseError, Result};

/// Human-editable changelog document whose first line carries the version.
///
/// The version is the second space-separated field of the first line,
/// e.g. `# 1.4.0 / 2024-03-01`. A leading `v` is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationArtifact {
    content: String,
}

impl ConfirmationArtifact {
    pub fn new(content: impl Into<String>) -> Self {
        ConfirmationArtifact {
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }

    /// Re-parse the version recorded in the first line.
    ///
    /// The line is split on single spaces, so `#  1.2.3` yields an empty
    /// second field. A missing or blank first line is
    /// [`ChangeReleaseError::EmptyArtifact`]; a first line without a second
    /// field, or with an unparsable one, is [`ChangeReleaseError::MalformedVersion`].
    pub fn read_version(&self) -> Result<SemanticVersion> {
        let first_line = self
            .content
            .lines()
            .next()
            .filter(|line| !line.trim().is_empty())
            .ok_or(ChangeReleaseError::EmptyArtifact)?;

        let token = first_line.split(' ').nth(1).ok_or_else(|| {
            ChangeReleaseError::malformed_version(
                first_line,
                "first changelog line has no version token",
            )
        })?;

        SemanticVersion::parse(token)
    }
}
