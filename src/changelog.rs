//! Changelog rendering.
//!
//! Templates use `{placeholder}` substitution:
//! - `{version}` - proposed version (required, must sit in the first line as
//!   its second whitespace-separated token for the read-back to work)
//! - `{date}` - release date, `YYYY-MM-DD`
//! - `{log_lines}` - one `  * subject` line per commit
//! - `{old_log}` - previous changelog content

use crate::domain::tag::VERSION_PLACEHOLDER;
use crate::domain::{CommitRecord, SemanticVersion};
use crate::error::{ChangeReleaseError, Result};
use crate::release::ConfirmationArtifact;
use chrono::NaiveDate;

/// Validated changelog template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogTemplate {
    template: String,
}

impl ChangelogTemplate {
    pub const DEFAULT: &'static str = "# {version} / {date}\n\n{log_lines}\n\n{old_log}";

    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        let first_line = template.lines().next().unwrap_or_default();
        if !first_line.contains(VERSION_PLACEHOLDER) {
            return Err(ChangeReleaseError::template(format!(
                "the first line of the changelog template must contain {}",
                VERSION_PLACEHOLDER
            )));
        }
        Ok(ChangelogTemplate { template })
    }

    /// Render the changelog for a release; surrounding whitespace is trimmed
    pub fn render(
        &self,
        version: &SemanticVersion,
        date: NaiveDate,
        commits: &[CommitRecord],
        old_log: &str,
    ) -> ConfirmationArtifact {
        let rendered = self
            .template
            .replace(VERSION_PLACEHOLDER, &version.to_string())
            .replace("{date}", &date.format("%Y-%m-%d").to_string())
            .replace("{log_lines}", &log_lines(commits))
            .replace("{old_log}", old_log);

        ConfirmationArtifact::new(rendered.trim())
    }
}

impl Default for ChangelogTemplate {
    fn default() -> Self {
        ChangelogTemplate {
            template: Self::DEFAULT.to_string(),
        }
    }
}

fn log_lines(commits: &[CommitRecord]) -> String {
    commits
        .iter()
        .map(|commit| format!("  * {}", commit.subject()))
        .collect::<Vec<_>>()
        .join("\n")
}
