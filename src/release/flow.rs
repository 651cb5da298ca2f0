//! Release decision: propose a version from the commit log, then reconcile
//! it with the human-confirmed changelog.

use crate::analyzer::{select_bump, ClassifierConfig};
use crate::domain::{CommitRecord, SemanticVersion, Severity};
use crate::error::{ChangeReleaseError, Result};
use crate::release::{ArtifactEditor, ConfirmationArtifact};
use tracing::{debug, info};

/// Base version used when the repository has no release tag yet
pub const INITIAL_BASE_VERSION: &str = "0.0.0";

/// Caller-supplied prerelease and build metadata; empty means none
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub prerelease: String,
    pub metadata: String,
}

/// Computed, not yet confirmed, release
#[derive(Debug, Clone, PartialEq)]
pub struct Proposal {
    pub base_version: SemanticVersion,
    pub severity: Severity,
    pub proposed_version: SemanticVersion,
    pub commits: Vec<CommitRecord>,
    pub ignored: usize,
}

/// Result of the proposal phase
#[derive(Debug, Clone, PartialEq)]
pub enum Proposed {
    Release(Proposal),
    /// Nothing survived the ignore filter; `ignored` counts dropped commits
    NoRelease { ignored: usize },
}

/// Final, authoritative outcome of a release decision
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseDecision {
    pub base_version: SemanticVersion,
    pub aggregate_severity: Severity,
    pub proposed_version: SemanticVersion,
    pub confirmed_version: SemanticVersion,
}

impl ReleaseDecision {
    pub fn was_overridden(&self) -> bool {
        self.proposed_version != self.confirmed_version
    }
}

/// Drives classification, aggregation and version arithmetic for one run
pub struct ReleaseDecisionFlow<'a> {
    classifier: &'a ClassifierConfig,
}

impl<'a> ReleaseDecisionFlow<'a> {
    pub fn new(classifier: &'a ClassifierConfig) -> Self {
        ReleaseDecisionFlow { classifier }
    }

    /// Compute the proposed version from the base tag and raw log lines.
    ///
    /// Returns [`Proposed::NoRelease`] when no commit survives the ignore
    /// filter; every other problem is an error.
    pub fn propose<S: AsRef<str>>(
        &self,
        base: &str,
        log_lines: &[S],
        overrides: &Overrides,
    ) -> Result<Proposed> {
        let base_version = SemanticVersion::parse(base)?;
        let log = self.classifier.classify_log(log_lines)?;

        let severity = match select_bump(&log.commits) {
            Ok(severity) => severity,
            Err(ChangeReleaseError::NoCommits) => {
                info!(ignored = log.ignored, "no commits to release");
                return Ok(Proposed::NoRelease {
                    ignored: log.ignored,
                });
            }
            Err(e) => return Err(e),
        };

        let proposed_version = base_version
            .bump(severity)?
            .with_prerelease(&overrides.prerelease)?
            .with_metadata(&overrides.metadata)?;

        info!(
            base = %base_version,
            %severity,
            proposed = %proposed_version,
            commits = log.commits.len(),
            "proposed release"
        );

        Ok(Proposed::Release(Proposal {
            base_version,
            severity,
            proposed_version,
            commits: log.commits,
            ignored: log.ignored,
        }))
    }
}

/// Version and artifact after the confirmation phase
#[derive(Debug, Clone, PartialEq)]
pub struct Confirmed {
    pub decision: ReleaseDecision,
    pub artifact: ConfirmationArtifact,
}

/// Hand the rendered artifact to the editor and re-read the version.
///
/// Without an editor the proposed version is confirmed as-is and the
/// artifact is not re-parsed.
pub fn confirm(
    proposal: &Proposal,
    artifact: ConfirmationArtifact,
    editor: Option<&dyn ArtifactEditor>,
) -> Result<Confirmed> {
    let (confirmed_version, artifact) = match editor {
        Some(editor) => {
            let edited = editor.edit(artifact)?;
            let version = edited.read_version()?;
            debug!(confirmed = %version, "read version back from changelog");
            (version, edited)
        }
        None => (proposal.proposed_version.clone(), artifact),
    };

    Ok(Confirmed {
        decision: ReleaseDecision {
            base_version: proposal.base_version.clone(),
            aggregate_severity: proposal.severity,
            proposed_version: proposal.proposed_version.clone(),
            confirmed_version,
        },
        artifact,
    })
}
