//! End-to-end release run
//!
//! Separates the release workflow from CLI argument parsing so it can be
//! driven programmatically with any [`Repository`] and [`ArtifactEditor`].

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::CommitRecord;
use crate::error::Result;
use crate::git::Repository;
use crate::hooks::{HookContext, HookExecutor};
use crate::release::flow::{confirm, Overrides, Proposed, ReleaseDecision, ReleaseDecisionFlow};
use crate::release::{ArtifactEditor, ConfirmationArtifact, INITIAL_BASE_VERSION};
use chrono::NaiveDate;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Inputs of one release run that do not come from the config file
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseOptions {
    /// Changelog file, relative to the repository root
    pub changelog: PathBuf,

    /// Prerelease and build metadata applied to the proposed version
    pub overrides: Overrides,

    /// Date written into the changelog
    pub date: NaiveDate,
}

impl ReleaseOptions {
    pub fn new(changelog: impl Into<PathBuf>, date: NaiveDate) -> Self {
        ReleaseOptions {
            changelog: changelog.into(),
            overrides: Overrides::default(),
            date,
        }
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
        self
    }
}

/// Why a run ended without a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoReleaseReason {
    /// Tag (or initial version) the log was read from
    pub since: String,

    /// Commits dropped by ignore patterns
    pub ignored: usize,
}

impl NoReleaseReason {
    pub fn warning(&self) -> BoundaryWarning {
        if self.ignored == 0 {
            BoundaryWarning::NoNewCommits {
                since: self.since.clone(),
            }
        } else {
            BoundaryWarning::AllCommitsIgnored {
                since: self.since.clone(),
                ignored: self.ignored,
            }
        }
    }
}

/// Summary of a completed release
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseReport {
    pub decision: ReleaseDecision,
    pub tag: String,
    pub previous_tag: Option<String>,
    pub changelog: PathBuf,
    pub commits: Vec<CommitRecord>,
    pub ignored: usize,
    pub warnings: Vec<BoundaryWarning>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseOutcome {
    Released(ReleaseReport),
    NoRelease(NoReleaseReason),
}

/// Run a release against `repo`.
///
/// 1. Read the latest tag (falling back to `0.0.0`) and the log since it
/// 2. Propose a version, or stop with [`ReleaseOutcome::NoRelease`]
/// 3. Render the changelog, write it and hand it to `editor` for confirmation
/// 4. Run the pre-commit commands
/// 5. Commit the changelog and tag the confirmed version
///
/// Without an editor the proposed version is used unchanged. Config
/// patterns and templates are compiled before the repository is touched.
pub fn run_release<R: Repository + ?Sized>(
    repo: &R,
    config: &Config,
    options: &ReleaseOptions,
    editor: Option<&dyn ArtifactEditor>,
) -> Result<ReleaseOutcome> {
    let classifier = config.classifier()?;
    let tag_pattern = config.tag_pattern()?;
    let template = config.changelog_template()?;
    let workdir = repo.workdir()?;
    let mut warnings = Vec::new();

    let previous_tag = repo.latest_tag()?;
    let base = match previous_tag.as_deref() {
        Some(tag) => tag_pattern.version_text(tag).to_string(),
        None => {
            let warning = BoundaryWarning::NoPriorTag {
                fallback: INITIAL_BASE_VERSION.to_string(),
            };
            warn!("{}", warning);
            warnings.push(warning);
            INITIAL_BASE_VERSION.to_string()
        }
    };

    let log_lines = repo.log_lines(previous_tag.as_deref())?;
    let flow = ReleaseDecisionFlow::new(&classifier);

    let proposal = match flow.propose(&base, &log_lines, &options.overrides)? {
        Proposed::Release(proposal) => proposal,
        Proposed::NoRelease { ignored } => {
            let reason = NoReleaseReason {
                since: previous_tag.unwrap_or(base),
                ignored,
            };
            warn!("{}", reason.warning());
            return Ok(ReleaseOutcome::NoRelease(reason));
        }
    };

    let changelog_path = workdir.join(&options.changelog);
    let old_log = read_existing(&changelog_path)?;
    let rendered = template.render(
        &proposal.proposed_version,
        options.date,
        &proposal.commits,
        &old_log,
    );
    write_changelog(&changelog_path, &rendered)?;

    let confirmed = confirm(&proposal, rendered, editor)?;
    write_changelog(&changelog_path, &confirmed.artifact)?;

    let decision = confirmed.decision;
    if decision.was_overridden() {
        let warning = BoundaryWarning::VersionOverridden {
            proposed: decision.proposed_version.to_string(),
            confirmed: decision.confirmed_version.to_string(),
        };
        warn!("{}", warning);
        warnings.push(warning);
    }

    let version = decision.confirmed_version.to_string();
    let tag = tag_pattern.format(&decision.confirmed_version);

    HookExecutor::execute_all(
        &config.pre_commit_commands,
        &workdir,
        &HookContext::new(version.as_str(), tag.as_str()),
    )?;

    let relative = changelog_path
        .strip_prefix(&workdir)
        .unwrap_or(&options.changelog);
    repo.commit_file(relative, &config.commit_message(&version, &tag))?;
    repo.create_tag(&tag, &tag, !config.disable_signed_tags)?;
    info!(%tag, "release tagged");

    Ok(ReleaseOutcome::Released(ReleaseReport {
        decision,
        tag,
        previous_tag,
        changelog: changelog_path,
        commits: proposal.commits,
        ignored: proposal.ignored,
        warnings,
    }))
}

fn read_existing(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e.into()),
    }
}

fn write_changelog(path: &Path, artifact: &ConfirmationArtifact) -> Result<()> {
    fs::write(path, format!("{}\n", artifact.content().trim_end()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChangeReleaseError;
    use crate::git::MockRepository;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn unsigned() -> Config {
        Config {
            disable_signed_tags: true,
            ..Config::default()
        }
    }

    fn report(outcome: ReleaseOutcome) -> ReleaseReport {
        match outcome {
            ReleaseOutcome::Released(report) => report,
            ReleaseOutcome::NoRelease(reason) => panic!("unexpected no-release: {:?}", reason),
        }
    }

    #[test]
    fn test_release_without_editor() {
        let dir = tempfile::tempdir().unwrap();
        let repo = MockRepository::new(dir.path())
            .with_latest_tag("v0.4.0")
            .with_commit("2222222", "feat: new export")
            .with_commit("1111111", "fix: null pointer");

        let report = report(
            run_release(&repo, &unsigned(), &ReleaseOptions::new("History.md", date()), None)
                .unwrap(),
        );

        assert_eq!(report.tag, "v0.5.0");
        assert_eq!(report.previous_tag.as_deref(), Some("v0.4.0"));
        assert!(report.warnings.is_empty());
        assert_eq!(
            fs::read_to_string(dir.path().join("History.md")).unwrap(),
            "# 0.5.0 / 2024-03-01\n\n  * feat: new export\n  * fix: null pointer\n"
        );
        assert_eq!(
            repo.commits(),
            vec![(PathBuf::from("History.md"), "Prepared release v0.5.0".to_string())]
        );
        let tags = repo.tags();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "v0.5.0");
        assert!(!tags[0].signed);
    }

    #[test]
    fn test_changelog_prepends_old_log() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("History.md"), "# 0.4.0 / 2024-01-01\n\n  * initial\n").unwrap();
        let repo = MockRepository::new(dir.path())
            .with_latest_tag("v0.4.0")
            .with_commit("1111111", "fix: typo");

        run_release(&repo, &unsigned(), &ReleaseOptions::new("History.md", date()), None).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("History.md")).unwrap(),
            "# 0.4.1 / 2024-03-01\n\n  * fix: typo\n\n# 0.4.0 / 2024-01-01\n\n  * initial\n"
        );
    }

    #[test]
    fn test_no_prior_tag_starts_from_initial_version() {
        let dir = tempfile::tempdir().unwrap();
        let repo = MockRepository::new(dir.path()).with_commit("1111111", "initial commit");

        let report = report(
            run_release(&repo, &unsigned(), &ReleaseOptions::new("History.md", date()), None)
                .unwrap(),
        );

        assert_eq!(report.tag, "v0.1.0");
        assert_eq!(report.previous_tag, None);
        assert_eq!(
            report.warnings,
            vec![BoundaryWarning::NoPriorTag {
                fallback: "0.0.0".to_string()
            }]
        );
    }

    #[test]
    fn test_no_commits_stops_without_side_effects() {
        let dir = tempfile::tempdir().unwrap();
        let repo = MockRepository::new(dir.path()).with_latest_tag("v1.0.0");

        let outcome =
            run_release(&repo, &unsigned(), &ReleaseOptions::new("History.md", date()), None)
                .unwrap();

        let ReleaseOutcome::NoRelease(reason) = outcome else {
            panic!("expected no-release");
        };
        assert_eq!(
            reason.warning(),
            BoundaryWarning::NoNewCommits {
                since: "v1.0.0".to_string()
            }
        );
        assert!(!dir.path().join("History.md").exists());
        assert!(repo.commits().is_empty());
        assert!(repo.tags().is_empty());
    }

    #[test]
    fn test_ignored_only_history_reports_count() {
        let dir = tempfile::tempdir().unwrap();
        let repo = MockRepository::new(dir.path())
            .with_latest_tag("v1.0.0")
            .with_commit("1111111", "Merge branch 'feature'")
            .with_commit("2222222", "Merge branch 'other'");
        let config = Config {
            ignore_messages: vec!["^Merge".to_string()],
            ..unsigned()
        };

        let outcome =
            run_release(&repo, &config, &ReleaseOptions::new("History.md", date()), None).unwrap();

        assert_eq!(
            outcome,
            ReleaseOutcome::NoRelease(NoReleaseReason {
                since: "v1.0.0".to_string(),
                ignored: 2
            })
        );
    }

    #[test]
    fn test_editor_override_wins() {
        let dir = tempfile::tempdir().unwrap();
        let repo = MockRepository::new(dir.path())
            .with_latest_tag("v1.0.0")
            .with_commit("1111111", "feat: x");
        let editor = |a: ConfirmationArtifact| -> Result<ConfirmationArtifact> {
            Ok(ConfirmationArtifact::new(
                a.content().replacen("1.1.0", "2.0.0-rc.1", 1),
            ))
        };

        let report = report(
            run_release(
                &repo,
                &unsigned(),
                &ReleaseOptions::new("History.md", date()),
                Some(&editor),
            )
            .unwrap(),
        );

        assert_eq!(report.decision.proposed_version.to_string(), "1.1.0");
        assert_eq!(report.tag, "v2.0.0-rc.1");
        assert!(matches!(
            report.warnings.as_slice(),
            [BoundaryWarning::VersionOverridden { .. }]
        ));
        assert!(fs::read_to_string(dir.path().join("History.md"))
            .unwrap()
            .starts_with("# 2.0.0-rc.1 / 2024-03-01"));
    }

    #[test]
    fn test_emptied_changelog_aborts_before_commit() {
        let dir = tempfile::tempdir().unwrap();
        let repo = MockRepository::new(dir.path())
            .with_latest_tag("v1.0.0")
            .with_commit("1111111", "feat: x");
        let editor =
            |_: ConfirmationArtifact| -> Result<ConfirmationArtifact> { Ok(ConfirmationArtifact::new("")) };

        let result = run_release(
            &repo,
            &unsigned(),
            &ReleaseOptions::new("History.md", date()),
            Some(&editor),
        );

        assert!(matches!(result, Err(ChangeReleaseError::EmptyArtifact)));
        assert!(repo.commits().is_empty());
        assert!(repo.tags().is_empty());
    }

    #[test]
    fn test_custom_tag_pattern_and_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let repo = MockRepository::new(dir.path())
            .with_latest_tag("release-1.2.3")
            .with_commit("1111111", "fix: x");
        let config = Config {
            tag_pattern: "release-{version}".to_string(),
            release_commit_message: "chore: release {version}".to_string(),
            ..Config::default()
        };
        let options = ReleaseOptions::new("CHANGELOG.md", date()).with_overrides(Overrides {
            prerelease: "beta.1".to_string(),
            metadata: String::new(),
        });

        let report = report(run_release(&repo, &config, &options, None).unwrap());

        assert_eq!(report.tag, "release-1.2.4-beta.1");
        assert_eq!(repo.commits()[0].1, "chore: release 1.2.4-beta.1");
        assert!(repo.tags()[0].signed);
    }

    #[test]
    fn test_malformed_log_line_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let repo = MockRepository::new(dir.path())
            .with_latest_tag("v1.0.0")
            .with_raw_line("1111111\tfeat: x");

        let result =
            run_release(&repo, &unsigned(), &ReleaseOptions::new("History.md", date()), None);
        assert!(matches!(
            result,
            Err(ChangeReleaseError::MalformedLogLine { fields: 2, .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_pre_commit_command_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let repo = MockRepository::new(dir.path())
            .with_latest_tag("v1.0.0")
            .with_commit("1111111", "feat: x");
        let config = Config {
            pre_commit_commands: vec!["exit 1".to_string()],
            ..unsigned()
        };

        let result = run_release(&repo, &config, &ReleaseOptions::new("History.md", date()), None);

        assert!(matches!(result, Err(ChangeReleaseError::Hook(_))));
        assert!(repo.commits().is_empty());
    }
}
