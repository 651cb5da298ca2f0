use std::fmt;

/// Situations at the edge of normal operation that are reported to the
/// user without failing the run.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No release tag exists, the whole history is analysed
    NoPriorTag { fallback: String },
    /// Nothing was committed since the base
    NoNewCommits { since: String },
    /// Commits exist but every one matched an ignore pattern
    AllCommitsIgnored { since: String, ignored: usize },
    /// The human changed the version while editing the changelog
    VersionOverridden { proposed: String, confirmed: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoPriorTag { fallback } => {
                write!(
                    f,
                    "No release tag found, analysing the full history from {}",
                    fallback
                )
            }
            BoundaryWarning::NoNewCommits { since } => {
                write!(f, "Found no changes since {}, stopping now", since)
            }
            BoundaryWarning::AllCommitsIgnored { since, ignored } => {
                write!(
                    f,
                    "All {} commit(s) since {} match ignore patterns, stopping now",
                    ignored, since
                )
            }
            BoundaryWarning::VersionOverridden {
                proposed,
                confirmed,
            } => {
                write!(
                    f,
                    "Version changed during edit: proposed {}, using {}",
                    proposed, confirmed
                )
            }
        }
    }
}
