use thiserror::Error;

/// Unified error type for git-changerelease operations
#[derive(Error, Debug)]
pub enum ChangeReleaseError {
    #[error("Malformed version '{input}': {reason}")]
    MalformedVersion { input: String, reason: String },

    #[error("Invalid {field} identifier '{identifier}' in '{input}'")]
    InvalidIdentifier {
        field: &'static str,
        identifier: String,
        input: String,
    },

    #[error("Malformed log line (expected 4 tab-separated fields, got {fields}): {line:?}")]
    MalformedLogLine { line: String, fields: usize },

    /// Nothing to release. Callers must not report this as a failure.
    #[error("No commits to release")]
    NoCommits,

    #[error("Confirmation artifact is empty, cannot read back the version")]
    EmptyArtifact,

    #[error("Invalid {list} pattern '{pattern}': {source}")]
    RuleCompilation {
        list: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("Pre-commit command failed: {0}")]
    Hook(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Convenience type alias for Results in git-changerelease
pub type Result<T> = std::result::Result<T, ChangeReleaseError>;

impl ChangeReleaseError {
    /// Create a malformed-version error for the given input
    pub fn malformed_version(input: impl Into<String>, reason: impl Into<String>) -> Self {
        ChangeReleaseError::MalformedVersion {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ChangeReleaseError::Config(msg.into())
    }

    /// Create an editor error with context
    pub fn editor(msg: impl Into<String>) -> Self {
        ChangeReleaseError::Editor(msg.into())
    }

    /// Create a hook error with context
    pub fn hook(msg: impl Into<String>) -> Self {
        ChangeReleaseError::Hook(msg.into())
    }

    /// Create a template error with context
    pub fn template(msg: impl Into<String>) -> Self {
        ChangeReleaseError::Template(msg.into())
    }

    /// Name of the stage that produced the error, used in CLI messages
    pub fn stage(&self) -> &'static str {
        match self {
            ChangeReleaseError::MalformedVersion { .. } => "version parsing",
            ChangeReleaseError::InvalidIdentifier { .. } => "version overrides",
            ChangeReleaseError::MalformedLogLine { .. } => "reading commit log",
            ChangeReleaseError::NoCommits => "aggregation",
            ChangeReleaseError::EmptyArtifact => "confirmation",
            ChangeReleaseError::RuleCompilation { .. } => "loading classification rules",
            ChangeReleaseError::Config(_) | ChangeReleaseError::ConfigParse(_) => {
                "configuration"
            }
            ChangeReleaseError::Git(_) => "git",
            ChangeReleaseError::Editor(_) => "editing changelog",
            ChangeReleaseError::Hook(_) => "pre-commit commands",
            ChangeReleaseError::Template(_) => "rendering changelog",
            ChangeReleaseError::Io(_) => "file access",
        }
    }

    /// Whether this is the "nothing to release" signal rather than a fault
    pub fn is_no_commits(&self) -> bool {
        matches!(self, ChangeReleaseError::NoCommits)
    }
}
