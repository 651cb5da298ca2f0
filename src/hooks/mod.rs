//! Pre-commit commands
//!
//! Configured shell commands run in the repository root after the changelog
//! is confirmed and before the release commit is made. The release being
//! prepared is exposed through the environment:
//! - `GIT_CHANGERELEASE_VERSION`: confirmed version, e.g. `1.4.0`
//! - `GIT_CHANGERELEASE_TAG`: tag about to be created, e.g. `v1.4.0`

pub mod executor;

pub use executor::HookExecutor;

/// Release information passed to pre-commit commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookContext {
    pub version: String,
    pub tag: String,
}

impl HookContext {
    pub fn new(version: impl Into<String>, tag: impl Into<String>) -> Self {
        HookContext {
            version: version.into(),
            tag: tag.into(),
        }
    }

    /// Convert context to environment variables for command execution
    pub fn to_env_vars(&self) -> Vec<(&'static str, String)> {
        vec![
            ("GIT_CHANGERELEASE_VERSION", self.version.clone()),
            ("GIT_CHANGERELEASE_TAG", self.tag.clone()),
        ]
    }
}
