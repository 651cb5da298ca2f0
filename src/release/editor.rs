use crate::error::{ChangeReleaseError, Result};
use crate::release::ConfirmationArtifact;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, info};

/// Environment variable naming the interactive editor
pub const EDITOR_ENV: &str = "EDITOR";

/// Capability that lets a human revise the confirmation artifact.
///
/// Implemented by [`ExternalEditor`] for real runs and by any closure
/// `Fn(ConfirmationArtifact) -> Result<ConfirmationArtifact>` for tests.
pub trait ArtifactEditor {
    fn edit(&self, artifact: ConfirmationArtifact) -> Result<ConfirmationArtifact>;
}

impl<F> ArtifactEditor for F
where
    F: Fn(ConfirmationArtifact) -> Result<ConfirmationArtifact>,
{
    fn edit(&self, artifact: ConfirmationArtifact) -> Result<ConfirmationArtifact> {
        self(artifact)
    }
}

/// Opens the artifact in `$EDITOR` and blocks until the editor exits
#[derive(Debug, Clone)]
pub struct ExternalEditor {
    program: String,
    path: PathBuf,
}

impl ExternalEditor {
    pub fn new(program: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        ExternalEditor {
            program: program.into(),
            path: path.into(),
        }
    }

    /// Build an editor from `$EDITOR`; fails when the variable is unset or empty
    pub fn from_env(path: impl Into<PathBuf>) -> Result<Self> {
        match std::env::var(EDITOR_ENV) {
            Ok(program) if !program.trim().is_empty() => Ok(Self::new(program, path)),
            _ => Err(ChangeReleaseError::editor(
                "changelog editing is enabled but $EDITOR is not set (use --no-edit to skip)",
            )),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl ArtifactEditor for ExternalEditor {
    fn edit(&self, artifact: ConfirmationArtifact) -> Result<ConfirmationArtifact> {
        fs::write(&self.path, artifact.content())?;

        // $EDITOR may carry arguments, e.g. "code --wait"
        let mut parts = self.program.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| ChangeReleaseError::editor("empty editor command"))?;

        info!(editor = %self.program, path = %self.path.display(), "waiting for editor");
        let status = Command::new(program)
            .args(parts)
            .arg(&self.path)
            .status()
            .map_err(|e| {
                ChangeReleaseError::editor(format!("failed to start '{}': {}", self.program, e))
            })?;

        if !status.success() {
            return Err(ChangeReleaseError::editor(format!(
                "'{}' exited with status {}, stopping here",
                self.program,
                status.code().unwrap_or(-1)
            )));
        }

        let content = fs::read_to_string(&self.path)?;
        debug!(bytes = content.len(), "read back edited changelog");
        Ok(ConfirmationArtifact::new(content))
    }
}
