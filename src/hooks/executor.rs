use crate::error::{ChangeReleaseError, Result};
use crate::hooks::HookContext;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

/// Runs configured pre-commit commands
pub struct HookExecutor;

impl HookExecutor {
    /// Execute one command through `sh -c` in `workdir`
    ///
    /// Exit code 0 is success. Any non-zero exit code, or a failure to
    /// spawn the shell, is a [`ChangeReleaseError::Hook`] carrying the
    /// command's output.
    pub fn execute(command: &str, workdir: &Path, context: &HookContext) -> Result<()> {
        debug!(command, workdir = %workdir.display(), "running pre-commit command");

        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command).current_dir(workdir);
        for (key, value) in context.to_env_vars() {
            cmd.env(key, value);
        }

        let output = cmd.output().map_err(|e| {
            ChangeReleaseError::hook(format!("Failed to execute '{}': {}", command, e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            return Err(ChangeReleaseError::hook(format!(
                "'{}' failed with exit code {}\nStdout: {}\nStderr: {}",
                command,
                output.status.code().unwrap_or(-1),
                stdout.trim(),
                stderr.trim()
            )));
        }

        Ok(())
    }

    /// Execute every command in order, stopping at the first failure
    pub fn execute_all<S: AsRef<str>>(
        commands: &[S],
        workdir: &Path,
        context: &HookContext,
    ) -> Result<()> {
        for command in commands {
            Self::execute(command.as_ref(), workdir, context)?;
        }
        if !commands.is_empty() {
            info!(count = commands.len(), "pre-commit commands finished");
        }
        Ok(())
    }
}
