//! Shell command execution scoped to a working directory.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::error::ExecutionError;

/// Trait for running shell commands.
///
/// This abstraction allows replacing the subprocess in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `command` through the shell inside `working_dir` and return its stdout.
    async fn run(&self, command: &str, working_dir: &Path) -> Result<String, ExecutionError>;
}

/// Runner that spawns a real shell process per command.
#[derive(Debug, Clone, Default)]
pub struct ShellRunner {
    timeout: Option<Duration>,
}

impl ShellRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill commands that run longer than `limit`.
    pub fn with_timeout(limit: Option<Duration>) -> Self {
        Self { timeout: limit }
    }
}

/// POSIX shell used on every platform; command lines carry POSIX quoting.
pub const SHELL: &str = "sh";

fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new(SHELL);
    cmd.arg("-c").arg(command);
    cmd
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, command: &str, working_dir: &Path) -> Result<String, ExecutionError> {
        debug!("Running `{}` in {}", command, working_dir.display());

        let mut cmd = shell_command(command);
        cmd.current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let spawned = cmd.output();
        let output = match self.timeout {
            Some(limit) => timeout(limit, spawned)
                .await
                .map_err(|_| ExecutionError::Timeout {
                    command: command.to_string(),
                    limit,
                })?,
            None => spawned.await,
        }
        .map_err(|source| ExecutionError::SpawnFailed {
            command: command.to_string(),
            source,
        })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            debug!("`{}` exited with code {}", command, code);
            return Err(ExecutionError::NonZeroExit {
                command: command.to_string(),
                code,
                stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    async fn test_run_captures_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let out = ShellRunner::new().run("echo hello", dir.path()).await.unwrap();
        assert_eq!(out.trim(), "hello");
    }

    #[tokio::test]
    #[serial]
    async fn test_run_uses_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "x").unwrap();

        let out = ShellRunner::new().run("ls", dir.path()).await.unwrap();
        assert!(out.contains("marker.txt"));
    }

    #[tokio::test]
    #[serial]
    async fn test_non_zero_exit_carries_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let result = ShellRunner::new()
            .run("echo boom >&2; exit 3", dir.path())
            .await;

        match result {
            Err(ExecutionError::NonZeroExit { code, stderr, .. }) => {
                assert_eq!(code, 3);
                assert_eq!(stderr.trim(), "boom");
            }
            other => panic!("Expected NonZeroExit, got {:?}", other),
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_missing_working_directory_fails_to_spawn() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let result = ShellRunner::new().run("true", &missing).await;
        assert!(matches!(result, Err(ExecutionError::SpawnFailed { .. })));
    }

    #[tokio::test]
    #[serial]
    async fn test_timeout_kills_slow_command() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ShellRunner::with_timeout(Some(Duration::from_millis(100)));

        let result = runner.run("sleep 5", dir.path()).await;
        match result {
            Err(err @ ExecutionError::Timeout { .. }) => {
                assert!(err.to_string().ends_with("timed out after 100ms"));
            }
            other => panic!("Expected Timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_failure_reported_on_stdout_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let result = ShellRunner::new()
            .run("echo 'nothing to commit, working tree clean'; exit 1", dir.path())
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.stderr_text(), "nothing to commit, working tree clean");
        assert!(err.to_string().contains("nothing to commit"));
    }

    #[test]
    fn test_stderr_text_trims_output() {
        let err = ExecutionError::NonZeroExit {
            command: "git push".to_string(),
            code: 1,
            stdout: "Everything up-to-date\n".to_string(),
            stderr: "  rejected\n".to_string(),
        };
        assert_eq!(err.stderr_text(), "rejected");
    }

    #[test]
    fn test_stderr_text_falls_back_to_stdout() {
        let err = ExecutionError::NonZeroExit {
            command: "git commit -m x".to_string(),
            code: 1,
            stdout: "nothing to commit\n".to_string(),
            stderr: "  \n".to_string(),
        };
        assert_eq!(err.stderr_text(), "nothing to commit");
    }
}
