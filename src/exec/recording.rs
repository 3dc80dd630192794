//! In-memory command runner that records invocations and replays scripted results.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use super::runner::CommandRunner;
use crate::error::ExecutionError;

/// A command seen by [`RecordingRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommand {
    pub command: String,
    pub working_dir: PathBuf,
}

struct Failure {
    needle: String,
    stderr: String,
}

/// Runner that never spawns a process.
///
/// Every command succeeds with empty stdout unless it contains a substring
/// registered with [`RecordingRunner::fail_when_contains`].
#[derive(Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<RecordedCommand>>,
    failures: Vec<Failure>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make any command containing `needle` fail with exit code 1 and `stderr`.
    pub fn fail_when_contains(mut self, needle: &str, stderr: &str) -> Self {
        self.failures.push(Failure {
            needle: needle.to_string(),
            stderr: stderr.to_string(),
        });
        self
    }

    /// All commands run so far, in order.
    pub fn commands(&self) -> Vec<RecordedCommand> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Commands run so far whose text starts with `prefix`.
    pub fn commands_starting_with(&self, prefix: &str) -> Vec<RecordedCommand> {
        self.commands()
            .into_iter()
            .filter(|c| c.command.starts_with(prefix))
            .collect()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, command: &str, working_dir: &Path) -> Result<String, ExecutionError> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(RecordedCommand {
                command: command.to_string(),
                working_dir: working_dir.to_path_buf(),
            });

        match self.failures.iter().find(|f| command.contains(&f.needle)) {
            Some(failure) => Err(ExecutionError::NonZeroExit {
                command: command.to_string(),
                code: 1,
                stdout: String::new(),
                stderr: failure.stderr.clone(),
            }),
            None => Ok(String::new()),
        }
    }
}
