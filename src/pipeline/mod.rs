//! Auto-commit pipeline: commit each changed monitored folder, then push once.
//!
//! Folders are processed strictly one after another because they share a
//! single index; the first failing stage or commit stops the run. A failed
//! push leaves earlier commits in place.

pub mod preflight;

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::{AutoCommitConfig, SummaryScope};
use crate::error::AutoCommitError;
use crate::exec::CommandRunner;
use crate::folders::{classify, records_under};
use crate::git::{STAGE_COMMAND, StatusReader, commit_command, push_command};
use crate::message::{CommitMessageGenerator, MessageOutcome, TextGenerator, summarize_changes};

/// A folder committed during a run and the message path that was taken.
#[derive(Debug)]
pub struct FolderCommit {
    pub folder: String,
    pub outcome: MessageOutcome,
}

/// Result of a run that did not fail.
#[derive(Debug)]
pub enum RunReport {
    /// No monitored folder had changes; nothing was staged, committed or pushed.
    NoChanges,
    /// Every changed folder was committed and the branch was pushed.
    Pushed { commits: Vec<FolderCommit> },
}

impl RunReport {
    pub fn commits(&self) -> &[FolderCommit] {
        match self {
            RunReport::NoChanges => &[],
            RunReport::Pushed { commits } => commits,
        }
    }
}

/// Orchestrates one auto-commit run over injected collaborators.
pub struct AutoCommit<R, S, G> {
    config: AutoCommitConfig,
    runner: R,
    status: S,
    messages: CommitMessageGenerator<G>,
}

impl<R, S, G> AutoCommit<R, S, G>
where
    R: CommandRunner,
    S: StatusReader,
    G: TextGenerator,
{
    pub fn new(
        config: AutoCommitConfig,
        runner: R,
        status: S,
        messages: CommitMessageGenerator<G>,
    ) -> Self {
        Self {
            config,
            runner,
            status,
            messages,
        }
    }

    pub fn config(&self) -> &AutoCommitConfig {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run the full pipeline once.
    pub async fn run(&self) -> Result<RunReport, AutoCommitError> {
        let records = self.status.status()?;
        debug!("Status reported {} changed file(s)", records.len());

        let modified = classify(&records, &self.config.folders);
        if modified.is_empty() {
            info!("No changes detected in monitored folders.");
            return Ok(RunReport::NoChanges);
        }

        let mut commits = Vec::with_capacity(modified.len());
        for folder in modified {
            commits.push(self.commit_folder(folder).await?);
        }

        self.push(commits).await
    }

    /// Stage, describe, and commit one folder.
    async fn commit_folder(&self, folder: String) -> Result<FolderCommit, AutoCommitError> {
        let dir = self.folder_dir(&folder);
        info!("Processing folder: {}", folder);

        info!("Staging changes in {}...", folder);
        if let Err(source) = self.runner.run(STAGE_COMMAND, &dir).await {
            return Err(AutoCommitError::Stage { folder, source });
        }

        let records = self.status.status()?;
        let records = match self.config.summary_scope {
            SummaryScope::Repository => records,
            SummaryScope::Folder => records_under(records, &folder),
        };
        let summary = summarize_changes(&records);

        let outcome = self.messages.generate(&summary).await;
        let message = outcome.message();
        info!("Committing changes with message: \"{}\"", message);

        let committed = match commit_command(&message) {
            Ok(command) => self.runner.run(&command, &dir).await,
            Err(e) => Err(e),
        };
        if let Err(source) = committed {
            return Err(AutoCommitError::Commit { folder, source });
        }

        Ok(FolderCommit { folder, outcome })
    }

    async fn push(&self, commits: Vec<FolderCommit>) -> Result<RunReport, AutoCommitError> {
        info!("Pushing changes...");

        let pushed = match push_command(&self.config.remote, &self.config.branch) {
            Ok(command) => self.runner.run(&command, &self.config.repo_root).await,
            Err(e) => Err(e),
        };
        if let Err(source) = pushed {
            let committed = commits.into_iter().map(|c| c.folder).collect();
            return Err(AutoCommitError::Push { committed, source });
        }

        info!("Changes pushed successfully.");
        Ok(RunReport::Pushed { commits })
    }

    fn folder_dir(&self, folder: &str) -> PathBuf {
        self.config.repo_root.join(folder)
    }
}
