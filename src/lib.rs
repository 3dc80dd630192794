//! foldercommit - commit each monitored folder separately with an AI-drafted message, then push.
//!
//! # Overview
//!
//! foldercommit reads the working tree status, finds which monitored top-level
//! folders contain changes, and for each one stages the folder, asks a remote
//! text-generation endpoint for a one-line commit message, and commits. Once
//! every folder is committed the branch is pushed.

pub mod config;
pub mod error;
pub mod exec;
pub mod folders;
pub mod git;
pub mod message;
pub mod pipeline;

// Re-export commonly used types
pub use config::{AutoCommitConfig, GenerationConfig, SummaryScope};
pub use error::{AutoCommitError, ConfigError, ExecutionError, GenerationError, StatusQueryError};
pub use exec::{CommandRunner, RecordingRunner, ShellRunner};
pub use folders::{MonitoredFolders, classify};
pub use git::{ChangeRecord, GitStatusReader, StatusReader};
pub use message::{CommitMessage, CommitMessageGenerator, HttpTextGenerator, MessageOutcome, TextGenerator};
pub use pipeline::{AutoCommit, FolderCommit, RunReport};
