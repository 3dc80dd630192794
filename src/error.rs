//! Error types for foldercommit modules using thiserror.

use std::time::Duration;

use thiserror::Error;

/// Errors from running an external command.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("{0} not found on PATH")]
    NotInstalled(String),

    #[error("Failed to spawn `{command}`: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with code {code}: {}", self.stderr_text())]
    NonZeroExit {
        command: String,
        code: i32,
        stdout: String,
        stderr: String,
    },

    #[error("`{command}` timed out after {limit:?}")]
    Timeout { command: String, limit: Duration },

    #[error("Cannot quote command argument: {0}")]
    Quoting(String),
}

impl ExecutionError {
    /// The captured standard-error text, falling back to standard output when
    /// stderr is blank (git reports "nothing to commit" on stdout), or the
    /// error description when the command produced neither.
    pub fn stderr_text(&self) -> String {
        match self {
            ExecutionError::NonZeroExit { stdout, stderr, .. } => {
                let stderr = stderr.trim();
                if stderr.is_empty() {
                    stdout.trim().to_string()
                } else {
                    stderr.to_string()
                }
            }
            other => other.to_string(),
        }
    }
}

/// Errors from querying repository status.
#[derive(Error, Debug)]
pub enum StatusQueryError {
    #[error("Failed to open repository: {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("Repository has no working tree")]
    BareRepository,

    #[error("Failed to read repository status: {0}")]
    Statuses(#[source] git2::Error),
}

/// Errors from the text-generation endpoint.
///
/// These never leave the message generator; they are kept as the reason a
/// fallback message was used.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Credential variable {0} is not set")]
    MissingCredential(String),

    #[error("Request to text-generation endpoint failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Text-generation endpoint returned {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Malformed text-generation response: {0}")]
    MalformedResponse(String),

    #[error("Text-generation endpoint returned no text")]
    Empty,

    #[error("Generated text contains control characters")]
    ControlCharacters,

    #[error("Text-generation request timed out after {0:?}")]
    Timeout(Duration),
}

/// Errors from validating configuration.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("At least one monitored folder is required")]
    NoFolders,

    #[error("Monitored folder '{0}' is listed more than once")]
    DuplicateFolder(String),

    #[error("Invalid monitored folder '{0}': must be a relative path inside the repository")]
    InvalidFolder(String),

    #[error("Monitored folder '{0}' is nested; only top-level folders can be monitored")]
    NestedFolder(String),

    #[error("Temperature {0} is outside the accepted range 0.0..=5.0")]
    InvalidTemperature(f64),

    #[error("Invalid text-generation endpoint '{0}'")]
    InvalidEndpoint(String),
}

/// Errors that abort an auto-commit run.
#[derive(Error, Debug)]
pub enum AutoCommitError {
    #[error("Missing prerequisite: {0}")]
    Preflight(#[source] ExecutionError),

    #[error("Failed to read repository status: {0}")]
    Status(#[from] StatusQueryError),

    #[error("Failed to stage changes in {folder}: {}", .source.stderr_text())]
    Stage {
        folder: String,
        #[source]
        source: ExecutionError,
    },

    #[error("Failed to commit changes in {folder}: {}", .source.stderr_text())]
    Commit {
        folder: String,
        #[source]
        source: ExecutionError,
    },

    #[error("Push failed ({} folder(s) remain committed locally: {}): {}",
            .committed.len(), .committed.join(", "), .source.stderr_text())]
    Push {
        committed: Vec<String>,
        #[source]
        source: ExecutionError,
    },
}
