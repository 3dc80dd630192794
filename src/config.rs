//! Run configuration passed to the pipeline and the message generator.

use std::env;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::error::ConfigError;
use crate::folders::MonitoredFolders;

pub const DEFAULT_REMOTE: &str = "origin";
pub const DEFAULT_BRANCH: &str = "main";

pub const DEFAULT_ENDPOINT: &str = "https://api.cohere.ai/generate";
pub const DEFAULT_API_KEY_ENV: &str = "COHERE_API_KEY";
pub const DEFAULT_MAX_TOKENS: u32 = 50;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Default timeout for the text-generation request.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Environment variable overriding the per-command timeout (seconds).
pub const COMMAND_TIMEOUT_ENV_VAR: &str = "FOLDERCOMMIT_COMMAND_TIMEOUT";

/// Environment variable overriding the text-generation request timeout (seconds).
pub const REQUEST_TIMEOUT_ENV_VAR: &str = "FOLDERCOMMIT_REQUEST_TIMEOUT";

/// Which changes are described to the message generator for a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryScope {
    /// Every changed file in the repository.
    #[default]
    Repository,
    /// Only changed files under the folder being committed.
    Folder,
}

/// Settings for one auto-commit run.
#[derive(Debug, Clone)]
pub struct AutoCommitConfig {
    /// Work tree root; monitored folders are resolved against it.
    pub repo_root: PathBuf,
    pub folders: MonitoredFolders,
    pub remote: String,
    pub branch: String,
    pub summary_scope: SummaryScope,
}

impl AutoCommitConfig {
    pub fn new(repo_root: impl Into<PathBuf>, folders: MonitoredFolders) -> Self {
        Self {
            repo_root: repo_root.into(),
            folders,
            remote: DEFAULT_REMOTE.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            summary_scope: SummaryScope::default(),
        }
    }
}

/// Settings for the text-generation endpoint.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub endpoint: String,
    /// Name of the environment variable holding the bearer credential.
    pub api_key_env: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub request_timeout: Duration,
}

impl GenerationConfig {
    /// Check endpoint and sampling settings before any request is made.
    pub fn validate(&self) -> Result<(), ConfigError> {
        reqwest::Url::parse(&self.endpoint)
            .map_err(|_| ConfigError::InvalidEndpoint(self.endpoint.clone()))?;

        if !(0.0..=5.0).contains(&self.temperature) {
            return Err(ConfigError::InvalidTemperature(self.temperature));
        }

        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

/// Read a timeout in seconds from `var`.
///
/// Returns `None` when the variable is unset or empty. Logs a warning and
/// returns `None` if the value is not a whole number of seconds.
pub fn timeout_from_env(var: &str) -> Option<Duration> {
    match env::var(var) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) => Some(Duration::from_secs(secs)),
            Err(_) => {
                warn!("Invalid {} value '{}', ignoring", var, v);
                None
            }
        },
        _ => None,
    }
}

/// Per-command timeout: explicit flag, then environment, else unlimited.
pub fn command_timeout(flag_secs: Option<u64>) -> Option<Duration> {
    flag_secs
        .map(Duration::from_secs)
        .or_else(|| timeout_from_env(COMMAND_TIMEOUT_ENV_VAR))
}

/// Request timeout: explicit flag, then environment, else the default.
pub fn request_timeout(flag_secs: Option<u64>) -> Duration {
    flag_secs
        .map(Duration::from_secs)
        .or_else(|| timeout_from_env(REQUEST_TIMEOUT_ENV_VAR))
        .unwrap_or(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
}

/// Treat a missing `.env` file as nothing to load.
///
/// Any other failure, such as a line that does not parse, is returned so the
/// caller can report it.
pub fn ignore_missing_env_file<T>(
    result: Result<T, dotenvy::Error>,
) -> Result<Option<T>, dotenvy::Error> {
    match result {
        Ok(loaded) => Ok(Some(loaded)),
        Err(dotenvy::Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
