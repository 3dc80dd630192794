//! foldercommit - CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use foldercommit::config::{
    self, AutoCommitConfig, DEFAULT_API_KEY_ENV, DEFAULT_BRANCH, DEFAULT_ENDPOINT,
    DEFAULT_MAX_TOKENS, DEFAULT_REMOTE, DEFAULT_TEMPERATURE, GenerationConfig, SummaryScope,
};
use foldercommit::folders::{DEFAULT_FOLDERS, MonitoredFolders};
use foldercommit::pipeline::preflight::{check_git_installed, check_shell_installed};
use foldercommit::{
    AutoCommit, AutoCommitError, CommitMessageGenerator, GitStatusReader, HttpTextGenerator,
    RunReport, ShellRunner,
};

/// Commit each changed monitored folder with an AI-drafted message, then push.
#[derive(Parser, Debug)]
#[command(name = "foldercommit")]
#[command(about = "Commit each changed monitored folder with an AI-drafted message, then push")]
#[command(version)]
struct Cli {
    /// Folder to monitor (repeatable; replaces the default set)
    #[arg(long = "folder", value_name = "NAME")]
    folders: Vec<String>,

    /// Path inside the repository to operate on
    #[arg(long, default_value = ".")]
    repo: PathBuf,

    /// Remote to push to
    #[arg(long, default_value = DEFAULT_REMOTE)]
    remote: String,

    /// Branch to push
    #[arg(long, default_value = DEFAULT_BRANCH)]
    branch: String,

    /// Text-generation endpoint URL
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Environment variable holding the endpoint's bearer token
    #[arg(long, default_value = DEFAULT_API_KEY_ENV)]
    api_key_env: String,

    /// Maximum tokens to generate per message
    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    max_tokens: u32,

    /// Sampling temperature
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    temperature: f64,

    /// Kill git commands that run longer than this many seconds
    #[arg(long, value_name = "SECS")]
    command_timeout: Option<u64>,

    /// Give up on message generation after this many seconds
    #[arg(long, value_name = "SECS")]
    request_timeout: Option<u64>,

    /// Describe only the folder being committed to the message generator
    #[arg(long)]
    scope_summary_to_folder: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // A missing .env is fine; the credential may come from the environment.
    match config::ignore_missing_env_file(dotenvy::dotenv()) {
        Ok(Some(path)) => debug!("Loaded environment from {}", path.display()),
        Ok(None) => {}
        Err(e) => warn!("Ignoring unreadable .env file: {}", e),
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    check_git_installed().map_err(AutoCommitError::Preflight)?;
    check_shell_installed().map_err(AutoCommitError::Preflight)?;

    let folders = if cli.folders.is_empty() {
        MonitoredFolders::new(DEFAULT_FOLDERS)
    } else {
        MonitoredFolders::new(&cli.folders)
    }
    .context("Invalid monitored folders")?;

    let generation = GenerationConfig {
        endpoint: cli.endpoint,
        api_key_env: cli.api_key_env,
        max_tokens: cli.max_tokens,
        temperature: cli.temperature,
        request_timeout: config::request_timeout(cli.request_timeout),
    };
    generation
        .validate()
        .context("Invalid text-generation settings")?;

    let status = GitStatusReader::discover(&cli.repo).map_err(AutoCommitError::Status)?;

    let mut settings = AutoCommitConfig::new(status.workdir(), folders);
    settings.remote = cli.remote;
    settings.branch = cli.branch;
    if cli.scope_summary_to_folder {
        settings.summary_scope = SummaryScope::Folder;
    }

    let generator =
        HttpTextGenerator::from_env(generation).context("Failed to build HTTP client")?;
    let runner = ShellRunner::with_timeout(config::command_timeout(cli.command_timeout));

    let pipeline = AutoCommit::new(
        settings,
        runner,
        status,
        CommitMessageGenerator::new(generator),
    );

    match pipeline.run().await? {
        RunReport::NoChanges => {}
        RunReport::Pushed { commits } => {
            let fallbacks = commits.iter().filter(|c| c.outcome.is_fallback()).count();
            info!(
                "Committed {} folder(s), {} with the fallback message",
                commits.len(),
                fallbacks
            );
        }
    }

    Ok(())
}
