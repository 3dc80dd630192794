//! Shell command lines for staging, committing, and pushing.

use shlex::try_quote;

use crate::error::ExecutionError;
use crate::message::CommitMessage;

/// Stage everything under the current working directory.
pub const STAGE_COMMAND: &str = "git add .";

/// `git commit -m <message>` with the message quoted for the shell.
pub fn commit_command(message: &CommitMessage) -> Result<String, ExecutionError> {
    Ok(format!("git commit -m {}", quote(message.as_str())?))
}

/// `git push <remote> <branch>`.
pub fn push_command(remote: &str, branch: &str) -> Result<String, ExecutionError> {
    Ok(format!("git push {} {}", quote(remote)?, quote(branch)?))
}

fn quote(arg: &str) -> Result<String, ExecutionError> {
    try_quote(arg)
        .map(|quoted| quoted.into_owned())
        .map_err(|e| ExecutionError::Quoting(e.to_string()))
}
