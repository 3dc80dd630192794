//! Checks run before touching the repository.

use crate::error::ExecutionError;
use crate::exec::runner::SHELL;

/// Check that the `git` binary is on PATH.
pub fn check_git_installed() -> Result<(), ExecutionError> {
    require_binary("git")
}

/// Check that the POSIX shell used to run git commands is on PATH.
///
/// On Windows this is the `sh` shipped with Git for Windows.
pub fn check_shell_installed() -> Result<(), ExecutionError> {
    require_binary(SHELL)
}

fn require_binary(name: &str) -> Result<(), ExecutionError> {
    which::which(name)
        .map(|_| ())
        .map_err(|_| ExecutionError::NotInstalled(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_missing_git_is_reported() {
        temp_env::with_var("PATH", Some(""), || {
            let result = check_git_installed();
            assert!(matches!(result, Err(ExecutionError::NotInstalled(bin)) if bin == "git"));
        });
    }

    #[test]
    #[serial]
    fn test_missing_shell_is_reported() {
        temp_env::with_var("PATH", Some(""), || {
            let result = check_shell_installed();
            assert!(matches!(result, Err(ExecutionError::NotInstalled(bin)) if bin == "sh"));
        });
    }
}
