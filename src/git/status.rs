//! Working tree status queries using git2.

use std::path::{Path, PathBuf};

use git2::{Repository, Status, StatusOptions};
use tracing::debug;

use crate::error::StatusQueryError;

/// One file's change as reported by a status query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    /// Path relative to the work tree root, `/`-separated.
    pub path: String,
    /// Two-character porcelain code: index state then work tree state.
    pub state_code: String,
}

impl ChangeRecord {
    pub fn new(path: impl Into<String>, state_code: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            state_code: state_code.into(),
        }
    }

    /// `path - code` with the padding space of the porcelain code removed.
    pub fn summary_line(&self) -> String {
        format!("{} - {}", self.path, self.state_code.trim())
    }
}

/// Read-only view of the repository's changed files.
#[cfg_attr(test, mockall::automock)]
pub trait StatusReader: Send + Sync {
    /// Changed files relative to the work tree; empty when the tree is clean.
    fn status(&self) -> Result<Vec<ChangeRecord>, StatusQueryError>;
}

/// Status reader backed by a git repository on disk.
#[derive(Debug, Clone)]
pub struct GitStatusReader {
    workdir: PathBuf,
}

impl GitStatusReader {
    /// Find the repository containing `path` and read status from its work tree root.
    pub fn discover(path: &Path) -> Result<Self, StatusQueryError> {
        let repo = Repository::discover(path).map_err(StatusQueryError::OpenRepository)?;
        let workdir = repo
            .workdir()
            .ok_or(StatusQueryError::BareRepository)?
            .to_path_buf();
        debug!("Using work tree {}", workdir.display());
        Ok(Self { workdir })
    }

    /// Root of the work tree that monitored folders are resolved against.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }
}

impl StatusReader for GitStatusReader {
    fn status(&self) -> Result<Vec<ChangeRecord>, StatusQueryError> {
        // Reopened per query so the reader stays Send + Sync.
        let repo = Repository::open(&self.workdir).map_err(StatusQueryError::OpenRepository)?;

        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false)
            .renames_head_to_index(true);

        let statuses = repo
            .statuses(Some(&mut opts))
            .map_err(StatusQueryError::Statuses)?;

        let records = statuses
            .iter()
            .filter(|entry| !entry.status().is_ignored())
            .map(|entry| {
                let path = String::from_utf8_lossy(entry.path_bytes()).to_string();
                ChangeRecord::new(path, porcelain_code(entry.status()))
            })
            .collect();

        Ok(records)
    }
}

/// Translate git2 status flags into the `XY` code `git status --porcelain` prints.
fn porcelain_code(status: Status) -> String {
    if status.is_conflicted() {
        return "UU".to_string();
    }
    if status.is_wt_new() && !is_staged(status) {
        return "??".to_string();
    }

    let index = if status.is_index_new() {
        'A'
    } else if status.is_index_modified() {
        'M'
    } else if status.is_index_deleted() {
        'D'
    } else if status.is_index_renamed() {
        'R'
    } else if status.is_index_typechange() {
        'T'
    } else {
        ' '
    };

    let worktree = if status.is_wt_modified() {
        'M'
    } else if status.is_wt_deleted() {
        'D'
    } else if status.is_wt_renamed() {
        'R'
    } else if status.is_wt_typechange() {
        'T'
    } else {
        ' '
    };

    format!("{index}{worktree}")
}

fn is_staged(status: Status) -> bool {
    status.intersects(
        Status::INDEX_NEW
            | Status::INDEX_MODIFIED
            | Status::INDEX_DELETED
            | Status::INDEX_RENAMED
            | Status::INDEX_TYPECHANGE,
    )
}
