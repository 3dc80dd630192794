//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use git2::{IndexAddOption, Oid, Repository, RepositoryInitOptions, Signature};

use foldercommit::error::{GenerationError, StatusQueryError};
use foldercommit::{ChangeRecord, StatusReader, TextGenerator};

/// A test git repository on branch `main` with a bare `origin` remote.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub origin_dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a repository with one initial commit and an empty bare origin.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = Repository::init_opts(dir.path(), &opts).expect("Failed to init git repo");

        {
            let mut config = repo.config().expect("Failed to open repo config");
            config.set_str("user.name", "Test User").expect("Failed to set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Failed to set user.email");
            config
                .set_bool("commit.gpgsign", false)
                .expect("Failed to disable signing");
        }

        let origin_dir = tempfile::tempdir().expect("Failed to create origin dir");
        Repository::init_bare(origin_dir.path()).expect("Failed to init bare origin");
        repo.remote(
            "origin",
            origin_dir.path().to_str().expect("Invalid origin path"),
        )
        .expect("Failed to add origin remote");

        let test_repo = Self {
            dir,
            origin_dir,
            repo,
        };
        test_repo.write("README.md", "# test\n");
        test_repo.commit_all("init");
        test_repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the work tree, creating parent directories.
    pub fn write(&self, rel: &str, contents: &str) {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&path, contents).expect("Failed to write file");
    }

    /// Stage everything and commit with `message`.
    pub fn commit_all(&self, message: &str) -> Oid {
        let sig = Signature::now("Test User", "test@example.com").expect("Failed to create signature");

        let mut index = self.repo.index().expect("Failed to get index");
        index
            .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
            .expect("Failed to stage files");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Commit messages on HEAD, newest first.
    pub fn head_messages(&self) -> Vec<String> {
        messages_from(&self.repo, "HEAD")
    }

    /// Commit messages on origin's `main`, newest first (empty if never pushed).
    pub fn origin_main_messages(&self) -> Vec<String> {
        let origin = Repository::open_bare(self.origin_dir.path()).expect("Failed to open origin");
        if origin.find_reference("refs/heads/main").is_err() {
            return Vec::new();
        }
        messages_from(&origin, "refs/heads/main")
    }

    /// Paths touched by the commit `rev`, compared with its first parent.
    pub fn files_in_commit(&self, rev: &str) -> Vec<String> {
        let commit = self
            .repo
            .revparse_single(rev)
            .and_then(|o| o.peel_to_commit())
            .expect("Failed to resolve commit");
        let tree = commit.tree().expect("Failed to get tree");
        let parent_tree = commit.parent(0).ok().and_then(|p| p.tree().ok());

        let diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)
            .expect("Failed to diff commit");

        let mut paths: Vec<String> = diff
            .deltas()
            .filter_map(|d| d.new_file().path().map(|p| p.to_string_lossy().to_string()))
            .collect();
        paths.sort();
        paths
    }
}

fn messages_from(repo: &Repository, refname: &str) -> Vec<String> {
    let mut walk = repo.revwalk().expect("Failed to create revwalk");
    let oid = repo
        .revparse_single(refname)
        .expect("Failed to resolve ref")
        .id();
    walk.push(oid).expect("Failed to push oid");

    walk.map(|id| {
        let commit = repo
            .find_commit(id.expect("Failed to walk"))
            .expect("Failed to find commit");
        commit.message().unwrap_or_default().trim().to_string()
    })
    .collect()
}

/// Status reader that always returns the same records.
pub struct FixedStatus(pub Vec<ChangeRecord>);

impl StatusReader for FixedStatus {
    fn status(&self) -> Result<Vec<ChangeRecord>, StatusQueryError> {
        Ok(self.0.clone())
    }
}

/// Text generator that always returns the same text.
pub struct FixedText(pub &'static str);

#[async_trait]
impl TextGenerator for FixedText {
    async fn complete(&self, _prompt: &str) -> Result<String, GenerationError> {
        Ok(self.0.to_string())
    }
}

/// Text generator that always fails as if the endpoint returned 500.
pub struct FailingText;

#[async_trait]
impl TextGenerator for FailingText {
    async fn complete(&self, _prompt: &str) -> Result<String, GenerationError> {
        Err(GenerationError::HttpStatus {
            status: 500,
            body: "internal error".to_string(),
        })
    }
}

pub fn repo_root() -> PathBuf {
    PathBuf::from("/work/repo")
}
