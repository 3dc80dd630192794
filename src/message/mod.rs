//! AI-drafted commit messages.

pub mod client;
pub mod generator;
pub mod prompt;

pub use client::{HttpTextGenerator, TextGenerator};
pub use generator::{
    CommitMessage, CommitMessageGenerator, FALLBACK_MESSAGE, MessageOutcome, normalize_generated,
};
pub use prompt::{build_commit_prompt, summarize_changes};
