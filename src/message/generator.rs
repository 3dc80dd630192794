//! Best-effort commit message generation with a fixed fallback.

use std::fmt;

use tracing::{debug, warn};

use super::client::TextGenerator;
use super::prompt::build_commit_prompt;
use crate::error::GenerationError;

/// Message used whenever generation fails or yields nothing usable.
pub const FALLBACK_MESSAGE: &str = "Auto-generated commit message.";

/// A non-empty, single-line commit message free of control characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage(String);

impl CommitMessage {
    /// Returns `None` if `text` is blank or contains a control character,
    /// line breaks and NUL included.
    pub fn new(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_control) {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    pub fn fallback() -> Self {
        Self(FALLBACK_MESSAGE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommitMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which path message generation took.
#[derive(Debug)]
pub enum MessageOutcome {
    Generated(CommitMessage),
    Fallback { reason: GenerationError },
}

impl MessageOutcome {
    /// The message to commit with.
    pub fn message(&self) -> CommitMessage {
        match self {
            MessageOutcome::Generated(message) => message.clone(),
            MessageOutcome::Fallback { .. } => CommitMessage::fallback(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, MessageOutcome::Fallback { .. })
    }

    pub fn fallback_reason(&self) -> Option<&GenerationError> {
        match self {
            MessageOutcome::Generated(_) => None,
            MessageOutcome::Fallback { reason } => Some(reason),
        }
    }
}

/// Reduce generated text to a usable commit message.
///
/// Keeps the first non-blank line, trimmed, without wrapping quotes. A line
/// that still carries control characters is rejected rather than repaired.
pub fn normalize_generated(raw: &str) -> Result<CommitMessage, GenerationError> {
    let line = raw
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .ok_or(GenerationError::Empty)?;
    let line = strip_wrapping_quotes(line).trim();
    if line.is_empty() {
        return Err(GenerationError::Empty);
    }
    CommitMessage::new(line).ok_or(GenerationError::ControlCharacters)
}

fn strip_wrapping_quotes(line: &str) -> &str {
    for quote in ['"', '\'', '`'] {
        if line.len() >= 2 && line.starts_with(quote) && line.ends_with(quote) {
            return &line[1..line.len() - 1];
        }
    }
    line
}

/// Drafts commit messages, never failing.
pub struct CommitMessageGenerator<G> {
    generator: G,
}

impl<G: TextGenerator> CommitMessageGenerator<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Draft a message for `changes_summary`.
    ///
    /// Any endpoint failure, or text that is empty after normalization,
    /// produces [`MessageOutcome::Fallback`] carrying the reason.
    pub async fn generate(&self, changes_summary: &str) -> MessageOutcome {
        let prompt = build_commit_prompt(changes_summary);
        debug!("Commit prompt length: {} chars", prompt.len());

        let result = self
            .generator
            .complete(&prompt)
            .await
            .and_then(|raw| normalize_generated(&raw));

        match result {
            Ok(message) => MessageOutcome::Generated(message),
            Err(reason) => {
                warn!("Commit message generation failed, using fallback: {}", reason);
                MessageOutcome::Fallback { reason }
            }
        }
    }
}
