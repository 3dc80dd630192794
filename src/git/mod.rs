//! Git status queries and command construction.

pub mod commands;
pub mod status;

pub use commands::{STAGE_COMMAND, commit_command, push_command};
pub use status::{ChangeRecord, GitStatusReader, StatusReader};
