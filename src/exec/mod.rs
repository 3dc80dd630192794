//! External command execution.

pub mod recording;
pub mod runner;

pub use recording::{RecordedCommand, RecordingRunner};
pub use runner::{CommandRunner, ShellRunner};
