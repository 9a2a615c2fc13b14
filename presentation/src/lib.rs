//! Presentation layer for agent-panel
//!
//! This crate contains the CLI definition, output formatting and progress
//! reporting.

pub mod cli;
pub mod output;
pub mod progress;

pub use cli::commands::{Cli, Command, DebateArgs, DeliberateArgs, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
