//! Presentation layer for wml-predict
//!
//! This crate contains CLI definitions, record input parsing, output
//! formatters and progress reporters.

pub mod cli;
pub mod input;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use input::records::{InputError, read_records, records_from_args, records_from_json};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
