//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, the config subcommand
//! and the interactive shell.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod presenter;
pub mod repl;

// Re-export commonly used types
pub use app::{run_interactive, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, QualityArg};
pub use presenter::Presenter;
pub use repl::Command;
