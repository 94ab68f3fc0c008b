//! CLI module for traindb
//!
//! Provides the command-line interface:
//! - init: apply the training-platform catalog to a data directory
//! - status: show the schema state of a data directory

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run, status};
pub use errors::{CliError, CliResult};
