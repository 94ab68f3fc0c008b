//! CLI argument definitions using clap
//!
//! Commands:
//! - traindb init --data-dir <path> [--ephemeral]
//! - traindb status --data-dir <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// traindb - idempotent schema bootstrap for the training-platform document store
#[derive(Parser, Debug)]
#[command(name = "traindb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply the training-platform schema to a database
    Init {
        /// Data directory holding the database metadata
        #[arg(long, default_value = "./traindb-data")]
        data_dir: PathBuf,

        /// Run against a throwaway in-memory database instead of disk
        #[arg(long)]
        ephemeral: bool,
    },

    /// Show the schema state recorded in a data directory
    Status {
        /// Data directory holding the database metadata
        #[arg(long, default_value = "./traindb-data")]
        data_dir: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
