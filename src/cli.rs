//! Command-line argument parsing for sales-report.
//!
//! Every argument is optional: a bare invocation runs the full report
//! against the default database.

use clap::Parser;
use std::path::PathBuf;

/// Prints read-only reports over a sales-sample SQLite database.
#[derive(Parser, Debug)]
#[command(name = "sales-report")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// SQLite database file (overrides the config file)
    #[arg(short = 'd', long, value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
