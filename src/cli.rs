//! Command-line surface: an optional database override, refresh tuning, a
//! non-interactive JSON dump mode, and `--version`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Browse and edit a local issue database from the terminal.
#[derive(Parser, Debug)]
#[command(name = "abacus", version, about)]
pub struct Cli {
    /// Path to the beads database file. Auto-discovered if omitted.
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Seconds between automatic background refreshes.
    #[arg(long, default_value = "5")]
    pub refresh_interval: u64,

    /// Disable automatic background refreshing entirely.
    #[arg(long)]
    pub no_auto_refresh: bool,

    /// Print the full issue list and exit instead of starting the TUI.
    #[arg(long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Path to the persisted preferences file. Defaults to the platform
    /// config directory.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity: once for debug, twice for trace.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the log file. Defaults to the platform config directory.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    Plain,
    Json,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
