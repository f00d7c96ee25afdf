//! Command-line argument parsing for stagehand
//!
//! Uses clap for argument parsing with derive macros.

use clap::Parser;
use std::path::PathBuf;

/// stagehand - chat-driven editor settings bot
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    ///
    /// Overrides the default location (~/.config/stagehand/config.toml).
    #[arg(long, short = 'c', env = "STAGEHAND_CONFIG")]
    pub config: Option<PathBuf>,

    /// Editor settings file path
    ///
    /// Overrides both the configured path and the OS-dependent VS Code
    /// default location.
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Write a default configuration file and exit
    #[arg(long, default_value_t = false)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
