//! CLI parser and command dispatch.

mod check;
mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "appwatch")]
#[command(about = "Download-page monitor that detects new application builds")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Check all listed pages for new builds
    Check {
        /// URL list file (one page URL per line)
        #[arg(long)]
        urls: Option<PathBuf>,
        /// Version history file
        #[arg(long)]
        tracker: Option<PathBuf>,
        /// Output report file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print the tracked version history
    Status {
        /// Version history file
        #[arg(long)]
        tracker: Option<PathBuf>,
    },
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            urls,
            tracker,
            output,
        } => {
            let settings = Settings::resolve(urls, tracker, output);
            check::cmd_check(&settings).await
        }
        Commands::Status { tracker } => {
            let settings = Settings::resolve(None, tracker, None);
            status::cmd_status(&settings)
        }
    }
}
