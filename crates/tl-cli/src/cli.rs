//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Project time log.
///
/// Times work on named projects with begin, pause and end, and reports the
/// hours logged on any day.
#[derive(Debug, Parser)]
#[command(name = "tl", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start timing a project.
    Begin {
        /// Project to time.
        project: String,
    },

    /// Pause the running project, or resume it if paused.
    #[command(visible_aliases = ["resume", "pause-resume"], alias = "pause_resume")]
    Pause,

    /// Stop timing the active project.
    End,

    /// Show today's time log.
    Today {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the time log for a given day.
    Report {
        /// Day to report on (YYYY-MM-DD).
        date: String,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the active project and whether it is paused.
    Status,

    /// Import the older two-file time log into the ledger.
    ImportLegacy {
        /// Path to the legacy entry log (`time_log.json`).
        #[arg(long)]
        log: PathBuf,

        /// Path to the legacy status record (`status_data.json`).
        #[arg(long)]
        status: Option<PathBuf>,

        /// Replace a ledger that already has entries.
        #[arg(long)]
        force: bool,
    },
}
