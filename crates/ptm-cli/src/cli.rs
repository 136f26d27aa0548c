//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Personal trainer matcher.
///
/// Ranks trainers for each client by how many hours of weekly availability
/// they share, honouring location and gender preference.
#[derive(Debug, Parser)]
#[command(name = "ptm", version, about, long_about = None)]
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
    /// Match clients to trainers and write the report workbook.
    Match {
        /// Trainer spreadsheet (overrides config).
        #[arg(long)]
        trainers: Option<PathBuf>,

        /// Client spreadsheet (overrides config).
        #[arg(long)]
        clients: Option<PathBuf>,

        /// Output workbook (overrides config).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of trainers to keep per client (overrides config).
        #[arg(long)]
        top: Option<usize>,

        /// Print the report as JSON instead of the console listing.
        #[arg(long)]
        json: bool,
    },

    /// Show how an availability string is parsed.
    Parse {
        /// Availability text, e.g. "Mon/Wed 9-11am & 6pm-8pm".
        text: String,
    },
}
