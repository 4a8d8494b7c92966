use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "spacehog")]
#[command(about = "Find the largest files under a directory tree", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan a directory tree and list files by size, largest first
    Scan {
        /// Root directory to scan
        root: PathBuf,

        /// Number of records to print
        #[arg(long, default_value_t = 50)]
        top: usize,

        /// Minimum file size to record, e.g. "100MB" (overrides config)
        #[arg(long)]
        min_size: Option<String>,
    },

    /// Delete the given files (asks for confirmation unless --yes)
    Delete {
        /// Files to delete
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Print configuration values
    PrintConfig,
}
