use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "shutter-sort")]
#[command(about = "Sorts photos into date folders and purges duplicate copies", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the full relocate → rescan → dedupe → purge pipeline
    Sort {
        /// Source tree to pull photos from (overrides Config.toml)
        #[arg(long, value_name = "DIR")]
        source: Option<PathBuf>,
        /// Destination root for the sorted tree (overrides Config.toml)
        #[arg(long, value_name = "DIR")]
        dest: Option<PathBuf>,
    },
    /// Find and list duplicate groups under a directory, deleting nothing
    FindDupes {
        /// Directory to scan
        path: PathBuf,
        /// Digest for the full-content tier
        #[arg(long, default_value = "sha512")]
        algorithm: String,
    },
    /// Print configuration values
    PrintConfig,
}
