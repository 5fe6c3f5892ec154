use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "takeout-sync")]
#[command(about = "Rebuild takeout albums and fix capture dates in an Immich library", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Answer yes to every non-required confirmation
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: ./config.json, then ~/.config/takeout-sync/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Takeout export root, overrides the configured path
    #[arg(long, global = true)]
    pub takeout: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create missing albums and add their assets
    Albums,

    /// Correct capture dates that disagree with the export
    Dates {
        /// Only check assets the catalog has on this day (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}
