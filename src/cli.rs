use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fittrack")]
#[command(author, version, about = "Track users, exercises and workouts in SQLite")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file to use instead of the configured one
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive menu (default)
    Menu,

    /// Replace all data with the demo data set
    Seed,

    /// Print every table as JSON
    Export {
        /// Indent the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Display version information and the database schema version
    Version,
}
