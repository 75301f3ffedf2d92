//! CLI commands and argument parsing

use clap::{Parser, Subcommand};

/// Timetable collection API client
#[derive(Parser, Debug)]
#[command(name = "timetable-client")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the collection API
    #[arg(short, long, global = true, env = "TIMETABLE_BASE_URL")]
    pub base_url: Option<String>,

    /// Bearer token for authenticated endpoints
    #[arg(short, long, global = true, env = "TIMETABLE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value = "30")]
    pub timeout: u64,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch one page of a collection
    Fetch {
        /// Collection endpoint (e.g. /teachers)
        endpoint: String,

        /// Page to fetch (1-indexed)
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// Extra query parameter as key=value (repeatable, order preserved)
        #[arg(short = 'q', long = "param")]
        params: Vec<String>,
    },

    /// Walk every page of a collection and print the merged list
    Dump {
        /// Collection endpoint (e.g. /teachers)
        endpoint: String,

        /// Stop once this many items have been collected
        #[arg(long)]
        cap: Option<usize>,

        /// Item id to drop from the result (repeatable)
        #[arg(long)]
        exclude: Vec<String>,

        /// Extra query parameter as key=value (repeatable, order preserved)
        #[arg(short = 'q', long = "param")]
        params: Vec<String>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Human-readable output
    Pretty,
}
