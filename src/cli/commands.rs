//! CLI commands and argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Fetch cursor-paginated JSON records over HTTP
#[derive(Parser, Debug)]
#[command(name = "tidpage")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Total attempts per page, including the first
    #[arg(long, global = true)]
    pub max_retries: Option<u32>,

    /// Delay between attempts, in milliseconds
    #[arg(long, global = true)]
    pub retry_delay_ms: Option<u64>,

    /// Hard deadline per request, in milliseconds
    #[arg(long, global = true)]
    pub request_timeout_ms: Option<u64>,

    /// Delay between delivered pages, in milliseconds
    #[arg(long, global = true)]
    pub page_delay_ms: Option<u64>,

    /// Query parameter the cursor is sent in
    #[arg(long, global = true)]
    pub cursor_param: Option<String>,

    /// Record field read as the next cursor
    #[arg(long, global = true)]
    pub id_field: Option<String>,

    /// Whether a numeric trailing id of zero ends pagination
    #[arg(long, global = true, value_name = "BOOL")]
    pub zero_is_sentinel: Option<bool>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where to start reading
#[derive(Args, Debug, Clone)]
pub struct Target {
    /// Endpoint URL (the cursor is appended as a query parameter)
    #[arg(long)]
    pub url: String,

    /// Cursor to start from
    #[arg(long, default_value = "0")]
    pub cursor: String,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a single page (with timeout and retries)
    Fetch {
        /// Endpoint and starting cursor
        #[command(flatten)]
        target: Target,
    },

    /// Follow the cursor until an empty page
    Paginate {
        /// Endpoint and starting cursor
        #[command(flatten)]
        target: Target,

        /// Stop after this many pages
        #[arg(long)]
        max_pages: Option<u64>,
    },

    /// Print the effective configuration
    Config,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one record per line)
    Json,
    /// Human-readable output
    Pretty,
}
