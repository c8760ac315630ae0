//! CLI module
//!
//! Command-line interface for fetching paginated records.
//!
//! # Commands
//!
//! - `fetch` - Fetch one page after a cursor
//! - `paginate` - Follow the cursor until the data runs out
//! - `config` - Print the effective configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, Target};
pub use runner::Runner;
