// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # tidpage
//!
//! Fetches successive pages of time-ordered records from an HTTP endpoint
//! with cursor pagination: the last record of each page carries the id to
//! request next.
//!
//! ## Features
//!
//! - **Hard Timeouts**: every request races a deadline, independent of the transport
//! - **Bounded Retries**: fixed number of attempts with a constant delay
//! - **Lazy Pagination**: one fetch per pull, stops on an empty page
//! - **Injectable Clock**: all delays go through a replaceable [`Clock`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tidpage::{Pager, PageQuery, PaginationConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let pager = Pager::http(PaginationConfig::default())?;
//!
//!     let mut pages = pager.paginate(PageQuery::new("https://api.example.com/trades", 0u64));
//!     while let Some(page) = pages.next().await {
//!         for record in page? {
//!             println!("{record}");
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ CursorStream   next() → Option<Result<Page>> │  page delay, cursor
//! ├──────────────────────────────────────────────┤
//! │ RetryingFetcher   attempts 1..=max_retries   │  retry delay
//! ├──────────────────────────────────────────────┤
//! │ TimedCaller   transport vs. deadline race    │  request timeout
//! ├──────────────────────────────────────────────┤
//! │ Transport   GET + JSON parse                 │
//! └──────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Records, pages and cursors
pub mod types;

/// Pagination configuration
pub mod config;

/// Injectable delay primitive
pub mod clock;

/// JSON transport and request deadline
pub mod http;

/// Retrying page fetcher
pub mod fetch;

/// Lazy cursor stream
pub mod pagination;

/// Public facade
pub mod pager;

/// Command-line interface
pub mod cli;

#[cfg(test)]
mod test_support;

// ============================================================================
// Re-exports
// ============================================================================

pub use clock::{Clock, TokioClock};
pub use config::PaginationConfig;
pub use error::{Error, Result};
pub use fetch::{PageSource, RetryObserver, RetryingFetcher, TracingObserver};
pub use http::{HttpTransport, TimedCaller, Transport};
pub use pager::Pager;
pub use pagination::CursorStream;
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
