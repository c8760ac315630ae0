//! Fetch module
//!
//! Retrying page fetcher and its observability hook.

mod observer;
mod retry;

pub use observer::{RetryObserver, TracingObserver};
pub use retry::{PageSource, RetryingFetcher};
