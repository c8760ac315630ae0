//! Retry observability hook
//!
//! Observers only report. They never change whether or when a request is
//! retried.

use crate::error::Error;
use crate::types::PageRequest;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, warn};

/// Notified about failed attempts
pub trait RetryObserver: Send + Sync {
    /// An attempt failed and another one follows after `delay`
    fn on_retry(&self, request: &PageRequest, error: &Error, delay: Duration);

    /// The final attempt failed; `error` is about to be returned
    fn on_exhausted(&self, request: &PageRequest, error: &Error);
}

/// Default observer, logs through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RetryObserver for TracingObserver {
    fn on_retry(&self, request: &PageRequest, error: &Error, delay: Duration) {
        warn!(
            url = %request.url,
            cursor = %request.cursor,
            "[{}] an error: [{}] has happened! Trying again in {}ms",
            request.attempt,
            error,
            delay.as_millis()
        );
    }

    fn on_exhausted(&self, request: &PageRequest, error: &Error) {
        error!(
            url = %request.url,
            cursor = %request.cursor,
            "[{}] max retries reached! last error: {}",
            request.attempt,
            error
        );
    }
}

impl<O: RetryObserver + ?Sized> RetryObserver for Arc<O> {
    fn on_retry(&self, request: &PageRequest, error: &Error, delay: Duration) {
        (**self).on_retry(request, error, delay);
    }

    fn on_exhausted(&self, request: &PageRequest, error: &Error) {
        (**self).on_exhausted(request, error);
    }
}
