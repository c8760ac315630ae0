//! Bounded retry around the timed caller
//!
//! Each page is attempted up to `max_retries` times with a constant
//! `retry_delay` in between. No jitter, no backoff growth.

use super::observer::{RetryObserver, TracingObserver};
use crate::clock::Clock;
use crate::config::PaginationConfig;
use crate::error::{Error, Result};
use crate::http::{TimedCaller, Transport};
use crate::types::{Cursor, Page, PageRequest};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Anything that can produce the page after a cursor
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the page of `url` that follows `cursor`
    async fn fetch(&self, url: &str, cursor: &Cursor) -> Result<Page>;
}

#[async_trait]
impl<S: PageSource + ?Sized> PageSource for &S {
    async fn fetch(&self, url: &str, cursor: &Cursor) -> Result<Page> {
        (**self).fetch(url, cursor).await
    }
}

/// Fetches pages through a [`TimedCaller`], retrying failures
pub struct RetryingFetcher<T, C> {
    caller: TimedCaller<T, C>,
    config: Arc<PaginationConfig>,
    observer: Arc<dyn RetryObserver>,
}

impl<T: Transport, C: Clock> RetryingFetcher<T, C> {
    /// Create a fetcher that logs retries through `tracing`
    pub fn new(caller: TimedCaller<T, C>, config: Arc<PaginationConfig>) -> Self {
        Self {
            caller,
            config,
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replace the retry observer
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn RetryObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Shared configuration
    pub fn config(&self) -> &Arc<PaginationConfig> {
        &self.config
    }

    /// Clock used for retry delays and deadlines
    pub fn clock(&self) -> &C {
        self.caller.clock()
    }

    /// Fetch and decode one page, with retries
    pub async fn fetch_page(&self, url: &str, cursor: &Cursor) -> Result<Page> {
        self.with_retries(url, cursor, decode_page).await
    }

    /// Fetch the raw JSON body for a cursor, with retries
    pub async fn fetch_raw(&self, url: &str, cursor: &Cursor) -> Result<Value> {
        self.with_retries(url, cursor, Ok).await
    }

    async fn with_retries<R>(
        &self,
        url: &str,
        cursor: &Cursor,
        decode: impl Fn(Value) -> Result<R> + Send + Sync,
    ) -> Result<R> {
        let mut request = PageRequest::first(url, cursor.clone());
        let target = request.request_url(&self.config.cursor_param)?;
        let max_attempts = self.config.max_retries.max(1);

        loop {
            debug!("[{}] fetching {}", request.attempt, target);

            let outcome = self
                .caller
                .call(&target, self.config.request_timeout)
                .await
                .and_then(&decode);

            match outcome {
                Ok(value) => return Ok(value),
                Err(err) if request.attempt >= max_attempts => {
                    self.observer.on_exhausted(&request, &err);
                    return Err(Error::retries_exhausted(request.attempt, err));
                }
                Err(err) => {
                    self.observer
                        .on_retry(&request, &err, self.config.retry_delay);
                    self.caller.clock().sleep(self.config.retry_delay).await;
                    request = request.next_attempt();
                }
            }
        }
    }
}

#[async_trait]
impl<T: Transport, C: Clock> PageSource for RetryingFetcher<T, C> {
    async fn fetch(&self, url: &str, cursor: &Cursor) -> Result<Page> {
        self.fetch_page(url, cursor).await
    }
}

impl<T, C> std::fmt::Debug for RetryingFetcher<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryingFetcher")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// A page body must be a JSON array of records
fn decode_page(body: Value) -> Result<Page> {
    match body {
        Value::Array(records) => Ok(Page::new(records)),
        other => Err(Error::decode(format!(
            "expected a JSON array of records, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
