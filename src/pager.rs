//! Public entry point
//!
//! [`Pager`] wires transport, deadline, retries and the cursor stream
//! around one shared [`PaginationConfig`].

use crate::clock::{Clock, TokioClock};
use crate::config::PaginationConfig;
use crate::error::Result;
use crate::fetch::{RetryObserver, RetryingFetcher};
use crate::http::{HttpTransport, HttpTransportConfig, TimedCaller, Transport};
use crate::pagination::CursorStream;
use crate::types::{Page, PageQuery};
use serde_json::Value;
use std::sync::Arc;

/// Fetches single pages or whole cursor sequences
#[derive(Debug)]
pub struct Pager<T, C = TokioClock> {
    fetcher: RetryingFetcher<T, C>,
}

impl Pager<HttpTransport, TokioClock> {
    /// Pager over reqwest and the tokio clock
    pub fn http(config: PaginationConfig) -> Result<Self> {
        Self::http_with(config, HttpTransportConfig::default())
    }

    /// Pager over reqwest with custom transport settings
    pub fn http_with(config: PaginationConfig, transport: HttpTransportConfig) -> Result<Self> {
        Self::new(config, HttpTransport::with_config(transport)?, TokioClock)
    }
}

impl<T: Transport, C: Clock> Pager<T, C> {
    /// Create a pager from its collaborators
    pub fn new(config: PaginationConfig, transport: T, clock: C) -> Result<Self> {
        config.validate()?;
        let caller = TimedCaller::new(transport, clock);
        Ok(Self {
            fetcher: RetryingFetcher::new(caller, Arc::new(config)),
        })
    }

    /// Replace the retry observer (defaults to tracing)
    #[must_use]
    pub fn with_observer(self, observer: impl RetryObserver + 'static) -> Self {
        Self {
            fetcher: self.fetcher.with_observer(Arc::new(observer)),
        }
    }

    /// The session configuration
    pub fn config(&self) -> &PaginationConfig {
        self.fetcher.config()
    }

    /// Fetch one page, with deadline and retries
    pub async fn fetch_page(&self, query: &PageQuery) -> Result<Page> {
        self.fetcher.fetch_page(&query.url, &query.cursor).await
    }

    /// Fetch one raw JSON body, with deadline and retries
    pub async fn fetch_raw(&self, query: &PageQuery) -> Result<Value> {
        self.fetcher.fetch_raw(&query.url, &query.cursor).await
    }

    /// Lazily walk pages starting at `query.cursor`
    pub fn paginate(&self, query: PageQuery) -> CursorStream<&RetryingFetcher<T, C>, &C> {
        CursorStream::new(
            &self.fetcher,
            self.fetcher.clock(),
            Arc::clone(self.fetcher.config()),
            query.url,
            query.cursor,
        )
    }
}
