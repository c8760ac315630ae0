//! Lazy cursor stream
//!
//! Each pull fetches exactly one page. The page delay is taken at the start
//! of the pull that follows a delivered page, so a consumer that stops
//! pulling never waits for it and the terminal page never triggers it.

use crate::clock::Clock;
use crate::config::PaginationConfig;
use crate::error::Result;
use crate::fetch::PageSource;
use crate::types::{Cursor, Page};
use futures::Stream;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone)]
enum State {
    /// Next pull fetches `cursor`; `delay` is set once a page has been delivered
    Ready { cursor: Cursor, delay: bool },
    /// Ended normally (empty page) or after surfacing an error
    Done,
}

/// Forward-only sequence of pages driven by the consumer
#[derive(Debug)]
pub struct CursorStream<S, C> {
    source: S,
    clock: C,
    config: Arc<PaginationConfig>,
    url: String,
    state: State,
    pages_yielded: u64,
    records_yielded: u64,
}

impl<S: PageSource, C: Clock> CursorStream<S, C> {
    /// Start a stream at `cursor`
    pub fn new(
        source: S,
        clock: C,
        config: Arc<PaginationConfig>,
        url: impl Into<String>,
        cursor: Cursor,
    ) -> Self {
        Self {
            source,
            clock,
            config,
            url: url.into(),
            state: State::Ready {
                cursor,
                delay: false,
            },
            pages_yielded: 0,
            records_yielded: 0,
        }
    }

    /// Pull the next page.
    ///
    /// `None` means the stream has ended. An error is returned once and
    /// ends the stream.
    pub async fn next(&mut self) -> Option<Result<Page>> {
        let (cursor, delay) = match &self.state {
            State::Ready { cursor, delay } => (cursor.clone(), *delay),
            State::Done => return None,
        };

        if delay {
            self.clock.sleep(self.config.page_delay).await;
            self.state = State::Ready {
                cursor: cursor.clone(),
                delay: false,
            };
        }

        let page = match self.source.fetch(&self.url, &cursor).await {
            Ok(page) => page,
            Err(err) => {
                self.state = State::Done;
                return Some(Err(err));
            }
        };

        let Some(next) = self.next_cursor(&page) else {
            info!(
                "Pagination of {} finished after {} pages ({} records)",
                self.url, self.pages_yielded, self.records_yielded
            );
            self.state = State::Done;
            return None;
        };

        debug!(
            "Page {} after cursor {}: {} records, next cursor {}",
            self.pages_yielded + 1,
            cursor,
            page.len(),
            next
        );
        self.pages_yielded += 1;
        self.records_yielded += page.len() as u64;
        self.state = State::Ready {
            cursor: next,
            delay: true,
        };
        Some(Ok(page))
    }

    /// Adapt into a `futures::Stream`, still one fetch per poll
    pub fn into_stream(self) -> impl Stream<Item = Result<Page>> {
        futures::stream::unfold(self, |mut stream| async move {
            let item = stream.next().await?;
            Some((item, stream))
        })
    }

    /// Cursor the next pull will fetch, `None` once finished
    pub fn cursor(&self) -> Option<&Cursor> {
        match &self.state {
            State::Ready { cursor, .. } => Some(cursor),
            State::Done => None,
        }
    }

    /// Whether the stream has ended
    pub fn is_done(&self) -> bool {
        matches!(self.state, State::Done)
    }

    /// Pages delivered so far
    pub fn pages_yielded(&self) -> u64 {
        self.pages_yielded
    }

    /// Records delivered so far
    pub fn records_yielded(&self) -> u64 {
        self.records_yielded
    }

    /// Trailing id of `page`, unless it marks the end of the data
    fn next_cursor(&self, page: &Page) -> Option<Cursor> {
        page.trailing_id(&self.config.id_field)
            .filter(|id| !(self.config.zero_is_sentinel && id.is_zero()))
    }
}
