//! Deterministic doubles shared by the unit tests

use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::fetch::{PageSource, RetryObserver};
use crate::http::Transport;
use crate::types::{Cursor, Page, PageRequest};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// One scripted transport outcome
pub(crate) enum Step {
    Respond(Result<Value>),
    Hang,
}

/// Transport that replays a script and records requested URLs
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    steps: Mutex<VecDeque<Step>>,
    urls: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub(crate) fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: Mutex::new(steps.into_iter().collect()),
            urls: Mutex::default(),
        }
    }

    pub(crate) fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }

    pub(crate) fn calls(&self) -> usize {
        self.urls.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get_json(&self, url: &str) -> Result<Value> {
        self.urls.lock().unwrap().push(url.to_string());
        let step = self.steps.lock().unwrap().pop_front();
        match step {
            Some(Step::Respond(result)) => result,
            Some(Step::Hang) => std::future::pending().await,
            None => Err(Error::Other(format!("no scripted response for {url}"))),
        }
    }
}

/// Page source that replays a script and records requested cursors
#[derive(Default)]
pub(crate) struct ScriptedSource {
    pages: Mutex<VecDeque<Result<Page>>>,
    cursors: Mutex<Vec<Cursor>>,
}

impl ScriptedSource {
    pub(crate) fn new(pages: impl IntoIterator<Item = Result<Page>>) -> Self {
        Self {
            pages: Mutex::new(pages.into_iter().collect()),
            cursors: Mutex::default(),
        }
    }

    pub(crate) fn cursors(&self) -> Vec<Cursor> {
        self.cursors.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for ScriptedSource {
    async fn fetch(&self, _url: &str, cursor: &Cursor) -> Result<Page> {
        self.cursors.lock().unwrap().push(cursor.clone());
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Other("no scripted page".to_string())))
    }
}

/// Clock that returns immediately and remembers every requested sleep
#[derive(Default)]
pub(crate) struct RecordingClock {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingClock {
    pub(crate) fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clock for RecordingClock {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

/// Observer events, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Retry { attempt: u32, delay: Duration },
    Exhausted { attempt: u32 },
}

/// Observer that records what it was told
#[derive(Default)]
pub(crate) struct RecordingObserver {
    events: Mutex<Vec<Event>>,
}

impl RecordingObserver {
    pub(crate) fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

impl RetryObserver for RecordingObserver {
    fn on_retry(&self, request: &PageRequest, _error: &Error, delay: Duration) {
        self.events.lock().unwrap().push(Event::Retry {
            attempt: request.attempt,
            delay,
        });
    }

    fn on_exhausted(&self, request: &PageRequest, _error: &Error) {
        self.events.lock().unwrap().push(Event::Exhausted {
            attempt: request.attempt,
        });
    }
}

/// `n` trade-like records ending at `last_tid`
pub(crate) fn trades(last_tid: u64, n: u64) -> Vec<Value> {
    (0..n)
        .map(|i| {
            let tid = last_tid + 1 + i - n;
            serde_json::json!({
                "tid": tid,
                "date": 1_613_610_672 + tid,
                "type": if tid % 2 == 0 { "buy" } else { "sell" },
                "price": 288_000,
                "amount": 0.06,
            })
        })
        .collect()
}

pub(crate) fn network_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
