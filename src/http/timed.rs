//! Hard per-request deadline
//!
//! Races the transport against the clock. Whichever settles first wins.
//! When the deadline wins, the transport future is dropped, which also
//! aborts the in-flight reqwest request.

use super::transport::Transport;
use crate::clock::Clock;
use crate::error::{Error, Result};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Transport call bounded by a deadline
#[derive(Debug, Clone)]
pub struct TimedCaller<T, C> {
    transport: T,
    clock: C,
}

impl<T: Transport, C: Clock> TimedCaller<T, C> {
    /// Wrap a transport and a clock
    pub fn new(transport: T, clock: C) -> Self {
        Self { transport, clock }
    }

    /// GET `url`, failing with [`Error::Timeout`] if `timeout` elapses first
    pub async fn call(&self, url: &str, timeout: Duration) -> Result<Value> {
        debug!("GET {} (deadline {:?})", url, timeout);

        // Polled in order, so a transport that is already done beats a zero-length timer.
        tokio::select! {
            biased;
            result = self.transport.get_json(url) => result,
            () = self.clock.sleep(timeout) => {
                debug!("Deadline of {:?} elapsed for {}", timeout, url);
                Err(Error::timeout(url))
            }
        }
    }

    /// The wrapped transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The clock used for the deadline
    pub fn clock(&self) -> &C {
        &self.clock
    }
}
