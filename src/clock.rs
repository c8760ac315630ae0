//! Delay primitive
//!
//! Retry delays, page delays and the request deadline all go through a
//! [`Clock`], so tests can substitute a logical clock.

use async_trait::async_trait;
use std::time::Duration;

/// Something that can suspend the current task for a duration
#[async_trait]
pub trait Clock: Send + Sync {
    /// Complete after `duration` has elapsed
    async fn sleep(&self, duration: Duration);
}

/// Clock backed by `tokio::time`
///
/// Honors `tokio::time::pause`, so paused-time tests run instantly.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[async_trait]
impl<C: Clock + ?Sized> Clock for &C {
    async fn sleep(&self, duration: Duration) {
        (**self).sleep(duration).await;
    }
}

#[async_trait]
impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    async fn sleep(&self, duration: Duration) {
        (**self).sleep(duration).await;
    }
}
