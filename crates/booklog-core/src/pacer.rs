//! Request pacing between batch items
//!
//! booklog is a small service with no published rate limits; batches wait
//! a fixed interval between records. The interval does not adapt to
//! failures or response latency.

use async_trait::async_trait;
use std::time::Duration;

/// Interval between records in a batch run
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// Waits between consecutive batch items
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Wait before the next item
    async fn pause(&self);
}

/// Sleep for a fixed interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    /// Create pacer with the given interval
    #[inline]
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Configured interval
    #[inline]
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

#[async_trait]
impl Pacer for FixedDelay {
    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// Never waits
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl Pacer for NoDelay {
    async fn pause(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[test]
    fn default_is_half_a_second() {
        assert_eq!(FixedDelay::default().delay(), Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn fixed_delay_sleeps_for_interval() {
        let pacer = FixedDelay::new(Duration::from_millis(500));

        let start = Instant::now();
        pacer.pause().await;
        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn no_delay_returns_immediately() {
        let start = Instant::now();
        NoDelay.pause().await;
        FixedDelay::new(Duration::ZERO).pause().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
