//! Clock/scheduler primitive driving room timers.

use std::time::Duration;

use async_trait::async_trait;

/// Suspends the caller for one timer period.
///
/// Cancellation is cooperative: a timer job re-checks its generation after every
/// `tick`, so dropping out of the loop is all it takes to stop.
#[async_trait]
pub trait Ticker: Send + Sync {
    async fn tick(&self);
}

/// Wall-clock ticker backed by `tokio::time::sleep`
#[derive(Debug, Clone, Copy)]
pub struct IntervalTicker {
    period: Duration,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }
}

impl Default for IntervalTicker {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&self) {
        tokio::time::sleep(self.period).await;
    }
}
