use std::time::Duration;

use async_trait::async_trait;

use crate::config::constants::refresh::PACING_DELAY;

/// Cooperative pause between sequential backfill days.
///
/// The calendar source has no documented rate limit, so instead of a weight
/// budget we just space the day fetches out. Injectable so tests run the
/// backfill loop without real elapsed time.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self);
}

pub struct IntervalPacer {
    delay: Duration,
}

impl IntervalPacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for IntervalPacer {
    fn default() -> Self {
        Self::new(PACING_DELAY)
    }
}

#[async_trait]
impl Pacer for IntervalPacer {
    async fn pause(&self) {
        log::debug!("pacing {}ms before next day fetch", self.delay.as_millis());
        tokio::time::sleep(self.delay).await;
    }
}

/// No-op pacer for tests.
pub struct NoopPacer;

#[async_trait]
impl Pacer for NoopPacer {
    async fn pause(&self) {}
}
