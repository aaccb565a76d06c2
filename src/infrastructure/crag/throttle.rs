//! Backpressure between judge and search calls

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Enforces a minimum interval between an upstream model call and the next
/// web search. Shared by every query running through one pipeline.
#[derive(Debug)]
pub struct FallbackThrottle {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl FallbackThrottle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Mutex::new(None),
        }
    }

    /// Note that an upstream call just finished
    pub async fn record(&self) {
        *self.last_call.lock().await = Some(Instant::now());
    }

    /// Wait until the interval since the last recorded call has elapsed, then
    /// claim the slot. Concurrent callers are serialized.
    pub async fn acquire(&self) {
        let mut last_call = self.last_call.lock().await;

        if let Some(last) = *last_call {
            let ready_at = last + self.min_interval;
            let now = Instant::now();
            if ready_at > now {
                debug!(wait_ms = (ready_at - now).as_millis() as u64, "Throttling web search");
                tokio::time::sleep_until(ready_at).await;
            }
        }

        *last_call = Some(Instant::now());
    }
}
