use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry budget shared by the poll and action variants.
///
/// The defaults (15 attempts, 500 ms apart, ~7.5 s total) are the behavior
/// contract the scenario tests assume; embedders may tighten or widen them
/// per dispatcher instance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub retry_delay_ms: u64,
}

impl RetryPolicy {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Worst-case wall-clock spent before exhaustion is reported.
    pub fn budget(&self) -> Duration {
        self.delay() * self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 15,
            retry_delay_ms: 500,
        }
    }
}
