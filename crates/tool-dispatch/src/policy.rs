use serde::{Deserialize, Serialize};

use action_retry::RetryPolicy;
use framewise_core_types::Locator;

/// Tunables for one dispatcher instance, injected at build time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DispatchPolicy {
    pub retry: RetryPolicy,
    /// Locator the driver resolves to the embedded-document elements of the
    /// active context.
    pub frame_probe: Locator,
}

impl Default for DispatchPolicy {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            frame_probe: Locator::frames(),
        }
    }
}
