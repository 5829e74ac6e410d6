use std::future::Future;
use std::sync::Arc;

use tokio::time::sleep;
use tracing::{debug, instrument, warn};

use driver_port::{Reporter, SessionError};
use framewise_core_types::DriveError;

use crate::policy::RetryPolicy;
use crate::probe::ProbeOutcome;

/// Bounded poll/retry primitive. One instance per driving session; the
/// reporter handle is explicit, there is no ambient failure sink.
pub struct RetryEngine {
    policy: RetryPolicy,
    reporter: Arc<dyn Reporter>,
}

impl RetryEngine {
    pub fn new(policy: RetryPolicy, reporter: Arc<dyn Reporter>) -> Self {
        Self { policy, reporter }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Evaluate `probe` until it reports [`ProbeOutcome::Ready`], up to the
    /// policy's attempt budget, sleeping the configured delay between
    /// attempts. `NotReady` and `Faulted` are both transient. On exhaustion
    /// the reporter's failure sink fires and `WaitExhausted` is returned;
    /// exhaustion is never a silent false.
    #[instrument(skip_all, fields(what = %description))]
    pub async fn poll_until<F, Fut>(
        &self,
        description: &str,
        mut probe: F,
    ) -> Result<(), DriveError>
    where
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = ProbeOutcome> + Send,
    {
        for attempt in 1..=self.policy.max_attempts {
            match probe().await {
                ProbeOutcome::Ready => {
                    debug!(attempt, "wait condition met");
                    return Ok(());
                }
                ProbeOutcome::NotReady => {
                    debug!(attempt, "wait condition is false, retrying");
                    self.reporter
                        .trace(&format!(
                            "wait condition '{description}' is false, retrying"
                        ))
                        .await;
                }
                ProbeOutcome::Faulted(err) => {
                    debug!(attempt, %err, "wait caught fault, retrying");
                    self.reporter
                        .trace(&format!("wait caught {err} for '{description}', retrying"))
                        .await;
                }
            }

            if attempt < self.policy.max_attempts {
                sleep(self.policy.delay()).await;
            }
        }

        warn!(
            attempts = self.policy.max_attempts,
            "wait budget exhausted"
        );
        self.reporter.fail(description).await;
        Err(DriveError::wait_exhausted(description))
    }

    /// Action-shaped twin of [`poll_until`](Self::poll_until): invoke
    /// `action`, retry on any fault with the same delay and budget, return
    /// the first success. Exhaustion reports failure and surfaces
    /// `WaitExhausted`.
    #[instrument(skip_all, fields(what = %description))]
    pub async fn retry_action<T, F, Fut>(
        &self,
        description: &str,
        mut action: F,
    ) -> Result<T, DriveError>
    where
        T: Send,
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = Result<T, SessionError>> + Send,
    {
        for attempt in 1..=self.policy.max_attempts {
            match action().await {
                Ok(value) => {
                    debug!(attempt, "action succeeded");
                    return Ok(value);
                }
                Err(err) => {
                    debug!(attempt, %err, "action caught fault, retrying");
                    self.reporter
                        .trace(&format!("wait caught {err} for '{description}', retrying"))
                        .await;
                }
            }

            if attempt < self.policy.max_attempts {
                sleep(self.policy.delay()).await;
            }
        }

        warn!(
            attempts = self.policy.max_attempts,
            "action retry budget exhausted"
        );
        self.reporter.fail(description).await;
        Err(DriveError::wait_exhausted(description))
    }
}
