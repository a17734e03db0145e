use std::{future::Future, time::Duration};

use tokio::time::sleep;
use tracing::{debug, warn};

use super::SyncError;
use crate::config::BootstrapSettings;

/// Bounded retry with exponential backoff.
///
/// The delay before retry `n` (0-indexed) is `initial_backoff * 2^n`, capped at
/// `max_backoff`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_backoff: Duration,
    max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&BootstrapSettings::default())
    }
}

impl From<&BootstrapSettings> for RetryPolicy {
    fn from(settings: &BootstrapSettings) -> Self {
        Self::new(
            settings.max_attempts,
            Duration::from_millis(settings.initial_backoff_ms),
            Duration::from_millis(settings.max_backoff_ms),
        )
    }
}

impl RetryPolicy {
    /// Creates a policy. At least one attempt is always made and the cap is never
    /// below the initial delay.
    pub fn new(max_attempts: u32, initial_backoff: Duration, max_backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_backoff,
            max_backoff: max_backoff.max(initial_backoff),
        }
    }

    /// A single attempt with no retries.
    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO, Duration::ZERO)
    }

    /// Total attempts, including the first.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay to wait after the failed attempt number `attempt` (0-indexed).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2_u32.saturating_pow(attempt);
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }

    /// Runs `operation` until it succeeds or the attempts are used up.
    ///
    /// # Errors
    /// Returns `SyncError::BootstrapExhausted` wrapping the last failure when every
    /// attempt failed.
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> Result<T, SyncError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, SyncError>>,
    {
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(value) => {
                    if attempt > 0 {
                        debug!("succeeded after {} retries", attempt);
                    }
                    return Ok(value);
                }
                Err(err) if attempt + 1 < self.max_attempts => {
                    let delay = self.backoff(attempt);
                    warn!(
                        "attempt {}/{} failed: {}. Retrying in {:?}",
                        attempt + 1,
                        self.max_attempts,
                        err,
                        delay
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    return Err(SyncError::BootstrapExhausted {
                        attempts: attempt + 1,
                        last_error: Box::new(err),
                    });
                }
            }
        }
    }
}
