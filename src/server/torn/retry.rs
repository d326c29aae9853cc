//! Exponential backoff for transient Torn API failures.

use std::{future::Future, time::Duration};

use crate::server::error::torn::TornApiError;

/// Retry policy applied around individual Torn API calls.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Factor applied to the delay after each retry.
    pub backoff_multiplier: f32,
    /// Upper bound on any single delay.
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            backoff_multiplier: 2.0,
            max_backoff: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// A policy that makes exactly one attempt.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Delay to wait after the given failed attempt (1-based).
    pub fn backoff_duration(&self, failed_attempt: u32) -> Duration {
        if failed_attempt == 0 {
            return Duration::ZERO;
        }

        let factor = self.backoff_multiplier.powi(failed_attempt as i32 - 1);
        let delay_secs = self.base_delay.as_secs_f32() * factor;
        let capped_secs = delay_secs.min(self.max_backoff.as_secs_f32());

        Duration::from_secs_f32(capped_secs)
    }

    /// Runs `op` until it succeeds, fails permanently, or attempts run out.
    ///
    /// Only errors for which `TornApiError::is_transient` holds are retried.
    ///
    /// # Arguments
    /// - `what` - Short description of the call for log output
    /// - `op` - Closure producing a fresh request future per attempt
    ///
    /// # Returns
    /// - `Ok(T)` - Result of the first successful attempt
    /// - `Err(TornApiError)` - The permanent error, or the error from the final attempt
    pub async fn run<T, F, Fut>(&self, what: &str, mut op: F) -> Result<T, TornApiError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, TornApiError>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt < max_attempts => {
                    let delay = self.backoff_duration(attempt);

                    tracing::warn!(
                        "{} failed (attempt {}/{}), retrying in {:?}: {}",
                        what,
                        attempt,
                        max_attempts,
                        delay,
                        err
                    );

                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
