//! Retry policy and the retrying fetcher decorator.
//!
//! [`RetryingFetcher`] is the single place where retry behavior for tile
//! fetches is defined. It wraps any [`TileFetcher`], re-issues requests on
//! transient failures according to a [`RetryPolicy`], and returns terminal
//! failures and successes untouched.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::http::TileFetcher;
use super::types::{FetchError, TileStream};

/// Default number of attempts, the initial one included.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default step for linear backoff (200ms, 400ms, ...).
pub const DEFAULT_RETRY_STEP_MS: u64 = 200;

/// How a fetch handles transient failures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RetryPolicy {
    /// No retries - fail on the first error.
    None,

    /// Fixed number of attempts with a constant delay between them.
    Fixed {
        /// Maximum number of attempts (including the initial attempt).
        max_attempts: u32,
        /// Delay between attempts.
        delay: Duration,
    },

    /// Delay grows by `step` after each failed attempt.
    Linear {
        /// Maximum number of attempts (including the initial attempt).
        max_attempts: u32,
        /// Delay after the first failure; the n-th retry waits `n * step`.
        step: Duration,
    },
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::linear(DEFAULT_MAX_ATTEMPTS, Duration::from_millis(DEFAULT_RETRY_STEP_MS))
    }
}

impl RetryPolicy {
    /// Creates a fixed-delay policy.
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self::Fixed {
            max_attempts,
            delay,
        }
    }

    /// Creates a linearly increasing delay policy.
    pub fn linear(max_attempts: u32, step: Duration) -> Self {
        Self::Linear { max_attempts, step }
    }

    /// Calculates the delay before the next attempt.
    ///
    /// # Arguments
    ///
    /// * `attempt` - The attempt that just failed (1-based)
    ///
    /// # Returns
    ///
    /// The delay to wait, or `None` if no attempts remain.
    pub fn delay_for_attempt(&self, attempt: u32) -> Option<Duration> {
        match self {
            Self::None => None,
            Self::Fixed {
                max_attempts,
                delay,
            } => (attempt < *max_attempts).then_some(*delay),
            Self::Linear { max_attempts, step } => {
                (attempt < *max_attempts).then(|| step.saturating_mul(attempt))
            }
        }
    }

    /// Returns the maximum number of attempts for this policy.
    pub fn max_attempts(&self) -> u32 {
        match self {
            Self::None => 1,
            Self::Fixed { max_attempts, .. } | Self::Linear { max_attempts, .. } => {
                (*max_attempts).max(1)
            }
        }
    }

    /// Upper bound on the time spent sleeping between attempts.
    ///
    /// Together with the per-attempt timeout this bounds the wall-clock
    /// time of a fetch: `attempts * timeout + total_delay()`.
    pub fn total_delay(&self) -> Duration {
        (1..self.max_attempts())
            .filter_map(|attempt| self.delay_for_attempt(attempt))
            .fold(Duration::ZERO, Duration::saturating_add)
    }
}

/// Decorator that retries transient failures of an inner fetcher.
///
/// Provider-agnostic: every provider that touches the network wraps its
/// fetcher in one of these at construction time.
#[derive(Clone)]
pub struct RetryingFetcher<F> {
    inner: F,
    policy: RetryPolicy,
}

impl<F: TileFetcher> RetryingFetcher<F> {
    /// Wraps `inner` with the given policy.
    pub fn new(inner: F, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    /// Returns the retry policy in effect.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Fetches `url`, retrying transient failures, until done or cancelled.
    ///
    /// Cancellation aborts the in-flight request and any pending backoff,
    /// and is never retried.
    pub async fn fetch_cancellable(
        &self,
        url: &str,
        cancellation: &CancellationToken,
    ) -> Result<TileStream, FetchError> {
        let mut attempt = 1;
        loop {
            if cancellation.is_cancelled() {
                return Err(FetchError::Cancelled);
            }

            let result = tokio::select! {
                biased;
                _ = cancellation.cancelled() => {
                    debug!(url = url, attempt = attempt, "Fetch cancelled in flight");
                    return Err(FetchError::Cancelled);
                }
                result = self.inner.fetch(url) => result,
            };

            let error = match result {
                Ok(stream) => return Ok(stream),
                Err(e) => e,
            };

            if !error.is_transient() {
                debug!(url = url, error = %error, "Terminal fetch failure, not retrying");
                return Err(error);
            }

            let Some(delay) = self.policy.delay_for_attempt(attempt) else {
                warn!(
                    url = url,
                    attempts = attempt,
                    error = %error,
                    "Fetch failed, retries exhausted"
                );
                return Err(error);
            };

            warn!(
                url = url,
                attempt = attempt,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "Transient fetch failure, retrying"
            );

            if !delay.is_zero() {
                tokio::select! {
                    biased;
                    _ = cancellation.cancelled() => return Err(FetchError::Cancelled),
                    _ = tokio::time::sleep(delay) => {}
                }
            }

            attempt += 1;
        }
    }
}

impl<F: TileFetcher> TileFetcher for RetryingFetcher<F> {
    async fn fetch(&self, url: &str) -> Result<TileStream, FetchError> {
        self.fetch_cancellable(url, &CancellationToken::new()).await
    }
}
