//! Retry wrapper
//!
//! Retries only transport failures (connect errors, timeouts). Whatever the server
//! answers, including 5xx statuses and error envelopes, is handed back untouched so the
//! classifier can report it.

use super::{FormFields, HttpTransport, TransportError, TransportResponse};
use async_trait::async_trait;
use rand::Rng;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;
use url::Url;

/// Configuration for retry logic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. `1` disables retries.
    pub max_attempts: u32,
    pub min_delay: Duration,
    pub max_delay: Duration,
    pub jitter: bool,
}

impl RetryPolicy {
    /// Policy used by the v3 generation: 5 attempts, exponential backoff with jitter.
    pub fn exponential_jitter() -> Self {
        Self {
            max_attempts: 5,
            min_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            jitter: true,
        }
    }

    /// Single attempt.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            min_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            jitter: false,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_delays(mut self, min_delay: Duration, max_delay: Duration) -> Self {
        self.min_delay = min_delay;
        self.max_delay = max_delay.max(min_delay);
        self
    }

    /// Delay before the retry that follows failed attempt `attempt` (0-based).
    pub(crate) fn backoff(&self, attempt: u32) -> Duration {
        let base = self.min_delay.as_millis() as u64;
        let cap = self.max_delay.as_millis() as u64;
        if base == 0 {
            return Duration::ZERO;
        }

        // exponential backoff: min_delay * 2^attempt
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        let mut delay = base.saturating_mul(factor).min(cap);

        if self.jitter {
            // up to one extra base interval, so parallel callers spread out
            delay = delay.saturating_add(rand::thread_rng().gen_range(0..=base));
        }

        Duration::from_millis(delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::exponential_jitter()
    }
}

/// [`HttpTransport`] decorator applying a [`RetryPolicy`].
#[derive(Clone)]
pub struct RetryingTransport {
    inner: Arc<dyn HttpTransport>,
    policy: RetryPolicy,
}

impl RetryingTransport {
    pub fn new(inner: Arc<dyn HttpTransport>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Delay before the next attempt, or `None` when `err` should be surfaced.
    ///
    /// `attempt` is 0-based (first failure => attempt=0).
    fn should_retry(&self, err: &TransportError, attempt: u32, url: &Url) -> Option<Duration> {
        let max_attempts = self.policy.max_attempts.max(1);
        if !err.is_retryable() || attempt + 1 >= max_attempts {
            return None;
        }
        let delay = self.policy.backoff(attempt);
        warn!(
            path = url.path(),
            attempt = attempt + 1,
            max_attempts,
            delay_ms = delay.as_millis() as u64,
            error = %err,
            "transport failure, retrying"
        );
        Some(delay)
    }

    /// Run `op` until it succeeds, fails for good, or the policy runs out of attempts.
    async fn with_retry<F, Fut>(
        &self,
        url: &Url,
        mut op: F,
    ) -> Result<TransportResponse, TransportError>
    where
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = Result<TransportResponse, TransportError>> + Send,
    {
        let mut attempt = 0;
        loop {
            match op().await {
                Err(err) => match self.should_retry(&err, attempt, url) {
                    Some(delay) => tokio::time::sleep(delay).await,
                    None => return Err(err),
                },
                ok => return ok,
            }
            attempt += 1;
        }
    }
}

#[async_trait]
impl HttpTransport for RetryingTransport {
    async fn get(&self, url: &Url) -> Result<TransportResponse, TransportError> {
        self.with_retry(url, move || self.inner.get(url)).await
    }

    async fn post_form(
        &self,
        url: &Url,
        form: &FormFields,
    ) -> Result<TransportResponse, TransportError> {
        self.with_retry(url, move || self.inner.post_form(url, form))
            .await
    }

    async fn put_form(
        &self,
        url: &Url,
        form: &FormFields,
    ) -> Result<TransportResponse, TransportError> {
        self.with_retry(url, move || self.inner.put_form(url, form))
            .await
    }
}
