use std::time::Duration;

use tracing::debug;

use crate::http_probe::prelude::*;

/// How often a failed probe is attempted again.
///
/// Only timeouts and network errors are retried; a request that cannot be
/// built fails the same way every time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    pub fn none() -> Self {
        Self::default()
    }
}

/// Probes `url` until it succeeds, fails permanently or runs out of
/// retries. Returns the last outcome and the number of attempts made.
pub async fn probe_with_retry(
    transport: &dyn Transport,
    url: &str,
    timeout: Duration,
    policy: RetryPolicy,
) -> (ProbeOutcome, u32) {
    let mut attempts: u32 = 0;
    loop {
        attempts = attempts.saturating_add(1);
        let outcome = probe_url(transport, url, timeout).await;

        let retriable = outcome.failure_kind().is_some_and(FailureKind::is_retriable);
        if !retriable || attempts > policy.max_retries {
            return (outcome, attempts);
        }

        debug!(url, attempts, ?outcome, "probe failed, retrying");
        if !policy.delay.is_zero() {
            tokio::time::sleep(policy.delay).await;
        }
    }
}
