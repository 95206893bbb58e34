use std::time::Duration;

use tokio::time::Instant;

use super::prelude::*;

/// Probes `url` once and classifies the result.
///
/// Latency runs from the start of the request until the transport reports
/// response headers. The whole attempt is bounded by `timeout`; an attempt
/// that takes `timeout` or longer is a timeout even if headers did arrive.
pub async fn probe_url(transport: &dyn Transport, url: &str, timeout: Duration) -> ProbeOutcome {
    let start = Instant::now();
    let result = tokio::time::timeout(timeout, transport.fetch_headers(url)).await;
    let latency = start.elapsed();

    match result {
        Ok(Ok(())) if latency < timeout => ProbeOutcome::Success { latency },
        Ok(Ok(())) | Err(_) => timed_out(timeout),
        Ok(Err(err)) => ProbeOutcome::failure(err.kind, err.detail),
    }
}

fn timed_out(timeout: Duration) -> ProbeOutcome {
    ProbeOutcome::failure(
        FailureKind::Timeout,
        format!("no response within {}ms", timeout.as_millis()),
    )
}
