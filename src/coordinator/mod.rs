mod result_set;
mod retry;
mod target;

pub use result_set::{ResultSet, Tally};
pub use retry::{RetryPolicy, probe_with_retry};
pub use target::Target;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::http_probe::prelude::*;
use crate::render::Renderer;

/// Runs one probe per target concurrently and feeds the results to a
/// [`Renderer`].
///
/// Every probe task sends its record over a channel; the collector in
/// [`Coordinator::run`] is the only code touching the [`ResultSet`] and the
/// renderer, so results and terminal writes are applied one at a time in
/// completion order.
pub struct Coordinator {
    transport: Arc<dyn Transport>,
    timeout: Duration,
    retry: RetryPolicy,
}

impl Coordinator {
    pub fn new(transport: Arc<dyn Transport>, timeout: Duration, retry: RetryPolicy) -> Self {
        Self {
            transport,
            timeout,
            retry,
        }
    }

    /// Probes all `targets` and returns once every probe has finished.
    ///
    /// The returned set holds exactly one record per target. Probe failures
    /// end up in the records; renderer I/O errors are logged and skipped.
    pub async fn run(&self, targets: &[Target], renderer: &mut dyn Renderer) -> ResultSet {
        let mut results = ResultSet::with_len(targets.len());
        info!(targets = targets.len(), timeout = ?self.timeout, "starting probes");

        if let Err(err) = renderer.begin(targets) {
            warn!("failed to render placeholders: {err}");
        }

        let (record_tx, mut record_rx) = mpsc::unbounded_channel::<ProbeRecord>();
        let mut handles = Vec::with_capacity(targets.len());

        for target in targets {
            let record_tx = record_tx.clone();
            let transport = Arc::clone(&self.transport);
            let url = target.url.clone();
            let index = target.index;
            let timeout = self.timeout;
            let retry = self.retry;

            let handle = tokio::spawn(async move {
                let (outcome, attempts) =
                    probe_with_retry(transport.as_ref(), &url, timeout, retry).await;
                // The collector outlives every task, a failed send means the
                // run itself was dropped.
                let _ = record_tx.send(ProbeRecord {
                    index,
                    outcome,
                    attempts,
                });
            });

            handles.push(handle);
        }
        drop(record_tx);

        while let Some(record) = record_rx.recv().await {
            collect(targets, &mut results, renderer, record);
        }

        for (target, handle) in targets.iter().zip(handles) {
            if let Err(err) = handle.await {
                warn!(url = %target.url, "probe task failed: {err}");
                if !results.is_filled(target.index) {
                    let record = ProbeRecord {
                        index: target.index,
                        outcome: ProbeOutcome::failure(
                            FailureKind::NetworkError,
                            format!("probe task failed: {err}"),
                        ),
                        attempts: 1,
                    };
                    collect(targets, &mut results, renderer, record);
                }
            }
        }

        if let Err(err) = renderer.finish(&results) {
            warn!("failed to render results: {err}");
        }

        let tally = results.tally();
        info!(
            ok = tally.ok,
            timed_out = tally.timed_out,
            failed = tally.failed,
            "all probes finished"
        );
        results
    }
}

fn collect(
    targets: &[Target],
    results: &mut ResultSet,
    renderer: &mut dyn Renderer,
    record: ProbeRecord,
) {
    let Some(target) = targets.get(record.index) else {
        warn!(index = record.index, "dropping result for unknown target");
        return;
    };

    debug!(
        index = record.index,
        url = %target.url,
        attempts = record.attempts,
        outcome = ?record.outcome,
        "probe finished"
    );

    let index = record.index;
    if let Err(err) = results.fill(record) {
        warn!(url = %target.url, "{err}");
        return;
    }
    if let Some(record) = results.get(index) {
        if let Err(err) = renderer.update(target, record) {
            warn!(url = %target.url, "failed to render result: {err}");
        }
    }
}
