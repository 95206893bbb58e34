use std::io;

use tracing::{info, warn};

use crate::coordinator::{ResultSet, Target};
use crate::http_probe::prelude::*;

use super::Renderer;

/// Emits one structured `tracing` event per target instead of drawing on
/// the terminal. Handy for CI logs and anything that parses output.
#[derive(Debug, Default)]
pub struct LogRenderer;

impl Renderer for LogRenderer {
    fn begin(&mut self, targets: &[Target]) -> io::Result<()> {
        info!(targets = targets.len(), "probing targets");
        Ok(())
    }

    fn update(&mut self, target: &Target, record: &ProbeRecord) -> io::Result<()> {
        let number = target.number();
        match &record.outcome {
            ProbeOutcome::Success { latency } => info!(
                number,
                url = %target.url,
                latency_ms = latency.as_secs_f64() * 1000.0,
                band = ?LatencyBand::from_latency(*latency),
                attempts = record.attempts,
                "target responded"
            ),
            ProbeOutcome::Failure { kind, detail } => warn!(
                number,
                url = %target.url,
                kind = %kind,
                detail = %detail,
                attempts = record.attempts,
                "target failed"
            ),
        }
        Ok(())
    }

    fn finish(&mut self, results: &ResultSet) -> io::Result<()> {
        let tally = results.tally();
        info!(
            targets = results.len(),
            ok = tally.ok,
            timed_out = tally.timed_out,
            failed = tally.failed,
            "probe summary"
        );
        Ok(())
    }
}
