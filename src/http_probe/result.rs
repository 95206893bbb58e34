use std::fmt;
use std::time::Duration;

/// Classification of a failed probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No response headers arrived within the configured timeout.
    Timeout,
    /// Any transport level failure: DNS, refused connection, TLS, reset.
    NetworkError,
    /// The request could not be constructed, usually a malformed URL.
    RequestBuildError,
}

impl FailureKind {
    /// Whether another attempt could plausibly produce a different outcome.
    pub fn is_retriable(self) -> bool {
        match self {
            FailureKind::Timeout | FailureKind::NetworkError => true,
            FailureKind::RequestBuildError => false,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Timeout => "timeout",
            FailureKind::NetworkError => "network error",
            FailureKind::RequestBuildError => "request build error",
        };
        f.write_str(name)
    }
}

/// Result of a single probe. Never mutated once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Success { latency: Duration },
    Failure { kind: FailureKind, detail: String },
}

impl ProbeOutcome {
    pub fn failure(kind: FailureKind, detail: impl Into<String>) -> Self {
        ProbeOutcome::Failure {
            kind,
            detail: detail.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success { .. })
    }

    pub fn latency(&self) -> Option<Duration> {
        match self {
            ProbeOutcome::Success { latency } => Some(*latency),
            ProbeOutcome::Failure { .. } => None,
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            ProbeOutcome::Success { .. } => None,
            ProbeOutcome::Failure { kind, .. } => Some(*kind),
        }
    }

    pub fn band(&self) -> Option<LatencyBand> {
        self.latency().map(LatencyBand::from_latency)
    }
}

/// Outcome of one target, tagged with the target's position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRecord {
    pub index: usize,
    pub outcome: ProbeOutcome,
    /// Number of GET attempts made, one plus the retries used.
    pub attempts: u32,
}

/// Latency classification used for coloring results.
///
/// The bands are computed on whole milliseconds: anything under 500ms is
/// fast, 500 up to and including 1000ms is moderate, the rest is slow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatencyBand {
    Fast,
    Moderate,
    Slow,
}

const FAST_LIMIT_MS: u128 = 500;
const MODERATE_LIMIT_MS: u128 = 1000;

impl LatencyBand {
    pub fn from_latency(latency: Duration) -> Self {
        let ms = latency.as_millis();
        if ms < FAST_LIMIT_MS {
            LatencyBand::Fast
        } else if ms <= MODERATE_LIMIT_MS {
            LatencyBand::Moderate
        } else {
            LatencyBand::Slow
        }
    }
}
