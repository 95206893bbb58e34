pub mod probe;
pub mod result;
pub mod transport;

#[cfg(test)]
pub mod fake;

pub mod prelude {
    pub use super::probe::probe_url;
    pub use super::result::{FailureKind, LatencyBand, ProbeOutcome, ProbeRecord};
    pub use super::transport::{HttpTransport, Transport, TransportError};
}

use std::fmt::Write;

/// Browser-like user agent sent with every probe. Plenty of sites reject
/// requests from obvious HTTP libraries, which would skew the results.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Flattens an error and its sources into a single display line.
fn report(mut err: &(dyn std::error::Error + 'static)) -> String {
    let mut s = format!("{}", err);
    while let Some(src) = err.source() {
        let cause = src.to_string();
        if !s.ends_with(&cause) {
            let _ = write!(s, ": {}", cause);
        }
        err = src;
    }
    single_line(&s)
}

/// Replaces control characters so the text always occupies one terminal row.
pub(crate) fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
