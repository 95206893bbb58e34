use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use unicode_truncate::UnicodeTruncateStr;

use crate::coordinator::Target;
use crate::http_probe::prelude::*;

/// A run of text printed in one color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub color: Option<Color>,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }

    pub fn colored(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
        }
    }
}

pub const TESTING: &str = "testing";
pub const IN_PROGRESS: &str = "in progress";

pub fn band_color(band: LatencyBand) -> Color {
    match band {
        LatencyBand::Fast => Color::DarkGreen,
        LatencyBand::Moderate => Color::DarkYellow,
        LatencyBand::Slow => Color::DarkRed,
    }
}

pub fn format_latency(latency: Duration) -> String {
    format!("{:.3}ms", latency.as_secs_f64() * 1000.0)
}

fn prefix(target: &Target) -> Segment {
    Segment::plain(format!("{}. Testing {}... ", target.number(), target.url))
}

/// The line shown for a target whose probe is still running.
pub fn placeholder(target: &Target, status: &str) -> Vec<Segment> {
    vec![prefix(target), Segment::plain(status)]
}

/// The final line for a target.
pub fn result_line(target: &Target, record: &ProbeRecord) -> Vec<Segment> {
    let status = match &record.outcome {
        ProbeOutcome::Success { latency } => Segment::colored(
            format_latency(*latency),
            band_color(LatencyBand::from_latency(*latency)),
        ),
        ProbeOutcome::Failure {
            kind: FailureKind::Timeout,
            ..
        } => Segment::colored("TIMEOUT", Color::DarkRed),
        ProbeOutcome::Failure { detail, .. } => {
            Segment::colored(format!("ERROR: {detail}"), Color::DarkRed)
        }
    };

    let mut line = vec![prefix(target), status];
    if record.attempts > 1 {
        line.push(Segment::plain(format!(" (after {} attempts)", record.attempts)));
    }
    line
}

/// Cuts `segments` down to at most `width` columns.
pub fn fit(segments: Vec<Segment>, width: Option<usize>) -> Vec<Segment> {
    let Some(mut remaining) = width else {
        return segments;
    };

    let mut fitted = Vec::with_capacity(segments.len());
    for segment in segments {
        if remaining == 0 {
            break;
        }
        let (text, used) = segment.text.unicode_truncate(remaining);
        remaining = remaining.saturating_sub(used);
        fitted.push(Segment {
            text: text.to_owned(),
            color: segment.color,
        });
    }
    fitted
}

/// Queues the segments on `out`, resetting the color after every colored
/// segment. Nothing is flushed.
pub fn queue_segments<W: Write>(out: &mut W, segments: &[Segment], no_color: bool) -> io::Result<()> {
    for segment in segments {
        match segment.color {
            Some(color) if !no_color => {
                queue!(out, SetForegroundColor(color), Print(&segment.text), ResetColor)?;
            }
            _ => queue!(out, Print(&segment.text))?,
        }
    }
    Ok(())
}
