pub mod line;
pub mod live;
pub mod log;
pub mod summary;

#[cfg(test)]
pub mod testing;

use std::io::{self, IsTerminal};

use clap::ValueEnum;
use tracing::warn;

use crate::coordinator::{ResultSet, Target};
use crate::http_probe::prelude::*;

pub use live::LiveRenderer;
pub use log::LogRenderer;
pub use summary::SummaryRenderer;

/// Presents a run. The coordinator calls `begin` once, `update` once per
/// finished target in completion order, then `finish` with the complete
/// results. Calls never overlap.
pub trait Renderer: Send {
    fn begin(&mut self, targets: &[Target]) -> io::Result<()>;
    fn update(&mut self, target: &Target, record: &ProbeRecord) -> io::Result<()>;
    fn finish(&mut self, results: &ResultSet) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderMode {
    /// Live when stdout is a terminal, summary otherwise.
    Auto,
    /// Rewrite each target's row as its probe completes.
    Live,
    /// Print the ordered report after all probes complete.
    Summary,
    /// Structured log events on stderr.
    Log,
}

impl RenderMode {
    pub fn resolve(self, stdout_is_terminal: bool) -> RenderMode {
        match self {
            RenderMode::Auto if stdout_is_terminal => RenderMode::Live,
            RenderMode::Auto => RenderMode::Summary,
            other => other,
        }
    }

    /// The mode actually used for `targets` rows on `terminal`.
    ///
    /// Live rows can only be reached while they are on screen, so a run
    /// with at least as many targets as the terminal has rows is shown as
    /// a summary instead.
    pub fn select(self, terminal: &TerminalInfo, targets: usize) -> RenderMode {
        let mode = self.resolve(terminal.is_terminal);
        match (mode, terminal.height) {
            (RenderMode::Live, Some(height)) if targets >= height => {
                warn!(targets, height, "more targets than terminal rows, showing a summary instead");
                RenderMode::Summary
            }
            _ => mode,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub no_color: bool,
    /// Terminal width in columns, if known.
    pub width: Option<usize>,
}

impl RenderOptions {
    /// Columns a row may use. The last column stays free so a full row
    /// never leaves the cursor in a pending wrap.
    pub fn line_width(&self) -> Option<usize> {
        self.width.map(|w| w.saturating_sub(1).max(1))
    }
}

/// What is known about the terminal behind stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TerminalInfo {
    pub is_terminal: bool,
    pub width: Option<usize>,
    pub height: Option<usize>,
}

impl TerminalInfo {
    pub fn stdout() -> Self {
        let is_terminal = io::stdout().is_terminal();
        let size = if is_terminal {
            crossterm::terminal::size().ok()
        } else {
            None
        };
        Self {
            is_terminal,
            width: size.map(|(cols, _)| usize::from(cols)),
            height: size.map(|(_, rows)| usize::from(rows)),
        }
    }
}

/// Builds the renderer for an already selected `mode` writing to stdout.
pub fn build_renderer(mode: RenderMode, terminal: &TerminalInfo, no_color: bool) -> Box<dyn Renderer> {
    let options = RenderOptions {
        no_color,
        width: terminal.width,
    };
    let stdout = io::stdout();

    match mode.resolve(terminal.is_terminal) {
        RenderMode::Live => Box::new(LiveRenderer::new(stdout, options)),
        RenderMode::Log => Box::new(LogRenderer),
        RenderMode::Summary | RenderMode::Auto => Box::new(SummaryRenderer::new(stdout, options)),
    }
}
