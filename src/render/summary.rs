use std::io::{self, Write};

use crossterm::{queue, style::Print};

use crate::coordinator::{ResultSet, Target};
use crate::http_probe::prelude::*;

use super::line::{self, IN_PROGRESS};
use super::{RenderOptions, Renderer};

/// Prints a static placeholder per target up front and the full report,
/// in configured order, once every probe is done. Needs no cursor
/// movement, so it also works when stdout is a pipe or a file.
pub struct SummaryRenderer<W: Write> {
    out: W,
    targets: Vec<Target>,
    options: RenderOptions,
}

impl<W: Write> SummaryRenderer<W> {
    pub fn new(out: W, options: RenderOptions) -> Self {
        Self {
            out,
            targets: Vec::new(),
            options,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Renderer for SummaryRenderer<W> {
    fn begin(&mut self, targets: &[Target]) -> io::Result<()> {
        self.targets = targets.to_vec();
        for target in targets {
            let segments = line::fit(line::placeholder(target, IN_PROGRESS), self.options.line_width());
            line::queue_segments(&mut self.out, &segments, self.options.no_color)?;
            queue!(self.out, Print("\n"))?;
        }
        self.out.flush()
    }

    fn update(&mut self, _target: &Target, _record: &ProbeRecord) -> io::Result<()> {
        Ok(())
    }

    fn finish(&mut self, results: &ResultSet) -> io::Result<()> {
        if self.targets.is_empty() {
            return self.out.flush();
        }

        queue!(self.out, Print("\n"))?;
        for target in &self.targets {
            let segments = match results.get(target.index) {
                Some(record) => line::result_line(target, record),
                None => line::placeholder(target, "no result"),
            };
            let segments = line::fit(segments, self.options.line_width());
            line::queue_segments(&mut self.out, &segments, self.options.no_color)?;
            queue!(self.out, Print("\n"))?;
        }

        let tally = results.tally();
        queue!(
            self.out,
            Print(format!(
                "{} targets: {} ok, {} timed out, {} failed\n",
                self.targets.len(),
                tally.ok,
                tally.timed_out,
                tally.failed
            ))
        )?;
        self.out.flush()
    }
}
