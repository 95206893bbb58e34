use std::io::{self, Write};

use crossterm::{
    cursor::{MoveDown, MoveToColumn, MoveUp},
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};

use crate::coordinator::{ResultSet, Target};
use crate::http_probe::prelude::*;

use super::line::{self, TESTING};
use super::{RenderOptions, Renderer};

/// Renders one row per target and rewrites a row in place when its probe
/// finishes.
///
/// After [`Renderer::begin`] the cursor rests on the row below the last
/// target. Target `i` of `n` therefore lives `n - i` rows up; every update
/// moves there, rewrites the row and returns, so the resting position never
/// changes and other rows are never touched. Rows are cut to the terminal
/// width because a wrapped row would shift every row above it.
pub struct LiveRenderer<W: Write> {
    out: W,
    rows: usize,
    options: RenderOptions,
}

impl<W: Write> LiveRenderer<W> {
    pub fn new(out: W, options: RenderOptions) -> Self {
        Self {
            out,
            rows: 0,
            options,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn distance(&self, index: usize) -> io::Result<u16> {
        if index >= self.rows {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("row {index} is outside the {} rendered rows", self.rows),
            ));
        }
        let up = self.rows - index;
        u16::try_from(up).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("row {index} is {up} rows up, past the reach of a cursor move"),
            )
        })
    }
}

impl<W: Write + Send> Renderer for LiveRenderer<W> {
    fn begin(&mut self, targets: &[Target]) -> io::Result<()> {
        self.rows = targets.len();
        for target in targets {
            let segments = line::fit(line::placeholder(target, TESTING), self.options.line_width());
            line::queue_segments(&mut self.out, &segments, self.options.no_color)?;
            queue!(self.out, Print("\n"))?;
        }
        self.out.flush()
    }

    fn update(&mut self, target: &Target, record: &ProbeRecord) -> io::Result<()> {
        let up = self.distance(target.index)?;
        let segments = line::fit(line::result_line(target, record), self.options.line_width());

        queue!(
            self.out,
            MoveUp(up),
            MoveToColumn(0),
            Clear(ClearType::CurrentLine)
        )?;
        line::queue_segments(&mut self.out, &segments, self.options.no_color)?;
        queue!(self.out, MoveDown(up), MoveToColumn(0))?;
        self.out.flush()
    }

    fn finish(&mut self, _results: &ResultSet) -> io::Result<()> {
        queue!(self.out, Print("\n"))?;
        self.out.flush()
    }
}
