//! Test doubles for rendering.

use std::io;

use crate::coordinator::{ResultSet, Target};
use crate::http_probe::prelude::*;

use super::Renderer;

/// Remembers which calls the coordinator made.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub begun: Option<usize>,
    pub updates: Vec<usize>,
    pub finished: bool,
}

impl Renderer for RecordingRenderer {
    fn begin(&mut self, targets: &[Target]) -> io::Result<()> {
        self.begun = Some(targets.len());
        Ok(())
    }

    fn update(&mut self, target: &Target, record: &ProbeRecord) -> io::Result<()> {
        assert_eq!(target.index, record.index);
        assert!(!self.finished, "update after finish");
        self.updates.push(record.index);
        Ok(())
    }

    fn finish(&mut self, results: &ResultSet) -> io::Result<()> {
        assert!(results.is_complete(), "finish before every probe completed");
        self.finished = true;
        Ok(())
    }
}

/// Replays terminal output onto a grid of rows so tests can check what a
/// user would see. Understands the sequences the renderers emit: cursor
/// up/down (`A`/`B`), column (`G`), line clear (`K`) and SGR (`m`, ignored).
#[derive(Debug, Default)]
pub struct VirtualTerminal {
    rows: Vec<Vec<char>>,
    row: usize,
    col: usize,
}

impl VirtualTerminal {
    pub fn replay(bytes: &[u8]) -> Self {
        let text = String::from_utf8(bytes.to_vec()).expect("terminal output is utf8");
        let mut term = Self::default();
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '\x1b' => {
                    assert_eq!(chars.next(), Some('['), "only CSI sequences are expected");
                    let mut params = String::new();
                    let command = loop {
                        match chars.next() {
                            Some(p) if p.is_ascii_digit() || p == ';' => params.push(p),
                            Some(command) => break command,
                            None => panic!("truncated escape sequence"),
                        }
                    };
                    term.apply(command, &params);
                }
                '\n' => {
                    term.row += 1;
                    term.col = 0;
                }
                '\r' => term.col = 0,
                c => term.put(c),
            }
        }
        term
    }

    fn apply(&mut self, command: char, params: &str) {
        let n: usize = params.split(';').next().and_then(|p| p.parse().ok()).unwrap_or(1);
        match command {
            'A' => self.row = self.row.checked_sub(n).expect("cursor moved above the first row"),
            'B' => self.row += n,
            'G' => self.col = n.saturating_sub(1),
            'K' => {
                let mode = params.parse::<usize>().unwrap_or(0);
                if let Some(row) = self.rows.get_mut(self.row) {
                    match mode {
                        2 => row.clear(),
                        _ => row.truncate(self.col),
                    }
                }
            }
            'm' => {}
            other => panic!("unexpected control sequence {other:?}"),
        }
    }

    fn put(&mut self, c: char) {
        while self.rows.len() <= self.row {
            self.rows.push(Vec::new());
        }
        let row = &mut self.rows[self.row];
        while row.len() < self.col {
            row.push(' ');
        }
        if self.col < row.len() {
            row[self.col] = c;
        } else {
            row.push(c);
        }
        self.col += 1;
    }

    /// Visible rows with trailing blanks removed.
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .rows
            .iter()
            .map(|row| row.iter().collect::<String>().trim_end().to_owned())
            .collect();
        while lines.last().is_some_and(String::is_empty) {
            lines.pop();
        }
        lines
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }
}
