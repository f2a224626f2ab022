//! Tick progress indicators.

use std::io::{self, IsTerminal, Stderr};

use crossterm::cursor::MoveToColumn;
use crossterm::execute;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use tracing::debug;

/// Receives one unit of progress per poll tick
pub trait Progress {
    fn start(&mut self, total_ticks: u64);
    fn advance(&mut self, tick: u64);
    fn finish(&mut self);
}

/// Discards all progress
#[derive(Debug, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn start(&mut self, _total_ticks: u64) {}
    fn advance(&mut self, _tick: u64) {}
    fn finish(&mut self) {}
}

/// Single line progress bar redrawn in place on stderr
pub struct TerminalProgress {
    out: Stderr,
    label: String,
    width: u64,
    total: u64,
    line_open: bool,
}

impl TerminalProgress {
    const WIDTH: u64 = 40;

    pub fn new(label: impl Into<String>) -> Self {
        Self { out: io::stderr(), label: label.into(), width: Self::WIDTH, total: 0, line_open: false }
    }

    /// A terminal bar when stderr is a TTY, otherwise nothing
    pub fn for_stderr(label: impl Into<String>) -> Box<dyn Progress> {
        if io::stderr().is_terminal() {
            Box::new(Self::new(label))
        } else {
            Box::new(NoProgress)
        }
    }

    fn render(&self, done: u64) -> String {
        let total = self.total.max(1);
        let done = done.min(total);
        let filled = (done * self.width / total) as usize;
        let empty = self.width as usize - filled;
        format!("{} [{}{}] {done}/{total}", self.label, "#".repeat(filled), "-".repeat(empty))
    }

    fn draw(&mut self, done: u64) {
        let line = self.render(done);
        self.line_open = true;
        if let Err(e) = execute!(self.out, MoveToColumn(0), Clear(ClearType::CurrentLine), Print(line))
        {
            debug!("failed to draw progress bar: {e}");
        }
    }
}

impl Progress for TerminalProgress {
    fn start(&mut self, total_ticks: u64) {
        self.total = total_ticks;
        self.draw(0);
    }

    fn advance(&mut self, tick: u64) {
        self.draw(tick);
    }

    /// Ends the bar line. Safe to call more than once, e.g. again after an
    /// interrupted run.
    fn finish(&mut self) {
        if !std::mem::take(&mut self.line_open) {
            return;
        }
        if let Err(e) = execute!(self.out, Print("\n")) {
            debug!("failed to finish progress bar: {e}");
        }
    }
}
