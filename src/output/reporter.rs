use super::*;
use colored::*;
use std::fmt::Display;
use std::io::{self, Write};
use tracing::debug;

/// Writes ranked tables and failure lines as plain text.
pub struct Reporter<W: Write> {
    out: W,
    color: bool,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn table(&mut self, table: CountTable, spec: &TableSpec) -> io::Result<()> {
        if table.is_empty() {
            debug!("{} has no rows", spec.title);
        }

        if self.color {
            writeln!(self.out, "{}", spec.title.bold())?;
        } else {
            writeln!(self.out, "{}", spec.title)?;
        }
        writeln!(self.out, "{}", spec.rule)?;

        let mut rows = 0;
        for entry in rank(table, spec.limit) {
            writeln!(self.out, "{}: {} {}", entry.key, entry.count, spec.unit)?;
            rows = entry.rank;
        }
        debug!("{}: {} rows", spec.title, rows);
        self.out.flush()
    }

    /// Blank line between sections.
    pub fn separator(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    pub fn failure(&mut self, message: impl Display) -> io::Result<()> {
        let line = format!("❌ {message}");
        if self.color {
            writeln!(self.out, "{}", line.red())?;
        } else {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()
    }
}
