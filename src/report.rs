//! Output formatting for scan results.
//!
//! Supports two output formats:
//! - Pretty: one `<path>: Line <n>: <code> <message>` line per diagnostic,
//!   written as soon as it is found
//! - JSON: a single document with every diagnostic and run totals, written
//!   when the run finishes

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::check::Diagnostic;

/// Totals for a whole run, handed to [`Reporter::finish`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub files_scanned: usize,
    pub files_failed: usize,
    pub lines: usize,
    pub diagnostics: usize,
}

/// Sink for diagnostics produced by the scanner.
pub trait Reporter {
    /// Called once per diagnostic, in output order.
    fn report(&mut self, diagnostic: Diagnostic) -> io::Result<()>;

    /// Called once after the last file.
    fn finish(&mut self, _summary: &RunSummary) -> io::Result<()> {
        Ok(())
    }
}

// =============================================================================
// Pretty format
// =============================================================================

/// Streams each diagnostic as one line.
pub struct PrettyReporter<W: Write> {
    out: W,
}

impl<W: Write> PrettyReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for PrettyReporter<W> {
    fn report(&mut self, diagnostic: Diagnostic) -> io::Result<()> {
        writeln!(self.out, "{}", diagnostic)
    }

    fn finish(&mut self, _summary: &RunSummary) -> io::Result<()> {
        self.out.flush()
    }
}

// =============================================================================
// JSON format
// =============================================================================

/// JSON report structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub path: String,
    pub files_scanned: usize,
    pub files_failed: usize,
    pub lines_scanned: usize,
    pub diagnostics: Vec<Diagnostic>,
    /// Number of diagnostics per check code, ordered by code.
    pub counts: BTreeMap<String, usize>,
}

/// Collects diagnostics and writes a single JSON document on finish.
pub struct JsonReporter<W: Write> {
    out: W,
    path: String,
    diagnostics: Vec<Diagnostic>,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W, path: impl Into<String>) -> Self {
        Self {
            out,
            path: path.into(),
            diagnostics: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn report(&mut self, diagnostic: Diagnostic) -> io::Result<()> {
        self.diagnostics.push(diagnostic);
        Ok(())
    }

    fn finish(&mut self, summary: &RunSummary) -> io::Result<()> {
        let mut counts = BTreeMap::new();
        for d in &self.diagnostics {
            *counts.entry(d.code.to_string()).or_insert(0) += 1;
        }

        let report = JsonReport {
            version: env!("CARGO_PKG_VERSION").to_string(),
            path: self.path.clone(),
            files_scanned: summary.files_scanned,
            files_failed: summary.files_failed,
            lines_scanned: summary.lines,
            diagnostics: std::mem::take(&mut self.diagnostics),
            counts,
        };

        serde_json::to_writer_pretty(&mut self.out, &report)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

// =============================================================================
// In-memory collection
// =============================================================================

/// Keeps every diagnostic in memory, for library callers and tests.
#[derive(Debug, Default)]
pub struct Collector {
    pub diagnostics: Vec<Diagnostic>,
}

impl Reporter for Collector {
    fn report(&mut self, diagnostic: Diagnostic) -> io::Result<()> {
        self.diagnostics.push(diagnostic);
        Ok(())
    }
}
