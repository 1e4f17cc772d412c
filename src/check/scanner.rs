//! Line scanner that drives the registry over a file.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

use super::{Diagnostic, Registry, ScanContext};
use crate::report::Reporter;

/// Failure while scanning a single file.
///
/// Diagnostics handed to the reporter before the failure stay reported.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("cannot read {path} at line {line}: {source}")]
    Read {
        path: String,
        line: usize,
        #[source]
        source: io::Error,
    },
    #[error("writing report: {0}")]
    Report(#[source] io::Error),
}

impl ScanError {
    /// True when the failure came from the output side rather than the file.
    pub fn is_report_failure(&self) -> bool {
        matches!(self, ScanError::Report(_))
    }
}

/// Counts for one scanned file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileSummary {
    pub lines: usize,
    pub diagnostics: usize,
}

/// Runs every check of a registry over the lines of one file at a time.
pub struct Scanner<'r> {
    registry: &'r Registry,
}

impl<'r> Scanner<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Open and scan a file, reporting diagnostics as they are found.
    ///
    /// The path is rendered with `Path::display` in the diagnostics.
    pub fn scan_file(
        &self,
        path: &Path,
        reporter: &mut dyn Reporter,
    ) -> Result<FileSummary, ScanError> {
        let display = path.display().to_string();
        let file = File::open(path).map_err(|source| ScanError::Open {
            path: display.clone(),
            source,
        })?;
        self.scan_reader(&display, BufReader::new(file), reporter)
    }

    /// Scan any line source.
    ///
    /// Lines are passed to the checks with their terminators. Within a line,
    /// diagnostics follow the registry order; all diagnostics of a line are
    /// reported before the next line is read.
    pub fn scan_reader<R: BufRead>(
        &self,
        display_path: &str,
        mut reader: R,
        reporter: &mut dyn Reporter,
    ) -> Result<FileSummary, ScanError> {
        let mut ctx = ScanContext::new();
        let mut summary = FileSummary::default();
        let mut line = String::new();

        loop {
            line.clear();
            let read = reader
                .read_line(&mut line)
                .map_err(|source| ScanError::Read {
                    path: display_path.to_string(),
                    line: summary.lines + 1,
                    source,
                })?;
            if read == 0 {
                break;
            }
            summary.lines += 1;

            for check in self.registry.iter() {
                let outcome = check.evaluate(&line, &mut ctx);
                if !outcome.matched {
                    continue;
                }
                reporter
                    .report(Diagnostic {
                        file: display_path.to_string(),
                        line: summary.lines,
                        code: check.code(),
                        message: outcome.message,
                    })
                    .map_err(ScanError::Report)?;
                summary.diagnostics += 1;
            }
        }

        log::debug!(
            "scanned {}: {} lines, {} diagnostics",
            display_path,
            summary.lines,
            summary.diagnostics
        );
        Ok(summary)
    }
}
