//! Run-level orchestration: scan a sequence of files into one reporter.

use std::io;
use std::path::PathBuf;

use crate::check::{Diagnostic, Registry, ScanError, Scanner};
use crate::report::{Reporter, RunSummary};

/// Scans files one after another, in the order given.
pub struct Runner<'r> {
    scanner: Scanner<'r>,
}

impl<'r> Runner<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            scanner: Scanner::new(registry),
        }
    }

    /// Scan every file and return the run totals.
    ///
    /// A file that cannot be opened or read is handed to `on_error` and the
    /// run moves on to the next file. A failure to write the report stops
    /// the run.
    pub fn run<F>(
        &self,
        files: &[PathBuf],
        reporter: &mut dyn Reporter,
        mut on_error: F,
    ) -> Result<RunSummary, ScanError>
    where
        F: FnMut(&ScanError),
    {
        let mut summary = RunSummary::default();
        let mut counting = Counting {
            inner: reporter,
            count: 0,
        };

        for file in files {
            match self.scanner.scan_file(file, &mut counting) {
                Ok(file_summary) => {
                    summary.files_scanned += 1;
                    summary.lines += file_summary.lines;
                }
                Err(e) if e.is_report_failure() => return Err(e),
                Err(e) => {
                    log::debug!("scan of {} aborted: {}", file.display(), e);
                    summary.files_failed += 1;
                    on_error(&e);
                }
            }
        }

        summary.diagnostics = counting.count;
        Ok(summary)
    }
}

/// Counts diagnostics on their way to the wrapped reporter, including those
/// from files whose scan later fails.
struct Counting<'a> {
    inner: &'a mut dyn Reporter,
    count: usize,
}

impl Reporter for Counting<'_> {
    fn report(&mut self, diagnostic: Diagnostic) -> io::Result<()> {
        self.count += 1;
        self.inner.report(diagnostic)
    }
}
