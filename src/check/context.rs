//! Per-file scan state.

use super::lines::BlankRun;
use super::naming::OpenBrackets;

/// Mutable state carried from one line to the next while scanning a file.
///
/// A context is created when a file scan starts and dropped when it ends, so
/// nothing observed in one file can influence the checks of another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanContext {
    /// Slot for the blank-line run check.
    pub blank_run: BlankRun,
    /// Bracket depth for the variable name check.
    pub open_brackets: OpenBrackets,
}

impl ScanContext {
    pub fn new() -> Self {
        Self::default()
    }
}
