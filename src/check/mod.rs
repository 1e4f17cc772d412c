//! Style checks and the scanner that runs them line by line.

mod context;
mod lines;
mod naming;
mod registry;
mod scanner;
mod types;

pub use context::ScanContext;
pub use lines::{BlankRun, DEFAULT_MAX_LINE_LENGTH, MAX_BLANK_LINES};
pub use naming::OpenBrackets;
pub use registry::{Check, Registry, Selection, SelectionError};
pub use scanner::{FileSummary, ScanError, Scanner};
pub use types::{CheckCode, CheckOutcome, CodeParseError, Diagnostic};
