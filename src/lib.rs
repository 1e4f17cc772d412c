//! Stylecheck - line-based style checker for Python source files.
//!
//! Every check inspects one raw line at a time: there is no parser and no
//! syntax tree. Checks form a closed set ordered by code, and the scanner
//! evaluates them in that order on every line, so output is ordered by file,
//! then line, then code.
//!
//! # Architecture
//!
//! - `check`: the checks, their registry, and the per-file line scanner
//! - `walk`: resolution of the input path into the files to scan
//! - `runner`: scanning a list of files into one reporter
//! - `report`: output formatting (pretty, JSON)
//! - `config`: YAML configuration schema and discovery
//! - `cli`: command-line interface
//!
//! # Adding a New Check
//!
//! Add a variant to `check::Check`, give it the next free code, a name, a
//! message template and an arm in `Check::evaluate`, then list it in
//! `Check::ALL`. Checks that need memory across lines get a slot in
//! `check::ScanContext`.

pub mod check;
pub mod cli;
pub mod config;
pub mod report;
pub mod runner;
pub mod walk;

pub use check::{Check, CheckCode, Diagnostic, Registry, ScanContext, Scanner, Selection};
pub use config::Config;
pub use report::{Collector, JsonReporter, PrettyReporter, Reporter, RunSummary};
pub use runner::Runner;
pub use walk::FileWalker;
