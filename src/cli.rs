//! Command-line interface for stylecheck.

use clap::Parser;
use colored::Colorize;
use std::fmt::Display;
use std::io;
use std::path::{Path, PathBuf};

use crate::check::{CheckCode, Registry, Selection};
use crate::config::{self, Config};
use crate::report::{JsonReporter, PrettyReporter, Reporter};
use crate::runner::Runner;
use crate::walk::FileWalker;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Line-based style checker for Python source files.
///
/// Scans a file, or every matching file below a directory, and prints one
/// line per style violation.
#[derive(Parser, Debug)]
#[command(name = "stylecheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to check (file or directory)
    #[arg(required_unless_present = "list_checks")]
    pub path: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Path to configuration YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Comma-separated check codes to run (default: all)
    #[arg(long, value_delimiter = ',')]
    pub select: Option<Vec<String>>,

    /// Comma-separated check codes to skip
    #[arg(long, value_delimiter = ',')]
    pub ignore: Vec<String>,

    /// Maximum line length before S001 fires
    #[arg(long)]
    pub max_line_length: Option<usize>,

    /// Exit non-zero when any violation is reported
    #[arg(long)]
    pub strict: bool,

    /// List available checks and exit
    #[arg(long)]
    pub list_checks: bool,
}

/// Output format of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pretty,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pretty" => Ok(OutputFormat::Pretty),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "invalid format {:?}, must be 'pretty' or 'json'",
                s
            )),
        }
    }
}

/// Print a fatal error to stderr with the bold red `Error:` prefix.
pub fn print_error(message: impl Display) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

fn print_warning(message: impl Display) {
    eprintln!("{} {}", "Warning:".yellow().bold(), message);
}

/// Load the explicit configuration file, or a discovered one, or defaults.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match Config::discover(Path::new(".")) {
            Some(p) => p,
            None => {
                log::debug!("no configuration file found, using defaults");
                return Ok(Config::default());
            }
        },
    };

    log::debug!("loading configuration from {}", path.display());
    Config::parse_file(&path)
        .map_err(|e| anyhow::anyhow!("parsing config {}: {}", path.display(), e))
}

fn parse_codes(values: &[String]) -> anyhow::Result<Vec<CheckCode>> {
    values
        .iter()
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.parse::<CheckCode>().map_err(anyhow::Error::from))
        .collect()
}

/// Combine command-line flags with the configuration; flags win.
fn resolve_selection(args: &Cli, config: &Config) -> anyhow::Result<Selection> {
    let mut selection = config.selection();

    if let Some(select) = &args.select {
        selection.select = Some(parse_codes(select)?);
    }
    if !args.ignore.is_empty() {
        selection.ignore = parse_codes(&args.ignore)?;
    }
    if let Some(max) = args.max_line_length {
        selection.max_line_length = max;
    }

    Ok(selection)
}

/// Run the checker with the parsed arguments.
pub fn run(args: &Cli) -> anyhow::Result<i32> {
    if args.list_checks {
        return list_checks();
    }

    let format: OutputFormat = match args.format.parse() {
        Ok(f) => f,
        Err(e) => {
            print_error(e);
            return Ok(EXIT_ERROR);
        }
    };

    let config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            print_error(e);
            return Ok(EXIT_ERROR);
        }
    };
    if let Err(e) = config::validate(&config) {
        print_error(format!("invalid config: {}", e));
        return Ok(EXIT_ERROR);
    }

    let registry = match resolve_selection(args, &config)
        .and_then(|s| Registry::from_selection(&s).map_err(anyhow::Error::from))
    {
        Ok(r) => r,
        Err(e) => {
            print_error(e);
            return Ok(EXIT_ERROR);
        }
    };
    log::debug!("running checks {:?}", registry.codes());

    let Some(path) = args.path.as_deref() else {
        print_error("no path given");
        return Ok(EXIT_ERROR);
    };

    let walker = FileWalker::new()
        .extensions(config.extensions())
        .exclude(&config.exclude)?;
    let files = match walker.resolve(path) {
        Ok(f) => f,
        Err(e) => {
            print_error(e);
            return Ok(EXIT_ERROR);
        }
    };

    if files.is_empty() {
        print_warning("no files to scan");
    }

    let stdout = io::stdout();
    let mut reporter: Box<dyn Reporter> = match format {
        OutputFormat::Pretty => Box::new(PrettyReporter::new(stdout.lock())),
        OutputFormat::Json => Box::new(JsonReporter::new(
            stdout.lock(),
            path.display().to_string(),
        )),
    };

    let summary = Runner::new(&registry).run(&files, reporter.as_mut(), |e| print_error(e))?;
    reporter.finish(&summary)?;

    log::debug!(
        "{} files scanned, {} failed, {} diagnostics",
        summary.files_scanned,
        summary.files_failed,
        summary.diagnostics
    );

    if summary.files_failed > 0 {
        Ok(EXIT_ERROR)
    } else if args.strict && summary.diagnostics > 0 {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// List available checks.
fn list_checks() -> anyhow::Result<i32> {
    println!("Available checks:");
    println!();

    for check in Registry::standard().iter() {
        println!(
            "  {}  {:<24} {}",
            check.code(),
            check.name(),
            check.template()
        );
    }

    println!();
    println!("Usage:");
    println!("  stylecheck <path> --select S001,S003 --ignore S005");

    Ok(EXIT_SUCCESS)
}
