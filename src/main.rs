//! Stylecheck CLI entry point.

use clap::Parser;
use stylecheck::cli::{self, Cli, EXIT_ERROR};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let exit_code = match cli::run(&cli) {
        Ok(code) => code,
        Err(e) => {
            cli::print_error(e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
