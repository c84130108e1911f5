use std::{io, process::ExitCode};

use auto_i18n::cli::{Arguments, ExitStatus};
use clap::Parser;
use colored::Colorize;
use tracing::Level;

fn main() -> ExitCode {
    let args = Arguments::parse();
    init_tracing(args.verbose());

    match auto_i18n::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("{} {:#}", "error:".bold().red(), err);
            ExitStatus::Error.into()
        }
    }
}

/// Diagnostics go to stderr so stdout stays clean for reports and `--json`.
fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .try_init();
}
