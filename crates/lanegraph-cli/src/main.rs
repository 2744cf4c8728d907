//! Lanegraph CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use log::debug;
use miette::GraphicalReportHandler;

use lanegraph_cli::{Args, CliError, error_adapter};

fn main() -> ExitCode {
    miette::set_panic_hook();

    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(args.log_level)
        .init();
    debug!(args:?; "Parsed arguments");

    match lanegraph_cli::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_reports(&err);
            ExitCode::FAILURE
        }
    }
}

/// Print every report of `err` to stderr, whatever the log level.
fn print_reports(err: &CliError) {
    let handler = GraphicalReportHandler::new();
    for report in error_adapter::reports(err) {
        let mut rendered = String::new();
        if handler.render_report(&mut rendered, &report).is_err() {
            rendered = report.to_string();
        }
        eprintln!("{rendered}");
    }
}
