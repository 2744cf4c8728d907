//! Command-line argument definitions for the Lanegraph CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, and logging verbosity.

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

/// Command-line arguments for the Lanegraph layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a `git log --topo-order --format='%H|%P|%D'` dump
    pub input: PathBuf,

    /// Path to the output TOML file
    #[arg(short, long, default_value = "layout.toml")]
    pub output: PathBuf,

    /// Path to a configuration file with `[layout]` and `[style]` sections
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,
}
