//! CLI logic for the Lanegraph layout tool.
//!
//! This module contains the core CLI logic: load the configuration, read a
//! git log dump, assign lanes and write the positions as TOML.

pub mod error_adapter;

mod args;
mod config;
mod error;
mod output;

pub use args::Args;
pub use config::ConfigError;
pub use error::CliError;

use std::fs;

use log::info;

use lanegraph::GraphBuilder;

/// Run the Lanegraph CLI application
///
/// This function processes the input file through the Lanegraph pipeline
/// and writes the resulting layout to the output file. Nothing is written
/// unless every step succeeds.
///
/// # Errors
///
/// Returns [`CliError`] for:
/// - Configuration files that cannot be read, parsed or validated
/// - An unreadable input or unwritable output file
/// - Parse, validation and layout errors from [`lanegraph`]
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input.display().to_string(),
        output_path = args.output.display().to_string();
        "Processing commit history"
    );

    let app_config = config::load_config(args.config.as_deref())?;

    let source = fs::read_to_string(&args.input).map_err(|source| CliError::Input {
        path: args.input.clone(),
        source,
    })?;

    let builder = GraphBuilder::new(app_config);
    let commits = builder.parse(&source)?;
    let layout = builder.layout(&commits)?;
    let rendered = output::render_toml(&builder, &layout)?;

    fs::write(&args.output, rendered).map_err(|source| CliError::Output {
        path: args.output.clone(),
        source,
    })?;

    info!(
        output_file = args.output.display().to_string(),
        lanes = layout.lane_count();
        "Layout exported successfully"
    );

    Ok(())
}
