//! Errors of one CLI run.

use std::{io, path::PathBuf};

use thiserror::Error;

use lanegraph::LanegraphError;

use crate::config::ConfigError;

/// Everything that can stop `lanegraph` from writing a layout.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot read history `{}`", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Lanegraph(#[from] LanegraphError),

    #[error("cannot encode the layout as TOML")]
    Render(#[from] toml::ser::Error),

    #[error("cannot write layout `{}`", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
