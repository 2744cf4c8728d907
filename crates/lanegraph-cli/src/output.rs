//! TOML rendering of a commit layout.
//!
//! The document holds the number of lanes followed by one `[[commit]]` table
//! per commit, in row order:
//!
//! ```toml
//! lanes = 2
//!
//! [[commit]]
//! hash = "c3"
//! column = 0
//! row = 0
//! x = 0.0
//! y = 0.0
//! branch = "main"
//! commit_type = "merge"
//! color = "#dd3c3c"
//! ```

use serde::Serialize;

use lanegraph::{GraphBuilder, commit::CommitType, layout::CommitLayout};

use crate::error::CliError;

#[derive(Debug, Serialize)]
struct Document<'a> {
    lanes: usize,
    commit: Vec<CommitRecord<'a>>,
}

#[derive(Debug, Serialize)]
struct CommitRecord<'a> {
    hash: &'a str,
    column: usize,
    row: usize,
    x: f32,
    y: f32,
    branch: &'a str,
    commit_type: CommitType,
    color: String,
}

/// Render `layout` as a TOML document, coloring commits with the builder's
/// style configuration.
///
/// # Errors
///
/// Returns [`CliError::Lanegraph`] for an invalid style configuration and
/// [`CliError::Render`] if serialization fails.
pub(crate) fn render_toml(builder: &GraphBuilder, layout: &CommitLayout) -> Result<String, CliError> {
    let mut colors = builder.color_cache()?;

    let commit = layout
        .iter()
        .map(|(hash, position)| CommitRecord {
            hash,
            column: position.column(),
            row: position.row(),
            x: position.x(),
            y: position.y(),
            branch: position.branch_name(),
            commit_type: position.commit_type(),
            color: builder.color_of(&mut colors, position).to_hex(),
        })
        .collect();

    let document = Document {
        lanes: layout.lane_count(),
        commit,
    };

    Ok(toml::to_string(&document)?)
}
