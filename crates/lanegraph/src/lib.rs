//! Lanegraph - Lane allocation and layout for commit history graphs.
//!
//! Assigns every commit of a version-control history a lane (column) and a row
//! so that parent, child and merge lines can be drawn without ambiguity. Lanes
//! are kept stable along a line of development and freed lanes are reused.

pub mod config;
pub mod layout;

mod error;
mod structure;

pub use lanegraph_core::{color, commit, geometry};

pub use error::LanegraphError;

use log::{debug, info, trace};

use color::{Color, ColorCache};
use commit::Commit;
use config::{AppConfig, ColorKey};
use layout::{CommitLayout, EngineBuilder, Position};

/// Builder for parsing and laying out commit histories.
///
/// This provides an API for processing histories through parsing, lane
/// assignment and coloring stages.
///
/// # Examples
///
/// ```rust
/// use lanegraph::{GraphBuilder, config::AppConfig};
///
/// let source = "b2|a1|HEAD -> main\na1||\n";
///
/// let builder = GraphBuilder::new(AppConfig::default());
///
/// // Parse a git log dump into commits
/// let commits = builder.parse(source)
///     .expect("Failed to parse");
///
/// // Assign lanes and rows
/// let layout = builder.layout(&commits)
///     .expect("Failed to lay out");
///
/// assert_eq!(layout.get("a1").map(|p| p.row()), Some(1));
/// ```
#[derive(Debug, Default)]
pub struct GraphBuilder {
    config: AppConfig,
}

impl GraphBuilder {
    /// Create a new graph builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including layout and style settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this builder was created with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a `git log --format='%H|%P|%D'` dump into commits.
    ///
    /// # Errors
    ///
    /// Returns `LanegraphError::Parse` carrying every diagnostic found and the
    /// source text.
    pub fn parse(&self, source: &str) -> Result<Vec<Commit>, LanegraphError> {
        info!("Parsing commit history");

        let commits = lanegraph_parser::parse(source)
            .map_err(|err| LanegraphError::new_parse_error(err, source))?;

        debug!(commits = commits.len(); "History parsed successfully");
        Ok(commits)
    }

    /// Assign a lane and a row to every commit, in the order given.
    ///
    /// # Errors
    ///
    /// Returns `LanegraphError::Validation` for duplicate or empty hashes and
    /// `LanegraphError::Layout` for invalid spacing in the configuration.
    pub fn layout(&self, commits: &[Commit]) -> Result<CommitLayout, LanegraphError> {
        let layout = EngineBuilder::new()
            .with_spacing(self.config.layout().spacing())
            .build(commits)?;

        info!(
            commits = layout.len(),
            lanes = layout.lane_count();
            "Layout calculated"
        );
        Ok(layout)
    }

    /// Create an empty color cache from the style configuration.
    ///
    /// # Errors
    ///
    /// Returns `LanegraphError::Layout` if saturation or lightness is out of
    /// range.
    pub fn color_cache(&self) -> Result<ColorCache, LanegraphError> {
        self.config
            .style()
            .color_cache()
            .map_err(LanegraphError::Layout)
    }

    /// Returns the display color of a laid out commit.
    ///
    /// The cache key is the branch name or the lane, depending on the
    /// configured [`ColorKey`].
    pub fn color_of(&self, cache: &mut ColorCache, position: &Position) -> Color {
        let color = match self.config.style().color_key() {
            ColorKey::Branch => cache.color_for(position.branch_name()),
            ColorKey::Lane => cache.color_for(&position.lane().to_string()),
        };
        trace!(row = position.row(), color = color.to_hex(); "Colored commit");
        color
    }
}
