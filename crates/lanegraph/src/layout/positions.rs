//! Output of a layout pass.
//!
//! A [`CommitLayout`] holds one [`Position`] per input commit, keyed by hash
//! and iterable in row order. Pixel coordinates are derived from lanes and rows
//! through a [`Spacing`].

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use lanegraph_core::{commit::CommitType, geometry::Point};

use crate::error::LanegraphError;

/// Distances used to turn lanes and rows into pixel coordinates.
///
/// Rows are `item_height + 2 * item_spacing` apart; lanes are
/// `column_spacing` apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    column_spacing: f32,
    item_height: f32,
    item_spacing: f32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            column_spacing: 40.0,
            item_height: 20.0,
            item_spacing: 5.0,
        }
    }
}

impl Spacing {
    /// Creates a spacing from its three distances.
    pub fn new(column_spacing: f32, item_height: f32, item_spacing: f32) -> Self {
        Self {
            column_spacing,
            item_height,
            item_spacing,
        }
    }

    /// Returns the horizontal distance between two lanes.
    pub fn column_spacing(&self) -> f32 {
        self.column_spacing
    }

    /// Returns the height of one commit row, without its spacing.
    pub fn item_height(&self) -> f32 {
        self.item_height
    }

    /// Returns the spacing above and below each row.
    pub fn item_spacing(&self) -> f32 {
        self.item_spacing
    }

    /// Returns the vertical distance between two consecutive rows.
    pub fn row_height(&self) -> f32 {
        self.item_height + 2.0 * self.item_spacing
    }

    /// Returns the pixel point of a lane and row.
    pub fn point(&self, column: usize, row: usize) -> Point {
        Point::new(
            column as f32 * self.column_spacing,
            row as f32 * self.row_height(),
        )
    }

    /// Checks that every distance is finite and not negative.
    ///
    /// # Errors
    ///
    /// Returns [`LanegraphError::Layout`] naming the first invalid distance.
    pub fn validate(&self) -> Result<(), LanegraphError> {
        let distances = [
            ("column_spacing", self.column_spacing),
            ("item_height", self.item_height),
            ("item_spacing", self.item_spacing),
        ];
        for (name, value) in distances {
            if !value.is_finite() || value < 0.0 {
                return Err(LanegraphError::Layout(format!(
                    "{name} must be a finite, non-negative distance, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Where one commit is drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Position {
    column: usize,
    row: usize,
    branch_name: String,
    commit_type: CommitType,
    point: Point,
}

impl Position {
    pub(crate) fn new(
        column: usize,
        row: usize,
        branch_name: impl Into<String>,
        commit_type: CommitType,
        point: Point,
    ) -> Self {
        Self {
            column,
            row,
            branch_name: branch_name.into(),
            commit_type,
            point,
        }
    }

    /// Returns the lane the commit is drawn in, counted from the left.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Returns the lane the commit is drawn in; same as [`Position::column`].
    pub fn lane(&self) -> usize {
        self.column
    }

    /// Returns the row, which is the commit's index in the input.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Returns the branch label the commit is displayed under.
    pub fn branch_name(&self) -> &str {
        &self.branch_name
    }

    /// Returns the commit type passed through from the input.
    pub fn commit_type(&self) -> CommitType {
        self.commit_type
    }

    /// Returns the pixel point of the commit node.
    pub fn point(&self) -> Point {
        self.point
    }

    /// Returns the x pixel coordinate.
    pub fn x(&self) -> f32 {
        self.point.x()
    }

    /// Returns the y pixel coordinate.
    pub fn y(&self) -> f32 {
        self.point.y()
    }
}

/// Positions of every commit of one layout input.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommitLayout {
    positions: IndexMap<String, Position>,
    #[serde(skip)]
    children: HashMap<String, Vec<String>>,
    lane_count: usize,
}

impl CommitLayout {
    pub(crate) fn new(
        positions: IndexMap<String, Position>,
        children: HashMap<String, Vec<String>>,
        lane_count: usize,
    ) -> Self {
        Self {
            positions,
            children,
            lane_count,
        }
    }

    /// Returns the position of the commit with this hash.
    pub fn get(&self, hash: &str) -> Option<&Position> {
        self.positions.get(hash)
    }

    /// Iterates over `(hash, position)` pairs in row order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Position)> {
        self.positions
            .iter()
            .map(|(hash, position)| (hash.as_str(), position))
    }

    /// Returns the number of commits laid out.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` if the layout holds no commits.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns the hashes of the commits naming `hash` as a parent, in row
    /// order.
    ///
    /// Parents outside the input still report their children, so renderers
    /// can draw lines leaving the visible window.
    pub fn children(&self, hash: &str) -> &[String] {
        self.children
            .get(hash)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the peak number of lines drawn side by side during the pass,
    /// counting the lane of the commit being drawn.
    ///
    /// A lane is only opened when every existing lane carries a line, so this
    /// equals the number of lanes opened.
    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    /// Returns the right-most column used by any commit.
    pub fn max_column(&self) -> Option<usize> {
        self.positions.values().map(Position::column).max()
    }
}

impl<'a> IntoIterator for &'a CommitLayout {
    type Item = (&'a str, &'a Position);
    type IntoIter = Box<dyn Iterator<Item = Self::Item> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
