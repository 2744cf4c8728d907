//! Pixel-space geometry for laid out commits.
//!
//! The layout engine works in lanes and rows; renderers work in pixels. This
//! module provides the [`Point`] type carrying the pixel offset of a commit
//! node.
//!
//! # Coordinate System
//!
//! Lanegraph uses a coordinate system consistent with SVG and canvas APIs:
//!
//! ```text
//!   (0,0) ────────► +X   (lanes)
//!     │
//!     │
//!     ▼
//!    +Y  (rows, newest first)
//! ```

use serde::Serialize;

/// Pixel offset of a commit node, measured from the top-left corner of the
/// graph.
///
/// # Examples
///
/// ```
/// # use lanegraph_core::geometry::Point;
/// let node = Point::new(40.0, 25.0);
///
/// assert_eq!(node.x(), 40.0);
/// assert_eq!(node.y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal offset; grows with the lane index.
    pub fn x(self) -> f32 {
        self.x
    }

    /// Vertical offset; grows with the row index.
    pub fn y(self) -> f32 {
        self.y
    }
}
