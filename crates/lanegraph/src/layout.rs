//! Commit graph layout.
//!
//! Lanes are assigned in one forward pass over the commits; see
//! [`EngineBuilder`] and [`layout()`].

mod engine;
mod lanes;
mod positions;

pub use engine::{EngineBuilder, layout};
pub use positions::{CommitLayout, Position, Spacing};
