//! Lanegraph Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Lanegraph
//! workspace. It includes:
//!
//! - **Commits**: The commit record consumed by the layout engine ([`commit::Commit`])
//! - **Colors**: Color handling and the per-key color cache ([`color::ColorCache`])
//! - **Geometry**: The pixel-space [`geometry::Point`] produced for each commit

pub mod color;
pub mod commit;
pub mod geometry;
