//! Configuration types for Lanegraph layouts.
//!
//! This module provides configuration structures that control how commit
//! graphs are spaced and colored. All types implement [`serde::Deserialize`]
//! for loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining layout and style settings.
//! - [`LayoutConfig`] - Distances between lanes and rows.
//! - [`StyleConfig`] - How display colors are assigned.
//!
//! # Example
//!
//! ```
//! # use lanegraph::config::{AppConfig, ColorKey};
//! let config: AppConfig = toml::from_str(r#"
//!     [layout]
//!     column_spacing = 24.0
//!
//!     [style]
//!     color_key = "lane"
//! "#).unwrap();
//!
//! assert_eq!(config.layout().spacing().column_spacing(), 24.0);
//! assert_eq!(config.layout().spacing().item_height(), 20.0);
//! assert_eq!(config.style().color_key(), ColorKey::Lane);
//! ```

use serde::Deserialize;

use lanegraph_core::color::ColorCache;

use crate::layout::Spacing;

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Distances between lanes and rows, in pixels.
///
/// Missing fields fall back to the [`Spacing`] defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    #[serde(default = "default_column_spacing")]
    column_spacing: f32,

    #[serde(default = "default_item_height")]
    item_height: f32,

    #[serde(default = "default_item_spacing")]
    item_spacing: f32,
}

fn default_column_spacing() -> f32 {
    Spacing::default().column_spacing()
}

fn default_item_height() -> f32 {
    Spacing::default().item_height()
}

fn default_item_spacing() -> f32 {
    Spacing::default().item_spacing()
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::from(Spacing::default())
    }
}

impl From<Spacing> for LayoutConfig {
    fn from(spacing: Spacing) -> Self {
        Self {
            column_spacing: spacing.column_spacing(),
            item_height: spacing.item_height(),
            item_spacing: spacing.item_spacing(),
        }
    }
}

impl LayoutConfig {
    /// Returns the configured [`Spacing`].
    ///
    /// The values are not checked here; the layout engine rejects negative or
    /// non-finite distances.
    pub fn spacing(&self) -> Spacing {
        Spacing::new(self.column_spacing, self.item_height, self.item_spacing)
    }
}

/// What a commit's display color is keyed on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorKey {
    /// One color per branch label.
    #[default]
    Branch,
    /// One color per lane.
    Lane,
}

/// Display color settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleConfig {
    #[serde(default)]
    color_key: ColorKey,

    /// Saturation of assigned colors, in percent.
    #[serde(default = "default_saturation")]
    saturation: f32,

    /// Lightness of assigned colors, in percent.
    #[serde(default = "default_lightness")]
    lightness: f32,
}

fn default_saturation() -> f32 {
    70.0
}

fn default_lightness() -> f32 {
    55.0
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            color_key: ColorKey::default(),
            saturation: default_saturation(),
            lightness: default_lightness(),
        }
    }
}

impl StyleConfig {
    /// Creates a style configuration.
    pub fn new(color_key: ColorKey, saturation: f32, lightness: f32) -> Self {
        Self {
            color_key,
            saturation,
            lightness,
        }
    }

    /// Returns what colors are keyed on.
    pub fn color_key(&self) -> ColorKey {
        self.color_key
    }

    /// Returns an empty [`ColorCache`] using the configured saturation and
    /// lightness.
    ///
    /// # Errors
    ///
    /// Returns an error if saturation or lightness lies outside 0-100.
    pub fn color_cache(&self) -> Result<ColorCache, String> {
        for (name, value) in [("saturation", self.saturation), ("lightness", self.lightness)] {
            if !(0.0..=100.0).contains(&value) {
                return Err(format!(
                    "Invalid {name} in config: {value} is outside 0-100"
                ));
            }
        }
        Ok(ColorCache::new()
            .with_saturation(self.saturation)
            .with_lightness(self.lightness))
    }
}
