//! Color handling for Lanegraph renderers
//!
//! This module provides the [`Color`] type, an opaque 8-bit sRGB color built
//! on top of the `color` crate, and [`ColorCache`], which hands out visually
//! distinct colors for branch, tag or lane keys.
//!
//! The layout engine never looks at colors. A renderer owns a [`ColorCache`]
//! and asks it for a color per branch name or lane number it draws.

use std::{collections::HashMap, fmt, str::FromStr};

use color::{AlphaColor, DynamicColor, Hsl, Srgb};
use log::trace;
use thiserror::Error;

/// Golden angle in degrees, used to spread hues of consecutive keys.
const GOLDEN_ANGLE: f32 = 137.508;

/// Key used when a renderer asks for the color of an empty key.
const DEFAULT_KEY: &str = "default";

/// Errors produced while parsing colors.
#[derive(Debug, Error)]
pub enum ColorError {
    #[error("invalid color `{input}`: {reason}")]
    Invalid { input: String, reason: String },
}

/// An opaque 8-bit sRGB color.
///
/// # Examples
///
/// ```
/// use lanegraph_core::color::Color;
///
/// let red = Color::new("#ff0000").unwrap();
/// assert_eq!(red.to_hex(), "#ff0000");
///
/// let named = Color::new("blue").unwrap();
/// assert_eq!(named.to_hex(), "#0000ff");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    /// Create a new `Color` from a CSS color string such as "#ff0000",
    /// "rgb(255, 0, 0)" or "red". Any alpha component is dropped.
    pub fn new(color_str: &str) -> Result<Self, ColorError> {
        let parsed = DynamicColor::from_str(color_str).map_err(|err| ColorError::Invalid {
            input: color_str.to_string(),
            reason: err.to_string(),
        })?;
        Ok(Self::from_srgb(parsed.to_alpha_color::<Srgb>()))
    }

    /// Creates a color from its 8-bit red, green and blue channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from HSL components.
    ///
    /// # Arguments
    ///
    /// * `hue` - Hue in degrees (0-360)
    /// * `saturation` - Saturation in percent (0-100)
    /// * `lightness` - Lightness in percent (0-100)
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let hsl = AlphaColor::<Hsl>::new([hue, saturation, lightness, 1.0]);
        Self::from_srgb(hsl.convert::<Srgb>())
    }

    fn from_srgb(color: AlphaColor<Srgb>) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
        }
    }

    /// Returns the red, green and blue channels.
    pub fn channels(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Returns the `#rrggbb` representation of this color.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Moves every channel towards white by `amount` (0.0 - 1.0).
    ///
    /// # Examples
    ///
    /// ```
    /// use lanegraph_core::color::Color;
    ///
    /// let gray = Color::from_rgb8(100, 100, 100).lighten(0.5);
    /// assert_eq!(gray.channels(), (177, 177, 177));
    /// ```
    pub fn lighten(self, amount: f32) -> Self {
        let channel = |c: u8| {
            let c = f32::from(c);
            (c + (255.0 - c) * amount).floor().clamp(0.0, 255.0) as u8
        };
        Self::from_rgb8(channel(self.r), channel(self.g), channel(self.b))
    }

    /// Moves every channel towards black by `amount` (0.0 - 1.0).
    pub fn darken(self, amount: f32) -> Self {
        let channel = |c: u8| (f32::from(c) * (1.0 - amount)).floor().clamp(0.0, 255.0) as u8;
        Self::from_rgb8(channel(self.r), channel(self.g), channel(self.b))
    }

    /// Returns black or white, whichever reads better on top of this color.
    pub fn contrast_text(self) -> Self {
        let luminance = (0.299 * f32::from(self.r)
            + 0.587 * f32::from(self.g)
            + 0.114 * f32::from(self.b))
            / 255.0;
        if luminance > 0.5 {
            Self::from_rgb8(0, 0, 0)
        } else {
            Self::from_rgb8(255, 255, 255)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Hands out a stable, visually distinct color per key.
///
/// Colors are assigned by insertion order: the n-th new key gets the hue
/// `n * 137.508` degrees (mod 360) at a fixed saturation and lightness, so
/// consecutive keys land far apart on the color wheel. A key keeps its color
/// until [`ColorCache::clear`] is called.
///
/// # Examples
///
/// ```
/// use lanegraph_core::color::ColorCache;
///
/// let mut cache = ColorCache::new();
/// let main = cache.color_for("main");
/// let feature = cache.color_for("feature");
///
/// assert_ne!(main, feature);
/// assert_eq!(cache.color_for("main"), main);
/// ```
#[derive(Debug, Clone)]
pub struct ColorCache {
    colors: HashMap<String, Color>,
    saturation: f32,
    lightness: f32,
}

impl Default for ColorCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorCache {
    /// Creates an empty cache with 70% saturation and 55% lightness.
    pub fn new() -> Self {
        Self {
            colors: HashMap::new(),
            saturation: 70.0,
            lightness: 55.0,
        }
    }

    /// Set the saturation (percent) of newly assigned colors
    pub fn with_saturation(mut self, saturation: f32) -> Self {
        self.saturation = saturation;
        self
    }

    /// Set the lightness (percent) of newly assigned colors
    pub fn with_lightness(mut self, lightness: f32) -> Self {
        self.lightness = lightness;
        self
    }

    /// Returns the color for `key`, assigning the next color if the key is new.
    ///
    /// An empty key is treated as `"default"`.
    pub fn color_for(&mut self, key: &str) -> Color {
        let key = if key.is_empty() { DEFAULT_KEY } else { key };
        if let Some(color) = self.colors.get(key) {
            return *color;
        }

        let index = self.colors.len();
        let hue = (index as f32 * GOLDEN_ANGLE) % 360.0;
        let color = Color::from_hsl(hue, self.saturation, self.lightness);
        trace!(key, index, color = color.to_hex(); "Assigned color");

        self.colors.insert(key.to_string(), color);
        color
    }

    /// Returns the number of keys with an assigned color.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns `true` if no color has been assigned yet.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Forgets every assigned color; the next key starts over at hue 0.
    pub fn clear(&mut self) {
        self.colors.clear();
    }
}
