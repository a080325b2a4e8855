//! Serializable render profile.
//!
//! A [`RenderProfile`] captures every tunable constant of icon generation.
//! The defaults reproduce the standard macOS icon template: an 832 px
//! squircle inside a 1024 px canvas, a 15% zoom into the source artwork,
//! and a faint highlight/shadow bevel.
//!
//! Profiles are plain JSON, so a project can keep one next to its artwork:
//!
//! ```
//! use appicon_renderer::RenderProfile;
//!
//! let profile = RenderProfile::from_json(r#"{ "cropRatio": 0.1, "sizes": [16, 32] }"#).unwrap();
//! assert_eq!(profile.crop_ratio, 0.1);
//! assert_eq!(profile.canvas_size, 1024);
//!
//! let json = profile.to_json().unwrap();
//! assert!(json.contains("\"iconScale\""));
//! ```

use std::path::Path;
use std::str::FromStr;

use palette::Srgb;
use resvg::tiny_skia::Color;
use serde::{Deserialize, Serialize};

use crate::error::{IconError, Result};
use crate::export::{ExportSet, MACOS_ICON_SIZES, MAX_ICON_SIZE};

// ============================================================================
// Stroke Color
// ============================================================================

/// A stroke color as a hex RGB string plus a separate alpha.
///
/// ```json
/// { "color": "#ffffff", "alpha": 0.5 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct StrokeColor {
    /// `#rrggbb` or `#rgb`.
    pub color: String,

    /// Opacity, 0.0-1.0.
    pub alpha: f32,
}

impl StrokeColor {
    pub fn new(color: impl Into<String>, alpha: f32) -> Self {
        Self {
            color: color.into(),
            alpha,
        }
    }

    /// Parses the hex color and combines it with the alpha.
    pub fn to_color(&self) -> Result<Color> {
        let rgb = Srgb::<u8>::from_str(&self.color)
            .map_err(|e| IconError::InvalidColor(format!("{}: {e}", self.color)))?
            .into_format::<f32>();
        Color::from_rgba(rgb.red, rgb.green, rgb.blue, self.alpha).ok_or_else(|| {
            IconError::InvalidColor(format!("alpha {} out of range 0.0-1.0", self.alpha))
        })
    }
}

// ============================================================================
// Bevel Settings
// ============================================================================

/// Settings for the highlight/shadow bevel strokes.
///
/// Both ratios are fractions of the canvas size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct BevelSettings {
    /// Offset of the highlight and shadow contours from the mask.
    pub offset_ratio: f32,

    /// Stroke width of both contours.
    pub stroke_ratio: f32,

    /// Drawn offset down and right, visible along the upper-left rim.
    pub highlight: StrokeColor,

    /// Drawn offset up and left, visible along the lower-right rim.
    pub shadow: StrokeColor,

    /// Whether the bevel is drawn at all.
    pub enabled: bool,
}

impl Default for BevelSettings {
    fn default() -> Self {
        Self {
            offset_ratio: 0.004,
            stroke_ratio: 0.008,
            highlight: StrokeColor::new("#ffffff", 0.5),
            shadow: StrokeColor::new("#000000", 0.25),
            enabled: true,
        }
    }
}

// ============================================================================
// RenderProfile
// ============================================================================

/// All settings for one icon generation run.
///
/// Missing JSON fields fall back to their defaults.
///
/// # JSON Format
///
/// ```json
/// {
///   "canvasSize": 1024,
///   "iconScale": 0.8125,
///   "cropRatio": 0.15,
///   "bevel": {
///     "offsetRatio": 0.004,
///     "strokeRatio": 0.008,
///     "highlight": { "color": "#ffffff", "alpha": 0.5 },
///     "shadow": { "color": "#000000", "alpha": 0.25 },
///     "enabled": true
///   },
///   "sizes": [16, 32, 64, 128, 256, 512, 1024]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct RenderProfile {
    /// Side of the composed master canvas in pixels.
    pub canvas_size: u32,

    /// Side of the squircle relative to the canvas.
    pub icon_scale: f32,

    /// Fraction of the source width cropped from every edge.
    pub crop_ratio: f32,

    pub bevel: BevelSettings,

    /// Pixel sizes to export.
    pub sizes: Vec<u32>,
}

impl Default for RenderProfile {
    fn default() -> Self {
        Self {
            canvas_size: 1024,
            icon_scale: 0.8125,
            crop_ratio: 0.15,
            bevel: BevelSettings::default(),
            sizes: MACOS_ICON_SIZES.to_vec(),
        }
    }
}

impl RenderProfile {
    /// Creates the default profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the master canvas size.
    pub fn with_canvas_size(mut self, canvas_size: u32) -> Self {
        self.canvas_size = canvas_size;
        self
    }

    /// Sets the exported sizes.
    pub fn with_sizes(mut self, sizes: impl Into<Vec<u32>>) -> Self {
        self.sizes = sizes.into();
        self
    }

    /// Sets bevel settings.
    pub fn with_bevel(mut self, bevel: BevelSettings) -> Self {
        self.bevel = bevel;
        self
    }

    /// Checks every setting against its valid range.
    ///
    /// Runs before any pixel buffer is allocated, so out-of-range sizes
    /// surface as errors instead of huge allocations.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_ICON_SIZE).contains(&self.canvas_size) {
            return Err(IconError::InvalidCanvasSize(self.canvas_size));
        }
        if !(self.icon_scale > 0.0 && self.icon_scale <= 1.0) {
            return Err(IconError::InvalidIconScale(self.icon_scale));
        }
        if !(self.crop_ratio >= 0.0 && self.crop_ratio < 0.5) {
            return Err(IconError::InvalidCropRatio(self.crop_ratio));
        }
        for (name, value) in [
            ("offset ratio", self.bevel.offset_ratio),
            ("stroke ratio", self.bevel.stroke_ratio),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(IconError::InvalidBevel { name, value });
            }
        }
        ExportSet::new(self.sizes.clone()).map(|_| ())
    }

    /// Side, in pixels, that vector artwork should be rasterized at.
    ///
    /// After the crop the artwork fills the squircle box, so the source
    /// needs `canvas_size * icon_scale / (1 - 2 * crop_ratio)` pixels across
    /// to be drawn at 1:1 or better. Capped at [`MAX_ICON_SIZE`].
    pub fn source_raster_size(&self) -> u32 {
        let visible = (1.0 - 2.0 * self.crop_ratio).max(f32::EPSILON);
        let needed = (self.canvas_size as f32 * self.icon_scale / visible).ceil();
        if needed.is_finite() && needed >= 1.0 {
            (needed as u32).min(MAX_ICON_SIZE)
        } else {
            self.canvas_size.clamp(1, MAX_ICON_SIZE)
        }
    }

    /// Serializes the profile to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(IconError::Profile)
    }

    /// Serializes the profile to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(IconError::Profile)
    }

    /// Deserializes a profile from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(IconError::Profile)
    }

    /// Reads a profile from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| IconError::io(path, e))?;
        Self::from_json(&json)
    }

    /// Returns the JSON schema of the profile format.
    #[cfg(feature = "jsonschema")]
    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(RenderProfile)
    }
}

// ============================================================================
// Tests
// ============================================================================
