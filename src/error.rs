//! Error type shared by every stage of icon generation.

use std::path::PathBuf;

use thiserror::Error;

use crate::export::MAX_ICON_SIZE;

/// Errors produced while loading, composing, or exporting an icon.
#[derive(Debug, Error)]
pub enum IconError {
    #[error("source image not found: {}", path.display())]
    MissingSourceFile { path: PathBuf },

    #[error("could not load image {}: {source}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("could not parse SVG {}: {message}", path.display())]
    SvgParse { path: PathBuf, message: String },

    #[error("invalid canvas size: {0} (must be between 1 and {max})", max = MAX_ICON_SIZE)]
    InvalidCanvasSize(u32),

    #[error("invalid icon scale: {0} (must be in (0.0, 1.0])")]
    InvalidIconScale(f32),

    #[error("invalid crop ratio: {0} (must be in [0.0, 0.5))")]
    InvalidCropRatio(f32),

    #[error("invalid bevel {name}: {value} (must be finite and >= 0)")]
    InvalidBevel { name: &'static str, value: f32 },

    #[error("cannot rasterize a {width}x{height} image")]
    UnsupportedImageSize { width: u32, height: u32 },

    #[error("cannot build a path for a {width}x{height} rectangle")]
    InvalidGeometry { width: f32, height: f32 },

    #[error("invalid export size: {0} (must be between 1 and {max})", max = MAX_ICON_SIZE)]
    InvalidExportSize(u32),

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("could not encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("manifest serialization failed: {0}")]
    Manifest(#[source] serde_json::Error),

    #[error("invalid render profile: {0}")]
    Profile(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, IconError>;

impl IconError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
