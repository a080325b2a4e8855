//! Source artwork loading.
//!
//! Raster formats are decoded with `image`. Files with an `.svg` extension
//! are rasterized with resvg, either at their intrinsic size or scaled to a
//! requested resolution so vector edges stay sharp on large canvases.

use std::path::Path;

use image::RgbaImage;
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};
use tracing::{debug, warn};

use crate::canvas::pixmap_to_rgba_image;
use crate::error::{IconError, Result};

/// The artwork an icon is composed from.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    pixels: RgbaImage,
}

impl SourceImage {
    /// Wraps already-decoded pixels.
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// Loads artwork from disk. SVG files are rasterized at their intrinsic
    /// size.
    ///
    /// Returns [`IconError::MissingSourceFile`] if nothing exists at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::load(path.as_ref(), None)
    }

    /// Loads artwork from disk. SVG files are scaled so their longer side is
    /// `raster_size` pixels; raster formats are decoded as-is.
    pub fn open_at(path: impl AsRef<Path>, raster_size: u32) -> Result<Self> {
        Self::load(path.as_ref(), Some(raster_size))
    }

    fn load(path: &Path, raster_size: Option<u32>) -> Result<Self> {
        if !path.exists() {
            return Err(IconError::MissingSourceFile {
                path: path.to_path_buf(),
            });
        }

        let source = if is_svg(path) {
            Self::open_svg(path, raster_size)?
        } else {
            let pixels = image::open(path)
                .map_err(|source| IconError::ImageLoad {
                    path: path.to_path_buf(),
                    source,
                })?
                .to_rgba8();
            Self { pixels }
        };

        debug!(
            path = %path.display(),
            width = source.width(),
            height = source.height(),
            "loaded source image"
        );
        if source.width() != source.height() {
            warn!(
                "source image is not square ({}x{}); the crop uses the width on both axes",
                source.width(),
                source.height()
            );
        }
        Ok(source)
    }

    fn open_svg(path: &Path, raster_size: Option<u32>) -> Result<Self> {
        let data = std::fs::read(path).map_err(|e| IconError::io(path, e))?;
        let svg_error = |message: String| IconError::SvgParse {
            path: path.to_path_buf(),
            message,
        };

        let tree =
            Tree::from_data(&data, &Options::default()).map_err(|e| svg_error(e.to_string()))?;
        let size = tree.size();
        let scale = match raster_size {
            Some(target) => target as f32 / size.width().max(size.height()),
            None => 1.0,
        };
        let width = (size.width() * scale).ceil() as u32;
        let height = (size.height() * scale).ceil() as u32;
        debug!(width, height, scale, "rasterizing svg");

        let mut pixmap = Pixmap::new(width, height)
            .ok_or_else(|| svg_error(format!("cannot rasterize at {width}x{height}")))?;
        resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

        Ok(Self {
            pixels: pixmap_to_rgba_image(&pixmap),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}
