//! Icon image types.
//!
//! This module provides the composed icon produced by
//! [`compose_icon`](crate::compose_icon) and the small geometry helpers used
//! to lay it out.

use image::RgbaImage;
use resvg::tiny_skia::{ColorU8, PremultipliedColorU8};

/// A rectangle in floating-point canvas coordinates (y-down).
///
/// Used for sub-pixel layout: the inset icon box, the source crop region,
/// and squircle bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectF {
    /// X offset from the left edge
    pub x: f32,
    /// Y offset from the top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectF {
    /// Creates a new rectangle with the given position and dimensions.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a rectangle starting at origin (0, 0) with the given dimensions.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Returns the right edge coordinate (x + width).
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge coordinate (y + height).
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns true if both dimensions are positive and finite.
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.right().is_finite() && self.bottom().is_finite()
    }
}

/// A composed, masked icon.
///
/// Holds straight-alpha RGBA pixels. The image is always square: its side
/// is the canvas size it was composed at.
#[derive(Debug, Clone, PartialEq)]
pub struct IconImage {
    /// The image data in RGBA format.
    pub data: RgbaImage,
}

impl IconImage {
    pub fn new(data: RgbaImage) -> Self {
        Self { data }
    }

    /// Side length of the square canvas in pixels.
    pub fn size(&self) -> u32 {
        self.data.width()
    }

    /// Returns true if width equals height.
    pub fn is_square(&self) -> bool {
        self.data.width() == self.data.height()
    }

    /// Returns a copy of the pixels with color channels multiplied by alpha.
    ///
    /// Filtering premultiplied samples keeps fully transparent pixels from
    /// bleeding their (black) color into the antialiased rim.
    pub fn premultiplied(&self) -> RgbaImage {
        let mut out = self.data.clone();
        for pixel in out.pixels_mut() {
            let [r, g, b, a] = pixel.0;
            let c = ColorU8::from_rgba(r, g, b, a).premultiply();
            pixel.0 = [c.red(), c.green(), c.blue(), c.alpha()];
        }
        out
    }
}

/// Converts a premultiplied RGBA buffer back to straight alpha in place.
///
/// Channels are clamped to alpha first, since resampling filters with
/// negative lobes can overshoot it.
pub fn demultiply_in_place(img: &mut RgbaImage) {
    for pixel in img.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        pixel.0 = match PremultipliedColorU8::from_rgba(r.min(a), g.min(a), b.min(a), a) {
            Some(c) if a > 0 => {
                let c = c.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            }
            _ => [0, 0, 0, 0],
        };
    }
}
