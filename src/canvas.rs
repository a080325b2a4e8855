//! Raster drawing surface with a scoped clip state.
//!
//! [`Canvas`] wraps a tiny-skia [`Pixmap`] and keeps the current clip as an
//! anti-aliased [`Mask`]. Clipping is stateful, like a classic graphics
//! context: [`Canvas::clip_to`] narrows the clip for every later draw call.
//! [`Canvas::save`] returns a [`StateGuard`] that restores the clip when it is
//! dropped, on every exit path.
//!
//! ```
//! use appicon_renderer::{build_squircle_path, Canvas};
//! use resvg::tiny_skia::Color;
//!
//! let mut canvas = Canvas::new(64).unwrap();
//! {
//!     let mut state = canvas.save();
//!     state.clip_to(&build_squircle_path(8.0, 8.0, 48.0, 48.0)).unwrap();
//!     state.fill_rect_color(0.0, 0.0, 64.0, 64.0, Color::BLACK).unwrap();
//! }
//! assert!(!canvas.is_clipped());
//! ```

use std::ops::{Deref, DerefMut};

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{
    self, Color, ColorU8, FillRule, FilterQuality, Mask, Paint, Pattern, Pixmap, Rect, SpreadMode,
    Stroke, Transform,
};
use tracing::debug;

use crate::error::{IconError, Result};
use crate::export::MAX_ICON_SIZE;
use crate::icon::RectF;
use crate::squircle::SquirclePath;

// ============================================================================
// Canvas
// ============================================================================

/// A square RGBA drawing surface.
pub struct Canvas {
    pixmap: Pixmap,
    clip: Option<Mask>,
    saved: Vec<Option<Mask>>,
}

impl Canvas {
    /// Allocates a transparent `size x size` canvas.
    ///
    /// `size` must be in `1..=MAX_ICON_SIZE`.
    pub fn new(size: u32) -> Result<Self> {
        if size > MAX_ICON_SIZE {
            return Err(IconError::InvalidCanvasSize(size));
        }
        let pixmap = Pixmap::new(size, size).ok_or(IconError::InvalidCanvasSize(size))?;
        Ok(Self {
            pixmap,
            clip: None,
            saved: Vec::new(),
        })
    }

    /// Side length in pixels.
    pub fn size(&self) -> u32 {
        self.pixmap.width()
    }

    /// Returns true if a clip is in effect.
    pub fn is_clipped(&self) -> bool {
        self.clip.is_some()
    }

    /// Saves the clip state. It is restored when the guard is dropped.
    pub fn save(&mut self) -> StateGuard<'_> {
        self.saved.push(self.clip.clone());
        StateGuard { canvas: self }
    }

    fn restore(&mut self) {
        if let Some(clip) = self.saved.pop() {
            self.clip = clip;
        }
    }

    /// Intersects the current clip with the squircle's coverage.
    pub fn clip_to(&mut self, path: &SquirclePath) -> Result<()> {
        let skia_path = skia_path(path)?;
        match self.clip.as_mut() {
            Some(mask) => {
                mask.intersect_path(&skia_path, FillRule::Winding, true, Transform::identity())
            }
            None => {
                let mut mask = Mask::new(self.pixmap.width(), self.pixmap.height())
                    .ok_or(IconError::InvalidCanvasSize(self.pixmap.width()))?;
                mask.fill_path(&skia_path, FillRule::Winding, true, Transform::identity());
                self.clip = Some(mask);
            }
        }
        Ok(())
    }

    /// Draws the `src` region of `image` scaled into `dst`.
    ///
    /// Uses bicubic filtering and source-over blending. Nothing outside `dst`
    /// is touched, and the current clip applies.
    pub fn draw_image(&mut self, image: &RgbaImage, src: RectF, dst: RectF) -> Result<()> {
        if !src.is_valid() || !dst.is_valid() {
            debug!(?src, ?dst, "skipping draw of empty region");
            return Ok(());
        }
        let source = rgba_image_to_pixmap(image)?;

        let sx = dst.width / src.width;
        let sy = dst.height / src.height;
        let tx = dst.x - src.x * sx;
        let ty = dst.y - src.y * sy;
        let transform = Transform::from_row(sx, 0.0, 0.0, sy, tx, ty);

        let paint = Paint {
            shader: Pattern::new(
                source.as_ref(),
                SpreadMode::Pad,
                FilterQuality::Bicubic,
                1.0,
                transform,
            ),
            anti_alias: true,
            ..Paint::default()
        };

        let Some(rect) = Rect::from_xywh(dst.x, dst.y, dst.width, dst.height) else {
            return Ok(());
        };
        self.pixmap
            .fill_rect(rect, &paint, Transform::identity(), self.clip.as_ref());
        Ok(())
    }

    /// Strokes the squircle outline with a solid color.
    pub fn stroke(&mut self, path: &SquirclePath, width: f32, color: Color) -> Result<()> {
        let skia_path = skia_path(path)?;
        let paint = solid_paint(color);
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        self.pixmap.stroke_path(
            &skia_path,
            &paint,
            &stroke,
            Transform::identity(),
            self.clip.as_ref(),
        );
        Ok(())
    }

    /// Fills an axis-aligned rectangle with a solid color.
    pub fn fill_rect_color(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    ) -> Result<()> {
        let Some(rect) = Rect::from_xywh(x, y, width, height) else {
            return Ok(());
        };
        self.pixmap.fill_rect(
            rect,
            &solid_paint(color),
            Transform::identity(),
            self.clip.as_ref(),
        );
        Ok(())
    }

    /// Consumes the canvas and returns straight-alpha pixels.
    pub fn into_image(self) -> RgbaImage {
        pixmap_to_rgba_image(&self.pixmap)
    }
}

// ============================================================================
// StateGuard
// ============================================================================

/// Scoped graphics state. Restores the canvas clip on drop.
///
/// Dereferences to the [`Canvas`], so all drawing goes through the guard
/// while it is alive.
pub struct StateGuard<'a> {
    canvas: &'a mut Canvas,
}

impl Deref for StateGuard<'_> {
    type Target = Canvas;

    fn deref(&self) -> &Canvas {
        self.canvas
    }
}

impl DerefMut for StateGuard<'_> {
    fn deref_mut(&mut self) -> &mut Canvas {
        self.canvas
    }
}

impl Drop for StateGuard<'_> {
    fn drop(&mut self) {
        self.canvas.restore();
    }
}

// ============================================================================
// Pixel Conversion
// ============================================================================

fn skia_path(path: &SquirclePath) -> Result<tiny_skia::Path> {
    let rect = path.rect();
    path.to_skia_path().ok_or(IconError::InvalidGeometry {
        width: rect.width,
        height: rect.height,
    })
}

fn solid_paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    paint
}

/// Converts a straight-alpha image into a premultiplied pixmap.
pub(crate) fn rgba_image_to_pixmap(image: &RgbaImage) -> Result<Pixmap> {
    let (width, height) = image.dimensions();
    let mut pixmap =
        Pixmap::new(width, height).ok_or(IconError::UnsupportedImageSize { width, height })?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Ok(pixmap)
}

/// Converts a tiny-skia pixmap to a straight-alpha image.
pub(crate) fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    img
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::squircle::build_squircle_path;

    #[test]
    fn zero_size_canvas_is_rejected() {
        assert!(matches!(Canvas::new(0), Err(IconError::InvalidCanvasSize(0))));
    }

    #[test]
    fn oversized_canvas_is_rejected_without_allocating() {
        assert!(matches!(
            Canvas::new(100_000),
            Err(IconError::InvalidCanvasSize(100_000))
        ));
    }

    #[test]
    fn empty_image_is_not_reported_as_a_canvas_error() {
        let err = rgba_image_to_pixmap(&RgbaImage::new(0, 5)).unwrap_err();
        assert!(matches!(
            err,
            IconError::UnsupportedImageSize { width: 0, height: 5 }
        ));
        assert_eq!(err.to_string(), "cannot rasterize a 0x5 image");
    }

    #[test]
    fn guard_restores_clip_on_drop() {
        let mut canvas = Canvas::new(32).unwrap();
        {
            let mut state = canvas.save();
            state.clip_to(&build_squircle_path(4.0, 4.0, 24.0, 24.0)).unwrap();
            assert!(state.is_clipped());
        }
        assert!(!canvas.is_clipped());
    }

    #[test]
    fn guard_restores_clip_on_early_return() {
        fn clip_then_fail(canvas: &mut Canvas) -> Result<()> {
            let mut state = canvas.save();
            state.clip_to(&build_squircle_path(0.0, 0.0, 16.0, 16.0))?;
            state.clip_to(&build_squircle_path(0.0, 0.0, f32::NAN, 16.0))?;
            Ok(())
        }

        let mut canvas = Canvas::new(16).unwrap();
        assert!(clip_then_fail(&mut canvas).is_err());
        assert!(!canvas.is_clipped());
    }

    #[test]
    fn nested_guards_restore_outer_clip() {
        let mut canvas = Canvas::new(32).unwrap();
        let mut outer = canvas.save();
        outer.clip_to(&build_squircle_path(0.0, 0.0, 32.0, 32.0)).unwrap();
        {
            let mut inner = outer.save();
            inner.clip_to(&build_squircle_path(8.0, 8.0, 16.0, 16.0)).unwrap();
        }
        assert!(outer.is_clipped());
        drop(outer);
        assert!(!canvas.is_clipped());
    }

    #[test]
    fn clip_limits_fill_to_squircle() {
        let mut canvas = Canvas::new(64).unwrap();
        {
            let mut state = canvas.save();
            state.clip_to(&build_squircle_path(8.0, 8.0, 48.0, 48.0)).unwrap();
            state
                .fill_rect_color(0.0, 0.0, 64.0, 64.0, Color::from_rgba8(255, 0, 0, 255))
                .unwrap();
        }
        let img = canvas.into_image();

        assert_eq!(img.get_pixel(32, 32).0, [255, 0, 0, 255]);
        // Outside the inset box and in the rounded corner.
        assert_eq!(img.get_pixel(2, 2).0[3], 0);
        assert_eq!(img.get_pixel(9, 9).0[3], 0);
    }

    #[test]
    fn draw_image_fills_destination_only() {
        let src = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 255, 255]));
        let mut canvas = Canvas::new(40).unwrap();
        canvas
            .draw_image(&src, RectF::from_size(10.0, 10.0), RectF::new(10.0, 10.0, 20.0, 20.0))
            .unwrap();
        let img = canvas.into_image();

        let inside = img.get_pixel(20, 20).0;
        assert!(inside[2] > 250 && inside[3] > 250, "got {inside:?}");
        assert_eq!(img.get_pixel(5, 5).0[3], 0);
        assert_eq!(img.get_pixel(35, 35).0[3], 0);
    }

    #[test]
    fn stroke_draws_outline() {
        let mut canvas = Canvas::new(64).unwrap();
        canvas
            .stroke(&build_squircle_path(8.0, 8.0, 48.0, 48.0), 2.0, Color::WHITE)
            .unwrap();
        let img = canvas.into_image();

        // On the straight top edge.
        assert!(img.get_pixel(32, 8).0[3] > 0);
        // Center stays empty.
        assert_eq!(img.get_pixel(32, 32).0[3], 0);
    }

    #[test]
    fn pixel_conversion_roundtrip_opaque() {
        let img = RgbaImage::from_pixel(3, 3, Rgba([10, 20, 30, 255]));
        let pixmap = rgba_image_to_pixmap(&img).unwrap();
        assert_eq!(pixmap_to_rgba_image(&pixmap), img);
    }
}
