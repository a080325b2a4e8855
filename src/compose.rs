//! Icon composition: squircle mask, zoomed artwork, and bevel.
//!
//! The composition follows the macOS icon template. The squircle occupies
//! `canvas_size * 0.8125` and is centered, leaving a transparent margin. The
//! artwork is zoomed by cropping a fixed share of the source width from every
//! edge, then drawn into the squircle's box under the mask. Two more
//! squircles, shifted diagonally by a fraction of the canvas, are stroked
//! under the same mask to form the highlight and shadow rims.

use image::RgbaImage;
use tracing::{debug, info};

use crate::canvas::Canvas;
use crate::error::Result;
use crate::icon::{IconImage, RectF};
use crate::profile::RenderProfile;
use crate::source::SourceImage;
use crate::squircle::{SquirclePath, build_squircle_path};

// ============================================================================
// Layout
// ============================================================================

/// Geometry of an icon on its canvas, derived from a [`RenderProfile`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconLayout {
    pub canvas_size: u32,
    /// Side of the squircle box.
    pub icon_size: f32,
    /// Transparent border on every side of the squircle box.
    pub margin: f32,
    /// Diagonal shift of the bevel contours.
    pub bevel_offset: f32,
    pub stroke_width: f32,
}

impl IconLayout {
    /// Computes the layout for a canvas of `canvas_size` pixels.
    pub fn for_canvas(canvas_size: u32, profile: &RenderProfile) -> Self {
        let size = canvas_size as f32;
        let icon_size = size * profile.icon_scale;
        Self {
            canvas_size,
            icon_size,
            margin: (size - icon_size) / 2.0,
            bevel_offset: size * profile.bevel.offset_ratio,
            stroke_width: size * profile.bevel.stroke_ratio,
        }
    }

    /// The box the squircle and the artwork are fitted to.
    pub fn icon_rect(&self) -> RectF {
        RectF::new(self.margin, self.margin, self.icon_size, self.icon_size)
    }

    /// The clipping contour.
    pub fn mask_path(&self) -> SquirclePath {
        self.offset_path(0.0)
    }

    /// Shifted right and down, so its stroke shows along the upper-left rim.
    pub fn highlight_path(&self) -> SquirclePath {
        self.offset_path(self.bevel_offset)
    }

    /// Shifted left and up, so its stroke shows along the lower-right rim.
    pub fn shadow_path(&self) -> SquirclePath {
        self.offset_path(-self.bevel_offset)
    }

    fn offset_path(&self, offset: f32) -> SquirclePath {
        build_squircle_path(
            self.margin + offset,
            self.margin + offset,
            self.icon_size,
            self.icon_size,
        )
    }
}

/// Region of the source drawn into the icon box.
///
/// `width * crop_ratio` pixels are removed from every edge. The same amount
/// is used on both axes. When that leaves nothing to draw, the whole image is
/// used instead.
pub fn crop_region(width: u32, height: u32, crop_ratio: f32) -> RectF {
    let crop = width as f32 * crop_ratio;
    let region = RectF::new(
        crop,
        crop,
        width as f32 - crop * 2.0,
        height as f32 - crop * 2.0,
    );
    if region.is_valid() {
        region
    } else {
        debug!(width, height, crop_ratio, "crop leaves no content, using full image");
        RectF::from_size(width as f32, height as f32)
    }
}

// ============================================================================
// Composition
// ============================================================================

/// Composes the masked, beveled icon on a `canvas_size` canvas using the
/// default profile.
pub fn compose_icon(source: &SourceImage, canvas_size: u32) -> Result<IconImage> {
    compose_icon_with(source, &RenderProfile::new().with_canvas_size(canvas_size))
}

/// Composes the masked, beveled icon as described by `profile`.
///
/// The output is a pure function of the inputs: the same source and profile
/// always produce identical pixels.
pub fn compose_icon_with(source: &SourceImage, profile: &RenderProfile) -> Result<IconImage> {
    profile.validate()?;

    info!("Creating icon with squircle mask...");
    let layout = IconLayout::for_canvas(profile.canvas_size, profile);
    debug!(?layout, "icon layout");

    let mut canvas = Canvas::new(profile.canvas_size)?;
    let mask = layout.mask_path();

    {
        let mut state = canvas.save();
        state.clip_to(&mask)?;
        draw_artwork(&mut state, source.pixels(), &layout, profile.crop_ratio)?;
    }

    if profile.bevel.enabled {
        let highlight = profile.bevel.highlight.to_color()?;
        let shadow = profile.bevel.shadow.to_color()?;

        let mut state = canvas.save();
        state.clip_to(&mask)?;
        state.stroke(&layout.highlight_path(), layout.stroke_width, highlight)?;
        state.stroke(&layout.shadow_path(), layout.stroke_width, shadow)?;
    }

    Ok(IconImage::new(canvas.into_image()))
}

fn draw_artwork(
    canvas: &mut Canvas,
    pixels: &RgbaImage,
    layout: &IconLayout,
    crop_ratio: f32,
) -> Result<()> {
    let src = crop_region(pixels.width(), pixels.height(), crop_ratio);
    canvas.draw_image(pixels, src, layout.icon_rect())
}

// ============================================================================
// Tests
// ============================================================================
