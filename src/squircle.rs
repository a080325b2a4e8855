//! Continuous-curvature rounded rectangle ("squircle") geometry.
//!
//! The contour matches the corner profile used by macOS and iOS app icons.
//! Each corner is three cubic Bezier segments whose control points are
//! fixed proportions of a single corner radius. The proportions come from a
//! published reverse-engineering of the system path and are kept as an
//! opaque table: they are not derived here and must not be tuned.
//!
//! Coordinates are y-down (raster convention). The contour starts on the top
//! edge and runs clockwise on screen.
//!
//! # Example
//!
//! ```
//! use appicon_renderer::build_squircle_path;
//!
//! let path = build_squircle_path(10.0, 10.0, 100.0, 100.0);
//! assert!(path.is_closed());
//!
//! let bounds = path.bounds();
//! assert_eq!(bounds.x, 10.0);
//! assert_eq!(bounds.right(), 110.0);
//! ```

use std::array;
use std::iter::Take;

use resvg::tiny_skia::{self, PathBuilder, Point};

use crate::icon::RectF;

// ============================================================================
// Coefficient Table
// ============================================================================

/// Ratio between the straight-edge inset of a corner and its nominal radius.
///
/// Also bounds the radius: `r * LIMIT_FACTOR` may never exceed half of the
/// shorter side.
pub const LIMIT_FACTOR: f32 = 1.528_664_8;

/// Corner radius as a fraction of the shorter side.
pub const CORNER_RADIUS_RATIO: f32 = 0.22;

const P1: f32 = 1.528_664_8;
const P2: f32 = 1.088_493_2;
const P3: f32 = 0.868_406_9;
const P4: f32 = 0.669_934_3;
const P5: f32 = 0.631_494;
const P6: f32 = 0.372_823_9;
const P7: f32 = 0.169_060_1;

const CP1: f32 = 0.065_496;
const CP2: f32 = 0.074_911;
const CP3: f32 = 0.169_059;
const CP4: f32 = 0.372_824;

// ============================================================================
// Radius
// ============================================================================

/// Returns the corner radius used for a `width x height` squircle.
///
/// The radius is `min(width, height) * 0.22`, limited so that the corner
/// inset (`r * LIMIT_FACTOR`) never exceeds half of the shorter side.
pub fn corner_radius(width: f32, height: f32) -> f32 {
    let shorter = width.min(height);
    limit_radius(shorter * CORNER_RADIUS_RATIO, shorter / 2.0)
}

/// Caps `radius` so that `radius * LIMIT_FACTOR <= max_radius`.
pub fn limit_radius(radius: f32, max_radius: f32) -> f32 {
    radius.min(max_radius / LIMIT_FACTOR)
}

// ============================================================================
// SquirclePath
// ============================================================================

/// One drawing command of a [`SquirclePath`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    MoveTo(Point),
    LineTo(Point),
    /// Cubic Bezier: first control point, second control point, end point.
    CubicTo(Point, Point, Point),
    Close,
}

impl Segment {
    /// Returns every point referenced by the segment, control points included.
    pub fn points(&self) -> Take<array::IntoIter<Point, 3>> {
        let (points, len) = match *self {
            Segment::MoveTo(p) | Segment::LineTo(p) => ([p, p, p], 1),
            Segment::CubicTo(c1, c2, p) => ([c1, c2, p], 3),
            Segment::Close => ([Point::zero(); 3], 0),
        };
        points.into_iter().take(len)
    }
}

/// A closed squircle contour as an ordered list of segments.
///
/// Built with [`build_squircle_path`]. The path is plain data; convert it
/// with [`SquirclePath::to_skia_path`] to fill, clip, or stroke it.
#[derive(Debug, Clone, PartialEq)]
pub struct SquirclePath {
    rect: RectF,
    radius: f32,
    segments: Vec<Segment>,
}

impl SquirclePath {
    /// The rectangle the contour was built for.
    pub fn rect(&self) -> RectF {
        self.rect
    }

    /// The corner radius the coefficients were scaled by.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns true if the path starts with a move and ends with a close.
    pub fn is_closed(&self) -> bool {
        matches!(self.segments.first(), Some(Segment::MoveTo(_)))
            && matches!(self.segments.last(), Some(Segment::Close))
    }

    /// Bounding box of all on-curve and control points.
    pub fn bounds(&self) -> RectF {
        let mut min_x = f32::INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;

        for p in self.segments.iter().flat_map(Segment::points) {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        RectF::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Converts the contour into a tiny-skia path.
    ///
    /// Returns `None` for degenerate input (zero or non-finite size).
    pub fn to_skia_path(&self) -> Option<tiny_skia::Path> {
        let mut pb = PathBuilder::with_capacity(self.segments.len(), self.segments.len() * 3);
        for segment in &self.segments {
            match *segment {
                Segment::MoveTo(p) => pb.move_to(p.x, p.y),
                Segment::LineTo(p) => pb.line_to(p.x, p.y),
                Segment::CubicTo(c1, c2, p) => pb.cubic_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
                Segment::Close => pb.close(),
            }
        }
        pb.finish()
    }
}

/// Builds the squircle contour for the rectangle `(x, y, width, height)`.
///
/// Always produces a closed contour whose bounding box is exactly the given
/// rectangle. Intended for `width, height > 0`.
pub fn build_squircle_path(x: f32, y: f32, width: f32, height: f32) -> SquirclePath {
    let r = corner_radius(width, height);

    let left = x;
    let right = x + width;
    let top = y;
    let bottom = y + height;

    let pt = Point::from_xy;
    let cubic = |c1: Point, c2: Point, end: Point| Segment::CubicTo(c1, c2, end);

    let segments = vec![
        Segment::MoveTo(pt(left + r * P1, top)),
        Segment::LineTo(pt(right - r * P1, top)),
        // top-right
        cubic(
            pt(right - r * P2, top),
            pt(right - r * P3, top),
            pt(right - r * P4, top + r * CP1),
        ),
        cubic(
            pt(right - r * P6, top + r * CP3),
            pt(right - r * P7, top + r * CP4),
            pt(right - r * CP2, top + r * P5),
        ),
        cubic(
            pt(right, top + r * P3),
            pt(right, top + r * P2),
            pt(right, top + r * P1),
        ),
        Segment::LineTo(pt(right, bottom - r * P1)),
        // bottom-right
        cubic(
            pt(right, bottom - r * P2),
            pt(right, bottom - r * P3),
            pt(right - r * CP1, bottom - r * P4),
        ),
        cubic(
            pt(right - r * CP3, bottom - r * P6),
            pt(right - r * CP4, bottom - r * P7),
            pt(right - r * P5, bottom - r * CP2),
        ),
        cubic(
            pt(right - r * P3, bottom),
            pt(right - r * P2, bottom),
            pt(right - r * P1, bottom),
        ),
        Segment::LineTo(pt(left + r * P1, bottom)),
        // bottom-left
        cubic(
            pt(left + r * P2, bottom),
            pt(left + r * P3, bottom),
            pt(left + r * P4, bottom - r * CP1),
        ),
        cubic(
            pt(left + r * P6, bottom - r * CP3),
            pt(left + r * P7, bottom - r * CP4),
            pt(left + r * CP2, bottom - r * P5),
        ),
        cubic(
            pt(left, bottom - r * P3),
            pt(left, bottom - r * P2),
            pt(left, bottom - r * P1),
        ),
        Segment::LineTo(pt(left, top + r * P1)),
        // top-left
        cubic(
            pt(left, top + r * P2),
            pt(left, top + r * P3),
            pt(left + r * CP1, top + r * P4),
        ),
        cubic(
            pt(left + r * CP3, top + r * P6),
            pt(left + r * CP4, top + r * P7),
            pt(left + r * P5, top + r * CP2),
        ),
        cubic(
            pt(left + r * P3, top),
            pt(left + r * P2, top),
            pt(left + r * P1, top),
        ),
        Segment::Close,
    ];

    SquirclePath {
        rect: RectF::new(x, y, width, height),
        radius: r,
        segments,
    }
}

// ============================================================================
// Tests
// ============================================================================
