//! appicon-renderer: macOS app icon generator
//!
//! This crate turns a piece of source artwork into a complete
//! `AppIcon.appiconset`: the artwork is masked with Apple's
//! continuous-curvature rounded rectangle (the "squircle"), given a subtle
//! highlight/shadow bevel, exported as PNGs at every required size, and
//! described by a `Contents.json` manifest.
//!
//! # Example
//!
//! ```
//! use appicon_renderer::{compose_icon, resample, SourceImage};
//! use image::{Rgba, RgbaImage};
//!
//! let artwork = SourceImage::from_rgba(RgbaImage::from_pixel(64, 64, Rgba([40, 90, 200, 255])));
//! let icon = compose_icon(&artwork, 256).unwrap();
//! assert_eq!(icon.size(), 256);
//!
//! let small = resample(&icon, 32);
//! assert_eq!(small.dimensions(), (32, 32));
//! ```
//!
//! # Whole Pipeline
//!
//! [`IconGenerator`] runs every step and writes the files:
//!
//! ```no_run
//! use appicon_renderer::{IconGenerator, RenderProfile};
//!
//! let profile = RenderProfile::from_json(r#"{ "sizes": [16, 32, 128] }"#)?;
//! IconGenerator::new(profile).run("images/appiconbase.png", "AppIcon.appiconset")?;
//! # Ok::<(), appicon_renderer::IconError>(())
//! ```

mod canvas;
mod compose;
mod error;
mod export;
mod generator;
mod icon;
mod manifest;
mod profile;
mod source;
mod squircle;

pub use canvas::{Canvas, StateGuard};
pub use compose::{IconLayout, compose_icon, compose_icon_with, crop_region};
pub use error::{IconError, Result};
pub use export::{ExportSet, ExportedFile, MACOS_ICON_SIZES, export_sizes, resample};
pub use generator::{DEFAULT_OUTPUT_DIR, DEFAULT_SOURCE_PATH, GenerationReport, IconGenerator};
pub use icon::{IconImage, RectF};
pub use manifest::{
    AssetCatalog, CatalogImage, CatalogInfo, Idiom, MANIFEST_FILE_NAME, write_manifest,
};
pub use profile::{BevelSettings, RenderProfile, StrokeColor};
pub use source::SourceImage;
pub use squircle::{
    CORNER_RADIUS_RATIO, LIMIT_FACTOR, Segment, SquirclePath, build_squircle_path, corner_radius,
    limit_radius,
};
