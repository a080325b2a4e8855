//! Raster export of a composed icon at multiple pixel sizes.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};
use tracing::{debug, info};

use crate::error::{IconError, Result};
use crate::icon::{IconImage, demultiply_in_place};

/// Pixel sizes required by a macOS app icon set.
pub const MACOS_ICON_SIZES: [u32; 7] = [16, 32, 64, 128, 256, 512, 1024];

/// Largest canvas or export side accepted, in pixels.
pub const MAX_ICON_SIZE: u32 = 8192;

// ============================================================================
// ExportSet
// ============================================================================

/// The list of pixel sizes an icon is exported at.
///
/// Each size produces one `appicon_<size>.png` file and one manifest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSet {
    sizes: Vec<u32>,
}

impl Default for ExportSet {
    fn default() -> Self {
        Self::macos()
    }
}

impl ExportSet {
    /// Creates an export set. Every size must be in `1..=MAX_ICON_SIZE`.
    pub fn new(sizes: impl Into<Vec<u32>>) -> Result<Self> {
        let sizes = sizes.into();
        if let Some(&bad) = sizes.iter().find(|&&s| !(1..=MAX_ICON_SIZE).contains(&s)) {
            return Err(IconError::InvalidExportSize(bad));
        }
        Ok(Self { sizes })
    }

    /// The standard macOS icon sizes, 16 through 1024.
    pub fn macos() -> Self {
        Self {
            sizes: MACOS_ICON_SIZES.to_vec(),
        }
    }

    pub fn sizes(&self) -> &[u32] {
        &self.sizes
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// File name of the PNG exported at `size`.
    pub fn filename_for(size: u32) -> String {
        format!("appicon_{size}.png")
    }
}

/// A PNG written by [`export_sizes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub size: u32,
    pub path: PathBuf,
}

// ============================================================================
// Resampling & Export
// ============================================================================

/// Resamples the icon to `size x size` with a Lanczos filter.
///
/// Filtering runs on premultiplied samples so the transparent margin does
/// not darken the antialiased rim.
pub fn resample(icon: &IconImage, size: u32) -> RgbaImage {
    if size == icon.size() {
        return icon.data.clone();
    }
    let premultiplied = icon.premultiplied();
    let mut resized = imageops::resize(&premultiplied, size, size, FilterType::Lanczos3);
    demultiply_in_place(&mut resized);
    resized
}

/// Writes one PNG per size of `set` into `output_dir`.
///
/// Files are written in order. If one fails, the ones already written stay
/// on disk.
pub fn export_sizes(
    icon: &IconImage,
    set: &ExportSet,
    output_dir: impl AsRef<Path>,
) -> Result<Vec<ExportedFile>> {
    let output_dir = output_dir.as_ref();
    info!("Generating PNG icons...");

    let mut written = Vec::with_capacity(set.len());
    for &size in set.sizes() {
        let name = ExportSet::filename_for(size);
        let path = output_dir.join(&name);

        debug!(size, from = icon.size(), "resampling");
        let resized = resample(icon, size);
        resized
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|source| IconError::Encode {
                path: path.clone(),
                source,
            })?;

        info!("  Created: {name} ({size}x{size})");
        written.push(ExportedFile { size, path });
    }
    Ok(written)
}

// ============================================================================
// Tests
// ============================================================================
