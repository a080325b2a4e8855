//! End-to-end icon generation.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::compose::compose_icon_with;
use crate::error::{IconError, Result};
use crate::export::{ExportSet, ExportedFile, export_sizes};
use crate::manifest::write_manifest;
use crate::profile::RenderProfile;
use crate::source::SourceImage;

/// Default location of the source artwork, relative to the project root.
pub const DEFAULT_SOURCE_PATH: &str = "images/appiconbase.png";

/// Default icon set folder, relative to the project root.
pub const DEFAULT_OUTPUT_DIR: &str = "Resources/Assets.xcassets/AppIcon.appiconset";

/// What a successful run wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub files: Vec<ExportedFile>,
    pub manifest: PathBuf,
}

/// Runs the whole pipeline: load, compose, export every size, write the
/// manifest.
///
/// # Example
///
/// ```no_run
/// use appicon_renderer::{IconGenerator, RenderProfile};
///
/// let generator = IconGenerator::new(RenderProfile::default());
/// let report = generator.run("images/appiconbase.png", "AppIcon.appiconset")?;
/// println!("wrote {} files", report.files.len());
/// # Ok::<(), appicon_renderer::IconError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct IconGenerator {
    profile: RenderProfile,
}

impl IconGenerator {
    pub fn new(profile: RenderProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &RenderProfile {
        &self.profile
    }

    /// Generates the icon set for `source` into `output_dir`.
    ///
    /// The source is checked before anything is written: a missing file
    /// yields [`IconError::MissingSourceFile`] and leaves the file system
    /// untouched. Later failures do not remove files already written.
    pub fn run(
        &self,
        source: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
    ) -> Result<GenerationReport> {
        let source = source.as_ref();
        let output_dir = output_dir.as_ref();

        if !source.exists() {
            return Err(IconError::MissingSourceFile {
                path: source.to_path_buf(),
            });
        }
        self.profile.validate()?;
        let set = ExportSet::new(self.profile.sizes.clone())?;

        std::fs::create_dir_all(output_dir).map_err(|e| IconError::io(output_dir, e))?;

        info!("Loading source image: {}", source.display());
        let image = SourceImage::open_at(source, self.profile.source_raster_size())?;
        let icon = compose_icon_with(&image, &self.profile)?;

        let files = export_sizes(&icon, &set, output_dir)?;
        let manifest = write_manifest(&set, output_dir)?;

        info!("All icons generated successfully!");
        Ok(GenerationReport { files, manifest })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn missing_source_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("AppIcon.appiconset");

        let err = IconGenerator::default()
            .run(dir.path().join("images/appiconbase.png"), &output)
            .unwrap_err();

        assert!(matches!(err, IconError::MissingSourceFile { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn invalid_size_is_rejected_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("base.png");
        RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255])).save(&source).unwrap();
        let output = dir.path().join("out");

        let generator = IconGenerator::new(RenderProfile::new().with_sizes([16, 0]));
        let err = generator.run(&source, &output).unwrap_err();

        assert!(matches!(err, IconError::InvalidExportSize(0)));
        assert!(!output.exists());
    }

    #[test]
    fn oversized_canvas_is_rejected_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("base.png");
        RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255])).save(&source).unwrap();
        let output = dir.path().join("out");

        let generator = IconGenerator::new(RenderProfile::new().with_canvas_size(100_000));
        let err = generator.run(&source, &output).unwrap_err();

        assert!(matches!(err, IconError::InvalidCanvasSize(100_000)));
        assert!(!output.exists());
    }

    #[test]
    fn run_writes_pngs_and_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("base.png");
        RgbaImage::from_pixel(40, 40, Rgba([20, 120, 220, 255])).save(&source).unwrap();
        let output = dir.path().join("nested/AppIcon.appiconset");

        let profile = RenderProfile::new().with_canvas_size(128).with_sizes([16, 32, 64]);
        let report = IconGenerator::new(profile).run(&source, &output).unwrap();

        assert_eq!(report.files.len(), 3);
        assert!(report.manifest.ends_with("Contents.json"));
        assert!(output.join("appicon_64.png").is_file());
        assert_eq!(std::fs::read_dir(&output).unwrap().count(), 4);
    }
}
