//! Asset catalog manifest (`Contents.json`) for an `.appiconset` folder.
//!
//! The manifest lists every exported PNG with its platform idiom, nominal
//! size, and scale:
//!
//! ```json
//! {
//!   "images": [
//!     { "filename": "appicon_16.png", "idiom": "mac", "size": "16x16", "scale": "1x" }
//!   ],
//!   "info": { "author": "xcode", "version": 1 }
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{IconError, Result};
use crate::export::ExportSet;

/// File name of the manifest inside the icon set folder.
pub const MANIFEST_FILE_NAME: &str = "Contents.json";

/// Platform an icon entry targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum Idiom {
    #[default]
    Mac,
}

/// One image entry of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct CatalogImage {
    pub filename: String,
    pub idiom: Idiom,
    /// Nominal size, `"<N>x<N>"`.
    pub size: String,
    /// Scale factor, `"1x"`.
    pub scale: String,
}

impl CatalogImage {
    /// Entry for the PNG exported at `size` pixels.
    pub fn for_size(size: u32) -> Self {
        Self {
            filename: ExportSet::filename_for(size),
            idiom: Idiom::Mac,
            size: format!("{size}x{size}"),
            scale: "1x".to_string(),
        }
    }
}

/// Catalog metadata block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct CatalogInfo {
    pub author: String,
    pub version: u32,
}

impl Default for CatalogInfo {
    fn default() -> Self {
        Self {
            author: "xcode".to_string(),
            version: 1,
        }
    }
}

/// The whole `Contents.json` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct AssetCatalog {
    pub images: Vec<CatalogImage>,
    pub info: CatalogInfo,
}

impl AssetCatalog {
    /// Builds the catalog listing every size of `set`, in order.
    pub fn for_export_set(set: &ExportSet) -> Self {
        Self {
            images: set.sizes().iter().map(|&s| CatalogImage::for_size(s)).collect(),
            info: CatalogInfo::default(),
        }
    }

    /// Serializes with two-space indentation and a trailing newline.
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self).map_err(IconError::Manifest)?;
        json.push('\n');
        Ok(json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(IconError::Manifest)
    }
}

/// Writes `Contents.json` for `set` into `output_dir` and returns its path.
pub fn write_manifest(set: &ExportSet, output_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let path = output_dir.as_ref().join(MANIFEST_FILE_NAME);
    let json = AssetCatalog::for_export_set(set).to_json_pretty()?;
    std::fs::write(&path, json).map_err(|e| IconError::io(&path, e))?;
    info!("  Created: {MANIFEST_FILE_NAME}");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_for_size() {
        let entry = CatalogImage::for_size(128);
        assert_eq!(entry.filename, "appicon_128.png");
        assert_eq!(entry.idiom, Idiom::Mac);
        assert_eq!(entry.size, "128x128");
        assert_eq!(entry.scale, "1x");
    }

    #[test]
    fn json_shape() {
        let set = ExportSet::new(vec![16]).unwrap();
        let json = AssetCatalog::for_export_set(&set).to_json_pretty().unwrap();

        let expected = r#"{
  "images": [
    {
      "filename": "appicon_16.png",
      "idiom": "mac",
      "size": "16x16",
      "scale": "1x"
    }
  ],
  "info": {
    "author": "xcode",
    "version": 1
  }
}
"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn written_manifest_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let set = ExportSet::macos();
        let path = write_manifest(&set, dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), MANIFEST_FILE_NAME);

        let catalog = AssetCatalog::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(catalog.images.len(), set.len());
        for (entry, size) in catalog.images.iter().zip(set.sizes()) {
            assert_eq!(entry.size, format!("{size}x{size}"));
            assert_eq!(entry.filename, format!("appicon_{size}.png"));
        }
        assert_eq!(catalog.info, CatalogInfo::default());
    }

    #[test]
    fn unknown_idiom_is_rejected() {
        let json = r#"{"images":[{"filename":"a.png","idiom":"iphone","size":"1x1","scale":"1x"}],
                       "info":{"author":"xcode","version":1}}"#;
        assert!(matches!(AssetCatalog::from_json(json), Err(IconError::Manifest(_))));
    }
}
