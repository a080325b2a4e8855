use std::path::Path;

use appicon_renderer::{
    AssetCatalog, ExportSet, IconError, IconGenerator, MANIFEST_FILE_NAME, RenderProfile,
    SourceImage, compose_icon, export_sizes, write_manifest,
};
use image::{Rgba, RgbaImage};

/// Diagonal gradient artwork so every pixel of the output depends on position.
fn write_gradient_png(path: &Path, size: u32) {
    RgbaImage::from_fn(size, size, |x, y| {
        Rgba([
            (x * 255 / size) as u8,
            (y * 255 / size) as u8,
            ((x + y) * 127 / size) as u8,
            255,
        ])
    })
    .save(path)
    .unwrap();
}

fn png_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".png"))
        .collect();
    names.sort();
    names
}

#[test]
fn full_macos_icon_set() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("appiconbase.png");
    write_gradient_png(&source, 256);
    let output = dir.path().join("AppIcon.appiconset");

    let report = IconGenerator::default().run(&source, &output).unwrap();

    assert_eq!(report.files.len(), 7);
    for file in &report.files {
        let img = image::open(&file.path).unwrap();
        assert_eq!((img.width(), img.height()), (file.size, file.size));
    }

    let json = std::fs::read_to_string(output.join(MANIFEST_FILE_NAME)).unwrap();
    let catalog = AssetCatalog::from_json(&json).unwrap();
    let sizes: Vec<&str> = catalog.images.iter().map(|i| i.size.as_str()).collect();
    assert_eq!(
        sizes,
        ["16x16", "32x32", "64x64", "128x128", "256x256", "512x512", "1024x1024"]
    );
    assert!(json.ends_with("}\n"));
}

#[test]
fn master_icon_is_masked() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("appiconbase.png");
    write_gradient_png(&source, 256);
    let output = dir.path().join("out");

    IconGenerator::default().run(&source, &output).unwrap();
    let master = image::open(output.join("appicon_1024.png")).unwrap().to_rgba8();

    // Transparent margin and rounded corners, opaque center.
    assert_eq!(master.get_pixel(10, 10).0[3], 0);
    assert_eq!(master.get_pixel(100, 100).0[3], 0);
    assert!(master.get_pixel(512, 512).0[3] > 250);
}

#[test]
fn compose_is_bit_identical_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("appiconbase.png");
    write_gradient_png(&source, 200);

    let artwork = SourceImage::open(&source).unwrap();
    let first = compose_icon(&artwork, 1024).unwrap();
    let second = compose_icon(&artwork, 1024).unwrap();
    assert!(first.data.as_raw() == second.data.as_raw());
}

#[test]
fn two_sizes_two_files() {
    let dir = tempfile::tempdir().unwrap();
    let artwork = SourceImage::from_rgba(RgbaImage::from_pixel(50, 50, Rgba([9, 9, 9, 255])));
    let icon = compose_icon(&artwork, 256).unwrap();
    let set = ExportSet::new(vec![16, 32]).unwrap();

    export_sizes(&icon, &set, dir.path()).unwrap();
    write_manifest(&set, dir.path()).unwrap();

    assert_eq!(png_files(dir.path()), ["appicon_16.png", "appicon_32.png"]);
    let catalog =
        AssetCatalog::from_json(&std::fs::read_to_string(dir.path().join("Contents.json")).unwrap())
            .unwrap();
    assert_eq!(catalog.images.len(), 2);
    assert_eq!(catalog.images[1].size, "32x32");
}

#[test]
fn missing_source_produces_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("AppIcon.appiconset");

    let err = IconGenerator::new(RenderProfile::default())
        .run(dir.path().join("images/appiconbase.png"), &output)
        .unwrap_err();

    assert!(matches!(err, IconError::MissingSourceFile { .. }));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn svg_source_is_supported() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("appiconbase.svg");
    std::fs::write(
        &source,
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="120" height="120"><rect width="120" height="120" fill="#3366cc"/></svg>"##,
    )
    .unwrap();

    let profile = RenderProfile::new().with_canvas_size(256).with_sizes([16]);
    let report = IconGenerator::new(profile)
        .run(&source, dir.path().join("out"))
        .unwrap();
    assert_eq!(report.files.len(), 1);
}

#[test]
fn small_svg_keeps_hard_edges_on_master() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("split.svg");
    std::fs::write(
        &source,
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" viewBox="0 0 16 16"><rect width="8" height="16" fill="#ff0000"/><rect x="8" width="8" height="16" fill="#0000ff"/></svg>"##,
    )
    .unwrap();
    let output = dir.path().join("out");

    let profile = RenderProfile::new().with_sizes([1024]);
    IconGenerator::new(profile).run(&source, &output).unwrap();
    let master = image::open(output.join("appicon_1024.png")).unwrap().to_rgba8();

    // Away from the bevel, only the red/blue boundary may blend.
    let blended = (200..824)
        .map(|x| master.get_pixel(x, 512).0)
        .filter(|[r, _, b, _]| *r > 16 && *b > 16)
        .count();
    assert!(blended <= 6, "{blended} blended pixels across the edge");
    assert!(master.get_pixel(300, 512).0[0] > 250);
    assert!(master.get_pixel(700, 512).0[2] > 250);
}
