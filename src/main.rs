use std::path::PathBuf;
use std::process::ExitCode;

use appicon_renderer::{
    DEFAULT_OUTPUT_DIR, DEFAULT_SOURCE_PATH, IconError, IconGenerator, RenderProfile,
};
use clap::Parser;
use tracing::error;

/// Generate a macOS app icon set from a single piece of artwork.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Source artwork (PNG, JPEG, SVG, ...).
    #[arg(long, default_value = DEFAULT_SOURCE_PATH)]
    source: PathBuf,

    /// The .appiconset folder to write into. Created if missing.
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// JSON render profile overriding the default layout and bevel.
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Export size in pixels. Repeat to export several; replaces the
    /// profile's list.
    #[arg(long = "size", value_name = "PIXELS")]
    sizes: Vec<u32>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(IconError::MissingSourceFile { path }) => {
            error!("Error: Source image not found: {}", path.display());
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), IconError> {
    let mut profile = match &args.profile {
        Some(path) => RenderProfile::load(path)?,
        None => RenderProfile::default(),
    };
    if !args.sizes.is_empty() {
        profile.sizes = args.sizes;
    }

    IconGenerator::new(profile).run(&args.source, &args.output_dir)?;
    Ok(())
}
