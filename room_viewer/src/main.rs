//! Room viewer
//!
//! Composes a room description against the headless backend and prints what
//! the preview surface ended up holding. Useful for checking room files
//! without starting the editor.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use room_preview::prelude::*;
use thiserror::Error;

/// Compose a room file and report the resulting scene
#[derive(Parser, Debug)]
#[command(name = "room_viewer")]
#[command(about = "Compose a room file headlessly and report the resulting scene")]
#[command(version)]
struct Cli {
    /// Room description (.ron or .toml)
    room: PathBuf,

    /// Asset catalog with textures and object templates
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Surface options layered over the editor defaults
    #[arg(short, long)]
    options: Option<PathBuf>,

    /// Snap rendered positions to whole pixels
    #[arg(long)]
    pixel_art: bool,

    /// Horizontal pan in surface pixels
    #[arg(long, default_value_t = 0.0)]
    x: f32,

    /// Vertical pan in surface pixels
    #[arg(long, default_value_t = 0.0)]
    y: f32,

    /// Zoom factor
    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    /// Device pixel ratio reported by the backend
    #[arg(long, default_value_t = 1.0)]
    device_pixel_ratio: f32,

    /// Exit with an error if any object instance was skipped
    #[arg(long)]
    strict: bool,
}

#[derive(Error, Debug)]
enum ViewerError {
    #[error("Failed to load {}: {source}", .path.display())]
    Load { path: PathBuf, source: ConfigError },

    #[error(transparent)]
    Preview(#[from] PreviewError),

    #[error("{0} object instance(s) could not be composed")]
    Incomplete(usize),
}

fn load<T: Config>(path: &Path) -> Result<T, ViewerError> {
    T::load_from_file(path).map_err(|source| ViewerError::Load {
        path: path.to_path_buf(),
        source,
    })
}

fn run(cli: &Cli) -> Result<(), ViewerError> {
    let room: RoomDescription = load(&cli.room)?;
    let catalog: AssetCatalog = match &cli.catalog {
        Some(path) => load(path)?,
        None => AssetCatalog::default(),
    };
    let options: SurfaceOptions = match &cli.options {
        Some(path) => load(path)?,
        None => SurfaceOptions::default(),
    };

    let mut backend = HeadlessBackend::with_device_pixel_ratio(cli.device_pixel_ratio);
    let mut host = CollectingHost::new();

    let preview = PreviewSurface::new(
        &mut backend,
        &mut host,
        Arc::new(catalog),
        &options,
        &room,
        cli.pixel_art,
        RoomPlacement::new(cli.x, cli.y, cli.scale),
    )?;

    for message in host.errors() {
        log::warn!("{}", message);
    }

    print_summary(&room, &preview);

    let skipped = preview.composition_report().failures.len();
    preview.destroy(&mut backend, true, DisposalOptions::all())?;

    if cli.strict && skipped > 0 {
        return Err(ViewerError::Incomplete(skipped));
    }
    Ok(())
}

fn print_summary(room: &RoomDescription, preview: &PreviewSurface) {
    let config = preview.config();
    let report = preview.composition_report();
    let registry = preview.registry();

    println!("Room '{}'", room.name);
    println!(
        "  surface:     {}x{} @{}x (round pixels: {})",
        config.width, config.height, config.resolution, config.round_pixels
    );
    match preview.stage().fill() {
        Some(fill) => println!("  fill:        #{:06x}", room_preview::room::color::to_hex(fill.color)),
        None => println!("  fill:        none (UI room)"),
    }
    let camera = preview.camera().position();
    println!("  camera:      ({}, {})", camera.x, camera.y);
    println!("  backgrounds: {}", registry.backgrounds().len());
    println!("  copies:      {} ({} skipped)", registry.copies().len(), report.failures.len());
    let hidden = registry
        .tile_layers()
        .iter()
        .filter(|id| preview.root().node(**id).is_some_and(|layer| !layer.visible))
        .count();
    println!("  tile layers: {} ({} hidden)", registry.tile_layers().len(), hidden);
    println!("  tiles:       {}", registry.tiles().len());

    for failure in &report.failures {
        println!("  ! copy #{} ({}): {}", failure.index, failure.uid, failure.error);
    }
}

fn main() -> ExitCode {
    room_preview::foundation::logging::init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
