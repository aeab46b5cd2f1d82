//! Shared fixtures for preview tests

use std::sync::Arc;

use crate::assets::{AssetCatalog, ObjectTemplate, TextureInfo};
use crate::core::{RoomPlacement, SurfaceOptions};
use crate::error::PreviewError;
use crate::preview::{CollectingHost, PreviewSurface};
use crate::render::HeadlessBackend;
use crate::room::{BackgroundTemplate, CopyTemplate, RoomDescription, TileLayerTemplate, TileTemplate};

/// Catalog with a sky texture, a 4x4 tileset, and two object templates
pub fn catalog() -> Arc<AssetCatalog> {
    Arc::new(
        AssetCatalog::new()
            .with_texture("tex-sky", TextureInfo::new("Sky", 256, 256))
            .with_texture("tex-hills", TextureInfo::new("Hills", 256, 128))
            .with_texture("tex-tiles", TextureInfo::new("Tiles", 16, 16).with_grid(4, 4))
            .with_texture("tex-hero", TextureInfo::new("Hero", 32, 32))
            .with_template("tpl-hero", ObjectTemplate::new("Hero", Some("tex-hero")))
            .with_template("tpl-coin", ObjectTemplate::new("Coin", Some("tex-hero"))),
    )
}

/// Tile layer at `depth` with `count` valid tiles
pub fn tile_layer(depth: i32, count: u32) -> TileLayerTemplate {
    (0..count).fold(TileLayerTemplate::new(depth), |layer, i| {
        layer.with_tile(TileTemplate::new("tex-tiles", i % 16, (i * 16) as f32, 0.0))
    })
}

/// 320x240 room with 2 backgrounds, 3 copies, and 3 tile layers
pub fn level_room() -> RoomDescription {
    RoomDescription::new("Level 1", 320, 240)
        .with_background_color("#112233")
        .with_background(BackgroundTemplate::new("tex-sky", -20))
        .with_background(BackgroundTemplate::new("tex-hills", -10))
        .with_copy(CopyTemplate::new("tpl-hero", 32.0, 200.0))
        .with_copy(CopyTemplate::new("tpl-coin", 96.0, 180.0))
        .with_copy(CopyTemplate::new("tpl-coin", 128.0, 180.0))
        .with_tile_layer(tile_layer(0, 4))
        .with_tile_layer(tile_layer(10, 2))
        .with_tile_layer(tile_layer(-5, 3))
}

/// Everything a test needs to build and inspect a preview
pub struct Harness {
    pub backend: HeadlessBackend,
    pub host: CollectingHost,
}

impl Harness {
    pub fn new() -> Self {
        crate::foundation::logging::init_for_tests();
        Self {
            backend: HeadlessBackend::with_device_pixel_ratio(2.0),
            host: CollectingHost::new(),
        }
    }

    pub fn open(&mut self, room: &RoomDescription) -> Result<PreviewSurface, PreviewError> {
        self.open_with(room, &SurfaceOptions::new(), false, RoomPlacement::default())
    }

    pub fn open_with(
        &mut self,
        room: &RoomDescription,
        options: &SurfaceOptions,
        pixel_art: bool,
        placement: RoomPlacement,
    ) -> Result<PreviewSurface, PreviewError> {
        PreviewSurface::new(
            &mut self.backend,
            &mut self.host,
            catalog(),
            options,
            room,
            pixel_art,
            placement,
        )
    }
}
