//! # Room Preview
//!
//! Scene composition and entity lifecycle engine for live room previews in a
//! level editor.
//!
//! ## Features
//!
//! - **Room Composition**: Backgrounds, object instances, and tile layers in a fixed pass order
//! - **Entity Registry**: Per-kind indexes with a stable tile-layer draw order
//! - **Incremental Editing**: Add backgrounds and tile layers without rebuilding the scene
//! - **Backend Agnostic**: Rendering stays behind the `RenderBackend` trait
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use room_preview::prelude::*;
//!
//! fn main() -> Result<(), PreviewError> {
//!     let mut backend = HeadlessBackend::new();
//!     let mut host = LogHost;
//!     let room = RoomDescription::new("Level 1", 320, 240).with_background_color("#112233");
//!
//!     let mut preview = PreviewSurface::new(
//!         &mut backend,
//!         &mut host,
//!         Arc::new(AssetCatalog::new()),
//!         &SurfaceOptions::new(),
//!         &room,
//!         true,
//!         RoomPlacement::default(),
//!     )?;
//!
//!     preview.add_tile_layer(TileLayerTemplate::new(10))?;
//!     preview.destroy(&mut backend, true, DisposalOptions::all())?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod core;
pub mod assets;
pub mod room;
pub mod render;
pub mod scene;
pub mod preview;

mod error;

#[cfg(test)]
mod tests;

pub use error::PreviewError;

/// Common imports for previewer users
pub mod prelude {
    pub use crate::{
        PreviewError,
        assets::{AssetCatalog, ObjectTemplate, TextureInfo},
        config::{Config, ConfigError},
        core::{RoomPlacement, SurfaceConfig, SurfaceOptions},
        foundation::{collections::NodeId, math::Vec2},
        preview::{CollectingHost, EditorHost, LogHost, NodeRef, PreviewSurface, TileLayerSource},
        render::{DisposalOptions, HeadlessBackend, RenderBackend},
        room::{BackgroundTemplate, CopyTemplate, RoomDescription, TileLayerTemplate, TileTemplate},
        scene::{CompositionReport, NodeKind, SceneNode, Viewport},
    };
}
