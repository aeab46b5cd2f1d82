//! Core previewer infrastructure
//!
//! Houses the surface configuration layer shared by the preview surface and
//! the render backend.

pub mod config;

pub use config::{SurfaceOptions, SurfaceConfig, RoomPlacement};
