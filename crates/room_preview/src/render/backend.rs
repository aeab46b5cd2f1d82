//! Backend abstraction traits for the rendering system
//!
//! This module defines the traits that rendering backends must implement
//! to host a room preview surface.

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::core::SurfaceConfig;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// Handle to a surface created by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(pub u64);

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// Surface could not be created
    #[error("Surface creation failed: {0}")]
    SurfaceCreation(String),

    /// Handle does not refer to a live surface
    #[error("Unknown surface handle {0:?}")]
    UnknownSurface(SurfaceHandle),

    /// Backend-specific failure
    #[error("Backend error: {0}")]
    Backend(String),
}

/// What to release along with the surface's display tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisposalOptions {
    /// Destroy child nodes as well
    pub children: bool,
    /// Destroy the textures the nodes display
    pub texture: bool,
    /// Destroy the base textures behind them
    pub base_texture: bool,
}

impl DisposalOptions {
    /// Release everything
    pub fn all() -> Self {
        Self {
            children: true,
            texture: true,
            base_texture: true,
        }
    }
}

/// Main rendering backend trait
///
/// Implemented by whatever actually owns the GPU surface. All calls happen on
/// the editor's UI thread.
pub trait RenderBackend {
    /// Ratio of physical to logical pixels on the current display
    fn device_pixel_ratio(&self) -> f32;

    /// Create a surface for the given configuration
    fn create_surface(&mut self, config: &SurfaceConfig) -> BackendResult<SurfaceHandle>;

    /// Release a surface
    ///
    /// `detach_view` removes the view from the host page or window; `disposal`
    /// is passed through untouched.
    fn destroy_surface(
        &mut self,
        handle: SurfaceHandle,
        detach_view: bool,
        disposal: DisposalOptions,
    ) -> BackendResult<()>;
}
