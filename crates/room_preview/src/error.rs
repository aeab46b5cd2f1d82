//! Top-level preview errors

use thiserror::Error;

use crate::config::ConfigError;
use crate::render::RenderError;
use crate::scene::ConstructionFailure;

/// Errors surfaced by preview operations
#[derive(Error, Debug)]
pub enum PreviewError {
    /// A template could not be turned into a node
    #[error("Construction failed: {0}")]
    Construction(#[from] ConstructionFailure),

    /// The merged configuration is unusable
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The render backend failed
    #[error("Render backend error: {0}")]
    Render(#[from] RenderError),
}
