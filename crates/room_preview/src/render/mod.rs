//! Rendering backend boundary
//!
//! The previewer never draws anything itself. It hands a resolved
//! [`SurfaceConfig`](crate::core::SurfaceConfig) to a [`RenderBackend`] and
//! tells it when to let go of the surface again.

pub mod backend;
pub mod headless;

pub use backend::{RenderBackend, BackendResult, SurfaceHandle, DisposalOptions, RenderError};
pub use headless::{HeadlessBackend, SurfaceRecord};
