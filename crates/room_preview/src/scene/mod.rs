//! Scene composition
//!
//! Turns room descriptions into live, ordered nodes.
//!
//! ## Architecture
//!
//! ```text
//! RoomDescription (plain data)
//!      ↓
//! RoomComposer (one pass)
//!      ↓
//! SceneRoot (owns nodes)  ←  EntityRegistry (indexes nodes)
//!      ↓
//! Stage (camera, fill, scene root)
//! ```

pub mod node;
pub mod camera;
pub mod viewport;
pub mod registry;
pub mod scene_graph;
pub mod composer;

pub use node::{
    SceneNode, NodeKind, NodeCapabilities, NodeContext, SurfaceId, ConstructionFailure,
    CopyNode, TileNode, TileLayerNode, BackgroundNode,
};
pub use camera::Camera2D;
pub use viewport::{Viewport, ViewportRegistry};
pub use registry::EntityRegistry;
pub use scene_graph::{SceneRoot, Stage, StageChild, SolidFill};
pub use composer::{RoomComposer, CompositionTarget, CompositionReport, CopyFailure};
