//! Preview surface
//!
//! A [`PreviewSurface`] is one live room preview. It owns the stage, the scene
//! root, the camera, and the entity registry, and is the only place the
//! registry is mutated from:
//!
//! 1. Construction merges the surface configuration, creates the backend
//!    surface, builds the stage, and composes the room once.
//! 2. [`PreviewSurface::add_background`] and [`PreviewSurface::add_tile_layer`]
//!    extend the scene while the editor is open.
//! 3. [`PreviewSurface::destroy`] consumes the surface and releases the
//!    backend resources.

mod host;

pub use host::{EditorHost, LogHost, CollectingHost};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::assets::AssetCatalog;
use crate::config::ConfigError;
use crate::core::{RoomPlacement, SurfaceConfig, SurfaceOptions};
use crate::error::PreviewError;
use crate::foundation::collections::NodeId;
use crate::foundation::math::{utils, Vec2};
use crate::render::{DisposalOptions, RenderBackend, SurfaceHandle};
use crate::room::{self, color, BackgroundTemplate, CopyTemplate, RoomDescription, TileLayerTemplate};
use crate::scene::{
    Camera2D, CompositionReport, CompositionTarget, ConstructionFailure, EntityRegistry, NodeContext,
    RoomComposer, SceneNode, SceneRoot, SolidFill, Stage, StageChild, SurfaceId, Viewport,
};

static NEXT_SURFACE_ID: AtomicU64 = AtomicU64::new(1);

/// A node id paired with the surface whose arena issued it
///
/// Arena keys from different surfaces can collide, so operations that take
/// an existing node take one of these and reject nodes of other surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    /// Surface the node lives on
    pub surface: SurfaceId,
    /// Key within that surface's arena
    pub id: NodeId,
}

/// Input to [`PreviewSurface::add_tile_layer`]
#[derive(Debug, Clone)]
pub enum TileLayerSource {
    /// Build a new layer from a template
    Template(TileLayerTemplate),
    /// Re-register a layer node that already exists on this surface
    Node(NodeRef),
}

impl From<TileLayerTemplate> for TileLayerSource {
    fn from(template: TileLayerTemplate) -> Self {
        Self::Template(template)
    }
}

impl From<NodeRef> for TileLayerSource {
    fn from(node: NodeRef) -> Self {
        Self::Node(node)
    }
}

/// Live, editable preview of one room
pub struct PreviewSurface {
    id: SurfaceId,
    handle: SurfaceHandle,
    config: SurfaceConfig,
    room_name: String,
    catalog: Arc<AssetCatalog>,

    stage: Stage,
    root: SceneRoot,
    camera: Camera2D,
    registry: EntityRegistry,

    report: CompositionReport,
}

impl PreviewSurface {
    /// Create a preview for `room`
    ///
    /// Configuration is merged as defaults, then `options`, then values
    /// derived from the room (size, `pixel_art` rounding, transparent clear,
    /// clear-before-render). Everything is validated before the backend is
    /// asked for a surface. If composition fails, the backend surface is
    /// released again before the error is returned.
    pub fn new(
        backend: &mut dyn RenderBackend,
        host: &mut dyn EditorHost,
        catalog: Arc<AssetCatalog>,
        options: &SurfaceOptions,
        room: &RoomDescription,
        pixel_art: bool,
        placement: RoomPlacement,
    ) -> Result<Self, PreviewError> {
        let config = SurfaceConfig::merge(
            options,
            room.width,
            room.height,
            pixel_art,
            backend.device_pixel_ratio(),
        )?;
        placement.validate()?;
        let fill = Self::solid_fill(room, &config)?;

        let handle = backend.create_surface(&config)?;
        let id = SurfaceId(NEXT_SURFACE_ID.fetch_add(1, Ordering::Relaxed));
        log::info!(
            "Creating preview surface {:?} for room '{}' ({}x{}, pixel art: {})",
            id,
            room.name,
            config.width,
            config.height,
            pixel_art
        );

        let mut root = SceneRoot::new();
        root.set_sortable_children(true);
        root.apply_placement(placement);

        let camera = Camera2D::centered_on(config.width, config.height);
        let primary_viewport = Viewport::new(config.width, config.height);

        let mut stage = Stage::new();
        stage.add_child(StageChild::Camera);
        if let Some(fill) = fill {
            stage.add_child(StageChild::Fill(fill));
        }
        stage.add_child(StageChild::Room);

        let mut surface = Self {
            id,
            handle,
            config,
            room_name: room.name.clone(),
            catalog,
            stage,
            root,
            camera,
            registry: EntityRegistry::new(primary_viewport),
            report: CompositionReport::default(),
        };

        match RoomComposer::deserialize(&mut surface, room, host) {
            Ok(report) => {
                surface.report = report;
                Ok(surface)
            }
            Err(err) => {
                log::error!("Composing room '{}' failed: {}", room.name, err);
                if let Err(release) = backend.destroy_surface(handle, true, DisposalOptions::all()) {
                    log::warn!("Failed to release surface {:?}: {}", handle, release);
                }
                Err(err)
            }
        }
    }

    fn solid_fill(room: &RoomDescription, config: &SurfaceConfig) -> Result<Option<SolidFill>, ConfigError> {
        if room.is_ui {
            return Ok(None);
        }

        let color = match room.background_color.as_deref() {
            Some(value) => room::parse_color(value).map_err(|err| {
                ConfigError::Invalid(format!("room background color `{value}`: {err}"))
            })?,
            None => color::FALLBACK_BACKGROUND,
        };

        Ok(Some(SolidFill {
            color,
            width: config.width,
            height: config.height,
        }))
    }

    /// Release the surface
    ///
    /// `detach_view` and `disposal` are passed to the backend as-is. With
    /// `disposal.children` set, every node is dropped before the backend
    /// surface goes.
    pub fn destroy(
        mut self,
        backend: &mut dyn RenderBackend,
        detach_view: bool,
        disposal: DisposalOptions,
    ) -> Result<(), PreviewError> {
        log::info!(
            "Destroying preview surface {:?} for room '{}' ({} nodes)",
            self.id,
            self.room_name,
            self.root.node_count()
        );
        if disposal.children {
            self.registry.clear();
            self.root.clear();
        }
        backend.destroy_surface(self.handle, detach_view, disposal)?;
        Ok(())
    }

    /// Add a background on top of the existing ones
    ///
    /// Backgrounds are appended in call order and never re-sorted.
    pub fn add_background(&mut self, template: &BackgroundTemplate) -> Result<NodeId, PreviewError> {
        let node = SceneNode::background(template, &self.node_context())?;
        let id = self.root.insert(node);
        self.registry.register_background(id);
        self.root.add_child(id);
        Ok(id)
    }

    /// Add a tile layer, or re-register an existing one
    ///
    /// The layer is attached to the scene root, the layer sequence is
    /// re-sorted by descending stacking order, and every tile of the layer is
    /// registered. Re-registering a node never duplicates it. A [`NodeRef`]
    /// issued by another surface fails with `UnknownNode`.
    pub fn add_tile_layer(&mut self, source: impl Into<TileLayerSource>) -> Result<NodeId, PreviewError> {
        let id = match source.into() {
            TileLayerSource::Template(template) => {
                let ctx = NodeContext::new(self.id, &self.catalog);
                self.root.insert_tile_layer(&template, &ctx)?
            }
            TileLayerSource::Node(NodeRef { surface, id }) => {
                if surface != self.id {
                    return Err(ConstructionFailure::UnknownNode(id).into());
                }
                let node = self.root.node(id).ok_or(ConstructionFailure::UnknownNode(id))?;
                if !node.is_tile_layer() {
                    return Err(ConstructionFailure::NotATileLayer(id).into());
                }
                id
            }
        };

        self.root.add_child(id);
        self.registry.register_tile_layer(id, &self.root);
        Ok(id)
    }

    /// Register an additional viewport
    ///
    /// The primary viewport is not affected.
    pub fn register_viewport(&mut self, viewport: Viewport) -> NodeId {
        let id = self.root.insert(SceneNode::viewport(viewport, self.id));
        self.registry.register_viewport(id);
        id
    }

    /// Position of a node on the surface
    ///
    /// Applies the parent chain and the editor placement, then snaps to the
    /// pixel grid when the surface rounds pixels.
    pub fn node_screen_position(&self, id: NodeId) -> Option<Vec2> {
        let local = self.root.local_position(id)?;
        let position = self.root.placement().apply_to_point(local);
        if self.config.round_pixels {
            Some(utils::round_to_pixel(position))
        } else {
            Some(position)
        }
    }

    /// Scope a node id to this surface
    pub fn node_ref(&self, id: NodeId) -> NodeRef {
        NodeRef { surface: self.id, id }
    }

    fn node_context(&self) -> NodeContext<'_> {
        NodeContext::new(self.id, &self.catalog)
    }

    /// Identifier nodes use to refer back to this surface
    pub fn id(&self) -> SurfaceId {
        self.id
    }

    /// Backend handle of this surface
    pub fn handle(&self) -> SurfaceHandle {
        self.handle
    }

    /// Resolved surface configuration
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// Display tree
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Scene root holding every node
    pub fn root(&self) -> &SceneRoot {
        &self.root
    }

    /// Camera
    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    /// Camera, for the editor to move
    pub fn camera_mut(&mut self) -> &mut Camera2D {
        &mut self.camera
    }

    /// The viewport matching the room's native size
    pub fn primary_viewport(&self) -> &Viewport {
        self.registry.viewports().primary()
    }

    /// Per-kind node indexes
    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Report from the initial composition
    pub fn composition_report(&self) -> &CompositionReport {
        &self.report
    }
}

impl CompositionTarget for PreviewSurface {
    fn add_background(&mut self, template: &BackgroundTemplate) -> Result<NodeId, PreviewError> {
        Self::add_background(self, template)
    }

    fn add_copy(&mut self, template: &CopyTemplate) -> Result<NodeId, ConstructionFailure> {
        let node = SceneNode::copy(template, &self.node_context())?;
        let id = self.root.insert(node);
        self.root.add_child(id);
        self.registry.register_copy(id);
        Ok(id)
    }

    fn add_tile_layer_template(&mut self, template: &TileLayerTemplate) -> Result<NodeId, PreviewError> {
        self.add_tile_layer(TileLayerSource::Template(template.clone()))
    }

    fn tile_count(&self, layer: NodeId) -> usize {
        self.root.node(layer).map_or(0, |node| node.children().len())
    }
}

impl std::fmt::Debug for PreviewSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewSurface")
            .field("id", &self.id)
            .field("handle", &self.handle)
            .field("room", &self.room_name)
            .field("nodes", &self.root.node_count())
            .finish_non_exhaustive()
    }
}
