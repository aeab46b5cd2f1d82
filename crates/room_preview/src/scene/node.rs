//! Scene nodes
//!
//! Every entity in a preview is a [`SceneNode`]: common placement data plus a
//! [`NodeKind`] carrying the kind-specific template data. Kinds form a closed
//! set and are dispatched with `match`; what a kind can do is described by its
//! [`NodeCapabilities`].

use bitflags::bitflags;
use image::Rgba;
use thiserror::Error;

use crate::assets::{AssetCatalog, TextureInfo};
use crate::foundation::collections::NodeId;
use crate::foundation::math::{Transform2D, Vec2};
use crate::room::{self, BackgroundTemplate, ColorError, CopyTemplate, TileTemplate};
use crate::scene::viewport::Viewport;

/// Identifies the preview surface a node belongs to
///
/// Nodes keep this instead of a reference to the surface; it is only ever
/// used to look up surface-wide context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

bitflags! {
    /// What a node kind supports
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NodeCapabilities: u8 {
        /// Has a meaningful transform
        const POSITIONABLE = 1 << 0;
        /// Produces draw calls
        const RENDERABLE = 1 << 1;
        /// Owns child nodes
        const CONTAINING = 1 << 2;
    }
}

/// A template could not be turned into a node
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConstructionFailure {
    /// Copy refers to an object template the catalog doesn't have
    #[error("Could not find object template with uid `{uid}`")]
    UnknownTemplate {
        /// Requested template uid
        uid: String,
    },

    /// Node refers to a texture the catalog doesn't have
    #[error("Could not find texture with uid `{uid}`")]
    UnknownTexture {
        /// Requested texture uid
        uid: String,
    },

    /// Tile frame outside of its tileset grid
    #[error("Frame {frame} is out of range for texture `{texture}` ({frames} frames)")]
    FrameOutOfRange {
        /// Texture uid
        texture: String,
        /// Requested frame
        frame: u32,
        /// Frames available
        frames: u32,
    },

    /// Tint string is not a color
    #[error("Invalid tint `{value}`: {source}")]
    InvalidTint {
        /// Raw tint value
        value: String,
        /// Parse failure
        source: ColorError,
    },

    /// Node id is not a tile layer
    #[error("Node {0:?} is not a tile layer")]
    NotATileLayer(NodeId),

    /// Node id does not belong to this surface
    #[error("Node {0:?} does not exist on this surface")]
    UnknownNode(NodeId),
}

/// Everything a node needs at construction time
#[derive(Debug, Clone, Copy)]
pub struct NodeContext<'a> {
    /// Owning surface
    pub surface: SurfaceId,
    /// Resolved assets
    pub catalog: &'a AssetCatalog,
}

impl<'a> NodeContext<'a> {
    /// Create a construction context
    pub fn new(surface: SurfaceId, catalog: &'a AssetCatalog) -> Self {
        Self { surface, catalog }
    }

    fn texture(&self, uid: &str) -> Result<&'a TextureInfo, ConstructionFailure> {
        self.catalog
            .texture(uid)
            .ok_or_else(|| ConstructionFailure::UnknownTexture { uid: uid.to_string() })
    }
}

/// An object instance
#[derive(Debug, Clone, PartialEq)]
pub struct CopyNode {
    /// Template the instance was built from
    pub template: CopyTemplate,
    /// Name of the object template
    pub object_name: String,
    /// Texture uid of the object template, if it has one
    pub texture: Option<String>,
    /// Parsed tint
    pub tint: Option<Rgba<u8>>,
}

/// A single tile
#[derive(Debug, Clone, PartialEq)]
pub struct TileNode {
    /// Template the tile was built from
    pub template: TileTemplate,
    /// Size of one tileset frame
    pub frame_size: (u32, u32),
    /// Parsed tint
    pub tint: Option<Rgba<u8>>,
}

/// A container of tiles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileLayerNode {
    /// Hidden layers are kept but not drawn
    pub hidden: bool,
    /// Tiles owned by this layer, in authoring order
    pub children: Vec<NodeId>,
}

/// A background layer
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundNode {
    /// Template the background was built from
    pub template: BackgroundTemplate,
    /// Size of the background texture
    pub texture_size: (u32, u32),
}

/// Kind-specific node data
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Object instance
    Copy(CopyNode),
    /// Tile inside a tile layer
    Tile(TileNode),
    /// Container of tiles
    TileLayer(TileLayerNode),
    /// Background layer
    Background(BackgroundNode),
    /// Viewport region
    Viewport(Viewport),
}

impl NodeKind {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Copy(_) => "copy",
            Self::Tile(_) => "tile",
            Self::TileLayer(_) => "tile layer",
            Self::Background(_) => "background",
            Self::Viewport(_) => "viewport",
        }
    }

    /// Capabilities of this kind
    pub fn capabilities(&self) -> NodeCapabilities {
        match self {
            Self::Copy(_) | Self::Tile(_) | Self::Background(_) => {
                NodeCapabilities::POSITIONABLE | NodeCapabilities::RENDERABLE
            }
            Self::TileLayer(_) => {
                NodeCapabilities::POSITIONABLE
                    | NodeCapabilities::RENDERABLE
                    | NodeCapabilities::CONTAINING
            }
            // Sized region only; its position comes from the camera
            Self::Viewport(_) => NodeCapabilities::empty(),
        }
    }
}

/// A live entity in the preview
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    kind: NodeKind,
    surface: SurfaceId,
    parent: Option<NodeId>,

    /// Placement relative to the parent
    pub transform: Transform2D,
    /// Stacking order among siblings; higher draws later
    pub z_index: i32,
    /// Opacity in 0..=1
    pub opacity: f32,
    /// Whether the node is drawn
    pub visible: bool,
}

impl SceneNode {
    fn new(kind: NodeKind, surface: SurfaceId) -> Self {
        Self {
            kind,
            surface,
            parent: None,
            transform: Transform2D::identity(),
            z_index: 0,
            opacity: 1.0,
            visible: true,
        }
    }

    /// Build an object instance
    ///
    /// Fails if the object template or its texture are missing from the
    /// catalog, or if the tint is not a color.
    pub fn copy(template: &CopyTemplate, ctx: &NodeContext<'_>) -> Result<Self, ConstructionFailure> {
        let object = ctx
            .catalog
            .template(&template.uid)
            .ok_or_else(|| ConstructionFailure::UnknownTemplate { uid: template.uid.clone() })?;

        if let Some(texture) = &object.texture {
            ctx.texture(texture)?;
        }

        let tint = parse_tint(template.tint.as_deref())?;

        let mut node = Self::new(
            NodeKind::Copy(CopyNode {
                template: template.clone(),
                object_name: object.name.clone(),
                texture: object.texture.clone(),
                tint,
            }),
            ctx.surface,
        );
        node.transform = Transform2D::from_position(Vec2::new(template.x, template.y))
            .with_scale(template.scale.into())
            .with_rotation_degrees(template.rotation);
        node.opacity = template.opacity;
        Ok(node)
    }

    /// Build a tile
    ///
    /// Fails if the tileset is missing, the frame is outside its grid, or the
    /// tint is not a color.
    pub fn tile(template: &TileTemplate, ctx: &NodeContext<'_>) -> Result<Self, ConstructionFailure> {
        let texture = ctx.texture(&template.texture)?;
        let frames = texture.frame_count();
        if template.frame >= frames {
            return Err(ConstructionFailure::FrameOutOfRange {
                texture: template.texture.clone(),
                frame: template.frame,
                frames,
            });
        }

        let tint = parse_tint(template.tint.as_deref())?;

        let mut node = Self::new(
            NodeKind::Tile(TileNode {
                template: template.clone(),
                frame_size: (texture.width, texture.height),
                tint,
            }),
            ctx.surface,
        );
        node.transform = Transform2D::from_position(Vec2::new(template.x, template.y))
            .with_scale(template.scale.into())
            .with_rotation_degrees(template.rotation);
        node.opacity = template.opacity;
        Ok(node)
    }

    /// Build an empty tile layer; tiles are attached by the scene root
    pub fn tile_layer(depth: i32, hidden: bool, surface: SurfaceId) -> Self {
        let mut node = Self::new(
            NodeKind::TileLayer(TileLayerNode {
                hidden,
                children: Vec::new(),
            }),
            surface,
        );
        node.z_index = depth;
        node.visible = !hidden;
        node
    }

    /// Build a background
    pub fn background(
        template: &BackgroundTemplate,
        ctx: &NodeContext<'_>,
    ) -> Result<Self, ConstructionFailure> {
        let texture = ctx.texture(&template.texture)?;

        let mut node = Self::new(
            NodeKind::Background(BackgroundNode {
                template: template.clone(),
                texture_size: (texture.width, texture.height),
            }),
            ctx.surface,
        );
        node.transform = Transform2D::from_position(Vec2::new(template.shift_x, template.shift_y))
            .with_scale(Vec2::new(template.scale_x, template.scale_y));
        node.z_index = template.depth;
        Ok(node)
    }

    /// Build a viewport node
    pub fn viewport(viewport: Viewport, surface: SurfaceId) -> Self {
        Self::new(NodeKind::Viewport(viewport), surface)
    }

    /// Kind-specific data
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Capabilities of this node's kind
    pub fn capabilities(&self) -> NodeCapabilities {
        self.kind.capabilities()
    }

    /// Surface this node belongs to
    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    /// Containing node, if any
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    /// Children of a containing node; empty for every other kind
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::TileLayer(layer) => &layer.children,
            _ => &[],
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match &mut self.kind {
            NodeKind::TileLayer(layer) => Some(&mut layer.children),
            _ => None,
        }
    }

    /// Whether this node is a tile layer
    pub fn is_tile_layer(&self) -> bool {
        matches!(self.kind, NodeKind::TileLayer(_))
    }
}

fn parse_tint(tint: Option<&str>) -> Result<Option<Rgba<u8>>, ConstructionFailure> {
    tint.map(|value| {
        room::parse_color(value).map_err(|source| ConstructionFailure::InvalidTint {
            value: value.to_string(),
            source,
        })
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ObjectTemplate;
    use approx::assert_relative_eq;

    const SURFACE: SurfaceId = SurfaceId(7);

    fn catalog() -> AssetCatalog {
        AssetCatalog::new()
            .with_texture("tex-hero", TextureInfo::new("Hero", 32, 32))
            .with_texture("tex-tiles", TextureInfo::new("Tiles", 16, 16).with_grid(4, 2))
            .with_template("tpl-hero", ObjectTemplate::new("Hero", Some("tex-hero")))
            .with_template("tpl-ghost", ObjectTemplate::new("Ghost", Some("tex-missing")))
            .with_template("tpl-trigger", ObjectTemplate::new("Trigger", None))
    }

    #[test]
    fn test_copy_takes_template_placement() {
        let catalog = catalog();
        let ctx = NodeContext::new(SURFACE, &catalog);
        let mut template = CopyTemplate::new("tpl-hero", 12.0, 34.0);
        template.opacity = 0.5;
        template.tint = Some("#FF0000".to_string());

        let node = SceneNode::copy(&template, &ctx).unwrap();

        assert_relative_eq!(node.transform.position.x, 12.0);
        assert_relative_eq!(node.transform.position.y, 34.0);
        assert_relative_eq!(node.opacity, 0.5);
        assert_eq!(node.z_index, 0);
        assert_eq!(node.surface(), SURFACE);
        match node.kind() {
            NodeKind::Copy(copy) => {
                assert_eq!(copy.object_name, "Hero");
                assert_eq!(copy.tint, Some(Rgba([255, 0, 0, 255])));
            }
            other => panic!("expected a copy, got {}", other.name()),
        }
    }

    #[test]
    fn test_copy_without_texture_is_allowed() {
        let catalog = catalog();
        let ctx = NodeContext::new(SURFACE, &catalog);
        assert!(SceneNode::copy(&CopyTemplate::new("tpl-trigger", 0.0, 0.0), &ctx).is_ok());
    }

    #[test]
    fn test_copy_failures() {
        let catalog = catalog();
        let ctx = NodeContext::new(SURFACE, &catalog);

        let err = SceneNode::copy(&CopyTemplate::new("tpl-nope", 0.0, 0.0), &ctx).unwrap_err();
        assert_eq!(err, ConstructionFailure::UnknownTemplate { uid: "tpl-nope".into() });

        let err = SceneNode::copy(&CopyTemplate::new("tpl-ghost", 0.0, 0.0), &ctx).unwrap_err();
        assert_eq!(err, ConstructionFailure::UnknownTexture { uid: "tex-missing".into() });

        let mut template = CopyTemplate::new("tpl-hero", 0.0, 0.0);
        template.tint = Some("red".into());
        let err = SceneNode::copy(&template, &ctx).unwrap_err();
        assert!(matches!(err, ConstructionFailure::InvalidTint { .. }));
    }

    #[test]
    fn test_tile_frame_range() {
        let catalog = catalog();
        let ctx = NodeContext::new(SURFACE, &catalog);

        assert!(SceneNode::tile(&TileTemplate::new("tex-tiles", 7, 0.0, 0.0), &ctx).is_ok());

        let err = SceneNode::tile(&TileTemplate::new("tex-tiles", 8, 0.0, 0.0), &ctx).unwrap_err();
        assert_eq!(
            err,
            ConstructionFailure::FrameOutOfRange {
                texture: "tex-tiles".into(),
                frame: 8,
                frames: 8,
            }
        );
    }

    #[test]
    fn test_background_uses_depth_as_z_index() {
        let catalog = catalog();
        let ctx = NodeContext::new(SURFACE, &catalog);
        let mut template = BackgroundTemplate::new("tex-hero", -3);
        template.shift_x = 4.0;

        let node = SceneNode::background(&template, &ctx).unwrap();
        assert_eq!(node.z_index, -3);
        assert_relative_eq!(node.transform.position.x, 4.0);

        let err = SceneNode::background(&BackgroundTemplate::new("", 0), &ctx).unwrap_err();
        assert_eq!(err, ConstructionFailure::UnknownTexture { uid: String::new() });
    }

    #[test]
    fn test_capabilities_by_kind() {
        let layer = SceneNode::tile_layer(2, true, SURFACE);
        assert!(layer.capabilities().contains(NodeCapabilities::CONTAINING));
        assert!(!layer.visible);
        assert_eq!(layer.z_index, 2);

        let viewport = SceneNode::viewport(Viewport::new(320, 240), SURFACE);
        assert!(viewport.capabilities().is_empty());
        assert!(viewport.children().is_empty());
    }
}
