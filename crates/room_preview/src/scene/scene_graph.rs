//! Scene root and stage
//!
//! The [`SceneRoot`] owns every node of a preview in a slot map arena and
//! keeps the ordered list of top-level children the room is drawn from. The
//! [`Stage`] is the surface's display tree above it: camera, solid fill, and
//! the scene root itself, in draw order.

use image::Rgba;

use crate::core::RoomPlacement;
use crate::foundation::collections::{NodeId, NodeMap};
use crate::foundation::math::{Transform2D, Vec2};
use crate::room::TileLayerTemplate;
use crate::scene::node::{ConstructionFailure, NodeContext, SceneNode};

/// Container holding all composed content for one room
#[derive(Debug, Clone, Default)]
pub struct SceneRoot {
    /// Every node, including tiles owned by layers
    nodes: NodeMap<SceneNode>,

    /// Top-level children in insertion order
    children: Vec<NodeId>,

    /// Sort children by stacking order when drawing
    sortable_children: bool,

    /// Editor pan/zoom
    placement: Transform2D,
}

impl SceneRoot {
    /// Create an empty scene root
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable draw-time sorting by stacking order
    pub fn set_sortable_children(&mut self, sortable: bool) {
        self.sortable_children = sortable;
    }

    /// Whether children are sorted by stacking order when drawing
    pub fn sortable_children(&self) -> bool {
        self.sortable_children
    }

    /// Apply the editor's pan/zoom
    pub fn apply_placement(&mut self, placement: RoomPlacement) {
        self.placement = Transform2D::from_position(Vec2::new(placement.x, placement.y))
            .with_scale(Vec2::new(placement.scale, placement.scale));
    }

    /// Current pan/zoom
    pub fn placement(&self) -> &Transform2D {
        &self.placement
    }

    /// Store a node in the arena without attaching it
    pub fn insert(&mut self, node: SceneNode) -> NodeId {
        self.nodes.insert(node)
    }

    /// Build a tile layer and its tiles from a template
    ///
    /// Every tile is built before anything is stored, so a failing tile
    /// leaves the arena untouched.
    pub fn insert_tile_layer(
        &mut self,
        template: &TileLayerTemplate,
        ctx: &NodeContext<'_>,
    ) -> Result<NodeId, ConstructionFailure> {
        let tiles = template
            .tiles
            .iter()
            .map(|tile| SceneNode::tile(tile, ctx))
            .collect::<Result<Vec<_>, _>>()?;

        let layer = self.insert(SceneNode::tile_layer(template.depth, template.hidden, ctx.surface));

        let mut children = Vec::with_capacity(tiles.len());
        for mut tile in tiles {
            tile.set_parent(Some(layer));
            children.push(self.nodes.insert(tile));
        }

        if let Some(slot) = self.nodes.get_mut(layer).and_then(SceneNode::children_mut) {
            *slot = children;
        }

        Ok(layer)
    }

    /// Attach a node as the last top-level child
    ///
    /// A node that is already attached moves to the end instead of appearing
    /// twice. Returns `false` if the node is not in the arena.
    pub fn add_child(&mut self, id: NodeId) -> bool {
        if !self.nodes.contains_key(id) {
            return false;
        }
        self.children.retain(|child| *child != id);
        self.children.push(id);
        log::debug!(
            "Attached {} {:?} to scene root ({} children)",
            self.nodes[id].kind().name(),
            id,
            self.children.len()
        );
        true
    }

    /// Top-level children in insertion order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether a node is a top-level child
    pub fn has_child(&self, id: NodeId) -> bool {
        self.children.contains(&id)
    }

    /// Top-level children in draw order
    ///
    /// With sorting enabled this is a stable ascending sort by stacking order,
    /// so equal values keep insertion order.
    pub fn draw_order(&self) -> Vec<NodeId> {
        let mut order = self.children.clone();
        if self.sortable_children {
            order.sort_by_key(|id| self.z_index(*id));
        }
        order
    }

    /// Look up a node
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    /// Look up a node mutably
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id)
    }

    /// Stacking order of a node; zero for unknown ids
    pub fn z_index(&self, id: NodeId) -> i32 {
        self.nodes.get(id).map_or(0, |node| node.z_index)
    }

    /// Number of nodes in the arena
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Position of a node in scene-root space, following its parents
    pub fn local_position(&self, id: NodeId) -> Option<Vec2> {
        let mut node = self.nodes.get(id)?;
        let mut position = node.transform.position;
        while let Some(parent) = node.parent() {
            node = self.nodes.get(parent)?;
            position += node.transform.position;
        }
        Some(position)
    }

    /// Drop every node
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.children.clear();
    }
}

/// Solid rectangle drawn beneath the room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolidFill {
    /// Fill color
    pub color: Rgba<u8>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Top-level display entries of a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageChild {
    /// Camera transform
    Camera,
    /// Room-sized solid fill
    Fill(SolidFill),
    /// The scene root
    Room,
}

/// Display tree of a surface
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stage {
    children: Vec<StageChild>,
}

impl Stage {
    /// Create an empty stage
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a child; later children draw on top
    pub fn add_child(&mut self, child: StageChild) {
        self.children.push(child);
    }

    /// Children in draw order
    pub fn children(&self) -> &[StageChild] {
        &self.children
    }

    /// The solid fill, if one was added
    pub fn fill(&self) -> Option<&SolidFill> {
        self.children.iter().find_map(|child| match child {
            StageChild::Fill(fill) => Some(fill),
            _ => None,
        })
    }

    fn position_of(&self, wanted: impl Fn(&StageChild) -> bool) -> Option<usize> {
        self.children.iter().position(wanted)
    }

    /// Whether the fill draws before the scene root
    pub fn fill_is_beneath_room(&self) -> bool {
        match (
            self.position_of(|c| matches!(c, StageChild::Fill(_))),
            self.position_of(|c| matches!(c, StageChild::Room)),
        ) {
            (Some(fill), Some(room)) => fill < room,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetCatalog, TextureInfo};
    use crate::room::TileTemplate;
    use crate::scene::node::SurfaceId;
    use approx::assert_relative_eq;

    fn catalog() -> AssetCatalog {
        AssetCatalog::new().with_texture("tex-tiles", TextureInfo::new("Tiles", 16, 16).with_grid(2, 2))
    }

    #[test]
    fn test_insert_tile_layer_builds_children() {
        let catalog = catalog();
        let ctx = NodeContext::new(SurfaceId(1), &catalog);
        let template = TileLayerTemplate::new(5)
            .with_tile(TileTemplate::new("tex-tiles", 0, 0.0, 0.0))
            .with_tile(TileTemplate::new("tex-tiles", 3, 16.0, 0.0));

        let mut root = SceneRoot::new();
        let layer = root.insert_tile_layer(&template, &ctx).unwrap();

        let children = root.node(layer).unwrap().children().to_vec();
        assert_eq!(children.len(), 2);
        assert_eq!(root.node_count(), 3);
        for child in children {
            assert_eq!(root.node(child).unwrap().parent(), Some(layer));
        }
    }

    #[test]
    fn test_failing_tile_leaves_arena_untouched() {
        let catalog = catalog();
        let ctx = NodeContext::new(SurfaceId(1), &catalog);
        let template = TileLayerTemplate::new(0)
            .with_tile(TileTemplate::new("tex-tiles", 0, 0.0, 0.0))
            .with_tile(TileTemplate::new("tex-tiles", 99, 0.0, 0.0));

        let mut root = SceneRoot::new();
        assert!(root.insert_tile_layer(&template, &ctx).is_err());
        assert_eq!(root.node_count(), 0);
    }

    #[test]
    fn test_add_child_moves_instead_of_duplicating() {
        let mut root = SceneRoot::new();
        let a = root.insert(SceneNode::tile_layer(0, false, SurfaceId(1)));
        let b = root.insert(SceneNode::tile_layer(0, false, SurfaceId(1)));

        assert!(root.add_child(a));
        assert!(root.add_child(b));
        assert!(root.add_child(a));

        assert_eq!(root.children(), &[b, a]);
    }

    #[test]
    fn test_draw_order_is_stable_by_z_index() {
        let mut root = SceneRoot::new();
        root.set_sortable_children(true);
        let high = root.insert(SceneNode::tile_layer(10, false, SurfaceId(1)));
        let low_first = root.insert(SceneNode::tile_layer(-1, false, SurfaceId(1)));
        let low_second = root.insert(SceneNode::tile_layer(-1, false, SurfaceId(1)));
        for id in [high, low_first, low_second] {
            root.add_child(id);
        }

        assert_eq!(root.draw_order(), vec![low_first, low_second, high]);

        root.set_sortable_children(false);
        assert_eq!(root.draw_order(), vec![high, low_first, low_second]);
    }

    #[test]
    fn test_local_position_follows_parent() {
        let catalog = catalog();
        let ctx = NodeContext::new(SurfaceId(1), &catalog);
        let template = TileLayerTemplate::new(0).with_tile(TileTemplate::new("tex-tiles", 0, 8.0, 4.0));

        let mut root = SceneRoot::new();
        let layer = root.insert_tile_layer(&template, &ctx).unwrap();
        root.node_mut(layer).unwrap().transform.position = Vec2::new(100.0, 50.0);
        let tile = root.node(layer).unwrap().children()[0];

        let position = root.local_position(tile).unwrap();
        assert_relative_eq!(position.x, 108.0);
        assert_relative_eq!(position.y, 54.0);
    }

    #[test]
    fn test_stage_fill_order() {
        let fill = SolidFill {
            color: Rgba([0x11, 0x22, 0x33, 255]),
            width: 4,
            height: 4,
        };

        let mut stage = Stage::new();
        stage.add_child(StageChild::Camera);
        stage.add_child(StageChild::Fill(fill));
        stage.add_child(StageChild::Room);

        assert_eq!(stage.fill(), Some(&fill));
        assert!(stage.fill_is_beneath_room());

        let mut ui_stage = Stage::new();
        ui_stage.add_child(StageChild::Camera);
        ui_stage.add_child(StageChild::Room);
        assert!(ui_stage.fill().is_none());
        assert!(!ui_stage.fill_is_beneath_room());
    }
}
