//! Entity registry
//!
//! Per-kind indexes over the nodes of a preview. The registry never owns a
//! node; it holds arena keys that mirror what the scene root displays.
//!
//! Invariants kept after every insertion:
//! - No collection holds the same node twice.
//! - `tile_layers` is sorted by descending stacking order (stable).
//! - Every tile of a registered tile layer is in `tiles`.
//! - `backgrounds` keeps insertion order.

use std::cmp::Reverse;

use crate::foundation::collections::{NodeId, NodeSet};
use crate::scene::scene_graph::SceneRoot;
use crate::scene::viewport::{Viewport, ViewportRegistry};

/// Per-kind indexes over a preview's nodes
#[derive(Debug, Clone)]
pub struct EntityRegistry {
    copies: NodeSet,
    tiles: NodeSet,
    backgrounds: Vec<NodeId>,
    tile_layers: Vec<NodeId>,
    viewports: ViewportRegistry,
}

impl EntityRegistry {
    /// Create an empty registry around the primary viewport
    pub fn new(primary_viewport: Viewport) -> Self {
        Self {
            copies: NodeSet::new(),
            tiles: NodeSet::new(),
            backgrounds: Vec::new(),
            tile_layers: Vec::new(),
            viewports: ViewportRegistry::new(primary_viewport),
        }
    }

    /// Register an object instance
    pub fn register_copy(&mut self, id: NodeId) -> bool {
        self.copies.insert(id)
    }

    /// Append a background; backgrounds are never re-sorted
    pub fn register_background(&mut self, id: NodeId) -> bool {
        if self.backgrounds.contains(&id) {
            return false;
        }
        self.backgrounds.push(id);
        true
    }

    /// Register a tile layer and its tiles
    ///
    /// Re-registering a layer that is already present does not duplicate it.
    /// The layer sequence is re-sorted by descending stacking order, read
    /// from `root`, every time.
    pub fn register_tile_layer(&mut self, id: NodeId, root: &SceneRoot) {
        if !self.tile_layers.contains(&id) {
            self.tile_layers.push(id);
        }
        self.tile_layers.sort_by_key(|layer| Reverse(root.z_index(*layer)));

        if let Some(layer) = root.node(id) {
            self.tiles.extend(layer.children().iter().copied());
        }
    }

    /// Register an additional viewport node
    pub fn register_viewport(&mut self, id: NodeId) -> bool {
        self.viewports.insert(id)
    }

    /// Registered object instances
    pub fn copies(&self) -> &NodeSet {
        &self.copies
    }

    /// Registered tiles
    pub fn tiles(&self) -> &NodeSet {
        &self.tiles
    }

    /// Backgrounds in insertion order
    pub fn backgrounds(&self) -> &[NodeId] {
        &self.backgrounds
    }

    /// Tile layers, highest stacking order first
    pub fn tile_layers(&self) -> &[NodeId] {
        &self.tile_layers
    }

    /// Viewports
    pub fn viewports(&self) -> &ViewportRegistry {
        &self.viewports
    }

    /// Forget every registered node; the primary viewport stays
    pub fn clear(&mut self) {
        self.copies.clear();
        self.tiles.clear();
        self.backgrounds.clear();
        self.tile_layers.clear();
        self.viewports.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetCatalog, TextureInfo};
    use crate::room::{TileLayerTemplate, TileTemplate};
    use crate::scene::node::{NodeContext, SceneNode, SurfaceId};

    fn registry() -> EntityRegistry {
        EntityRegistry::new(Viewport::new(320, 240))
    }

    #[test]
    fn test_tile_layers_sorted_descending() {
        let mut root = SceneRoot::new();
        let mut registry = registry();

        let mut ids = Vec::new();
        for depth in [3, -5, 10, 3, 0] {
            let id = root.insert(SceneNode::tile_layer(depth, false, SurfaceId(1)));
            registry.register_tile_layer(id, &root);
            ids.push(id);
        }

        let depths: Vec<i32> = registry.tile_layers().iter().map(|id| root.z_index(*id)).collect();
        assert_eq!(depths, vec![10, 3, 3, 0, -5]);

        // Equal depths keep insertion order
        let threes: Vec<NodeId> = registry
            .tile_layers()
            .iter()
            .copied()
            .filter(|id| root.z_index(*id) == 3)
            .collect();
        assert_eq!(threes, vec![ids[0], ids[3]]);
    }

    #[test]
    fn test_reregistering_layer_does_not_duplicate() {
        let mut root = SceneRoot::new();
        let mut registry = registry();
        let id = root.insert(SceneNode::tile_layer(1, false, SurfaceId(1)));

        registry.register_tile_layer(id, &root);
        registry.register_tile_layer(id, &root);

        assert_eq!(registry.tile_layers(), &[id]);
    }

    #[test]
    fn test_layer_tiles_are_registered() {
        let catalog = AssetCatalog::new().with_texture("tex", TextureInfo::new("t", 8, 8).with_grid(2, 1));
        let ctx = NodeContext::new(SurfaceId(1), &catalog);
        let template = TileLayerTemplate::new(0)
            .with_tile(TileTemplate::new("tex", 0, 0.0, 0.0))
            .with_tile(TileTemplate::new("tex", 1, 8.0, 0.0));

        let mut root = SceneRoot::new();
        let mut registry = registry();
        let layer = root.insert_tile_layer(&template, &ctx).unwrap();

        registry.register_tile_layer(layer, &root);
        registry.register_tile_layer(layer, &root);

        assert_eq!(registry.tiles().len(), 2);
        for tile in root.node(layer).unwrap().children() {
            assert!(registry.tiles().contains(*tile));
        }
    }

    #[test]
    fn test_backgrounds_keep_insertion_order() {
        let mut root = SceneRoot::new();
        let mut registry = registry();
        let first = root.insert(SceneNode::tile_layer(9, false, SurfaceId(1)));
        let second = root.insert(SceneNode::tile_layer(-9, false, SurfaceId(1)));

        assert!(registry.register_background(first));
        assert!(registry.register_background(second));
        assert!(!registry.register_background(first));

        assert_eq!(registry.backgrounds(), &[first, second]);
    }

    #[test]
    fn test_clear_keeps_primary_viewport() {
        let mut root = SceneRoot::new();
        let mut registry = registry();
        let copy = root.insert(SceneNode::tile_layer(0, false, SurfaceId(1)));
        registry.register_copy(copy);

        registry.clear();

        assert!(registry.copies().is_empty());
        assert_eq!(registry.viewports().primary(), &Viewport::new(320, 240));
    }
}
