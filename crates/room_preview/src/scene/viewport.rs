//! Viewports
//!
//! A viewport is a rectangular view region. It has a size but no position;
//! where it looks is decided by the camera.

use crate::foundation::collections::{NodeId, NodeSet};

/// Rectangular view region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Width in room pixels
    pub width: u32,
    /// Height in room pixels
    pub height: u32,
}

impl Viewport {
    /// Create a viewport
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Set of viewports with one distinguished primary member
///
/// The primary viewport matches the room's native size. It is held in its
/// own field and is never a member of the set.
#[derive(Debug, Clone)]
pub struct ViewportRegistry {
    primary: Viewport,
    members: NodeSet,
}

impl ViewportRegistry {
    /// Create a registry around the primary viewport
    pub fn new(primary: Viewport) -> Self {
        Self {
            primary,
            members: NodeSet::new(),
        }
    }

    /// The primary viewport
    pub fn primary(&self) -> &Viewport {
        &self.primary
    }

    /// Add a viewport node; returns `false` if it was already registered
    pub fn insert(&mut self, id: NodeId) -> bool {
        self.members.insert(id)
    }

    /// Registered viewport nodes
    pub fn members(&self) -> &NodeSet {
        &self.members
    }

    /// Forget every registered viewport; the primary stays
    pub fn clear(&mut self) {
        self.members.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::collections::NodeMap;

    #[test]
    fn test_primary_is_not_a_member() {
        let registry = ViewportRegistry::new(Viewport::new(320, 240));
        assert_eq!(registry.primary(), &Viewport::new(320, 240));
        assert!(registry.members().is_empty());
    }

    #[test]
    fn test_insert_is_set_like() {
        let mut arena: NodeMap<()> = NodeMap::with_key();
        let id = arena.insert(());

        let mut registry = ViewportRegistry::new(Viewport::new(16, 9));
        assert!(registry.insert(id));
        assert!(!registry.insert(id));
        assert_eq!(registry.members().len(), 1);
    }
}
