//! Specialized collection types

use slotmap::SecondaryMap;

slotmap::new_key_type! {
    /// Stable handle to a node stored in the scene arena
    pub struct NodeId;
}

/// Handle-based map using slot map for stable node references
pub type NodeMap<T> = slotmap::SlotMap<NodeId, T>;

/// Insertion-ordered set of node handles
///
/// Membership checks go through a secondary map so that inserting an
/// already-present handle is a cheap no-op, while iteration still follows
/// insertion order.
#[derive(Debug, Clone, Default)]
pub struct NodeSet {
    order: Vec<NodeId>,
    members: SecondaryMap<NodeId, ()>,
}

impl NodeSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a handle, returning `false` if it was already present
    pub fn insert(&mut self, id: NodeId) -> bool {
        if self.members.contains_key(id) {
            return false;
        }
        self.members.insert(id, ());
        self.order.push(id);
        true
    }

    /// Check whether a handle is present
    pub fn contains(&self, id: NodeId) -> bool {
        self.members.contains_key(id)
    }

    /// Number of handles in the set
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate handles in insertion order
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.order.iter().copied()
    }

    /// Remove every handle
    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }
}

impl Extend<NodeId> for NodeSet {
    fn extend<I: IntoIterator<Item = NodeId>>(&mut self, iter: I) {
        for id in iter {
            self.insert(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_set_ignores_duplicates() {
        let mut arena: NodeMap<u32> = NodeMap::with_key();
        let a = arena.insert(1);
        let b = arena.insert(2);

        let mut set = NodeSet::new();
        assert!(set.insert(a));
        assert!(set.insert(b));
        assert!(!set.insert(a));

        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn test_node_set_extend_and_clear() {
        let mut arena: NodeMap<u32> = NodeMap::with_key();
        let ids: Vec<_> = (0..4).map(|i| arena.insert(i)).collect();

        let mut set = NodeSet::new();
        set.extend(ids.iter().copied());
        set.extend(ids.iter().copied());
        assert_eq!(set.len(), 4);
        assert!(set.contains(ids[2]));

        set.clear();
        assert!(set.is_empty());
        assert!(!set.contains(ids[2]));
    }
}
