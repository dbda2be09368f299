//! Node arena
//!
//! Slotted storage for nodes. Ids are stable for as long as the node is
//! live; slots freed by the collector go on a free list and their
//! indices are reissued to later allocations.

use crate::{Node, NodeId};

#[derive(Debug)]
enum Slot {
    Occupied(Node),
    Vacant,
}

/// Arena owning every node of one document.
#[derive(Debug, Default)]
pub struct NodeArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl NodeArena {
    /// Create a new empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node, reusing a vacant slot when one exists.
    pub fn alloc(&mut self, node: Node) -> NodeId {
        if let Some(index) = self.free.pop() {
            self.slots[index as usize] = Slot::Occupied(node);
            NodeId(index)
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot::Occupied(node));
            NodeId(index)
        }
    }

    /// Get a node by id.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        match self.slots.get(id.index()) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    /// Get a mutable node by id.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        match self.slots.get_mut(id.index()) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    /// Release a slot back to the free list. No-op for vacant slots.
    pub(crate) fn free(&mut self, id: NodeId) {
        if let Some(slot) = self.slots.get_mut(id.index()) {
            if matches!(slot, Slot::Occupied(_)) {
                *slot = Slot::Vacant;
                self.free.push(id.0);
            }
        }
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Check if the arena holds no live nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total slot count, live or vacant. Bounds the id space.
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Iterate the ids of all live nodes.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            matches!(slot, Slot::Occupied(_)).then(|| NodeId(i as u32))
        })
    }
}
