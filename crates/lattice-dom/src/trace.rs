//! GC trace protocol
//!
//! Mark/sweep reachability over the node arena. Every node type reports
//! the references it owns through `Trace`; the sweep frees whatever was
//! never reported.

use crate::{Node, NodeArena, NodeId};

/// Visitor accumulating the reachable set during the mark phase.
pub struct GcVisitor {
    marked: Vec<bool>,
    worklist: Vec<NodeId>,
}

impl GcVisitor {
    fn with_capacity(slots: usize) -> Self {
        Self {
            marked: vec![false; slots],
            worklist: Vec::new(),
        }
    }

    /// Report one owned or co-owned node reference.
    pub fn visit(&mut self, id: NodeId) {
        if let Some(mark) = self.marked.get_mut(id.index()) {
            if !*mark {
                *mark = true;
                self.worklist.push(id);
            }
        }
    }

    fn is_marked(&self, id: NodeId) -> bool {
        self.marked.get(id.index()).copied().unwrap_or(false)
    }
}

/// Reachability reporting contract.
///
/// Implementations must forward to their base and report every
/// GC-visible reference they hold: children, cached lookups, auxiliary
/// state. A reference missed here gets a live node collected, so any
/// new owned `NodeId` field must be added to its type's `trace`.
pub trait Trace {
    fn trace(&self, visitor: &mut GcVisitor);
}

impl Trace for Node {
    fn trace(&self, visitor: &mut GcVisitor) {
        // Children are owned; the parent back-reference is not and must
        // not keep an otherwise-dead ancestor alive.
        for &child in self.children() {
            visitor.visit(child);
        }
    }
}

/// Mark from `roots`, then sweep every unreached node out of the arena.
/// Returns the number of nodes collected.
///
/// Live nodes whose parent was collected are left detached rather than
/// holding a dangling back-reference.
pub fn collect(arena: &mut NodeArena, roots: &[NodeId]) -> usize {
    let mut visitor = GcVisitor::with_capacity(arena.capacity());
    for &root in roots {
        visitor.visit(root);
    }
    while let Some(id) = visitor.worklist.pop() {
        if let Some(node) = arena.get(id) {
            node.trace(&mut visitor);
        }
    }

    let dead: Vec<NodeId> = arena.ids().filter(|&id| !visitor.is_marked(id)).collect();
    for &id in &dead {
        arena.free(id);
    }

    // Clear back-references into freed slots.
    let live: Vec<NodeId> = arena.ids().collect();
    for id in live {
        let parent_dead = arena
            .get(id)
            .and_then(Node::parent)
            .is_some_and(|p| !visitor.is_marked(p));
        if parent_dead {
            if let Some(node) = arena.get_mut(id) {
                node.parent = None;
            }
        }
    }

    if !dead.is_empty() {
        tracing::debug!("collected {} nodes, {} live", dead.len(), arena.len());
    }
    dead.len()
}
