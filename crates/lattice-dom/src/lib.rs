//! Lattice DOM - document tree runtime
//!
//! Garbage-collected node tree for one execution context. The tree
//! carries no locking: all access is confined to the UI thread, and
//! other threads reach it indirectly through `lattice-foundation`'s
//! task queue.

mod arena;
mod document;
mod exception;
mod factory;
mod name;
mod node;
mod trace;

pub use arena::NodeArena;
pub use document::Document;
pub use exception::{DomError, DomResult, ExceptionState};
pub use factory::{ElementFactory, HtmlElementFactory};
pub use name::is_valid_name;
pub use node::{ElementData, ElementKind, Node, NodeData, NodeType};
pub use trace::{GcVisitor, Trace, collect};

/// Node identifier (index into the document's arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
