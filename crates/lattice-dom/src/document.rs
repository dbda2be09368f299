//! Document - root container for one execution context
//!
//! Owns the node arena and the document root, enforces document-level
//! containment rules, and exposes the node factory operations.

use lattice_foundation::ContextId;

use crate::arena::NodeArena;
use crate::exception::{DomError, DomResult, ExceptionState};
use crate::factory::{ElementFactory, HtmlElementFactory};
use crate::name::is_valid_name;
use crate::node::{ElementKind, Node, NodeType};
use crate::{NodeId, trace};

/// The distinguished root container, one per execution context.
pub struct Document {
    arena: NodeArena,
    root: NodeId,
    context: ContextId,
    factory: Box<dyn ElementFactory>,
}

impl Document {
    /// Create an empty document with the standard HTML element factory.
    pub fn new(context: ContextId) -> Self {
        Self::with_factory(context, Box::new(HtmlElementFactory::new()))
    }

    /// Create an empty document with a caller-supplied element factory.
    pub fn with_factory(context: ContextId, factory: Box<dyn ElementFactory>) -> Self {
        let mut arena = NodeArena::new();
        let root = arena.alloc(Node::document());
        Self {
            arena,
            root,
            context,
            factory,
        }
    }

    /// Owning execution context.
    pub fn context(&self) -> ContextId {
        self.context
    }

    /// Id of the document root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.arena.get(id)
    }

    /// Number of live nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    // --- node construction ---

    /// Create an element for a validated tag name.
    ///
    /// Invalid names are reported through the exception sink and yield
    /// no node. Names the factory has no mapping for fall back to an
    /// unknown element carrying the literal tag; that path never fails.
    pub fn create_element(
        &mut self,
        name: &str,
        exception_state: &mut ExceptionState,
    ) -> Option<NodeId> {
        if !is_valid_name(name) {
            exception_state.throw(DomError::Internal(format!(
                "The tag name provided ('{name}') is not a valid name."
            )));
            return None;
        }

        let kind = self.factory.create(name).unwrap_or(ElementKind::Unknown);
        tracing::debug!("createElement <{}> as {:?}", name, kind);
        Some(self.arena.alloc(Node::element(name, kind)))
    }

    /// Create a text node. Text content has no grammar constraint here.
    pub fn create_text_node(&mut self, value: &str) -> NodeId {
        self.arena.alloc(Node::text(value))
    }

    /// Create a comment node.
    pub fn create_comment(&mut self, data: &str) -> NodeId {
        self.arena.alloc(Node::comment(data))
    }

    /// Create a document fragment node.
    pub fn create_document_fragment(&mut self) -> NodeId {
        self.arena.alloc(Node::document_fragment())
    }

    /// Create a DOCTYPE node.
    pub fn create_document_type(&mut self, name: &str) -> NodeId {
        self.arena.alloc(Node::doctype(name))
    }

    // --- containment ---

    /// Document-level containment rule, re-evaluated against the
    /// current child set on every call.
    ///
    /// A document holds at most one element and one DOCTYPE child, any
    /// number of comments, and nothing else.
    pub fn child_type_allowed(&self, child_type: NodeType) -> bool {
        match child_type {
            NodeType::Attribute
            | NodeType::DocumentFragment
            | NodeType::Document
            | NodeType::Text => false,
            NodeType::Comment => true,
            NodeType::DocumentType | NodeType::Element => !self
                .children_of(self.root)
                .iter()
                .any(|&c| self.node_type_of(c) == Some(child_type)),
        }
    }

    // --- tree mutation ---

    /// Append `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` under `parent`, before `reference` (or at the end
    /// when no reference is given). The child is detached from any
    /// previous parent first.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> DomResult<NodeId> {
        if self.arena.get(parent).is_none() || self.arena.get(child).is_none() {
            return Err(DomError::NotFound);
        }
        if child == parent || self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest(
                "a node may not be inserted under itself or its descendant".to_string(),
            ));
        }

        let child_type = self.node_type_of(child).ok_or(DomError::NotFound)?;
        let allowed = if parent == self.root {
            self.child_type_allowed(child_type)
        } else {
            self.arena
                .get(parent)
                .is_some_and(|p| p.child_type_allowed(child_type))
        };
        if !allowed {
            return Err(DomError::HierarchyRequest(format!(
                "{child_type:?} is not an allowed child here"
            )));
        }

        if let Some(reference) = reference {
            if !self.children_of(parent).contains(&reference) {
                return Err(DomError::NotAChild);
            }
            // Inserting a node before itself leaves the tree unchanged.
            if reference == child {
                return Ok(child);
            }
        }

        // Detach before computing the slot: the child may already sit
        // under this parent, shifting later positions.
        self.detach(child);
        let position = match reference {
            Some(reference) => self
                .children_of(parent)
                .iter()
                .position(|&c| c == reference)
                .ok_or(DomError::NotAChild)?,
            None => self.children_of(parent).len(),
        };
        if let Some(parent_node) = self.arena.get_mut(parent) {
            parent_node.children.insert(position, child);
        }
        if let Some(child_node) = self.arena.get_mut(child) {
            child_node.parent = Some(parent);
        }
        tracing::trace!("inserted {:?} under {:?} at {}", child, parent, position);
        Ok(child)
    }

    /// Remove `child` from `parent`. The node stays in the arena until
    /// the collector finds it unreachable.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        if self.arena.get(parent).is_none() || self.arena.get(child).is_none() {
            return Err(DomError::NotFound);
        }
        if self.arena.get(child).and_then(Node::parent) != Some(parent) {
            return Err(DomError::NotAChild);
        }
        self.detach(child);
        Ok(child)
    }

    fn detach(&mut self, child: NodeId) {
        let Some(old_parent) = self.arena.get(child).and_then(Node::parent) else {
            return;
        };
        if let Some(parent_node) = self.arena.get_mut(old_parent) {
            parent_node.children.retain(|&c| c != child);
        }
        if let Some(child_node) = self.arena.get_mut(child) {
            child_node.parent = None;
        }
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.arena.get(id).and_then(Node::parent);
        }
        false
    }

    // --- structural queries ---

    /// The document's single element child, if one is attached.
    pub fn document_element(&self) -> Option<NodeId> {
        self.children_of(self.root)
            .iter()
            .copied()
            .find(|&c| self.node_type_of(c) == Some(NodeType::Element))
    }

    /// First body-kind child of the document element, defined only when
    /// the document element is the html root kind.
    pub fn body(&self) -> Option<NodeId> {
        let de = self.document_element()?;
        self.arena.get(de)?.as_element_of(ElementKind::Html)?;
        self.first_child_of_kind(de, ElementKind::Body)
    }

    /// First head-kind child of the document element, or none when no
    /// document element exists.
    pub fn head(&self) -> Option<NodeId> {
        let de = self.document_element()?;
        self.first_child_of_kind(de, ElementKind::Head)
    }

    fn first_child_of_kind(&self, parent: NodeId, kind: ElementKind) -> Option<NodeId> {
        self.children_of(parent).iter().copied().find(|&c| {
            self.arena
                .get(c)
                .is_some_and(|n| n.as_element_of(kind).is_some())
        })
    }

    fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.arena.get(id).map_or(&[], Node::children)
    }

    fn node_type_of(&self, id: NodeId) -> Option<NodeType> {
        self.arena.get(id).map(Node::node_type)
    }

    // --- node identity ---

    pub fn node_name(&self) -> &'static str {
        "#document"
    }

    pub fn node_value(&self) -> &'static str {
        ""
    }

    pub fn node_type(&self) -> NodeType {
        NodeType::Document
    }

    /// Documents are not cloneable in this model.
    pub fn clone_node(&self, _deep: bool) -> Option<NodeId> {
        None
    }

    // --- garbage collection ---

    /// Free every node unreachable from the document root or the given
    /// externally held handles. Returns the number collected.
    pub fn collect_garbage(&mut self, external_roots: &[NodeId]) -> usize {
        let mut roots = Vec::with_capacity(external_roots.len() + 1);
        roots.push(self.root);
        roots.extend_from_slice(external_roots);
        trace::collect(&mut self.arena, &roots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        Document::new(ContextId(1))
    }

    #[test]
    fn test_create_element_known_tag() {
        let mut document = doc();
        let mut exceptions = ExceptionState::new();

        let div = document.create_element("div", &mut exceptions).unwrap();
        assert!(!exceptions.has_exception());

        let node = document.node(div).unwrap();
        assert_eq!(node.node_type(), NodeType::Element);
        assert_eq!(node.node_name(), "div");
        // Freshly created nodes are detached.
        assert_eq!(node.parent(), None);
    }

    #[test]
    fn test_create_element_invalid_name() {
        let mut document = doc();
        let mut exceptions = ExceptionState::new();

        assert!(document.create_element("", &mut exceptions).is_none());
        assert!(exceptions.has_exception());
        let err = exceptions.take().unwrap();
        assert!(err.to_string().contains("not a valid name"));

        assert!(document.create_element("1div", &mut exceptions).is_none());
        assert!(exceptions.has_exception());
    }

    #[test]
    fn test_create_element_unknown_tag_falls_back() {
        let mut document = doc();
        let mut exceptions = ExceptionState::new();

        let node_id = document
            .create_element("frobnicate", &mut exceptions)
            .unwrap();
        assert!(!exceptions.has_exception());

        let element = document.node(node_id).unwrap().as_element().unwrap();
        assert_eq!(element.kind, ElementKind::Unknown);
        assert_eq!(element.tag, "frobnicate");
    }

    #[test]
    fn test_document_accepts_one_element_child() {
        let mut document = doc();
        let mut exceptions = ExceptionState::new();

        assert!(document.child_type_allowed(NodeType::Element));
        let html = document.create_element("html", &mut exceptions).unwrap();
        document.append_child(document.root(), html).unwrap();

        assert!(!document.child_type_allowed(NodeType::Element));
        let second = document.create_element("div", &mut exceptions).unwrap();
        assert!(matches!(
            document.append_child(document.root(), second),
            Err(DomError::HierarchyRequest(_))
        ));
    }

    #[test]
    fn test_document_accepts_one_doctype() {
        let mut document = doc();

        assert!(document.child_type_allowed(NodeType::DocumentType));
        let doctype = document.create_document_type("html");
        document.append_child(document.root(), doctype).unwrap();
        assert!(!document.child_type_allowed(NodeType::DocumentType));
    }

    #[test]
    fn test_document_accepts_unlimited_comments() {
        let mut document = doc();

        for i in 0..3 {
            let comment = document.create_comment(&format!("c{i}"));
            document.append_child(document.root(), comment).unwrap();
            assert!(document.child_type_allowed(NodeType::Comment));
        }
    }

    #[test]
    fn test_document_refuses_text_and_fragment_children() {
        let mut document = doc();

        assert!(!document.child_type_allowed(NodeType::Text));
        assert!(!document.child_type_allowed(NodeType::Attribute));
        assert!(!document.child_type_allowed(NodeType::Document));
        assert!(!document.child_type_allowed(NodeType::DocumentFragment));

        let text = document.create_text_node("loose");
        assert!(document.append_child(document.root(), text).is_err());
    }

    #[test]
    fn test_body_and_head_queries() {
        let mut document = doc();
        let mut exceptions = ExceptionState::new();

        let html = document.create_element("html", &mut exceptions).unwrap();
        document.append_child(document.root(), html).unwrap();
        assert_eq!(document.body(), None);
        assert_eq!(document.head(), None);

        let head = document.create_element("head", &mut exceptions).unwrap();
        let body = document.create_element("body", &mut exceptions).unwrap();
        document.append_child(html, head).unwrap();
        document.append_child(html, body).unwrap();

        assert_eq!(document.head(), Some(head));
        assert_eq!(document.body(), Some(body));
    }

    #[test]
    fn test_body_requires_html_root_kind() {
        let mut document = doc();
        let mut exceptions = ExceptionState::new();

        // Document element is a generic tag, not the html root kind.
        let wrapper = document.create_element("div", &mut exceptions).unwrap();
        document.append_child(document.root(), wrapper).unwrap();
        let body = document.create_element("body", &mut exceptions).unwrap();
        document.append_child(wrapper, body).unwrap();

        assert_eq!(document.body(), None);
        // head() only needs a document element to exist.
        let head = document.create_element("head", &mut exceptions).unwrap();
        document.append_child(wrapper, head).unwrap();
        assert_eq!(document.head(), Some(head));
    }

    #[test]
    fn test_insert_before_and_sibling_order() {
        let mut document = doc();
        let mut exceptions = ExceptionState::new();

        let html = document.create_element("html", &mut exceptions).unwrap();
        document.append_child(document.root(), html).unwrap();

        let a = document.create_element("div", &mut exceptions).unwrap();
        let b = document.create_element("span", &mut exceptions).unwrap();
        let c = document.create_element("p", &mut exceptions).unwrap();
        document.append_child(html, a).unwrap();
        document.append_child(html, c).unwrap();
        document.insert_before(html, b, Some(c)).unwrap();

        assert_eq!(document.node(html).unwrap().children(), &[a, b, c]);
        assert_eq!(document.node(b).unwrap().parent(), Some(html));

        // Reference not a child of the parent.
        let stray = document.create_element("em", &mut exceptions).unwrap();
        let other = document.create_element("u", &mut exceptions).unwrap();
        assert_eq!(
            document.insert_before(html, stray, Some(other)),
            Err(DomError::NotAChild)
        );
    }

    #[test]
    fn test_reinsert_moves_node() {
        let mut document = doc();
        let mut exceptions = ExceptionState::new();

        let html = document.create_element("html", &mut exceptions).unwrap();
        document.append_child(document.root(), html).unwrap();
        let a = document.create_element("div", &mut exceptions).unwrap();
        let b = document.create_element("span", &mut exceptions).unwrap();
        document.append_child(html, a).unwrap();
        document.append_child(html, b).unwrap();

        // Appending an attached node detaches it first.
        document.append_child(a, b).unwrap();
        assert_eq!(document.node(html).unwrap().children(), &[a]);
        assert_eq!(document.node(a).unwrap().children(), &[b]);
        assert_eq!(document.node(b).unwrap().parent(), Some(a));
    }

    #[test]
    fn test_cycle_insertion_refused() {
        let mut document = doc();
        let mut exceptions = ExceptionState::new();

        let html = document.create_element("html", &mut exceptions).unwrap();
        document.append_child(document.root(), html).unwrap();
        let inner = document.create_element("div", &mut exceptions).unwrap();
        document.append_child(html, inner).unwrap();

        assert!(matches!(
            document.append_child(inner, html),
            Err(DomError::HierarchyRequest(_))
        ));
        assert!(matches!(
            document.append_child(inner, inner),
            Err(DomError::HierarchyRequest(_))
        ));
    }

    #[test]
    fn test_remove_child() {
        let mut document = doc();
        let mut exceptions = ExceptionState::new();

        let html = document.create_element("html", &mut exceptions).unwrap();
        document.append_child(document.root(), html).unwrap();
        let child = document.create_element("div", &mut exceptions).unwrap();
        document.append_child(html, child).unwrap();

        document.remove_child(html, child).unwrap();
        assert!(document.node(html).unwrap().children().is_empty());
        assert_eq!(document.node(child).unwrap().parent(), None);

        assert_eq!(
            document.remove_child(html, child),
            Err(DomError::NotAChild)
        );
    }

    #[test]
    fn test_document_identity() {
        let document = doc();
        assert_eq!(document.node_name(), "#document");
        assert_eq!(document.node_value(), "");
        assert_eq!(document.node_type(), NodeType::Document);
        assert_eq!(document.clone_node(true), None);
        assert_eq!(document.context(), ContextId(1));
    }

    #[test]
    fn test_collect_garbage_frees_detached_nodes() {
        let mut document = doc();
        let mut exceptions = ExceptionState::new();

        let html = document.create_element("html", &mut exceptions).unwrap();
        document.append_child(document.root(), html).unwrap();
        let removed = document.create_element("div", &mut exceptions).unwrap();
        let removed_text = document.create_text_node("bye");
        document.append_child(html, removed).unwrap();
        document.append_child(removed, removed_text).unwrap();
        document.remove_child(html, removed).unwrap();

        assert_eq!(document.collect_garbage(&[]), 2);
        assert!(document.node(removed).is_none());
        assert!(document.node(removed_text).is_none());
        assert!(document.node(html).is_some());
    }

    #[test]
    fn test_collect_garbage_honors_external_roots() {
        let mut document = doc();
        let mut exceptions = ExceptionState::new();

        let held = document.create_element("div", &mut exceptions).unwrap();
        let held_text = document.create_text_node("still here");
        document.append_child(held, held_text).unwrap();

        assert_eq!(document.collect_garbage(&[held]), 0);
        assert!(document.node(held_text).is_some());

        // Dropping the external root frees the subtree.
        assert_eq!(document.collect_garbage(&[]), 2);
        assert!(document.node(held).is_none());
    }

    #[test]
    fn test_parent_lists_child_exactly_once() {
        let mut document = doc();
        let mut exceptions = ExceptionState::new();

        let html = document.create_element("html", &mut exceptions).unwrap();
        document.append_child(document.root(), html).unwrap();
        let child = document.create_element("div", &mut exceptions).unwrap();
        document.append_child(html, child).unwrap();
        // Re-appending to the same parent keeps a single entry.
        document.append_child(html, child).unwrap();

        let count = document
            .node(html)
            .unwrap()
            .children()
            .iter()
            .filter(|&&c| c == child)
            .count();
        assert_eq!(count, 1);
    }
}
