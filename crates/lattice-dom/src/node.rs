//! DOM Node
//!
//! Tree participants: a non-owning parent back-reference, an owned and
//! ordered child list, and a tagged data variant per node kind.

use crate::NodeId;

/// DOM node types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Element,
    Attribute,
    Text,
    Comment,
    Document,
    DocumentType,
    DocumentFragment,
}

/// Closed set of element kinds this runtime distinguishes.
///
/// Concrete per-tag behavior lives outside the core; the kind tag is
/// what `body()`/`head()` lookups and the factory seam operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// The `<html>` root element
    Html,
    /// The `<head>` element
    Head,
    /// The `<body>` element
    Body,
    /// A recognized tag with no specialized behavior here
    Generic,
    /// A tag the factory has no mapping for
    Unknown,
}

/// Element-specific data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Tag name as given to `createElement`
    pub tag: String,
    /// Runtime kind assigned by the element factory
    pub kind: ElementKind,
}

/// Node-specific data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// Document root
    Document,
    /// DOCTYPE declaration
    Doctype { name: String },
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
    /// Lightweight container for pending subtrees
    DocumentFragment,
}

/// DOM Node stored in the document's arena.
///
/// The parent link is a back-reference only; ownership flows forward
/// through `children`.
#[derive(Debug)]
pub struct Node {
    /// Parent node (none while detached)
    pub(crate) parent: Option<NodeId>,
    /// Owned child list, in sibling order
    pub(crate) children: Vec<NodeId>,
    /// Node-specific data
    pub(crate) data: NodeData,
}

impl Node {
    fn new(data: NodeData) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data,
        }
    }

    /// Create the document root node.
    pub fn document() -> Self {
        Self::new(NodeData::Document)
    }

    /// Create an element node.
    pub fn element(tag: &str, kind: ElementKind) -> Self {
        Self::new(NodeData::Element(ElementData {
            tag: tag.to_string(),
            kind,
        }))
    }

    /// Create a text node.
    pub fn text(content: &str) -> Self {
        Self::new(NodeData::Text(content.to_string()))
    }

    /// Create a comment node.
    pub fn comment(data: &str) -> Self {
        Self::new(NodeData::Comment(data.to_string()))
    }

    /// Create a document fragment node.
    pub fn document_fragment() -> Self {
        Self::new(NodeData::DocumentFragment)
    }

    /// Create a DOCTYPE node.
    pub fn doctype(name: &str) -> Self {
        Self::new(NodeData::Doctype {
            name: name.to_string(),
        })
    }

    /// Node type tag.
    pub fn node_type(&self) -> NodeType {
        match &self.data {
            NodeData::Document => NodeType::Document,
            NodeData::Doctype { .. } => NodeType::DocumentType,
            NodeData::Element(_) => NodeType::Element,
            NodeData::Text(_) => NodeType::Text,
            NodeData::Comment(_) => NodeType::Comment,
            NodeData::DocumentFragment => NodeType::DocumentFragment,
        }
    }

    /// DOM node name: the tag for elements, a `#`-marker otherwise.
    pub fn node_name(&self) -> &str {
        match &self.data {
            NodeData::Document => "#document",
            NodeData::Doctype { name } => name,
            NodeData::Element(e) => &e.tag,
            NodeData::Text(_) => "#text",
            NodeData::Comment(_) => "#comment",
            NodeData::DocumentFragment => "#document-fragment",
        }
    }

    /// Node value: character data for text/comment nodes, none otherwise.
    pub fn node_value(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(s) | NodeData::Comment(s) => Some(s),
            _ => None,
        }
    }

    /// Parent back-reference, if attached.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child ids in sibling order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Node data variant.
    pub fn data(&self) -> &NodeData {
        &self.data
    }

    /// Get element data if this is an element.
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Safe downcast: element data only when the runtime kind matches.
    pub fn as_element_of(&self, kind: ElementKind) -> Option<&ElementData> {
        self.as_element().filter(|e| e.kind == kind)
    }

    /// Per-subtype containment predicate for non-document containers.
    ///
    /// The document root has its own rule set; see
    /// `Document::child_type_allowed`.
    pub fn child_type_allowed(&self, child_type: NodeType) -> bool {
        match self.node_type() {
            NodeType::Element | NodeType::DocumentFragment => matches!(
                child_type,
                NodeType::Element | NodeType::Text | NodeType::Comment
            ),
            // Leaf nodes accept nothing; the document rule lives on Document.
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_names() {
        assert_eq!(Node::document().node_name(), "#document");
        assert_eq!(Node::text("hi").node_name(), "#text");
        assert_eq!(Node::comment("c").node_name(), "#comment");
        assert_eq!(Node::document_fragment().node_name(), "#document-fragment");
        assert_eq!(
            Node::element("div", ElementKind::Generic).node_name(),
            "div"
        );
    }

    #[test]
    fn test_downcast_by_kind() {
        let body = Node::element("body", ElementKind::Body);
        assert!(body.as_element_of(ElementKind::Body).is_some());
        assert!(body.as_element_of(ElementKind::Html).is_none());
        assert!(Node::text("x").as_element_of(ElementKind::Body).is_none());
    }

    #[test]
    fn test_element_containment() {
        let div = Node::element("div", ElementKind::Generic);
        assert!(div.child_type_allowed(NodeType::Element));
        assert!(div.child_type_allowed(NodeType::Text));
        assert!(div.child_type_allowed(NodeType::Comment));
        assert!(!div.child_type_allowed(NodeType::Document));
        assert!(!div.child_type_allowed(NodeType::DocumentType));

        let text = Node::text("leaf");
        assert!(!text.child_type_allowed(NodeType::Text));
    }
}
