//! Document tree for the Petal engine.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships.
//! Children are owned by position in their parent's `children` list; the
//! `parent` link is a plain index back-reference and never owns anything.
//!
//! The parser always allocates the `<html>` root first, so [`NodeId::ROOT`]
//! names the root of every finished tree.

use std::collections::HashMap;

/// Map of attribute names to values for an element.
///
/// Keys are lowercased by the parser; values keep their original case.
pub type AttributesMap = HashMap<String, String>;

/// A type-safe index into the document tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The `<html>` root is always the first node allocated.
    pub const ROOT: Self = Self(0);
}

/// A node in the tree together with its structural links.
#[derive(Debug, Clone)]
pub struct Node {
    /// What kind of node this is.
    pub node_type: NodeType,

    /// The element this node was opened under, `None` for the root.
    pub parent: Option<NodeId>,

    /// Children in document order. Always empty for text nodes.
    pub children: Vec<NodeId>,
}

/// The closed set of node kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeType {
    /// An element with a tag name and attributes.
    Element(ElementData),
    /// A run of literal text.
    Text(String),
}

/// Element-specific data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Lowercased tag name.
    pub tag_name: String,
    /// Attributes, keys lowercased.
    pub attrs: AttributesMap,
}

impl ElementData {
    /// Create element data with the given name and attributes.
    #[must_use]
    pub fn new(tag_name: impl Into<String>, attrs: AttributesMap) -> Self {
        Self {
            tag_name: tag_name.into(),
            attrs,
        }
    }

    /// Look up an attribute value by (lowercase) name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

/// Arena-based document tree.
///
/// All nodes live in one vector and refer to each other by [`NodeId`]:
/// - O(1) access to any node by id
/// - O(1) parent lookup
/// - no reference cycles between parents and children
#[derive(Debug, Clone, Default)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create an empty tree. The first node allocated becomes the root.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// The root node id.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its id.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Number of nodes in the arena, attached or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True before the root has been allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its id.
    ///
    /// The parent link is recorded immediately, but the node is not listed
    /// among the parent's children until [`DomTree::append_child`] runs.
    pub fn alloc(&mut self, node_type: NodeType, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent,
            children: Vec::new(),
        });
        id
    }

    /// Append `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over `id` and everything below it in document order.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        let stack = if self.get(id).is_some() {
            vec![id]
        } else {
            Vec::new()
        };
        DescendantIterator { tree: self, stack }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            NodeType::Text(_) => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            NodeType::Element(_) => None,
        })
    }

    /// The tag name of an element node.
    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.as_element(id).map(|e| e.tag_name.as_str())
    }

    /// First child of `parent` that is an element named `tag`.
    #[must_use]
    pub fn child_element(&self, parent: NodeId, tag: &str) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&id| self.tag_name(id) == Some(tag))
    }

    /// The `<head>` child of the root, if any.
    #[must_use]
    pub fn head(&self) -> Option<NodeId> {
        self.child_element(NodeId::ROOT, "head")
    }

    /// The first `<body>` child of the root, if any.
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        self.child_element(NodeId::ROOT, "body")
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over a subtree.
pub struct DescendantIterator<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
