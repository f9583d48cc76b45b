//! Node payloads and identities.

use crate::namespace::Namespace;

/// Arena handle for a node. Stable for the lifetime of its `Document`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// One namespaced attribute. Attribute order is first-appearance order and is
/// observable (snapshots, serialization).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub namespace: Option<Namespace>,
    pub name: String,
    pub value: String,
}

/// Node payload.
#[derive(Debug)]
pub enum NodeKind {
    Document,
    Fragment,
    Element {
        name: String,
        namespace: Namespace,
        attributes: Vec<Attribute>,
        /// Metadata set by the parser on script/style-like elements when they
        /// close: whether the embedding caller wants their content evaluated.
        /// `None` until marked. Never acted on by this crate.
        evaluate_content: Option<bool>,
    },
    Text {
        text: String,
    },
    Comment {
        text: String,
    },
    DocumentType {
        name: String,
        public_id: String,
        system_id: String,
    },
}

impl NodeKind {
    /// Whether this node may hold children.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            NodeKind::Document | NodeKind::Fragment | NodeKind::Element { .. }
        )
    }
}

/// Arena slot: payload plus tree links. Links are indices only; the arena
/// owns every payload.
#[derive(Debug)]
pub struct NodeData {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl NodeData {
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
        }
    }
}
