//! Arena document: node factories and tree mutation.
//!
//! Contract highlights:
//! - Factories only allocate; nothing is linked until `append_child`.
//! - `append_child` is order-preserving and duplicate-safe: appending a node
//!   that already has a parent moves it (detach, then link), never errors.
//! - `set_attribute_ns` is idempotent per (namespace, name): last write wins,
//!   list position is first-appearance.

use crate::error::DomError;
use crate::namespace::Namespace;
use crate::node::{Attribute, NodeData, NodeId, NodeKind};

#[derive(Debug)]
pub struct Document {
    nodes: Vec<NodeData>,
}

impl Document {
    /// Create a document whose arena is seeded with the document node itself.
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData::new(NodeKind::Document)],
        }
    }

    /// The document node (always the first arena slot).
    pub fn document_node(&self) -> NodeId {
        NodeId(0)
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData::new(kind));
        id
    }

    pub fn create_fragment(&mut self) -> NodeId {
        self.alloc(NodeKind::Fragment)
    }

    pub fn create_element_ns(&mut self, namespace: Namespace, local_name: &str) -> NodeId {
        self.alloc(NodeKind::Element {
            name: local_name.to_string(),
            namespace,
            attributes: Vec::new(),
            evaluate_content: None,
        })
    }

    pub fn create_text_node(&mut self, text: &str) -> NodeId {
        self.alloc(NodeKind::Text {
            text: text.to_string(),
        })
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.alloc(NodeKind::Comment {
            text: text.to_string(),
        })
    }

    pub fn create_document_type(&mut self, name: &str, public_id: &str, system_id: &str) -> NodeId {
        self.alloc(NodeKind::DocumentType {
            name: name.to_string(),
            public_id: public_id.to_string(),
            system_id: system_id.to_string(),
        })
    }

    /// Link `child` as the last child of `parent`.
    ///
    /// Re-appending moves the child (its previous link is removed first), so
    /// callers may treat this as a raw "insert here" primitive.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if !self.data(parent).kind.is_container() {
            return Err(DomError::NotAContainer);
        }
        if matches!(self.data(child).kind, NodeKind::Document) {
            return Err(DomError::DocumentReparent);
        }
        // Walk up from `parent`; inserting a node under itself or one of its
        // descendants would make the links cyclic.
        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                return Err(DomError::HierarchyViolation);
            }
            cursor = self.data(id).parent;
        }
        if let Some(old_parent) = self.data(child).parent {
            let siblings = &mut self.data_mut(old_parent).children;
            if let Some(position) = siblings.iter().position(|&c| c == child) {
                let _ = siblings.remove(position);
            }
        }
        self.data_mut(child).parent = Some(parent);
        self.data_mut(parent).children.push(child);
        Ok(())
    }

    /// Set a (namespace, name) attribute on an element, replacing any
    /// previous value for the same pair.
    pub fn set_attribute_ns(
        &mut self,
        element: NodeId,
        namespace: Option<Namespace>,
        name: &str,
        value: &str,
    ) -> Result<(), DomError> {
        let NodeKind::Element { attributes, .. } = &mut self.data_mut(element).kind else {
            return Err(DomError::NotAnElement);
        };
        if let Some(existing) = attributes
            .iter_mut()
            .find(|a| a.namespace == namespace && a.name == name)
        {
            existing.value.clear();
            existing.value.push_str(value);
        } else {
            attributes.push(Attribute {
                namespace,
                name: name.to_string(),
                value: value.to_string(),
            });
        }
        Ok(())
    }

    /// Record the content-evaluation flag on a script/style-like element.
    pub fn set_content_evaluation(
        &mut self,
        element: NodeId,
        allowed: bool,
    ) -> Result<(), DomError> {
        let NodeKind::Element {
            evaluate_content, ..
        } = &mut self.data_mut(element).kind
        else {
            return Err(DomError::NotAnElement);
        };
        *evaluate_content = Some(allowed);
        Ok(())
    }

    pub fn kind(&self, node: NodeId) -> &NodeKind {
        &self.data(node).kind
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.data(node).parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.data(node).children
    }

    /// Element local name, `None` for non-elements.
    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        match &self.data(node).kind {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Namespace for inheritance purposes. Non-element nodes (document,
    /// fragment, leaves) report `Html` so inheritance has a base case.
    pub fn namespace_of(&self, node: NodeId) -> Namespace {
        match &self.data(node).kind {
            NodeKind::Element { namespace, .. } => *namespace,
            _ => Namespace::Html,
        }
    }

    /// Look up an attribute value by (namespace, name).
    pub fn attribute(
        &self,
        element: NodeId,
        namespace: Option<Namespace>,
        name: &str,
    ) -> Option<&str> {
        match &self.data(element).kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|a| a.namespace == namespace && a.name == name)
                .map(|a| a.value.as_str()),
            _ => None,
        }
    }

    /// Full attribute list in stored order; empty for non-elements.
    pub fn attributes(&self, element: NodeId) -> &[Attribute] {
        match &self.data(element).kind {
            NodeKind::Element { attributes, .. } => attributes,
            _ => &[],
        }
    }

    fn data(&self, node: NodeId) -> &NodeData {
        &self.nodes[node.index()]
    }

    fn data_mut(&mut self, node: NodeId) -> &mut NodeData {
        &mut self.nodes[node.index()]
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
