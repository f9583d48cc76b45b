//! Arena-backed DOM storage for the markup-to-tree pipeline.
//!
//! This crate owns the node data the `markup` engine mutates: node factories,
//! child linking, namespaced attributes, the per-tag content-model table, and
//! the character-reference decoder. Ownership is strictly tree-shaped: the
//! arena owns node payloads, relationships are `NodeId` indices, and nothing
//! holds back-pointers into live nodes.

pub mod content_model;
pub mod entities;
#[cfg(any(test, feature = "snapshot"))]
pub mod snapshot;

mod document;
mod error;
mod namespace;
mod node;

pub use crate::content_model::{ContentModel, content_model};
pub use crate::document::Document;
pub use crate::entities::{decode_attribute_value, decode_text};
pub use crate::error::DomError;
pub use crate::namespace::Namespace;
pub use crate::node::{Attribute, NodeData, NodeId, NodeKind};
