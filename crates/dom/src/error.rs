//! Structural mutation errors.
//!
//! These are the only failures the parsing engine can surface: the engine
//! itself never rejects markup, it only propagates arena refusals.

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("node cannot contain children")]
    NotAContainer,
    #[error("node is not an element")]
    NotAnElement,
    #[error("the document node cannot be re-parented")]
    DocumentReparent,
    #[error("a node cannot be inserted into its own subtree")]
    HierarchyViolation,
}
