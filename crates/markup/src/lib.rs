//! Markup-to-tree construction engine.
//!
//! One left-to-right scan over the input: the scanner classifies structural
//! tokens, the tree builder interprets them against its open-element stack
//! and appends nodes into a [`dom::Document`]. Malformed input is never an
//! error; every byte either becomes structure or falls back to text. The
//! only failures are tree-mutation refusals surfaced by the arena.
//!
//! ```
//! use dom::Document;
//! use markup::ParseOptions;
//!
//! let mut document = Document::new();
//! let root = markup::parse(&mut document, "<p>hello</p>", ParseOptions::default())?;
//! assert_eq!(document.children(root).len(), 1);
//! # Ok::<(), dom::DomError>(())
//! ```

mod attributes;
mod doctype;
mod scanner;
mod tree_builder;

pub use crate::tree_builder::ParseOptions;

use dom::{Document, DomError, NodeId};
use tree_builder::TreeBuilder;

/// Parse `input` and append the resulting nodes under a root.
///
/// With `options.root` unset a fresh fragment is created and returned;
/// otherwise the supplied node receives the children and is returned as-is.
pub fn parse(
    document: &mut Document,
    input: &str,
    options: ParseOptions,
) -> Result<NodeId, DomError> {
    let root = match options.root {
        Some(root) => root,
        None => document.create_fragment(),
    };
    log::trace!(target: "markup", "parsing {} bytes into {root:?}", input.len());
    TreeBuilder::new(document, input, root, &options).run()
}
