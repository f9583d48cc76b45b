//! Deterministic tree rendering for test comparisons.
//!
//! Not a public stable format. Rules:
//! - One line per node, two-space indent per depth.
//! - Elements render as `<name>` in the html namespace and `<prefix name>`
//!   elsewhere; attributes follow on their own lines in stored order.
//! - Text renders quoted, comments as `<!-- ... -->`, doctypes as
//!   `<!DOCTYPE name "public" "system">` (identifiers omitted when both are
//!   empty).

use crate::document::Document;
use crate::node::{NodeId, NodeKind};
use std::fmt::Write;

/// Render the subtree under `root` (inclusive) as indented lines.
pub fn snapshot(document: &Document, root: NodeId) -> String {
    let mut out = String::new();
    render(document, root, 0, &mut out);
    out
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn render(document: &Document, node: NodeId, depth: usize, out: &mut String) {
    indent(out, depth);
    match document.kind(node) {
        NodeKind::Document => out.push_str("#document\n"),
        NodeKind::Fragment => out.push_str("#document-fragment\n"),
        NodeKind::Element {
            name, namespace, ..
        } => {
            match namespace.prefix() {
                Some(prefix) => {
                    let _ = writeln!(out, "<{prefix} {name}>");
                }
                None => {
                    let _ = writeln!(out, "<{name}>");
                }
            }
            for attribute in document.attributes(node) {
                indent(out, depth + 1);
                match attribute.namespace {
                    Some(ns) => {
                        let prefix = ns.prefix().unwrap_or("ns");
                        let _ = writeln!(out, "{prefix} {}=\"{}\"", attribute.name, attribute.value);
                    }
                    None => {
                        let _ = writeln!(out, "{}=\"{}\"", attribute.name, attribute.value);
                    }
                }
            }
        }
        NodeKind::Text { text } => {
            let _ = writeln!(out, "\"{text}\"");
        }
        NodeKind::Comment { text } => {
            let _ = writeln!(out, "<!-- {text} -->");
        }
        NodeKind::DocumentType {
            name,
            public_id,
            system_id,
        } => {
            if public_id.is_empty() && system_id.is_empty() {
                let _ = writeln!(out, "<!DOCTYPE {name}>");
            } else {
                let _ = writeln!(out, "<!DOCTYPE {name} \"{public_id}\" \"{system_id}\">");
            }
        }
    }
    for &child in document.children(node) {
        render(document, child, depth + 1, out);
    }
}
