//! Per-tag content-model policy.
//!
//! Classifies each known tag name into the structural rule the tree builder
//! must apply when the tag opens. Unknown tags (custom elements included) are
//! `Ordinary`. Lookup is ASCII-case-insensitive and allocation-free.

/// Structural rule for a tag's children.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentModel {
    /// No restriction.
    Ordinary,
    /// May not have descendants at all (void element).
    Void,
    /// Content is literal text until the matching end tag.
    RawText,
    /// May not appear anywhere inside an element of the same name.
    NoSelfDescendants,
    /// May not appear as a direct child of an element of the same name.
    NoFirstLevelSelfDescendants,
}

/// Resolve the content model for a tag name.
pub fn content_model(tag_name: &str) -> ContentModel {
    // Tag names are short ASCII in practice; fold without allocating for the
    // common already-lowercase case.
    let mut buf = [0u8; 16];
    let folded: &str = if tag_name.len() <= buf.len() {
        let bytes = &mut buf[..tag_name.len()];
        bytes.copy_from_slice(tag_name.as_bytes());
        bytes.make_ascii_lowercase();
        match std::str::from_utf8(bytes) {
            Ok(s) => s,
            Err(_) => return ContentModel::Ordinary,
        }
    } else {
        // Longer than any classified tag name.
        return ContentModel::Ordinary;
    };

    match folded {
        "area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input" | "link" | "meta"
        | "param" | "source" | "track" | "wbr" => ContentModel::Void,
        // textarea/title carry RCDATA semantics; raw-text content is still
        // entity-decoded on insertion, so the classification holds for them.
        "script" | "style" | "textarea" | "title" => ContentModel::RawText,
        "a" | "button" | "form" | "select" | "nobr" => ContentModel::NoSelfDescendants,
        "p" | "li" | "dt" | "dd" | "option" | "tr" | "td" | "th" => {
            ContentModel::NoFirstLevelSelfDescendants
        }
        _ => ContentModel::Ordinary,
    }
}
