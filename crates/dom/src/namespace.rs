//! Namespace constants.
//!
//! A small closed set: elements are created in exactly one of these, and the
//! `Xmlns` entry exists only as the reserved target for `xmlns` attribute
//! declarations on foreign-content elements.

/// Element/attribute namespace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Namespace {
    Html,
    Svg,
    MathMl,
    Xmlns,
}

impl Namespace {
    /// Canonical namespace URI.
    pub fn uri(self) -> &'static str {
        match self {
            Namespace::Html => "http://www.w3.org/1999/xhtml",
            Namespace::Svg => "http://www.w3.org/2000/svg",
            Namespace::MathMl => "http://www.w3.org/1998/Math/MathML",
            Namespace::Xmlns => "http://www.w3.org/2000/xmlns/",
        }
    }

    /// Short prefix used by diagnostics and snapshots. Html has none.
    pub fn prefix(self) -> Option<&'static str> {
        match self {
            Namespace::Html => None,
            Namespace::Svg => Some("svg"),
            Namespace::MathMl => Some("math"),
            Namespace::Xmlns => Some("xmlns"),
        }
    }
}
