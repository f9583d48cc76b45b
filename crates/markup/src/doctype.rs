//! DOCTYPE declaration parsing.
//!
//! Input is the body of a bang declaration (between `<!` and `>`). Accepted
//! only when it starts with `DOCTYPE` (any case) and carries a root name;
//! anything else is rejected and the caller stores the declaration as a
//! comment instead.

use memchr::{memchr, memchr2};

/// Parsed `<!DOCTYPE ...>` content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DoctypeDeclaration {
    pub(crate) name: String,
    pub(crate) public_id: String,
    pub(crate) system_id: String,
}

pub(crate) fn parse_doctype(body: &str) -> Option<DoctypeDeclaration> {
    let keyword = body.get(..7)?;
    if !keyword.eq_ignore_ascii_case("DOCTYPE") {
        return None;
    }
    // The root name is whitespace-delimited; `DOCTYPEhtml` is not a doctype.
    if !body.as_bytes().get(7).is_some_and(u8::is_ascii_whitespace) {
        return None;
    }
    let rest = body[7..].trim_start();
    if rest.is_empty() {
        return None;
    }

    let name_end = rest
        .find(|c: char| c.is_ascii_whitespace())
        .unwrap_or(rest.len());
    let name = rest[..name_end].to_ascii_lowercase();
    let remainder = &rest[name_end..];

    let mut quoted = quoted_segments(remainder);
    let (public_id, system_id) = if contains_ignore_ascii_case(remainder, b"PUBLIC") {
        let public_id = quoted.next().unwrap_or("");
        let system_id = quoted.next().unwrap_or("");
        (public_id, system_id)
    } else {
        ("", quoted.next().unwrap_or(""))
    };

    Some(DoctypeDeclaration {
        name,
        public_id: public_id.to_string(),
        system_id: system_id.to_string(),
    })
}

/// Double-quoted segments of `s`, in order. An unpaired trailing quote yields
/// nothing for that segment.
fn quoted_segments(s: &str) -> impl Iterator<Item = &str> {
    let bytes = s.as_bytes();
    let mut pos = 0;
    std::iter::from_fn(move || {
        let open = pos + memchr(b'"', &bytes[pos..])?;
        let close = open + 1 + memchr(b'"', &bytes[open + 1..])?;
        pos = close + 1;
        Some(&s[open + 1..close])
    })
}

fn contains_ignore_ascii_case(haystack: &str, needle: &[u8]) -> bool {
    debug_assert!(!needle.is_empty() && needle.is_ascii());
    let hay = haystack.as_bytes();
    let n = needle.len();
    if hay.len() < n {
        return false;
    }
    let (lower, upper) = (
        needle[0].to_ascii_lowercase(),
        needle[0].to_ascii_uppercase(),
    );
    let mut i = 0;
    while i + n <= hay.len() {
        let Some(rel) = memchr2(lower, upper, &hay[i..]) else {
            return false;
        };
        let pos = i + rel;
        if pos + n <= hay.len() && hay[pos..pos + n].eq_ignore_ascii_case(needle) {
            return true;
        }
        i = pos + 1;
    }
    false
}
