//! Attribute sub-parser for the region between a tag name and its `>`/`/>`.
//!
//! Forms, tried in order per occurrence: unquoted value, double-quoted value,
//! single-quoted value, bare name. Names and unquoted values share one
//! restricted ASCII charset. Bytes matching no form are separator junk and
//! are skipped.
//!
//! Values are returned raw; the caller decodes them in attribute context.
//!
//! A quote that opens but never closes inside the span poisons the rest of
//! the call: the partial attribute and everything after it are abandoned and
//! `complete` is false, which tells the tree builder the `>` it stopped at
//! was inside the value, not a real tag terminator.

use memchr::memchr;

/// An accepted attribute. `value: None` is a bare boolean attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RawAttribute<'a> {
    pub(crate) name: &'a str,
    pub(crate) value: Option<&'a str>,
}

/// Result of scanning one attribute span.
#[derive(Debug)]
pub(crate) struct AttributeScan<'a> {
    pub(crate) attributes: Vec<RawAttribute<'a>>,
    /// End offset (into the span) of the last accepted attribute. The caller
    /// advances its attribute-region cursor by this much so accepted
    /// attributes are not re-scanned on a later, longer span.
    pub(crate) consumed: usize,
    /// False when an opened quote never closed within the span.
    pub(crate) complete: bool,
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.' | b'$' | b'@' | b'?')
}

fn skip_whitespace(bytes: &[u8], i: &mut usize) {
    while *i < bytes.len() && bytes[*i].is_ascii_whitespace() {
        *i += 1;
    }
}

pub(crate) fn scan_attributes(span: &str) -> AttributeScan<'_> {
    let bytes = span.as_bytes();
    let mut attributes = Vec::new();
    let mut consumed = 0;
    let mut i = 0;

    while i < bytes.len() {
        if !is_name_byte(bytes[i]) {
            i += 1;
            continue;
        }
        let name_start = i;
        while i < bytes.len() && is_name_byte(bytes[i]) {
            i += 1;
        }
        let name = &span[name_start..i];

        let mut j = i;
        skip_whitespace(bytes, &mut j);
        if bytes.get(j) != Some(&b'=') {
            attributes.push(RawAttribute { name, value: None });
            consumed = i;
            continue;
        }
        j += 1;
        skip_whitespace(bytes, &mut j);

        match bytes.get(j) {
            Some(&b) if is_name_byte(b) => {
                let value_start = j;
                while j < bytes.len() && is_name_byte(bytes[j]) {
                    j += 1;
                }
                attributes.push(RawAttribute {
                    name,
                    value: Some(&span[value_start..j]),
                });
                i = j;
                consumed = i;
            }
            Some(&quote @ (b'"' | b'\'')) => {
                let value_start = j + 1;
                match memchr(quote, &bytes[value_start..]) {
                    Some(rel) => {
                        attributes.push(RawAttribute {
                            name,
                            value: Some(&span[value_start..value_start + rel]),
                        });
                        i = value_start + rel + 1;
                        consumed = i;
                    }
                    None => {
                        return AttributeScan {
                            attributes,
                            consumed,
                            complete: false,
                        };
                    }
                }
            }
            _ => {
                // `=` with nothing usable after it: the name alone is
                // accepted, the `=` becomes junk on the next iteration.
                attributes.push(RawAttribute { name, value: None });
                consumed = i;
            }
        }
    }

    AttributeScan {
        attributes,
        consumed,
        complete: true,
    }
}
