//! Character-reference decoding for text runs and attribute values.
//!
//! Contract:
//! - Named references decoded: `&amp;` `&lt;` `&gt;` `&quot;` `&apos;`
//!   `&nbsp;` — semicolon required.
//! - Numeric references decoded only when well-formed and
//!   semicolon-terminated: `&#215;` (decimal) and `&#xD7;` (hex). Only valid
//!   Unicode scalar values decode; anything else passes through unchanged.
//! - Digit runs are length-bounded so adversarial input cannot trigger long
//!   rescans.
//! - Pure and total: input with no `&` is returned as-is (single copy).
//!
//! This is intentionally not the full HTML5 named-reference table; both entry
//! points currently share one reference set and differ only in intent, which
//! keeps attribute and text decoding trivially consistent.

use memchr::memchr;

// Largest scalar is 0x10FFFF / 1114111.
const MAX_HEX_DIGITS: usize = 6;
const MAX_DEC_DIGITS: usize = 7;

/// Decode character references in a text run.
pub fn decode_text(s: &str) -> String {
    decode(s)
}

/// Decode character references in an attribute value.
pub fn decode_attribute_value(s: &str) -> String {
    decode(s)
}

/// Named references, keyed by the bytes between `&` and `;`.
fn named_reference(name: &[u8]) -> Option<char> {
    match name {
        b"amp" => Some('&'),
        b"lt" => Some('<'),
        b"gt" => Some('>'),
        b"quot" => Some('"'),
        b"apos" => Some('\''),
        b"nbsp" => Some('\u{00A0}'),
        _ => None,
    }
}

enum Reference {
    /// Decoded scalar; `len` covers `&` through `;` inclusive.
    Decoded { ch: char, len: usize },
    /// Not a recognized reference; the `&` is literal.
    Literal,
}

fn classify(bytes: &[u8]) -> Reference {
    debug_assert!(bytes.first() == Some(&b'&'));
    let rest = &bytes[1..];
    if rest.first() == Some(&b'#') {
        let (digits, radix, max) = if matches!(rest.get(1), Some(b'x') | Some(b'X')) {
            (&rest[2..], 16u32, MAX_HEX_DIGITS)
        } else {
            (&rest[1..], 10u32, MAX_DEC_DIGITS)
        };
        let mut count = 0;
        for &b in digits {
            if b == b';' {
                if count == 0 {
                    return Reference::Literal;
                }
                let text = std::str::from_utf8(&digits[..count]).ok();
                let scalar = text
                    .and_then(|t| u32::from_str_radix(t, radix).ok())
                    .and_then(char::from_u32);
                return match scalar {
                    Some(ch) => Reference::Decoded {
                        ch,
                        len: (bytes.len() - rest.len()) + (rest.len() - digits.len()) + count + 1,
                    },
                    None => Reference::Literal,
                };
            }
            let is_digit = if radix == 16 {
                b.is_ascii_hexdigit()
            } else {
                b.is_ascii_digit()
            };
            if !is_digit || count == max {
                return Reference::Literal;
            }
            count += 1;
        }
        return Reference::Literal;
    }
    // Named form: letters up to `;`, longest name is 4 bytes.
    let mut count = 0;
    for &b in rest {
        if b == b';' {
            return match named_reference(&rest[..count]) {
                Some(ch) => Reference::Decoded { ch, len: count + 2 },
                None => Reference::Literal,
            };
        }
        if !b.is_ascii_alphabetic() || count == 4 {
            return Reference::Literal;
        }
        count += 1;
    }
    Reference::Literal
}

fn decode(s: &str) -> String {
    let bytes = s.as_bytes();
    // Fast path: nothing to decode.
    let Some(first) = memchr(b'&', bytes) else {
        return s.to_string();
    };
    let mut out = String::with_capacity(s.len());
    out.push_str(&s[..first]);
    let mut i = first;
    while i < bytes.len() {
        debug_assert_eq!(bytes[i], b'&');
        match classify(&bytes[i..]) {
            Reference::Decoded { ch, len } => {
                out.push(ch);
                i += len;
            }
            Reference::Literal => {
                out.push('&');
                i += 1;
            }
        }
        let Some(rel) = memchr(b'&', &bytes[i..]) else {
            out.push_str(&s[i..]);
            break;
        };
        out.push_str(&s[i..i + rel]);
        i += rel;
    }
    out
}
