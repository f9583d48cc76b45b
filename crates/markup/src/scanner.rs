//! Markup scanner: classifies raw input into structural token matches.
//!
//! One left-to-right pass. Candidate positions are the `<`, `>` and `/`
//! bytes; at a `<` the tag-shaped alternatives are tried in fixed priority
//! order (start tag, end tag, comment, bare-terminated comment, bang
//! declaration, processing instruction). A `<` that matches none of them is
//! not a token — it belongs to the surrounding text run, which the caller
//! reconstructs from the gaps between matches.
//!
//! Tag names are ASCII letters/digits/hyphen only. Unterminated shapes never
//! match; their `<` likewise falls back to text.

use memchr::{memchr, memchr3, memmem};

/// One classified structural token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TokenKind<'a> {
    /// `<name` — the start tag's attribute region and terminator follow.
    StartTagOpen(&'a str),
    /// `</name >` with optional ASCII whitespace before `>`.
    EndTag(&'a str),
    /// `<!--body-->`.
    Comment(&'a str),
    /// `<!--body>` — malformed comment closed by a bare `>`; a trailing `--`
    /// in the body is stripped.
    BareComment(&'a str),
    /// `<!body>`.
    Declaration(&'a str),
    /// `<?body?>`.
    ProcessingInstruction(&'a str),
    /// `/>`.
    SelfClose,
    /// `>`.
    TagClose,
}

/// A token match with its byte span in the input.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TokenMatch<'a> {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) kind: TokenKind<'a>,
}

pub(crate) struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

fn is_tag_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-'
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Next token match at or after the current position. Matches never
    /// overlap; scanning resumes immediately after each one.
    pub(crate) fn next_token(&mut self) -> Option<TokenMatch<'a>> {
        let bytes = self.input.as_bytes();
        let mut i = self.pos;
        while i < bytes.len() {
            let Some(rel) = memchr3(b'<', b'>', b'/', &bytes[i..]) else {
                break;
            };
            i += rel;
            let matched = match bytes[i] {
                b'>' => Some(TokenMatch {
                    start: i,
                    end: i + 1,
                    kind: TokenKind::TagClose,
                }),
                b'/' => {
                    if bytes.get(i + 1) == Some(&b'>') {
                        Some(TokenMatch {
                            start: i,
                            end: i + 2,
                            kind: TokenKind::SelfClose,
                        })
                    } else {
                        None
                    }
                }
                _ => self.match_at_angle(i),
            };
            if let Some(matched) = matched {
                debug_assert!(self.input.is_char_boundary(matched.start));
                debug_assert!(self.input.is_char_boundary(matched.end));
                self.pos = matched.end;
                return Some(matched);
            }
            i += 1;
        }
        self.pos = bytes.len();
        None
    }

    /// Try the six `<`-shaped alternatives at position `i`, in priority order.
    fn match_at_angle(&self, i: usize) -> Option<TokenMatch<'a>> {
        let bytes = self.input.as_bytes();
        debug_assert_eq!(bytes[i], b'<');
        let next = *bytes.get(i + 1)?;

        if is_tag_name_byte(next) {
            let mut j = i + 1;
            while j < bytes.len() && is_tag_name_byte(bytes[j]) {
                j += 1;
            }
            return Some(TokenMatch {
                start: i,
                end: j,
                kind: TokenKind::StartTagOpen(&self.input[i + 1..j]),
            });
        }

        match next {
            b'/' => {
                let name_start = i + 2;
                let mut j = name_start;
                while j < bytes.len() && is_tag_name_byte(bytes[j]) {
                    j += 1;
                }
                if j == name_start {
                    return None;
                }
                let name_end = j;
                while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                    j += 1;
                }
                if bytes.get(j) != Some(&b'>') {
                    return None;
                }
                Some(TokenMatch {
                    start: i,
                    end: j + 1,
                    kind: TokenKind::EndTag(&self.input[name_start..name_end]),
                })
            }
            b'!' => {
                if bytes[i..].starts_with(b"<!--") {
                    let body_start = i + 4;
                    if let Some(rel) = memmem::find(&bytes[body_start..], b"-->") {
                        return Some(TokenMatch {
                            start: i,
                            end: body_start + rel + 3,
                            kind: TokenKind::Comment(&self.input[body_start..body_start + rel]),
                        });
                    }
                    let rel = memchr(b'>', &bytes[body_start..])?;
                    let body = &self.input[body_start..body_start + rel];
                    let body = body.strip_suffix("--").unwrap_or(body);
                    return Some(TokenMatch {
                        start: i,
                        end: body_start + rel + 1,
                        kind: TokenKind::BareComment(body),
                    });
                }
                let body_start = i + 2;
                let rel = memchr(b'>', &bytes[body_start..])?;
                Some(TokenMatch {
                    start: i,
                    end: body_start + rel + 1,
                    kind: TokenKind::Declaration(&self.input[body_start..body_start + rel]),
                })
            }
            b'?' => {
                let body_start = i + 2;
                let rel = memchr(b'>', &bytes[body_start..])?;
                // The first `>` must complete a `?>`; a stray `>` inside the
                // body disqualifies the whole shape.
                if rel == 0 || bytes[body_start + rel - 1] != b'?' {
                    return None;
                }
                Some(TokenMatch {
                    start: i,
                    end: body_start + rel + 1,
                    kind: TokenKind::ProcessingInstruction(
                        &self.input[body_start..body_start + rel - 1],
                    ),
                })
            }
            _ => None,
        }
    }
}
