use memchr::{memchr, memrchr};

use crate::constants::{is_leading_blank, is_line_terminator};

/// Cursor over a raw field name.
///
/// Every byte the scanner branches on (`[`, `]`, space, tab) is ASCII, so
/// each position it stops at is a char boundary and slicing is safe.
pub(super) struct NameScanner<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> NameScanner<'a> {
    pub(super) fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    pub(super) fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub(super) fn skip_leading_blanks(&mut self) {
        while let Some(ch) = self.peek() {
            if !is_leading_blank(ch) {
                break;
            }
            self.position += ch.len_utf8();
        }
    }

    /// A name has to start with something other than `[`.
    pub(super) fn starts_name(&self) -> bool {
        !matches!(self.peek(), None | Some('['))
    }

    /// Split off the leading name when the remainder is bracketed: a `[`,
    /// a later `]`, and nothing but same-line text after the last `]`.
    ///
    /// On success the cursor sits on the first `[`; otherwise it is left
    /// untouched and `None` is returned.
    pub(super) fn split_bracketed(&mut self) -> Option<&'a str> {
        let rest = self.rest();
        let open = memchr(b'[', rest.as_bytes())?;
        let groups = &rest[open..];
        let close = memrchr(b']', &groups.as_bytes()[1..])? + 1;
        if groups[1..close].contains(|ch: char| matches!(ch, '\u{2028}' | '\u{2029}')) {
            return None;
        }
        if groups[close + 1..].chars().any(is_line_terminator) {
            return None;
        }
        self.position += open;
        Some(&rest[..open])
    }

    /// Consume one leading `[inner]` group and return `inner`.
    pub(super) fn next_group(&mut self) -> Option<&'a str> {
        let rest = self.rest();
        let body = rest.strip_prefix('[')?;
        let close = memchr(b']', body.as_bytes())?;
        self.position += close + 2;
        Some(&body[..close])
    }
}
