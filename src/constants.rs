/// Field name used by [`FormData::pack_json`](crate::FormData::pack_json) when none is given.
pub const DEFAULT_JSON_NAME: &str = "__dataJSON__";

pub const JSON_FILE_NAME: &str = "data.json";

pub const JSON_CONTENT_TYPE: &str = "text/json";

pub(crate) const NORMALIZED_CHAR: char = '_';

#[inline]
pub fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

#[inline]
pub fn is_leading_blank(ch: char) -> bool {
    matches!(ch, ' ' | '\t')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn test_is_line_terminator() {
        assert!(is_line_terminator('\n'));
        assert!(is_line_terminator('\r'));
        assert!(is_line_terminator('\u{2028}'));
        assert!(is_line_terminator('\u{2029}'));
        assert!(!is_line_terminator(' '));
        assert!(!is_line_terminator(']'));
    }

    #[rstest::rstest]
    fn test_is_leading_blank() {
        assert!(is_leading_blank(' '));
        assert!(is_leading_blank('\t'));
        assert!(!is_leading_blank('\n'));
        assert!(!is_leading_blank('_'));
    }
}
