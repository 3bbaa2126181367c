//! Cursor containment for regex captures.

use std::ops::Range as ByteRange;

use tower_lsp_server::ls_types::{Position, Range};

use crate::text::convert_byte_to_utf16_in_line;

/// Half-open UTF-16 column range of a capture within a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Convert a capture's byte range within `line_text` to UTF-16 columns.
    ///
    /// Returns `None` when either end does not fall on a character boundary.
    pub fn from_byte_range(line_text: &str, bytes: ByteRange<usize>) -> Option<Self> {
        let start = convert_byte_to_utf16_in_line(line_text, bytes.start)?;
        let end = convert_byte_to_utf16_in_line(line_text, bytes.end)?;
        Some(Self::new(start as u32, end as u32))
    }

    /// Document-absolute range of this span on `line`.
    pub fn to_range(self, line: u32) -> Range {
        Range::new(
            Position::new(line, self.start),
            Position::new(line, self.end),
        )
    }
}

/// True iff the cursor column lies in `[span.start, span.end]`.
///
/// The upper bound is inclusive so a cursor resting right after the last
/// character of a path (against the closing quote or `}}`) still selects it.
pub fn within_span(position: Position, span: Span) -> bool {
    position.character >= span.start && position.character <= span.end
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::before_start(7, false)]
    #[case::at_start(8, true)]
    #[case::inside(10, true)]
    #[case::last_char(13, true)]
    #[case::one_past_last_char_is_inclusive_end(14, true)]
    #[case::beyond_end(15, false)]
    fn containment_is_inclusive_on_both_ends(#[case] character: u32, #[case] expected: bool) {
        let span = Span::new(8, 14);
        assert_eq!(within_span(Position::new(3, character), span), expected);
    }

    #[test]
    fn line_number_is_ignored() {
        let span = Span::new(0, 4);
        assert!(within_span(Position::new(0, 2), span));
        assert!(within_span(Position::new(99, 2), span));
    }

    #[test]
    fn empty_span_contains_its_single_column() {
        let span = Span::new(5, 5);
        assert!(within_span(Position::new(0, 5), span));
        assert!(!within_span(Position::new(0, 4), span));
        assert!(!within_span(Position::new(0, 6), span));
    }

    #[test]
    fn byte_ranges_convert_to_utf16_columns() {
        let line = "é '😀.ts'";
        let start = line.find('😀').unwrap();
        let end = line.rfind('\'').unwrap();
        let span = Span::from_byte_range(line, start..end).unwrap();
        assert_eq!(span, Span::new(3, 8));
        assert_eq!(span.to_range(2), Range::new(Position::new(2, 3), Position::new(2, 8)));
    }

    #[test]
    fn byte_range_inside_a_character_is_rejected() {
        assert_eq!(Span::from_byte_range("é", 1..2), None);
    }
}
