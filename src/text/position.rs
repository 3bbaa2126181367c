use tower_lsp_server::ls_types::Position;

/// Maps between LSP positions (line + UTF-16 column) and byte offsets.
pub struct PositionMapper<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> PositionMapper<'a> {
    /// Create a new PositionMapper with pre-computed line starts
    pub fn new(text: &'a str) -> Self {
        let line_starts = compute_line_starts(text);
        Self { text, line_starts }
    }

    /// Text of a line without its terminator (`\n` or `\r\n`)
    pub fn line_text(&self, line: usize) -> Option<&'a str> {
        line_text(self.text, &self.line_starts, line)
    }

    /// Convert LSP Position to byte offset in the document.
    ///
    /// Columns past the end of the line clamp to the line end.
    pub fn position_to_byte(&self, position: Position) -> Option<usize> {
        let line = position.line as usize;
        let line_start = *self.line_starts.get(line)?;
        let line_text = self.line_text(line)?;

        match convert_utf16_to_byte_in_line(line_text, position.character as usize) {
            Some(byte_offset) => Some(line_start + byte_offset),
            None => Some(line_start + line_text.len()),
        }
    }
}

/// Compute line start offsets for efficient position mapping
pub fn compute_line_starts(text: &str) -> Vec<usize> {
    let mut line_starts = vec![0];
    line_starts.extend(
        text.char_indices()
            .filter(|(_, ch)| *ch == '\n')
            .map(|(offset, _)| offset + 1),
    );
    line_starts
}

/// Slice one line out of `text` given precomputed line starts, dropping
/// the line terminator.
pub fn line_text<'t>(text: &'t str, line_starts: &[usize], line: usize) -> Option<&'t str> {
    let start = *line_starts.get(line)?;
    let end = line_starts
        .get(line + 1)
        .map(|next| next - 1)
        .unwrap_or(text.len());
    let raw = text.get(start..end)?;
    Some(raw.strip_suffix('\r').unwrap_or(raw))
}

/// Convert UTF-16 position to byte position within a line
/// Returns None if the UTF-16 position is beyond the end of the line
#[inline(always)]
pub fn convert_utf16_to_byte_in_line(line_text: &str, utf16_pos: usize) -> Option<usize> {
    let mut byte_offset = 0;
    let mut utf16_offset = 0;

    for ch in line_text.chars() {
        if utf16_offset >= utf16_pos {
            return Some(byte_offset);
        }
        utf16_offset += ch.len_utf16();
        byte_offset += ch.len_utf8();
    }

    if utf16_offset == utf16_pos {
        Some(byte_offset)
    } else {
        None
    }
}

/// Convert byte position to UTF-16 position within a line
/// Returns None if the byte position is invalid (e.g., in the middle of a multi-byte character)
#[inline(always)]
pub fn convert_byte_to_utf16_in_line(line_text: &str, byte_pos: usize) -> Option<usize> {
    let mut utf16_offset = 0;
    let mut byte_count = 0;

    for ch in line_text.chars() {
        if byte_count == byte_pos {
            return Some(utf16_offset);
        }
        let ch_bytes = ch.len_utf8();
        if byte_count + ch_bytes > byte_pos {
            return None;
        }
        byte_count += ch_bytes;
        utf16_offset += ch.len_utf16();
    }

    if byte_count == byte_pos {
        Some(utf16_offset)
    } else {
        None
    }
}
