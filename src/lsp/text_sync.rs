//! Text synchronization for LSP didChange handling.
//!
//! Handles both sync modes: incremental changes carry a range, full
//! changes replace the whole document.

use tower_lsp_server::ls_types::TextDocumentContentChangeEvent;

use crate::text::PositionMapper;

/// Apply content changes to text in order and return the new text.
///
/// Ranges that fall outside the document clamp to its end.
pub(crate) fn apply_content_changes(
    old_text: &str,
    content_changes: Vec<TextDocumentContentChangeEvent>,
) -> String {
    let mut text = old_text.to_string();

    for change in content_changes {
        if let Some(range) = change.range {
            let mapper = PositionMapper::new(&text);
            let start_offset = mapper.position_to_byte(range.start).unwrap_or(text.len());
            let end_offset = mapper
                .position_to_byte(range.end)
                .unwrap_or(text.len())
                .max(start_offset);

            text.replace_range(start_offset..end_offset, &change.text);
        } else {
            text = change.text;
        }
    }

    text
}
