use std::path::PathBuf;

use tower_lsp_server::ls_types::{Position, Range};

/// Read-only view of the document a resolution request runs against.
pub trait SourceDocument {
    /// Text of a line without its terminator.
    fn line(&self, line: u32) -> Option<&str>;

    /// Directory relative references are resolved against.
    fn directory(&self) -> Option<PathBuf>;

    /// Range of the declaration enclosing `position`, when the host knows it.
    ///
    /// Bounds the backward search for a worker constructor's `new` keyword.
    fn enclosing_declaration(&self, _position: Position) -> Option<Range> {
        None
    }
}
