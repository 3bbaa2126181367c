use std::path::PathBuf;
use std::sync::Arc;

use url::Url;

use crate::resolve::SourceDocument;
use crate::text::line_text;

/// Immutable copy of a document taken at request time.
#[derive(Debug, Clone)]
pub struct DocumentSnapshot {
    uri: Url,
    text: Arc<str>,
    line_starts: Arc<[usize]>,
    language_id: Option<String>,
    version: Option<i32>,
}

impl DocumentSnapshot {
    pub(crate) fn new(
        uri: Url,
        text: Arc<str>,
        line_starts: Arc<[usize]>,
        language_id: Option<String>,
        version: Option<i32>,
    ) -> Self {
        Self {
            uri,
            text,
            line_starts,
            language_id,
            version,
        }
    }

    pub fn language_id(&self) -> Option<&str> {
        self.language_id.as_deref()
    }

    /// Version from the last `didOpen`/`didChange` that carried one.
    pub fn version(&self) -> Option<i32> {
        self.version
    }
}

impl SourceDocument for DocumentSnapshot {
    fn line(&self, line: u32) -> Option<&str> {
        line_text(&self.text, &self.line_starts, line as usize)
    }

    fn directory(&self) -> Option<PathBuf> {
        let path = self.uri.to_file_path().ok()?;
        path.parent().map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    #[test]
    fn directory_is_parent_of_file_uri() {
        let uri = Url::parse("file:///site/pages/index.html").unwrap();
        let snapshot = Document::new(String::new()).snapshot(&uri);
        assert_eq!(snapshot.directory(), Some(PathBuf::from("/site/pages")));
    }

    #[test]
    fn non_file_uri_has_no_directory() {
        let uri = Url::parse("untitled:Untitled-1").unwrap();
        let snapshot = Document::new(String::new()).snapshot(&uri);
        assert_eq!(snapshot.directory(), None);
    }

    #[test]
    fn lines_drop_crlf_terminators() {
        let uri = Url::parse("file:///site/main.ts").unwrap();
        let snapshot = Document::new("new Worker(\r\n  './w.ts'\r\n)".to_string()).snapshot(&uri);
        assert_eq!(snapshot.line(0), Some("new Worker("));
        assert_eq!(snapshot.line(1), Some("  './w.ts'"));
        assert_eq!(snapshot.line(2), Some(")"));
        assert_eq!(snapshot.line(3), None);
    }
}
