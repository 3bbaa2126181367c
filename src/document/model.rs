use std::sync::Arc;

use url::Url;

use super::snapshot::DocumentSnapshot;
use crate::text::compute_line_starts;

/// An open document: text plus the LSP state that came with it
pub struct Document {
    text: Arc<str>,
    line_starts: Arc<[usize]>,
    version: Option<i32>,
    language_id: Option<String>,
}

impl Document {
    /// Create a new document with just text
    pub fn new(text: String) -> Self {
        Self::with_language(text, None, None)
    }

    /// Create with language and version from didOpen
    pub fn with_language(text: String, language_id: Option<String>, version: Option<i32>) -> Self {
        let line_starts = compute_line_starts(&text).into();
        Self {
            text: text.into(),
            line_starts,
            version,
            language_id,
        }
    }

    /// Get the text content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the language ID
    pub fn language_id(&self) -> Option<&str> {
        self.language_id.as_deref()
    }

    /// Replace the text, keeping the language ID
    pub fn update_text(&mut self, text: String, version: Option<i32>) {
        self.line_starts = compute_line_starts(&text).into();
        self.text = text.into();
        if version.is_some() {
            self.version = version;
        }
    }

    /// Cheap, owned view for request handlers.
    ///
    /// Shares the text buffer so no store lock is held while a request awaits.
    pub fn snapshot(&self, uri: &Url) -> DocumentSnapshot {
        DocumentSnapshot::new(
            uri.clone(),
            Arc::clone(&self.text),
            Arc::clone(&self.line_starts),
            self.language_id.clone(),
            self.version,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::SourceDocument;

    #[test]
    fn update_text_recomputes_lines() {
        let mut doc = Document::with_language("a\nb".to_string(), Some("html".into()), Some(1));
        doc.update_text("one\ntwo\nthree".to_string(), Some(2));

        assert_eq!(doc.text(), "one\ntwo\nthree");
        assert_eq!(doc.language_id(), Some("html"));

        let uri = Url::parse("file:///site/index.html").unwrap();
        let snapshot = doc.snapshot(&uri);
        assert_eq!(snapshot.version(), Some(2));
        assert_eq!(snapshot.line(2), Some("three"));
        assert_eq!(snapshot.line(3), None);
    }

    #[test]
    fn update_without_version_keeps_previous_version() {
        let mut doc = Document::with_language(String::new(), None, Some(4));
        doc.update_text("x".to_string(), None);
        let uri = Url::parse("file:///site/a.js").unwrap();
        assert_eq!(doc.snapshot(&uri).version(), Some(4));
    }

    #[test]
    fn snapshot_survives_later_edits() {
        let mut doc = Document::new("before".to_string());
        let uri = Url::parse("file:///site/a.js").unwrap();
        let snapshot = doc.snapshot(&uri);
        doc.update_text("after".to_string(), None);
        assert_eq!(snapshot.line(0), Some("before"));
    }
}
