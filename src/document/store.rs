use std::sync::Arc;

use dashmap::DashMap;
use url::Url;

use super::model::Document;
use super::snapshot::DocumentSnapshot;
use crate::error::{DankError, DankResult};

// The central store for all open documents. Clones share the same map.
#[derive(Clone, Default)]
pub struct DocumentStore {
    documents: Arc<DashMap<Url, Document>>,
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("documents", &self.documents.len())
            .finish()
    }
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &self,
        uri: Url,
        text: String,
        language_id: Option<String>,
        version: Option<i32>,
    ) {
        self.documents
            .insert(uri, Document::with_language(text, language_id, version));
    }

    pub fn contains(&self, uri: &Url) -> bool {
        self.documents.contains_key(uri)
    }

    /// Owned snapshot of a document; the map guard is released on return.
    pub fn snapshot(&self, uri: &Url) -> Option<DocumentSnapshot> {
        self.documents.get(uri).map(|doc| doc.snapshot(uri))
    }

    pub fn update_text(&self, uri: &Url, text: String, version: Option<i32>) -> DankResult<()> {
        let mut doc = self
            .documents
            .get_mut(uri)
            .ok_or_else(|| DankError::document_not_found(uri.as_str()))?;
        doc.update_text(text, version);
        Ok(())
    }

    pub fn get_document_text(&self, uri: &Url) -> Option<String> {
        self.documents.get(uri).map(|doc| doc.text().to_string())
    }

    pub fn remove(&self, uri: &Url) -> Option<Document> {
        self.documents.remove(uri).map(|(_, doc)| doc)
    }
}
