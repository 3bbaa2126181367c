//! Target probe used by the language server.

use std::io;
use std::path::Path;

use url::Url;

use crate::document::DocumentStore;
use crate::resolve::{FileSystemProbe, TargetProbe};

/// Accepts targets the editor already has open, otherwise asks the filesystem.
///
/// An unsaved buffer for a new partial is navigable before it exists on disk.
#[derive(Debug, Clone, Default)]
pub(crate) struct OpenDocumentProbe {
    documents: DocumentStore,
    fallback: FileSystemProbe,
}

impl OpenDocumentProbe {
    pub(crate) fn new(documents: DocumentStore) -> Self {
        Self {
            documents,
            fallback: FileSystemProbe,
        }
    }
}

impl TargetProbe for OpenDocumentProbe {
    async fn open(&self, path: &Path) -> io::Result<()> {
        let is_open = Url::from_file_path(path)
            .map(|uri| self.documents.contains(&uri))
            .unwrap_or(false);
        if is_open {
            return Ok(());
        }
        self.fallback.open(path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn open_buffer_counts_as_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("draft.html");
        let documents = DocumentStore::new();
        documents.insert(
            Url::from_file_path(&path).unwrap(),
            "<p>draft</p>".to_string(),
            Some("html".to_string()),
            Some(1),
        );

        let probe = OpenDocumentProbe::new(documents);
        assert!(probe.open(&path).await.is_ok());
    }

    #[tokio::test]
    async fn falls_back_to_filesystem() {
        let dir = TempDir::new().unwrap();
        let on_disk = dir.path().join("nav.html");
        std::fs::write(&on_disk, "<nav></nav>").unwrap();

        let probe = OpenDocumentProbe::new(DocumentStore::new());
        assert!(probe.open(&on_disk).await.is_ok());
        assert!(probe.open(&dir.path().join("missing.html")).await.is_err());
    }

    #[tokio::test]
    async fn directories_are_not_targets() {
        let dir = TempDir::new().unwrap();
        let probe = OpenDocumentProbe::new(DocumentStore::new());
        assert!(probe.open(dir.path()).await.is_err());
    }
}
