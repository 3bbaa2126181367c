//! Go-to-definition for file references that editors do not resolve on
//! their own: HTML partial includes and worker script URLs.

pub mod config;
pub mod document;
pub mod error;
pub mod language;
pub mod lsp;
pub mod resolve;
pub mod text;

pub use config::{DankSettings, WorkspaceSettings};
pub use document::{Document, DocumentSnapshot, DocumentStore};
pub use error::{DankError, DankResult};
pub use language::detect_grammar;
pub use resolve::{
    FileSystemProbe, ReferenceGrammar, ReferenceMatch, ResolveOptions, Resolver, SourceDocument,
    TargetProbe,
};

// Re-export the main server implementation
pub use lsp::DankLs;
