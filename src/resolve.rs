//! Reference resolution engine.
//!
//! Turns a cursor position inside a partial include or a worker constructor
//! argument into a link to the referenced file. Every request scans the
//! text from scratch; nothing is cached between calls.

pub mod html_partial;
pub mod source;
pub mod span;
pub mod target;
pub mod worker_url;

use std::path::PathBuf;

use tower_lsp_server::ls_types::{Position, Range};
use url::Url;

pub use html_partial::{HTML_PARTIAL_WORD_PATTERN, partial_word_at};
pub use source::SourceDocument;
pub use span::{Span, within_span};
pub use target::{FileSystemProbe, ResolvedTarget, TargetProbe};

/// Default cap on lines walked upward looking for a worker's `new`.
pub const DEFAULT_MAX_BACKWARD_LINES: u32 = 32;

/// A matched token and its document-absolute extent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextExcerpt {
    pub content: String,
    pub range: Range,
}

/// A validated reference whose target exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceMatch {
    /// Where the reference appears in the source document.
    pub origin_range: Range,
    pub target_path: PathBuf,
    pub target_uri: Url,
}

impl ReferenceMatch {
    pub fn new(origin_range: Range, target: ResolvedTarget) -> Self {
        Self {
            origin_range,
            target_path: target.path,
            target_uri: target.uri,
        }
    }

    /// Navigation lands at the start of the target file.
    pub fn target_range(&self) -> Range {
        Range::new(Position::new(0, 0), Position::new(0, 0))
    }
}

/// Which token grammar applies to a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceGrammar {
    /// `<!-- {{ ./partial.html }} -->` comments in HTML.
    HtmlPartial,
    /// `new Worker('./worker.ts')` in JavaScript and TypeScript.
    WorkerUrl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    pub max_backward_lines: u32,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            max_backward_lines: DEFAULT_MAX_BACKWARD_LINES,
        }
    }
}

/// Resolves references against documents, probing targets through `P`.
#[derive(Debug, Clone, Default)]
pub struct Resolver<P> {
    probe: P,
}

impl<P: TargetProbe> Resolver<P> {
    pub fn new(probe: P) -> Self {
        Self { probe }
    }

    /// Resolve the reference under `position`, if any.
    ///
    /// Returns at most one match. No token, an invalid token, a missing
    /// target and a failing probe all yield `None`.
    pub async fn resolve<D>(
        &self,
        grammar: ReferenceGrammar,
        document: &D,
        position: Position,
        options: ResolveOptions,
    ) -> Option<ReferenceMatch>
    where
        D: SourceDocument + Sync,
    {
        match grammar {
            ReferenceGrammar::HtmlPartial => {
                html_partial::resolve_partial(document, position, &self.probe).await
            }
            ReferenceGrammar::WorkerUrl => {
                worker_url::resolve_worker_url(
                    document,
                    position,
                    &self.probe,
                    options.max_backward_lines,
                )
                .await
            }
        }
    }
}
