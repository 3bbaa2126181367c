//! Script URLs passed to `new Worker(...)` and `new SharedWorker(...)`.
//!
//! The string argument is located on the cursor line first. The call is
//! then verified by walking backward from the opening quote to the `new`
//! keyword, which formatters may push several lines up:
//!
//! ```text
//! new
//!     SharedWorker(
//!         './worker.ts',
//!     )
//! ```

use std::sync::LazyLock;

use regex::Regex;
use tower_lsp_server::ls_types::Position;

use super::span::{Span, within_span};
use super::target::{TargetProbe, resolve_if_exists};
use super::{ReferenceMatch, SourceDocument, TextExcerpt};

static WORKER_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"'(?<wus>[^'\n]+\.(?:ts|js|mjs))'|"(?<wud>[^"\n]+\.(?:ts|js|mjs))""#)
        .expect("valid worker url regex")
});

/// Capture groups in the order they are tried per match: single-quoted first.
const WORKER_URL_GROUPS: [&str; 2] = ["wus", "wud"];

static NEW_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bnew\b").expect("valid new keyword regex"));

/// Everything between `new` and the opening quote of the sole argument.
static WORKER_CONSTRUCTOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^new\s+(?:Shared)?Worker\s*\(\s*$").expect("valid worker constructor regex")
});

/// A prefix that can still be the tail end of a constructor call whose
/// `new` sits on an earlier line.
static CONSTRUCTOR_TAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:(?:Shared)?Worker\s*)?(?:\(\s*)?$").expect("valid constructor tail regex")
});

/// A quoted script path under the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerUrl {
    pub excerpt: TextExcerpt,
    /// Byte offset of the opening quote within the line.
    pub quote_start: usize,
}

/// Find the quoted `.ts`/`.js`/`.mjs` string whose content contains the cursor.
pub fn worker_url_at(line_text: &str, line: u32, position: Position) -> Option<WorkerUrl> {
    for captures in WORKER_URL.captures_iter(line_text) {
        for group in WORKER_URL_GROUPS {
            let Some(url) = captures.name(group) else {
                continue;
            };
            let Some(span) = Span::from_byte_range(line_text, url.range()) else {
                continue;
            };
            if within_span(position, span) {
                return Some(WorkerUrl {
                    excerpt: TextExcerpt {
                        content: url.as_str().to_string(),
                        range: span.to_range(line),
                    },
                    quote_start: url.start() - 1,
                });
            }
        }
    }
    None
}

/// Check that the string opening at `quote_start` on the cursor line is
/// the argument of a `Worker`/`SharedWorker` constructor.
///
/// Walks backward one line at a time while the text seen so far is still a
/// plausible constructor tail. Stops at the start of the document, at the
/// enclosing declaration's first line, or after `max_backward_lines`.
pub fn verify_worker_constructor<D: SourceDocument>(
    document: &D,
    position: Position,
    quote_start: usize,
    max_backward_lines: u32,
) -> bool {
    let line = position.line;
    let Some(prefix) = document
        .line(line)
        .and_then(|text| text.get(..quote_start))
    else {
        return false;
    };

    let declaration_start = document
        .enclosing_declaration(position)
        .map(|range| range.start.line)
        .filter(|start| *start <= line)
        .unwrap_or(0);
    let lower_bound = declaration_start.max(line.saturating_sub(max_backward_lines));

    let mut search = prefix.to_string();
    let mut line_index = line;
    loop {
        if let Some(keyword) = NEW_KEYWORD.find_iter(&search).last() {
            return WORKER_CONSTRUCTOR.is_match(&search[keyword.start()..]);
        }
        if !CONSTRUCTOR_TAIL.is_match(&search) || line_index <= lower_bound {
            return false;
        }
        line_index -= 1;
        let Some(previous) = document.line(line_index) else {
            return false;
        };
        search = format!("{previous}\n{search}");
    }
}

/// Resolve the worker script URL under the cursor to an existing file.
pub async fn resolve_worker_url<D, P>(
    document: &D,
    position: Position,
    probe: &P,
    max_backward_lines: u32,
) -> Option<ReferenceMatch>
where
    D: SourceDocument + Sync,
    P: TargetProbe,
{
    let line_text = document.line(position.line)?;
    let worker_url = worker_url_at(line_text, position.line, position)?;
    if !verify_worker_constructor(document, position, worker_url.quote_start, max_backward_lines)
    {
        log::debug!(
            target: "dank_ls::worker_url",
            "String {:?} is not a worker constructor argument",
            worker_url.excerpt.content
        );
        return None;
    }

    let directory = document.directory()?;
    let target = resolve_if_exists(probe, &directory, &worker_url.excerpt.content).await?;
    Some(ReferenceMatch::new(worker_url.excerpt.range, target))
}
