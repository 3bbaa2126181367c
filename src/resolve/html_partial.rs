//! `<!-- {{ ./partial.html }} -->` partial includes in HTML.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tower_lsp_server::ls_types::Position;

use super::span::{Span, within_span};
use super::target::{TargetProbe, resolve_if_exists};
use super::{ReferenceMatch, SourceDocument, TextExcerpt};

static PARTIAL_INCLUDE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<!--\s*\{\{\s*(?<pp>.+?)\s*\}\}\s*-->").expect("valid partial include regex")
});

static PARTIAL_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\.?\.?/)?[a-zA-Z0-9._-]+$").expect("valid partial word regex")
});

/// Editor word rule treating a whole partial path as one word, as a
/// JavaScript regex source for hosts with `wordPattern` support.
pub const HTML_PARTIAL_WORD_PATTERN: &str =
    r"(?<=<!--\s*{{\s*)(\.?\.?\/)?[a-zA-Z0-9._-]+?(?=\s*}}\s*-->)";

/// Find the partial include whose path contains the cursor.
///
/// Matches are visited left to right and the first containing one wins,
/// whatever its extension.
pub fn partial_at(line_text: &str, line: u32, position: Position) -> Option<TextExcerpt> {
    PARTIAL_INCLUDE.captures_iter(line_text).find_map(|captures| {
        let path = captures.name("pp")?;
        let span = Span::from_byte_range(line_text, path.range())?;
        within_span(position, span).then(|| TextExcerpt {
            content: path.as_str().to_string(),
            range: span.to_range(line),
        })
    })
}

/// Partial includes must name an `.html` file; anything else sharing the
/// comment shape is an annotation, not a reference.
pub fn is_partial_path(path: &str) -> bool {
    Path::new(path)
        .extension()
        .is_some_and(|extension| extension == "html")
}

/// Span of the partial path under the cursor when it is a single "word"
/// under the editor word rule.
pub fn partial_word_at(line_text: &str, position: Position) -> Option<Span> {
    let excerpt = partial_at(line_text, position.line, position)?;
    PARTIAL_WORD
        .is_match(&excerpt.content)
        .then(|| Span::new(excerpt.range.start.character, excerpt.range.end.character))
}

/// Resolve the partial include under the cursor to an existing `.html` file.
pub async fn resolve_partial<D, P>(
    document: &D,
    position: Position,
    probe: &P,
) -> Option<ReferenceMatch>
where
    D: SourceDocument + Sync,
    P: TargetProbe,
{
    let line_text = document.line(position.line)?;
    let excerpt = partial_at(line_text, position.line, position)?;
    if !is_partial_path(&excerpt.content) {
        log::debug!(
            target: "dank_ls::html_partial",
            "Ignoring partial {:?}: not an .html path",
            excerpt.content
        );
        return None;
    }

    let directory = document.directory()?;
    let target = resolve_if_exists(probe, &directory, &excerpt.content).await?;
    Some(ReferenceMatch::new(excerpt.range, target))
}
