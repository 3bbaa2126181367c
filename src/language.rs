//! Mapping documents to the reference grammar that applies to them.

use url::Url;

use crate::config::WorkspaceSettings;
use crate::resolve::ReferenceGrammar;

/// Language ID implied by a file extension, used when the client sent none
/// or sent one we do not handle.
pub fn language_from_extension(uri: &Url) -> Option<&'static str> {
    let file_name = uri.path_segments()?.next_back()?;
    let (_, extension) = file_name.rsplit_once('.')?;
    let language = match extension {
        "html" | "htm" => "html",
        "js" | "mjs" | "cjs" => "javascript",
        "jsx" => "javascriptreact",
        "ts" | "mts" | "cts" => "typescript",
        "tsx" => "typescriptreact",
        _ => return None,
    };
    Some(language)
}

fn grammar_for_language(language_id: &str, settings: &WorkspaceSettings) -> Option<ReferenceGrammar> {
    if settings.html_partials && settings.html_languages.iter().any(|l| l == language_id) {
        return Some(ReferenceGrammar::HtmlPartial);
    }
    if settings.worker_urls && settings.script_languages.iter().any(|l| l == language_id) {
        return Some(ReferenceGrammar::WorkerUrl);
    }
    None
}

/// Pick the grammar for a document: its languageId first, then its extension.
pub fn detect_grammar(
    language_id: Option<&str>,
    uri: &Url,
    settings: &WorkspaceSettings,
) -> Option<ReferenceGrammar> {
    language_id
        .and_then(|id| grammar_for_language(id, settings))
        .or_else(|| {
            language_from_extension(uri).and_then(|id| grammar_for_language(id, settings))
        })
}
