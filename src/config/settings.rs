use serde::{Deserialize, Serialize};

use crate::resolve::{DEFAULT_MAX_BACKWARD_LINES, ResolveOptions};

/// One configuration layer as written by the user.
///
/// Every field is optional so layers can be merged; see
/// [`WorkspaceSettings`] for the resolved form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DankSettings {
    /// Resolve `<!-- {{ ./partial.html }} -->` includes
    pub html_partials: Option<bool>,
    /// Resolve `new Worker('./worker.ts')` script URLs
    pub worker_urls: Option<bool>,
    /// Language IDs handled by the partial include grammar
    pub html_languages: Option<Vec<String>>,
    /// Language IDs handled by the worker URL grammar
    pub script_languages: Option<Vec<String>>,
    /// Lines walked upward looking for a worker constructor's `new`
    pub max_backward_lines: Option<u32>,
}

/// Fully resolved settings used by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceSettings {
    pub html_partials: bool,
    pub worker_urls: bool,
    pub html_languages: Vec<String>,
    pub script_languages: Vec<String>,
    pub max_backward_lines: u32,
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self::from(super::default_settings())
    }
}

impl From<DankSettings> for WorkspaceSettings {
    fn from(settings: DankSettings) -> Self {
        Self {
            html_partials: settings.html_partials.unwrap_or(true),
            worker_urls: settings.worker_urls.unwrap_or(true),
            html_languages: settings
                .html_languages
                .unwrap_or_else(super::defaults::default_html_languages),
            script_languages: settings
                .script_languages
                .unwrap_or_else(super::defaults::default_script_languages),
            max_backward_lines: settings
                .max_backward_lines
                .unwrap_or(DEFAULT_MAX_BACKWARD_LINES),
        }
    }
}

impl WorkspaceSettings {
    /// Resolver knobs carried by these settings.
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            max_backward_lines: self.max_backward_lines,
        }
    }
}
