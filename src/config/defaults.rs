//! Default configuration values for dank-ls.

use super::settings::DankSettings;
use crate::resolve::DEFAULT_MAX_BACKWARD_LINES;

/// Returns the programmed defaults, the lowest settings layer.
pub fn default_settings() -> DankSettings {
    DankSettings {
        html_partials: Some(true),
        worker_urls: Some(true),
        html_languages: Some(default_html_languages()),
        script_languages: Some(default_script_languages()),
        max_backward_lines: Some(DEFAULT_MAX_BACKWARD_LINES),
    }
}

pub fn default_html_languages() -> Vec<String> {
    vec!["html".to_string()]
}

pub fn default_script_languages() -> Vec<String> {
    ["javascript", "javascriptreact", "typescript", "typescriptreact"]
        .into_iter()
        .map(String::from)
        .collect()
}
