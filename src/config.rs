pub mod defaults;
pub mod settings;
pub mod user;

pub use defaults::default_settings;
pub use settings::{DankSettings, WorkspaceSettings};
pub use user::{load_user_config, user_config_path};

/// Project configuration file name, looked up in the workspace root.
pub const PROJECT_CONFIG_FILE: &str = "dank-ls.toml";

/// Merge a stack of layers; later layers override earlier ones.
pub fn merge_all(configs: &[Option<DankSettings>]) -> Option<DankSettings> {
    configs.iter().cloned().reduce(merge_settings).flatten()
}

/// Merge two DankSettings, preferring values from `primary` over `fallback`
pub fn merge_settings(
    fallback: Option<DankSettings>,
    primary: Option<DankSettings>,
) -> Option<DankSettings> {
    match (fallback, primary) {
        (None, None) => None,
        (Some(settings), None) => Some(settings),
        (None, Some(settings)) => Some(settings),
        (Some(fallback), Some(primary)) => Some(DankSettings {
            html_partials: primary.html_partials.or(fallback.html_partials),
            worker_urls: primary.worker_urls.or(fallback.worker_urls),
            // Language lists replace rather than extend, so a layer can narrow them
            html_languages: primary.html_languages.or(fallback.html_languages),
            script_languages: primary.script_languages.or(fallback.script_languages),
            max_backward_lines: primary.max_backward_lines.or(fallback.max_backward_lines),
        }),
    }
}
