mod client;
mod lsp_impl;
mod probe;
mod settings;
mod settings_manager;
mod text_sync;

pub use lsp_impl::DankLs;
pub use settings::{
    SettingsEvent, SettingsEventKind, SettingsLoadOutcome, SettingsSource, load_settings,
};
