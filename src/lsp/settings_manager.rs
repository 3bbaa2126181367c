//! Server-wide state that changes outside of document sync.
//!
//! The workspace root and settings are swapped wholesale, so a request
//! keeps the settings it started with even if `didChangeConfiguration`
//! lands mid-flight. Link support is fixed by `initialize`.

use arc_swap::{ArcSwap, ArcSwapOption};
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use tower_lsp_server::ls_types::ClientCapabilities;

use crate::config::WorkspaceSettings;
use crate::lsp::client::check_definition_link_support;

pub(crate) struct SettingsManager {
    workspace_root: ArcSwapOption<PathBuf>,
    settings: ArcSwap<WorkspaceSettings>,
    link_support: OnceLock<bool>,
}

impl std::fmt::Debug for SettingsManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsManager")
            .field("workspace_root", &self.workspace_root())
            .field("settings", &self.settings())
            .field("link_support", &self.link_support.get())
            .finish()
    }
}

impl Default for SettingsManager {
    fn default() -> Self {
        Self {
            workspace_root: ArcSwapOption::empty(),
            settings: ArcSwap::from_pointee(WorkspaceSettings::default()),
            link_support: OnceLock::new(),
        }
    }
}

impl SettingsManager {
    /// Remember what the client can render. Only the first call counts.
    pub(crate) fn record_client(&self, capabilities: &ClientCapabilities) {
        let _ = self
            .link_support
            .set(check_definition_link_support(capabilities));
    }

    /// `false` until `initialize` has been handled.
    pub(crate) fn supports_definition_link(&self) -> bool {
        self.link_support.get().copied().unwrap_or(false)
    }

    pub(crate) fn set_workspace_root(&self, root: Option<PathBuf>) {
        self.workspace_root.store(root.map(Arc::new));
    }

    pub(crate) fn workspace_root(&self) -> Option<Arc<PathBuf>> {
        self.workspace_root.load_full()
    }

    pub(crate) fn settings(&self) -> Arc<WorkspaceSettings> {
        self.settings.load_full()
    }

    pub(crate) fn replace_settings(&self, settings: WorkspaceSettings) {
        self.settings.store(Arc::new(settings));
    }
}
