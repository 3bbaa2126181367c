//! Client notification abstraction for LSP communication.
//!
//! `ClientNotifier` wraps `tower_lsp_server::Client` so all `window/logMessage`
//! traffic goes through one place. Messages are mirrored to the `log` facade
//! so they also show up in the server's stderr log.

use tower_lsp_server::Client;
use tower_lsp_server::ls_types::{ClientCapabilities, MessageType};

use crate::lsp::{SettingsEvent, SettingsEventKind};

/// Check if client capabilities indicate `LocationLink` support for definitions.
///
/// Returns `false` for any missing capability in the chain.
pub(crate) fn check_definition_link_support(caps: &ClientCapabilities) -> bool {
    caps.text_document
        .as_ref()
        .and_then(|td| td.definition.as_ref())
        .and_then(|def| def.link_support)
        .unwrap_or(false)
}

#[derive(Clone, Debug)]
pub(crate) struct ClientNotifier {
    client: Client,
}

impl ClientNotifier {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Log a message to the client at the specified severity level.
    pub(crate) async fn log(&self, level: MessageType, message: impl Into<String>) {
        let message = message.into();
        let log_level = if level == MessageType::ERROR {
            log::Level::Error
        } else if level == MessageType::WARNING {
            log::Level::Warn
        } else if level == MessageType::INFO {
            log::Level::Info
        } else {
            log::Level::Debug
        };
        log::log!(target: "dank_ls::client", log_level, "{}", message);
        self.client.log_message(level, message).await;
    }

    pub(crate) async fn log_info(&self, message: impl Into<String>) {
        self.log(MessageType::INFO, message).await;
    }

    pub(crate) async fn log_warning(&self, message: impl Into<String>) {
        self.log(MessageType::WARNING, message).await;
    }

    /// Debug/trace message (LOG level in LSP).
    pub(crate) async fn log_trace(&self, message: impl Into<String>) {
        self.log(MessageType::LOG, message).await;
    }

    /// Forward events produced while loading settings.
    pub(crate) async fn log_settings_events(&self, events: &[SettingsEvent]) {
        for event in events {
            let message_type = match event.kind {
                SettingsEventKind::Info => MessageType::INFO,
                SettingsEventKind::Warning => MessageType::WARNING,
            };
            self.log(message_type, event.message.clone()).await;
        }
    }
}
