use std::path::PathBuf;

use serde_json::json;
use tower_lsp_server::jsonrpc::Result;
use tower_lsp_server::ls_types::*;
use tower_lsp_server::{Client, LanguageServer};
use url::Url;

use super::client::ClientNotifier;
use super::probe::OpenDocumentProbe;
use super::settings::{SettingsSource, load_settings};
use super::settings_manager::SettingsManager;
use super::text_sync::apply_content_changes;
use crate::document::DocumentStore;
use crate::resolve::{HTML_PARTIAL_WORD_PATTERN, Resolver};

mod text_document;

/// Convert an `ls_types::Uri` into the `url::Url` used for internal storage.
pub(crate) fn uri_to_url(uri: &Uri) -> std::result::Result<Url, url::ParseError> {
    Url::parse(uri.as_str())
}

/// Convert a `url::Url` back into an `ls_types::Uri` for responses.
pub(crate) fn url_to_uri(url: &Url) -> Option<Uri> {
    url.as_str().parse::<Uri>().ok()
}

pub struct DankLs {
    client: Client,
    documents: DocumentStore,
    settings: SettingsManager,
    resolver: Resolver<OpenDocumentProbe>,
}

impl std::fmt::Debug for DankLs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DankLs")
            .field("client", &self.client)
            .field("documents", &self.documents)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl DankLs {
    pub fn new(client: Client) -> Self {
        let documents = DocumentStore::new();
        let resolver = Resolver::new(OpenDocumentProbe::new(documents.clone()));
        Self {
            client,
            documents,
            settings: SettingsManager::default(),
            resolver,
        }
    }

    fn notifier(&self) -> ClientNotifier {
        ClientNotifier::new(self.client.clone())
    }

    pub(crate) fn supports_definition_link(&self) -> bool {
        self.settings.supports_definition_link()
    }

    /// Workspace root: first workspace folder, then rootUri, then the cwd.
    fn root_path_from(params: &InitializeParams) -> Option<PathBuf> {
        let from_folders = params
            .workspace_folders
            .as_ref()
            .and_then(|folders| folders.first())
            .and_then(|folder| uri_to_url(&folder.uri).ok())
            .and_then(|url| url.to_file_path().ok());

        #[allow(deprecated)]
        let from_root_uri = || {
            params
                .root_uri
                .as_ref()
                .and_then(|uri| uri_to_url(uri).ok())
                .and_then(|url| url.to_file_path().ok())
        };

        from_folders
            .or_else(from_root_uri)
            .or_else(|| std::env::current_dir().ok())
    }

    fn server_capabilities() -> ServerCapabilities {
        ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Kind(
                TextDocumentSyncKind::INCREMENTAL,
            )),
            definition_provider: Some(OneOf::Left(true)),
            experimental: Some(json!({
                "wordPatterns": { "html": HTML_PARTIAL_WORD_PATTERN }
            })),
            ..ServerCapabilities::default()
        }
    }
}

impl LanguageServer for DankLs {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        self.settings.record_client(&params.capabilities);

        let root_path = Self::root_path_from(&params);
        self.settings.set_workspace_root(root_path.clone());

        let override_settings = params
            .initialization_options
            .clone()
            .map(|value| (SettingsSource::InitializationOptions, value));
        let outcome = load_settings(root_path.as_deref(), override_settings);
        self.notifier().log_settings_events(&outcome.events).await;
        if let Some(settings) = outcome.settings {
            self.settings.replace_settings(settings);
        }

        Ok(InitializeResult {
            capabilities: Self::server_capabilities(),
            server_info: Some(ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            ..InitializeResult::default()
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.notifier().log_info("server initialized!").await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let Ok(uri) = uri_to_url(&params.text_document.uri) else {
            log::warn!("Invalid URI in didOpen: {}", params.text_document.uri.as_str());
            return;
        };
        log::debug!(target: "dank_ls::documents", "Opened {}", uri);
        self.documents.insert(
            uri,
            params.text_document.text,
            Some(params.text_document.language_id),
            Some(params.text_document.version),
        );
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let Ok(uri) = uri_to_url(&params.text_document.uri) else {
            log::warn!("Invalid URI in didClose: {}", params.text_document.uri.as_str());
            return;
        };
        self.documents.remove(&uri);
        log::debug!(target: "dank_ls::documents", "Closed {}", uri);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let Ok(uri) = uri_to_url(&params.text_document.uri) else {
            log::warn!("Invalid URI in didChange: {}", params.text_document.uri.as_str());
            return;
        };

        // Guard dropped before the store is written
        let Some(old_text) = self.documents.get_document_text(&uri) else {
            self.notifier()
                .log_warning(format!("didChange for unopened document {}", uri))
                .await;
            return;
        };

        let text = apply_content_changes(&old_text, params.content_changes);
        if let Err(err) = self
            .documents
            .update_text(&uri, text, Some(params.text_document.version))
        {
            self.notifier().log_warning(err.to_string()).await;
        }
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        let root_path = self.settings.workspace_root();
        let outcome = load_settings(
            root_path.as_deref().map(PathBuf::as_path),
            Some((SettingsSource::ClientConfiguration, params.settings)),
        );
        self.notifier().log_settings_events(&outcome.events).await;
        if let Some(settings) = outcome.settings {
            self.settings.replace_settings(settings);
        }
    }

    async fn goto_definition(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        self.goto_definition_impl(params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uri_conversions_round_trip() {
        let url = Url::parse("file:///site/index.html").unwrap();
        let uri = url_to_uri(&url).expect("file URL converts");
        assert_eq!(uri_to_url(&uri).unwrap(), url);
    }

    #[test]
    fn capabilities_advertise_definition_and_word_pattern() {
        let caps = DankLs::server_capabilities();
        assert_eq!(caps.definition_provider, Some(OneOf::Left(true)));
        assert_eq!(
            caps.text_document_sync,
            Some(TextDocumentSyncCapability::Kind(
                TextDocumentSyncKind::INCREMENTAL
            ))
        );
        let experimental = caps.experimental.expect("experimental capabilities");
        assert_eq!(
            experimental["wordPatterns"]["html"],
            json!(HTML_PARTIAL_WORD_PATTERN)
        );
    }

    #[test]
    fn root_path_prefers_workspace_folders() {
        let folder = url_to_uri(&Url::parse("file:///work/site").unwrap()).unwrap();
        let params = InitializeParams {
            workspace_folders: Some(vec![WorkspaceFolder {
                uri: folder,
                name: "site".to_string(),
            }]),
            ..InitializeParams::default()
        };
        assert_eq!(
            DankLs::root_path_from(&params),
            Some(PathBuf::from("/work/site"))
        );
    }

    #[test]
    fn root_path_falls_back_to_cwd() {
        let params = InitializeParams::default();
        assert_eq!(
            DankLs::root_path_from(&params),
            std::env::current_dir().ok()
        );
    }
}
