//! Goto definition method for DankLs.

use tower_lsp_server::jsonrpc::Result;
use tower_lsp_server::ls_types::{
    GotoDefinitionParams, GotoDefinitionResponse, Location, LocationLink,
};

use crate::language::detect_grammar;
use crate::resolve::ReferenceMatch;

use super::super::{DankLs, uri_to_url, url_to_uri};

/// Convert LocationLink to Location for clients that don't support link format.
fn location_link_to_location(link: LocationLink) -> Location {
    Location {
        uri: link.target_uri,
        range: link.target_selection_range,
    }
}

/// Shape a resolved reference for the client.
///
/// The origin range lets link-aware clients underline the whole path.
fn definition_response(
    reference: &ReferenceMatch,
    link_support: bool,
) -> Option<GotoDefinitionResponse> {
    let link = LocationLink {
        origin_selection_range: Some(reference.origin_range),
        target_uri: url_to_uri(&reference.target_uri)?,
        target_range: reference.target_range(),
        target_selection_range: reference.target_range(),
    };

    if link_support {
        Some(GotoDefinitionResponse::Link(vec![link]))
    } else {
        Some(GotoDefinitionResponse::Array(vec![
            location_link_to_location(link),
        ]))
    }
}

impl DankLs {
    pub(crate) async fn goto_definition_impl(
        &self,
        params: GotoDefinitionParams,
    ) -> Result<Option<GotoDefinitionResponse>> {
        let lsp_uri = params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        let Ok(uri) = uri_to_url(&lsp_uri) else {
            log::warn!("Invalid URI in gotoDefinition: {}", lsp_uri.as_str());
            return Ok(None);
        };

        // Owned snapshot; no store guard is held across the probe
        let Some(snapshot) = self.documents.snapshot(&uri) else {
            self.notifier()
                .log_info(format!("No document found for {}", uri))
                .await;
            return Ok(None);
        };

        self.notifier()
            .log_trace(format!(
                "goto_definition called for {} (version {:?}) at line {} col {}",
                uri,
                snapshot.version(),
                position.line,
                position.character
            ))
            .await;

        let settings = self.settings.settings();
        let Some(grammar) = detect_grammar(snapshot.language_id(), &uri, &settings) else {
            log::debug!(target: "dank_ls::definition", "No reference grammar for {}", uri);
            return Ok(None);
        };

        let options = settings.resolve_options();
        let Some(reference) = self
            .resolver
            .resolve(grammar, &snapshot, position, options)
            .await
        else {
            return Ok(None);
        };

        log::debug!(
            target: "dank_ls::definition",
            "Resolved {} to {}",
            uri,
            reference.target_path.display()
        );
        Ok(definition_response(
            &reference,
            self.supports_definition_link(),
        ))
    }
}
