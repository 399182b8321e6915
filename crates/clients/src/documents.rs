// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Document Assembly and case document storage.

use std::sync::Arc;

use async_trait::async_trait;
use nfdiv::CoreError;
use nfdiv::ports::{DocumentGenerator, DocumentRequest, DocumentStore};
use nfdiv_domain::{Document, LanguagePreference};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, warn};
use url::Url;

use crate::error::{ClientError, translate_client_error};
use crate::http::{SERVICE_AUTHORIZATION, bearer, decode, endpoint, send};
use crate::s2s::ServiceAuthClient;

/// The `/api/template-renditions` request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenditionRequest<'a> {
    pub template_id: String,
    pub output_type: &'static str,
    pub output_filename: &'a str,
    pub form_payload: &'a Map<String, Value>,
}

/// The `/api/template-renditions` response body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenditionResponse {
    pub rendition_output_location: String,
}

/// Template file for a template name and language.
fn template_file(template_id: &str, language: LanguagePreference) -> String {
    match language {
        LanguagePreference::English => format!("{template_id}.docx"),
        LanguagePreference::Welsh => format!("{template_id}_cy.docx"),
    }
}

/// Client for Document Assembly.
#[derive(Debug, Clone)]
pub struct DocAssemblyClient {
    http: reqwest::Client,
    base_url: Url,
    s2s: Arc<ServiceAuthClient>,
}

impl DocAssemblyClient {
    pub(super) const fn new(
        http: reqwest::Client,
        base_url: Url,
        s2s: Arc<ServiceAuthClient>,
    ) -> Self {
        Self { http, base_url, s2s }
    }

    /// Renders a PDF and returns a link to it.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if rendering fails.
    pub async fn render_pdf(
        &self,
        auth_token: &str,
        document: &DocumentRequest,
    ) -> Result<Document, ClientError> {
        let url: Url = endpoint(&self.base_url, "/api/template-renditions")?;
        let body: RenditionRequest<'_> = RenditionRequest {
            template_id: template_file(document.template_id, document.language),
            output_type: "PDF",
            output_filename: &document.file_name,
            form_payload: &document.values,
        };
        let request = self
            .http
            .post(url)
            .header(reqwest::header::AUTHORIZATION, bearer(auth_token))
            .header(SERVICE_AUTHORIZATION, self.s2s.service_token().await?)
            .json(&body);
        let response = send("template renditions", request).await?;
        let rendition: RenditionResponse = decode("template renditions", response).await?;

        info!(
            template = document.template_id,
            file_name = %document.file_name,
            "Document rendered"
        );
        let document_url: String = rendition.rendition_output_location;
        Ok(Document {
            document_binary_url: format!("{document_url}/binary"),
            document_url,
            document_filename: document.file_name.clone(),
        })
    }
}

#[async_trait]
impl DocumentGenerator for DocAssemblyClient {
    async fn render(
        &self,
        auth_token: &str,
        request: &DocumentRequest,
    ) -> Result<Document, CoreError> {
        self.render_pdf(auth_token, request)
            .await
            .map_err(|e| translate_client_error("doc-assembly", &e))
    }
}

/// Client for case document access management.
#[derive(Debug, Clone)]
pub struct DocumentStoreClient {
    http: reqwest::Client,
    base_url: Url,
    s2s: Arc<ServiceAuthClient>,
}

impl DocumentStoreClient {
    pub(super) const fn new(
        http: reqwest::Client,
        base_url: Url,
        s2s: Arc<ServiceAuthClient>,
    ) -> Self {
        Self { http, base_url, s2s }
    }

    /// Permanently deletes a document. A document that no longer exists
    /// counts as deleted.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the store refuses the delete.
    pub async fn delete(&self, auth_token: &str, document_id: &str) -> Result<(), ClientError> {
        let mut url: Url = endpoint(&self.base_url, &format!("/cases/documents/{document_id}"))?;
        url.query_pairs_mut().append_pair("permanent", "true");
        let request = self
            .http
            .delete(url)
            .header(reqwest::header::AUTHORIZATION, bearer(auth_token))
            .header(SERVICE_AUTHORIZATION, self.s2s.service_token().await?);

        match send("case documents", request).await {
            Ok(_) => {
                info!(document_id, "Document deleted");
                Ok(())
            }
            Err(ClientError::Status { status: 404, .. }) => {
                warn!(document_id, "Document already deleted");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}

#[async_trait]
impl DocumentStore for DocumentStoreClient {
    async fn delete_document(&self, auth_token: &str, document_id: &str) -> Result<(), CoreError> {
        self.delete(auth_token, document_id)
            .await
            .map_err(|e| translate_client_error("case-document-am", &e))
    }
}
