// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use async_trait::async_trait;
use nfdiv::CoreError;
use nfdiv::ports::OrganisationLookup;
use nfdiv_domain::Organisation;
use serde::Deserialize;
use url::Url;

use crate::error::{ClientError, translate_client_error};
use crate::http::{SERVICE_AUTHORIZATION, bearer, decode, endpoint, send};
use crate::s2s::ServiceAuthClient;

/// The organisation as returned by reference data.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationsResponse {
    pub organisation_identifier: String,
    pub name: String,
}

impl From<OrganisationsResponse> for Organisation {
    fn from(response: OrganisationsResponse) -> Self {
        Self {
            organisation_id: Some(response.organisation_identifier),
            organisation_name: Some(response.name),
        }
    }
}

/// Client for professional reference data.
#[derive(Debug, Clone)]
pub struct OrganisationClient {
    http: reqwest::Client,
    base_url: Url,
    s2s: Arc<ServiceAuthClient>,
}

impl OrganisationClient {
    pub(super) const fn new(
        http: reqwest::Client,
        base_url: Url,
        s2s: Arc<ServiceAuthClient>,
    ) -> Self {
        Self { http, base_url, s2s }
    }

    /// Returns the organisation the signed-in user belongs to.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the user has no organisation or the
    /// lookup fails.
    pub async fn organisation_of(&self, auth_token: &str) -> Result<Organisation, ClientError> {
        let url: Url = endpoint(&self.base_url, "/refdata/external/v1/organisations")?;
        let request = self
            .http
            .get(url)
            .header(reqwest::header::AUTHORIZATION, bearer(auth_token))
            .header(SERVICE_AUTHORIZATION, self.s2s.service_token().await?);
        let response = send("organisations", request).await?;
        decode::<OrganisationsResponse>("organisations", response)
            .await
            .map(Organisation::from)
    }
}

#[async_trait]
impl OrganisationLookup for OrganisationClient {
    async fn user_organisation(&self, auth_token: &str) -> Result<Organisation, CoreError> {
        self.organisation_of(auth_token)
            .await
            .map_err(|e| translate_client_error("prd", &e))
    }
}
