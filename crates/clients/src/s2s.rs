// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Service-to-service authentication.
//!
//! Validates the tokens callers present and leases the token this
//! service presents downstream. Leased tokens are cached until they are
//! close to expiry.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use nfdiv::CoreError;
use nfdiv::ports::ServiceAuthLookup;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::info;
use url::Url;

use crate::error::{ClientError, translate_client_error};
use crate::http::{bearer, endpoint, send, text};

/// Tokens are valid for four hours; they are renewed after three.
const TOKEN_TTL: Duration = Duration::from_secs(3 * 60 * 60);

#[derive(Debug)]
struct LeasedToken {
    token: String,
    leased_at: Instant,
}

/// Client for the S2S auth provider.
#[derive(Debug)]
pub struct ServiceAuthClient {
    http: reqwest::Client,
    base_url: Url,
    microservice: String,
    leased: Mutex<Option<LeasedToken>>,
}

impl ServiceAuthClient {
    pub(super) fn new(http: reqwest::Client, base_url: Url, microservice: String) -> Self {
        Self {
            http,
            base_url,
            microservice,
            leased: Mutex::new(None),
        }
    }

    /// Returns the name of the service that owns `service_token`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Status` if the provider rejects the token.
    pub async fn details(&self, service_token: &str) -> Result<String, ClientError> {
        let url: Url = endpoint(&self.base_url, "/details")?;
        let request = self
            .http
            .get(url)
            .header(reqwest::header::AUTHORIZATION, bearer(service_token));
        let response = send("s2s details", request).await?;
        text("s2s details", response).await
    }

    /// Returns this service's own token, leasing a new one when the
    /// cached token is missing or old.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if a lease is needed and fails.
    pub async fn service_token(&self) -> Result<String, ClientError> {
        let mut leased = self.leased.lock().await;
        if let Some(current) = leased.as_ref()
            && current.leased_at.elapsed() < TOKEN_TTL
        {
            return Ok(current.token.clone());
        }

        let url: Url = endpoint(&self.base_url, "/lease")?;
        let request = self
            .http
            .post(url)
            .json(&json!({ "microservice": self.microservice }));
        let response = send("s2s lease", request).await?;
        let token: String = bearer(&text("s2s lease", response).await?);
        info!(microservice = %self.microservice, "Leased S2S token");

        *leased = Some(LeasedToken {
            token: token.clone(),
            leased_at: Instant::now(),
        });
        Ok(token)
    }
}

#[async_trait]
impl ServiceAuthLookup for ServiceAuthClient {
    async fn service_name(&self, service_token: &str) -> Result<String, CoreError> {
        self.details(service_token)
            .await
            .map_err(|e| translate_client_error("s2s", &e))
    }
}
