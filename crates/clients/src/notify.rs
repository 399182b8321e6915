// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! GOV.UK Notify email client.
//!
//! Each request carries a short-lived HS256 token signed with the secret
//! half of the API key.

use std::collections::BTreeMap;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use nfdiv_notification::{EmailNotification, NotificationClient, NotificationError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sha2::Sha256;
use url::Url;

use crate::config::ConfigError;
use crate::error::{ClientError, translate_to_notification_error};
use crate::http::{decode, endpoint, send};

const UUID_LEN: usize = 36;

/// The parts of a Notify API key.
#[derive(Clone)]
pub struct NotifyKey {
    service_id: String,
    signer: Hmac<Sha256>,
}

impl std::fmt::Debug for NotifyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifyKey")
            .field("service_id", &self.service_id)
            .field("signer", &"[REDACTED]")
            .finish()
    }
}

impl NotifyKey {
    /// Splits a `{name}-{service id}-{secret}` key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidNotifyKey` if the key is too short to
    /// hold a service id and secret, or the secret cannot key HMAC-SHA256.
    pub fn parse(api_key: &str) -> Result<Self, ConfigError> {
        let api_key: &str = api_key.trim();
        let len: usize = api_key.len();
        let secret: Option<&str> = len
            .checked_sub(UUID_LEN)
            .and_then(|start| api_key.get(start..));
        let service_id: Option<&str> = len
            .checked_sub(2 * UUID_LEN + 1)
            .and_then(|start| api_key.get(start..start + UUID_LEN));
        match (service_id, secret) {
            (Some(service_id), Some(secret)) => Ok(Self {
                service_id: service_id.to_string(),
                signer: Hmac::<Sha256>::new_from_slice(secret.as_bytes())
                    .map_err(|_| ConfigError::InvalidNotifyKey)?,
            }),
            _ => Err(ConfigError::InvalidNotifyKey),
        }
    }

    /// Signs a bearer token issued at `issued_at` (seconds since the epoch).
    #[must_use]
    pub fn token(&self, issued_at: i64) -> String {
        let header: String =
            URL_SAFE_NO_PAD.encode(json!({"typ": "JWT", "alg": "HS256"}).to_string());
        let claims: String =
            URL_SAFE_NO_PAD.encode(json!({"iss": self.service_id, "iat": issued_at}).to_string());
        let signing_input: String = format!("{header}.{claims}");
        let mut signer: Hmac<Sha256> = self.signer.clone();
        signer.update(signing_input.as_bytes());
        let signature: String = URL_SAFE_NO_PAD.encode(signer.finalize().into_bytes());
        format!("{signing_input}.{signature}")
    }
}

/// The `/v2/notifications/email` request body.
#[derive(Debug, Clone, Serialize)]
pub struct SendEmailRequest<'a> {
    pub email_address: &'a str,
    pub template_id: &'a str,
    pub personalisation: &'a BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<&'a str>,
}

/// The `/v2/notifications/email` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct SendEmailResponse {
    pub id: String,
}

/// Client for GOV.UK Notify.
#[derive(Debug, Clone)]
pub struct NotifyClient {
    http: reqwest::Client,
    base_url: Url,
    key: NotifyKey,
}

impl NotifyClient {
    pub(super) const fn new(http: reqwest::Client, base_url: Url, key: NotifyKey) -> Self {
        Self {
            http,
            base_url,
            key,
        }
    }

    /// Sends one email, returning Notify's notification id.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if Notify rejects the request.
    pub async fn send(&self, notification: &EmailNotification) -> Result<String, ClientError> {
        let url: Url = endpoint(&self.base_url, "/v2/notifications/email")?;
        let body: SendEmailRequest<'_> = SendEmailRequest {
            email_address: &notification.recipient,
            template_id: &notification.template_id,
            personalisation: &notification.personalisation,
            reference: notification.reference.as_deref(),
        };
        let request = self
            .http
            .post(url)
            .bearer_auth(self.key.token(Utc::now().timestamp()))
            .json(&body);
        let response = send("notify email", request).await?;
        let sent: SendEmailResponse = decode("notify email", response).await?;
        Ok(sent.id)
    }
}

#[async_trait]
impl NotificationClient for NotifyClient {
    async fn send_email(
        &self,
        notification: &EmailNotification,
    ) -> Result<String, NotificationError> {
        self.send(notification)
            .await
            .map_err(|e| translate_to_notification_error(&e))
    }
}
