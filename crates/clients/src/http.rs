// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::ConfigError;
use crate::error::ClientError;

/// Header carrying the calling service's S2S token.
pub(super) const SERVICE_AUTHORIZATION: &str = "ServiceAuthorization";

/// Resolves `path` against a service's base URL.
pub(super) fn endpoint(base_url: &Url, path: &str) -> Result<Url, ClientError> {
    base_url
        .join(path)
        .map_err(|e| ConfigError::InvalidUrl(path.to_string(), e.to_string()).into())
}

/// Prefixes a token with `Bearer ` unless it already carries it.
pub(super) fn bearer(token: &str) -> String {
    if token.starts_with("Bearer ") {
        token.to_string()
    } else {
        format!("Bearer {token}")
    }
}

/// Sends `request`, turning transport failures and non-success statuses
/// into errors.
pub(super) async fn send(endpoint: &str, request: RequestBuilder) -> Result<Response, ClientError> {
    let response: Response = request.send().await.map_err(|source| ClientError::Http {
        endpoint: endpoint.to_string(),
        source,
    })?;

    let status = response.status();
    debug!(endpoint, status = status.as_u16(), "Downstream response");
    if status.is_success() {
        return Ok(response);
    }

    let body: String = response.text().await.unwrap_or_default();
    Err(ClientError::Status {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        body,
    })
}

/// Reads a JSON body.
pub(super) async fn decode<T: DeserializeOwned>(
    endpoint: &str,
    response: Response,
) -> Result<T, ClientError> {
    let body: String = response.text().await.map_err(|source| ClientError::Http {
        endpoint: endpoint.to_string(),
        source,
    })?;
    serde_json::from_str(&body).map_err(|e| ClientError::Deserialization {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}

/// Reads a plain text body, trimmed.
pub(super) async fn text(endpoint: &str, response: Response) -> Result<String, ClientError> {
    response
        .text()
        .await
        .map(|body| body.trim().to_string())
        .map_err(|source| ClientError::Http {
            endpoint: endpoint.to_string(),
            source,
        })
}
