// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use async_trait::async_trait;
use nfdiv::CoreError;
use nfdiv::ports::{FeeLookup, FeeQuery};
use nfdiv_domain::Fee;
use serde::Deserialize;
use serde_json::Number;
use tracing::info;
use url::Url;

use crate::error::{ClientError, translate_client_error};
use crate::http::{SERVICE_AUTHORIZATION, decode, endpoint, send};
use crate::s2s::ServiceAuthClient;

/// The fees register lookup response.
#[derive(Debug, Clone, Deserialize)]
pub struct FeeResponse {
    pub code: String,
    pub description: String,
    pub version: i64,
    /// Amount in pounds, e.g. `593.00`.
    pub fee_amount: Number,
}

impl FeeResponse {
    /// Converts to the case-data fee, with the amount in pence.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Deserialization` if the amount has more than
    /// two decimal places.
    pub fn into_fee(self) -> Result<Fee, ClientError> {
        let pence: i64 = pounds_to_pence(&self.fee_amount.to_string()).ok_or_else(|| {
            ClientError::Deserialization {
                endpoint: String::from("fees lookup"),
                message: format!("unexpected fee amount {}", self.fee_amount),
            }
        })?;
        Ok(Fee {
            amount: pence.to_string(),
            code: self.code,
            description: self.description,
            version: self.version.to_string(),
        })
    }
}

/// Converts a decimal pounds amount such as `593.5` to pence.
pub(super) fn pounds_to_pence(amount: &str) -> Option<i64> {
    let (pounds, pence) = amount.split_once('.').unwrap_or((amount, "0"));
    if pence.len() > 2 || !pence.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let pounds: i64 = pounds.parse().ok()?;
    let pence: i64 = format!("{pence:0<2}").parse().ok()?;
    pounds.checked_mul(100)?.checked_add(pence)
}

/// Client for the fees register.
#[derive(Debug, Clone)]
pub struct FeesClient {
    http: reqwest::Client,
    base_url: Url,
    s2s: Arc<ServiceAuthClient>,
}

impl FeesClient {
    pub(super) const fn new(
        http: reqwest::Client,
        base_url: Url,
        s2s: Arc<ServiceAuthClient>,
    ) -> Self {
        Self { http, base_url, s2s }
    }

    /// Looks up the current fee matching `query`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the lookup fails or finds no fee.
    pub async fn lookup(&self, query: &FeeQuery) -> Result<Fee, ClientError> {
        let url: Url = endpoint(&self.base_url, "/fees-register/fees/lookup")?;
        let request = self
            .http
            .get(url)
            .header(SERVICE_AUTHORIZATION, self.s2s.service_token().await?)
            .query(&[
                ("channel", query.channel),
                ("event", query.event),
                ("jurisdiction1", query.jurisdiction1),
                ("jurisdiction2", query.jurisdiction2),
                ("service", query.service),
                ("keyword", query.keyword),
            ]);
        let response = send("fees lookup", request).await?;
        let fee: Fee = decode::<FeeResponse>("fees lookup", response)
            .await?
            .into_fee()?;
        info!(code = %fee.code, amount = %fee.amount, "Fee looked up");
        Ok(fee)
    }
}

#[async_trait]
impl FeeLookup for FeesClient {
    async fn lookup_fee(&self, query: &FeeQuery) -> Result<Fee, CoreError> {
        self.lookup(query)
            .await
            .map_err(|e| translate_client_error("fees", &e))
    }
}
