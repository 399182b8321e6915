// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Base URLs and credentials for the downstream services.

use url::Url;

/// Name this service leases S2S tokens under unless overridden.
pub const DEFAULT_MICROSERVICE: &str = "nfdiv_case_api";

/// Configuration for every outbound client.
///
/// `Debug` redacts the Notify API key.
#[derive(Clone)]
pub struct ClientConfig {
    /// IDAM API.
    pub idam_url: Url,
    /// Service-to-service auth provider.
    pub s2s_url: Url,
    /// Fees register.
    pub fees_url: Url,
    /// Payments API.
    pub payments_url: Url,
    /// Document Assembly.
    pub doc_assembly_url: Url,
    /// Case document access management.
    pub document_store_url: Url,
    /// Professional reference data.
    pub prd_url: Url,
    /// GOV.UK Notify.
    pub notify_url: Url,
    /// Notify API key, `{name}-{service id}-{secret}`.
    pub notify_api_key: String,
    /// Microservice name used when leasing S2S tokens.
    pub microservice: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("idam_url", &self.idam_url)
            .field("s2s_url", &self.s2s_url)
            .field("fees_url", &self.fees_url)
            .field("payments_url", &self.payments_url)
            .field("doc_assembly_url", &self.doc_assembly_url)
            .field("document_store_url", &self.document_store_url)
            .field("prd_url", &self.prd_url)
            .field("notify_url", &self.notify_url)
            .field("notify_api_key", &"[REDACTED]")
            .field("microservice", &self.microservice)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ClientConfig {
    /// Loads the configuration from environment variables.
    ///
    /// Variables and defaults:
    /// - `IDAM_API_URL` (`http://localhost:5000`)
    /// - `S2S_URL` (`http://localhost:4502`)
    /// - `FEE_API_URL` (`http://localhost:4411`)
    /// - `PAYMENT_API_URL` (`http://localhost:4401`)
    /// - `DOC_ASSEMBLY_URL` (`http://localhost:4631`)
    /// - `CASE_DOCUMENT_AM_URL` (`http://localhost:4455`)
    /// - `PRD_API_URL` (`http://localhost:4451`)
    /// - `NOTIFY_API_URL` (`https://api.notifications.service.gov.uk`)
    /// - `NOTIFY_API_KEY` (required)
    /// - `S2S_MICROSERVICE` (`nfdiv_case_api`)
    /// - `HTTP_TIMEOUT_SECS` (30)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the key is missing or a URL is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the key is missing, a URL is invalid or
    /// the timeout is not a whole number.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = |name: &str, default: &str| -> Result<Url, ConfigError> {
            let raw: String = lookup(name).unwrap_or_else(|| default.to_string());
            Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(name.to_string(), e.to_string()))
        };

        let notify_api_key: String = lookup("NOTIFY_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingVar("NOTIFY_API_KEY"))?;
        let timeout_secs: u64 = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber("HTTP_TIMEOUT_SECS".to_string(), raw))?,
            None => 30,
        };

        Ok(Self {
            idam_url: url("IDAM_API_URL", "http://localhost:5000")?,
            s2s_url: url("S2S_URL", "http://localhost:4502")?,
            fees_url: url("FEE_API_URL", "http://localhost:4411")?,
            payments_url: url("PAYMENT_API_URL", "http://localhost:4401")?,
            doc_assembly_url: url("DOC_ASSEMBLY_URL", "http://localhost:4631")?,
            document_store_url: url("CASE_DOCUMENT_AM_URL", "http://localhost:4455")?,
            prd_url: url("PRD_API_URL", "http://localhost:4451")?,
            notify_url: url("NOTIFY_API_URL", "https://api.notifications.service.gov.uk")?,
            notify_api_key,
            microservice: lookup("S2S_MICROSERVICE")
                .unwrap_or_else(|| DEFAULT_MICROSERVICE.to_string()),
            timeout_secs,
        })
    }

    /// Points every client at one base URL, as a local stub server does.
    #[must_use]
    pub fn single_host(base_url: &Url, notify_api_key: &str) -> Self {
        Self {
            idam_url: base_url.clone(),
            s2s_url: base_url.clone(),
            fees_url: base_url.clone(),
            payments_url: base_url.clone(),
            doc_assembly_url: base_url.clone(),
            document_store_url: base_url.clone(),
            prd_url: base_url.clone(),
            notify_url: base_url.clone(),
            notify_api_key: notify_api_key.to_string(),
            microservice: DEFAULT_MICROSERVICE.to_string(),
            timeout_secs: 5,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    MissingVar(&'static str),
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("NOTIFY_API_KEY is not a valid Notify API key")]
    InvalidNotifyKey,
    #[error("{0} must be a whole number, got '{1}'")]
    InvalidNumber(String, String),
}
