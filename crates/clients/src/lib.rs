// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! HTTP clients for the services the case API calls out to.
//!
//! Every client shares one `reqwest::Client`, so connection pooling and
//! the request timeout apply across services. Calls that need a
//! `ServiceAuthorization` header take it from a shared S2S client that
//! caches the leased token.

pub mod config;
pub mod documents;
pub mod error;
pub mod fees;
mod http;
pub mod idam;
pub mod notify;
pub mod organisations;
pub mod payments;
pub mod s2s;

use std::sync::Arc;
use std::time::Duration;

use nfdiv::Services;
use nfdiv_notification::{CommonContent, NotificationDispatcher, TemplateRegistry};

pub use config::{ClientConfig, ConfigError};
pub use documents::{DocAssemblyClient, DocumentStoreClient};
pub use error::{ClientError, translate_client_error};
pub use fees::FeesClient;
pub use idam::IdamClient;
pub use notify::{NotifyClient, NotifyKey};
pub use organisations::OrganisationClient;
pub use payments::PaymentsClient;
pub use s2s::ServiceAuthClient;

/// All downstream clients, built from one configuration.
#[derive(Debug, Clone)]
pub struct HmctsClients {
    pub idam: Arc<IdamClient>,
    pub s2s: Arc<ServiceAuthClient>,
    pub fees: Arc<FeesClient>,
    pub payments: Arc<PaymentsClient>,
    pub doc_assembly: Arc<DocAssemblyClient>,
    pub document_store: Arc<DocumentStoreClient>,
    pub organisations: Arc<OrganisationClient>,
    pub notify: Arc<NotifyClient>,
}

impl HmctsClients {
    /// Builds every client.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if the Notify key is malformed, or
    /// `ClientError::Http` if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http: reqwest::Client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|source| ClientError::Http {
                endpoint: String::from("client_init"),
                source,
            })?;
        let notify_key: NotifyKey = NotifyKey::parse(&config.notify_api_key)?;

        let s2s: Arc<ServiceAuthClient> = Arc::new(ServiceAuthClient::new(
            http.clone(),
            config.s2s_url.clone(),
            config.microservice.clone(),
        ));

        Ok(Self {
            idam: Arc::new(IdamClient::new(http.clone(), config.idam_url.clone())),
            fees: Arc::new(FeesClient::new(
                http.clone(),
                config.fees_url.clone(),
                Arc::clone(&s2s),
            )),
            payments: Arc::new(PaymentsClient::new(
                http.clone(),
                config.payments_url.clone(),
                Arc::clone(&s2s),
            )),
            doc_assembly: Arc::new(DocAssemblyClient::new(
                http.clone(),
                config.doc_assembly_url.clone(),
                Arc::clone(&s2s),
            )),
            document_store: Arc::new(DocumentStoreClient::new(
                http.clone(),
                config.document_store_url.clone(),
                Arc::clone(&s2s),
            )),
            organisations: Arc::new(OrganisationClient::new(
                http.clone(),
                config.prd_url.clone(),
                Arc::clone(&s2s),
            )),
            notify: Arc::new(NotifyClient::new(
                http,
                config.notify_url.clone(),
                notify_key,
            )),
            s2s,
        })
    }

    /// Wires the clients into the services the event handlers use.
    ///
    /// # Arguments
    ///
    /// * `templates` - Notify template ids per language
    /// * `content` - Variables shared by every email
    #[must_use]
    pub fn services(&self, templates: TemplateRegistry, content: CommonContent) -> Services {
        Services {
            idam: Arc::clone(&self.idam) as _,
            service_auth: Arc::clone(&self.s2s) as _,
            fees: Arc::clone(&self.fees) as _,
            payments: Arc::clone(&self.payments) as _,
            documents: Arc::clone(&self.doc_assembly) as _,
            document_store: Arc::clone(&self.document_store) as _,
            organisations: Arc::clone(&self.organisations) as _,
            notifications: NotificationDispatcher::new(Arc::clone(&self.notify) as _, templates),
            content,
        }
    }
}
