// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Outbound services the event handlers depend on.
//!
//! Each trait is implemented over HTTP by the clients crate and by
//! in-memory fakes in tests.

use async_trait::async_trait;
use nfdiv_domain::{Document, Fee, LanguagePreference, Organisation, UserRole};
use serde_json::{Map, Value};

use crate::error::CoreError;

/// The signed-in user as reported by IDAM.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserDetails {
    /// IDAM user id.
    pub id: String,
    /// Email address.
    pub email: String,
    /// Given name.
    pub forename: String,
    /// Family name.
    pub surname: String,
    /// IDAM role ids.
    pub roles: Vec<String>,
}

impl UserDetails {
    /// The user's full name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.forename, self.surname)
            .trim()
            .to_string()
    }

    /// The roles this service recognises. Unknown role ids are ignored.
    #[must_use]
    pub fn user_roles(&self) -> Vec<UserRole> {
        self.roles
            .iter()
            .filter_map(|role| UserRole::from_role_id(role))
            .collect()
    }

    /// Whether the user holds `role`.
    #[must_use]
    pub fn has_role(&self, role: UserRole) -> bool {
        self.roles.iter().any(|held| held == role.as_str())
    }
}

/// Resolves a user token to the user.
#[async_trait]
pub trait IdamLookup: Send + Sync {
    /// Returns the user owning `auth_token`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Downstream` if IDAM rejects the token.
    async fn user_details(&self, auth_token: &str) -> Result<UserDetails, CoreError>;
}

/// Resolves a service-to-service token to the calling service.
#[async_trait]
pub trait ServiceAuthLookup: Send + Sync {
    /// Returns the name of the service owning `service_token`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Downstream` if the token is not valid.
    async fn service_name(&self, service_token: &str) -> Result<String, CoreError>;
}

/// Parameters identifying a fee in the fees register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeQuery {
    /// Channel, e.g. `default`.
    pub channel: &'static str,
    /// Event, e.g. `issue`.
    pub event: &'static str,
    /// First jurisdiction.
    pub jurisdiction1: &'static str,
    /// Second jurisdiction.
    pub jurisdiction2: &'static str,
    /// Service.
    pub service: &'static str,
    /// Keyword narrowing the match.
    pub keyword: &'static str,
}

impl FeeQuery {
    /// The fee for issuing a divorce or dissolution application.
    pub const APPLICATION_ISSUE: Self = Self {
        channel: "default",
        event: "issue",
        jurisdiction1: "family",
        jurisdiction2: "family court",
        service: "divorce",
        keyword: "DivorceCivPart",
    };

    /// The fee for a general application made on notice.
    pub const GENERAL_APPLICATION: Self = Self {
        channel: "default",
        event: "general application",
        jurisdiction1: "family",
        jurisdiction2: "family court",
        service: "other",
        keyword: "GAOnNotice",
    };
}

/// Looks up fees in the fees register.
#[async_trait]
pub trait FeeLookup: Send + Sync {
    /// Returns the current fee matching `query`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Downstream` if the lookup fails.
    async fn lookup_fee(&self, query: &FeeQuery) -> Result<Fee, CoreError>;
}

/// A payment taken from a solicitor firm's fee account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditAccountPayment {
    /// PBA number charged.
    pub account_number: String,
    /// CCD case reference.
    pub case_reference: u64,
    /// Firm's own reference.
    pub customer_reference: Option<String>,
    /// Name of the firm.
    pub organisation_name: Option<String>,
    /// Total in pence.
    pub amount_in_pence: i64,
    /// Fee lines being paid.
    pub fees: Vec<Fee>,
}

/// The result of a fee account payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// The payment was taken.
    Success {
        /// Payment reference.
        reference: String,
    },
    /// The payment was refused for a reason the solicitor can act on.
    Refused {
        /// Message to show the solicitor.
        message: String,
    },
}

/// Takes payments by account.
#[async_trait]
pub trait PaymentService: Send + Sync {
    /// Charges a fee account.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Downstream` if the payment service fails in a
    /// way the solicitor cannot act on.
    async fn credit_account_payment(
        &self,
        auth_token: &str,
        payment: &CreditAccountPayment,
    ) -> Result<PaymentOutcome, CoreError>;
}

/// A document to render from a template.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRequest {
    /// Template name.
    pub template_id: &'static str,
    /// File name of the generated document.
    pub file_name: String,
    /// Values merged into the template.
    pub values: Map<String, Value>,
    /// Language of the template.
    pub language: LanguagePreference,
}

/// Renders documents from templates.
#[async_trait]
pub trait DocumentGenerator: Send + Sync {
    /// Renders and stores a document.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Downstream` if rendering fails.
    async fn render(&self, auth_token: &str, request: &DocumentRequest)
    -> Result<Document, CoreError>;
}

/// Stores and deletes case documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Permanently deletes a document.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Downstream` if the store refuses the delete.
    async fn delete_document(&self, auth_token: &str, document_id: &str) -> Result<(), CoreError>;
}

/// Looks up solicitor organisations.
#[async_trait]
pub trait OrganisationLookup: Send + Sync {
    /// Returns the organisation the signed-in solicitor belongs to.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Downstream` if the lookup fails.
    async fn user_organisation(&self, auth_token: &str) -> Result<Organisation, CoreError>;
}
