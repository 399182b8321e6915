// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payment by account for solicitor applications.
//!
//! Refusals the solicitor can act on (account missing, on hold, deleted
//! or short of funds) come back as `PaymentOutcome::Refused` with the
//! message to display. Anything else is an error.

use std::sync::Arc;

use async_trait::async_trait;
use nfdiv::CoreError;
use nfdiv::ports::{CreditAccountPayment, PaymentOutcome, PaymentService};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use url::Url;

use crate::error::{ClientError, translate_client_error};
use crate::http::{SERVICE_AUTHORIZATION, bearer, decode, endpoint, send};
use crate::s2s::ServiceAuthClient;

const SERVICE: &str = "DIVORCE";
const SITE_ID: &str = "AA07";
const CURRENCY: &str = "GBP";
const DESCRIPTION: &str = "Divorce application fee";
const SUCCESS: &str = "Success";

/// A fee line in a payment request.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentFee {
    pub calculated_amount: String,
    pub code: String,
    pub version: String,
    pub volume: u32,
}

/// The `/credit-account-payments` request body.
#[derive(Debug, Clone, Serialize)]
pub struct CreditAccountPaymentRequest {
    pub account_number: String,
    pub amount: String,
    pub case_reference: String,
    pub ccd_case_number: String,
    pub currency: &'static str,
    pub customer_reference: String,
    pub description: &'static str,
    pub organisation_name: String,
    pub service: &'static str,
    pub site_id: &'static str,
    pub fees: Vec<PaymentFee>,
}

impl From<&CreditAccountPayment> for CreditAccountPaymentRequest {
    fn from(payment: &CreditAccountPayment) -> Self {
        Self {
            account_number: payment.account_number.clone(),
            amount: pence_to_pounds(payment.amount_in_pence),
            case_reference: payment.case_reference.to_string(),
            ccd_case_number: payment.case_reference.to_string(),
            currency: CURRENCY,
            customer_reference: payment.customer_reference.clone().unwrap_or_default(),
            description: DESCRIPTION,
            organisation_name: payment.organisation_name.clone().unwrap_or_default(),
            service: SERVICE,
            site_id: SITE_ID,
            fees: payment
                .fees
                .iter()
                .map(|fee| PaymentFee {
                    calculated_amount: pence_to_pounds(fee.amount_in_pence()),
                    code: fee.code.clone(),
                    version: fee.version.clone(),
                    volume: 1,
                })
                .collect(),
        }
    }
}

/// One entry of the payment's status history.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusHistory {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// The `/credit-account-payments` response body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreditAccountPaymentResponse {
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub status_histories: Vec<StatusHistory>,
}

impl CreditAccountPaymentResponse {
    fn error_code(&self) -> Option<&str> {
        self.status_histories
            .iter()
            .find_map(|history| history.error_code.as_deref())
    }

    fn is_success(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|status| status.eq_ignore_ascii_case(SUCCESS))
    }
}

/// Formats pence as a decimal pounds amount, e.g. `59300` as `593.00`.
pub(super) fn pence_to_pounds(pence: i64) -> String {
    let sign: &str = if pence < 0 { "-" } else { "" };
    let pence: u64 = pence.unsigned_abs();
    format!("{sign}{}.{:02}", pence / 100, pence % 100)
}

/// The message for an account error code the solicitor can act on.
fn account_error_message(error_code: Option<&str>, account_number: &str) -> Option<String> {
    match error_code {
        Some("CA-E0001") => Some(format!(
            "Payment Account {account_number} has insufficient funds available. \
             Please use a different Payment Account."
        )),
        Some("CA-E0003") => Some(format!(
            "Payment Account {account_number} is on hold. Please use a different Payment Account."
        )),
        Some("CA-E0004") => Some(format!(
            "Payment Account {account_number} has been deleted. Please use a different Payment Account."
        )),
        _ => None,
    }
}

/// The message shown to the solicitor for a refused payment, if the
/// refusal is one they can act on.
fn refusal_message(status: u16, error_code: Option<&str>, account_number: &str) -> Option<String> {
    match status {
        404 => Some(format!(
            "Payment Account {account_number} cannot be found. Please use a different Payment Account."
        )),
        403 => account_error_message(error_code, account_number),
        _ => None,
    }
}

/// The message for a payment the API accepted but did not take.
fn unsuccessful_message(paid: &CreditAccountPaymentResponse, account_number: &str) -> String {
    account_error_message(paid.error_code(), account_number).unwrap_or_else(|| {
        format!(
            "Payment with Payment Account {account_number} was not successful. \
             Please use a different Payment Account."
        )
    })
}

/// Client for the payments API.
#[derive(Debug, Clone)]
pub struct PaymentsClient {
    http: reqwest::Client,
    base_url: Url,
    s2s: Arc<ServiceAuthClient>,
}

impl PaymentsClient {
    pub(super) const fn new(
        http: reqwest::Client,
        base_url: Url,
        s2s: Arc<ServiceAuthClient>,
    ) -> Self {
        Self { http, base_url, s2s }
    }

    /// Charges a fee account.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` for any failure that is not a refusal the
    /// solicitor can act on.
    pub async fn pay_by_account(
        &self,
        auth_token: &str,
        payment: &CreditAccountPayment,
    ) -> Result<PaymentOutcome, ClientError> {
        let url: Url = endpoint(&self.base_url, "/credit-account-payments")?;
        let body: CreditAccountPaymentRequest = CreditAccountPaymentRequest::from(payment);
        let request = self
            .http
            .post(url)
            .header(reqwest::header::AUTHORIZATION, bearer(auth_token))
            .header(SERVICE_AUTHORIZATION, self.s2s.service_token().await?)
            .json(&body);

        match send("credit account payment", request).await {
            Ok(response) => {
                let paid: CreditAccountPaymentResponse =
                    decode("credit account payment", response).await?;
                if !paid.is_success() {
                    warn!(
                        case_reference = payment.case_reference,
                        status = ?paid.status,
                        error_code = ?paid.error_code(),
                        "Payment by account not taken"
                    );
                    return Ok(PaymentOutcome::Refused {
                        message: unsuccessful_message(&paid, &payment.account_number),
                    });
                }
                let reference: String = paid.reference.ok_or_else(|| ClientError::Deserialization {
                    endpoint: String::from("credit account payment"),
                    message: String::from("payment reference missing"),
                })?;
                info!(
                    case_reference = payment.case_reference,
                    reference = %reference,
                    "Payment by account taken"
                );
                Ok(PaymentOutcome::Success { reference })
            }
            Err(ClientError::Status {
                endpoint,
                status,
                body,
            }) => {
                let refused: CreditAccountPaymentResponse =
                    serde_json::from_str(&body).unwrap_or_default();
                match refusal_message(status, refused.error_code(), &payment.account_number) {
                    Some(message) => {
                        warn!(
                            case_reference = payment.case_reference,
                            status,
                            error_code = ?refused.error_code(),
                            "Payment by account refused"
                        );
                        Ok(PaymentOutcome::Refused { message })
                    }
                    None => Err(ClientError::Status {
                        endpoint,
                        status,
                        body,
                    }),
                }
            }
            Err(err) => Err(err),
        }
    }
}

#[async_trait]
impl PaymentService for PaymentsClient {
    async fn credit_account_payment(
        &self,
        auth_token: &str,
        payment: &CreditAccountPayment,
    ) -> Result<PaymentOutcome, CoreError> {
        self.pay_by_account(auth_token, payment)
            .await
            .map_err(|e| translate_client_error("payments", &e))
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CreditAccountPaymentResponse, StatusHistory, pence_to_pounds, refusal_message,
        unsuccessful_message,
    };

    #[test]
    fn pence_format_as_pounds() {
        assert_eq!(pence_to_pounds(59_300), "593.00");
        assert_eq!(pence_to_pounds(5), "0.05");
        assert_eq!(pence_to_pounds(-1_050), "-10.50");
    }

    #[test]
    fn known_refusals_have_messages() {
        let message: Option<String> = refusal_message(403, Some("CA-E0003"), "PBA0012345");
        assert_eq!(
            message.as_deref(),
            Some("Payment Account PBA0012345 is on hold. Please use a different Payment Account.")
        );
        assert!(refusal_message(404, None, "PBA0012345").is_some());
    }

    #[test]
    fn other_failures_are_not_refusals() {
        assert_eq!(refusal_message(403, Some("CA-E9999"), "PBA0012345"), None);
        assert_eq!(refusal_message(500, None, "PBA0012345"), None);
    }

    #[test]
    fn status_is_matched_without_case() {
        let paid: CreditAccountPaymentResponse = CreditAccountPaymentResponse {
            status: Some(String::from("success")),
            ..CreditAccountPaymentResponse::default()
        };
        assert!(paid.is_success());
        assert!(!CreditAccountPaymentResponse::default().is_success());
    }

    #[test]
    fn unsuccessful_payment_uses_account_error_when_known() {
        let paid: CreditAccountPaymentResponse = CreditAccountPaymentResponse {
            status: Some(String::from("Failed")),
            status_histories: vec![StatusHistory {
                error_code: Some(String::from("CA-E0004")),
                ..StatusHistory::default()
            }],
            ..CreditAccountPaymentResponse::default()
        };
        assert_eq!(
            unsuccessful_message(&paid, "PBA0012345"),
            "Payment Account PBA0012345 has been deleted. Please use a different Payment Account."
        );
    }
}
