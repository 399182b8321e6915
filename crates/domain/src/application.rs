// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::ccd::{ListValue, OrderSummary, Payment};
use crate::types::{
    DocumentType, JurisdictionConnection, PaymentStatus, ServiceMethod, SolicitorPaymentMethod,
    YesOrNo, is_yes,
};

/// The application itself: statements, prayers, fees and service.
///
/// Stored unprefixed. Marriage details, jurisdiction and help-with-fees
/// answers are attached by `CaseData` from their own prefixes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// Applicant 1 believes the marriage has broken down irretrievably.
    pub applicant1_screen_has_marriage_broken: Option<YesOrNo>,
    /// Applicant 2 believes the marriage has broken down irretrievably.
    pub applicant2_screen_has_marriage_broken: Option<YesOrNo>,
    /// Applicant 1's statement of truth.
    pub applicant1_statement_of_truth: Option<YesOrNo>,
    /// Applicant 2's statement of truth.
    pub applicant2_statement_of_truth: Option<YesOrNo>,
    /// Applicant 1's prayer (`["Yes"]` when given).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub applicant1_prayer_has_been_given_checkbox: Vec<YesOrNo>,
    /// Applicant 2's prayer (`["Yes"]` when given).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub applicant2_prayer_has_been_given_checkbox: Vec<YesOrNo>,
    /// Whether applicant 1 knows applicant 2's postal address.
    pub applicant1_knows_applicant2_address: Option<YesOrNo>,
    /// Applicant 2 confirms applicant 1's answers are correct.
    pub applicant2_confirm_applicant1_information: Option<YesOrNo>,
    /// Applicant 2's explanation of the changes they want.
    pub applicant2_explanation_of_changes: Option<String>,
    /// Applicant 1 cannot upload some supporting documents.
    pub applicant1_cannot_upload: Option<YesOrNo>,
    /// Which documents applicant 1 cannot upload.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub applicant1_cannot_upload_supporting_document: Vec<DocumentType>,
    /// When the application was submitted (paid for).
    pub date_submitted: Option<NaiveDateTime>,
    /// When the application was issued by the court.
    pub issue_date: Option<NaiveDate>,
    /// How the respondent is served.
    pub service_method: Option<ServiceMethod>,
    /// Fees due for the application.
    pub application_fee_order_summary: Option<OrderSummary>,
    /// Payment attempts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub application_payments: Vec<ListValue<Payment>>,
    /// How the solicitor pays.
    #[serde(rename = "solPaymentHowToPay")]
    pub solicitor_payment_method: Option<SolicitorPaymentMethod>,
    /// Payment-by-account number chosen by the solicitor.
    pub pba_number: Option<String>,
    /// Solicitor's fee account reference.
    pub fee_account_reference: Option<String>,
    /// The solicitor signed the statement of truth.
    #[serde(rename = "solSignStatementOfTruth")]
    pub solicitor_sign_statement_of_truth: Option<YesOrNo>,
    /// Applicant 1's help-with-fees answers, stored under `applicant1HWF`.
    #[serde(skip)]
    pub applicant1_help_with_fees: HelpWithFees,
    /// Applicant 2's help-with-fees answers, stored under `applicant2HWF`.
    #[serde(skip)]
    pub applicant2_help_with_fees: HelpWithFees,
    /// Marriage details, stored under `marriage`.
    #[serde(skip)]
    pub marriage_details: MarriageDetails,
    /// Jurisdiction answers, stored under `jurisdiction`.
    #[serde(skip)]
    pub jurisdiction: Jurisdiction,
}

impl Application {
    /// Whether applicant 1 has given the prayer.
    #[must_use]
    pub fn applicant1_prayer_given(&self) -> bool {
        self.applicant1_prayer_has_been_given_checkbox
            .contains(&YesOrNo::Yes)
    }

    /// Whether applicant 2 has given the prayer.
    #[must_use]
    pub fn applicant2_prayer_given(&self) -> bool {
        self.applicant2_prayer_has_been_given_checkbox
            .contains(&YesOrNo::Yes)
    }

    /// Whether applicant 1 needs help with fees.
    #[must_use]
    pub const fn is_help_with_fees_application(&self) -> bool {
        is_yes(self.applicant1_help_with_fees.need_help)
    }

    /// Whether applicant 1 still has supporting documents to send.
    #[must_use]
    pub const fn has_awaiting_documents(&self) -> bool {
        is_yes(self.applicant1_cannot_upload)
    }

    /// Whether the court serves the application by post.
    #[must_use]
    pub fn is_court_service(&self) -> bool {
        matches!(self.service_method, None | Some(ServiceMethod::CourtService))
    }

    /// Returns the most recent payment, if any.
    #[must_use]
    pub fn last_payment(&self) -> Option<&Payment> {
        self.application_payments.last().map(|lv| &lv.value)
    }

    /// Sum of successful payments in pence.
    #[must_use]
    pub fn paid_total_in_pence(&self) -> i64 {
        self.application_payments
            .iter()
            .map(|lv| &lv.value)
            .filter(|payment| payment.status == Some(PaymentStatus::Success))
            .filter_map(|payment| payment.amount)
            .sum()
    }

    /// An application is paid for when the last payment succeeded and the
    /// successful payments cover the order summary total.
    #[must_use]
    pub fn has_been_paid_for(&self) -> bool {
        let Some(order_summary) = &self.application_fee_order_summary else {
            return false;
        };
        let last_succeeded: bool = self
            .last_payment()
            .is_some_and(|payment| payment.status == Some(PaymentStatus::Success));
        last_succeeded && self.paid_total_in_pence() >= order_summary.total_in_pence()
    }
}

/// Help-with-fees answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct HelpWithFees {
    /// The HWF reference number.
    pub reference_number: Option<String>,
    /// Whether help is needed.
    pub need_help: Option<YesOrNo>,
    /// Whether help has already been applied for.
    pub applied_for_fees: Option<YesOrNo>,
}

/// Details of the marriage or civil partnership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MarriageDetails {
    /// Date of the marriage or civil partnership.
    pub date: Option<NaiveDate>,
    /// Applicant 1's name as on the certificate.
    pub applicant1_name: Option<String>,
    /// Applicant 2's name as on the certificate.
    pub applicant2_name: Option<String>,
    /// Whether it took place in the UK.
    pub married_in_uk: Option<YesOrNo>,
    /// Place, as on the certificate.
    pub place_of_marriage: Option<String>,
    /// Country, when outside the UK.
    pub country_of_marriage: Option<String>,
    /// The applicant confirms the certificate is correct.
    pub certify_marriage_certificate_is_correct: Option<YesOrNo>,
}

/// Jurisdiction answers and the resulting legal connections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Jurisdiction {
    /// The legal connections relied on.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connections: Vec<JurisdictionConnection>,
    /// Applicant 1 habitually resident in England and Wales.
    pub applicant1_residence: Option<YesOrNo>,
    /// Applicant 2 habitually resident in England and Wales.
    pub applicant2_residence: Option<YesOrNo>,
    /// Applicant 1 domiciled in England and Wales.
    pub applicant1_domicile: Option<YesOrNo>,
    /// Applicant 2 domiciled in England and Wales.
    pub applicant2_domicile: Option<YesOrNo>,
    /// Applicant 1 resident for the last twelve months.
    pub app1_habitually_res_last_twelve_months: Option<YesOrNo>,
    /// Applicant 1 resident for the last six months.
    pub app1_habitually_res_last_six_months: Option<YesOrNo>,
    /// Both were last habitually resident in England and Wales.
    pub both_last_habitually_resident: Option<YesOrNo>,
}

impl Jurisdiction {
    /// Derives the legal connections implied by the residence and domicile
    /// answers.
    ///
    /// Connection `J` only applies to joint applications and `G`/`I` are
    /// never inferred from answers.
    #[must_use]
    pub fn derive_connections(&self, is_joint: bool) -> Vec<JurisdictionConnection> {
        let app1_resident: bool = is_yes(self.applicant1_residence);
        let app2_resident: bool = is_yes(self.applicant2_residence);
        let app1_domiciled: bool = is_yes(self.applicant1_domicile);
        let app2_domiciled: bool = is_yes(self.applicant2_domicile);

        let mut connections: Vec<JurisdictionConnection> = Vec::new();
        if app1_resident && app2_resident {
            connections.push(JurisdictionConnection::A);
        }
        if is_yes(self.both_last_habitually_resident) && (app1_resident || app2_resident) {
            connections.push(JurisdictionConnection::B);
        }
        if app2_resident {
            connections.push(JurisdictionConnection::C);
        }
        if app1_resident && is_yes(self.app1_habitually_res_last_twelve_months) {
            connections.push(JurisdictionConnection::D);
        }
        if app1_resident && app1_domiciled && is_yes(self.app1_habitually_res_last_six_months) {
            connections.push(JurisdictionConnection::E);
        }
        if app1_domiciled && app2_domiciled {
            connections.push(JurisdictionConnection::F);
        }
        if app1_domiciled && !app2_domiciled {
            connections.push(JurisdictionConnection::H);
        }
        if is_joint && (app1_resident || app2_resident) {
            connections.push(JurisdictionConnection::J);
        }
        connections
    }
}

/// Invitation for applicant 2 to join a joint application. Stored under
/// `caseInvite`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CaseInvite {
    /// Where the invitation was sent.
    pub applicant2_invite_email_address: Option<String>,
    /// Code applicant 2 uses to link themselves to the case.
    pub access_code: Option<String>,
    /// IDAM id of applicant 2 once linked.
    pub applicant2_user_id: Option<String>,
}
