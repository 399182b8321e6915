// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Post-issue stages: acknowledgement of service, conditional order,
//! final order and general applications.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::ccd::{DivorceDocument, OrderSummary};
use crate::types::{
    ConditionalOrderCourt, GeneralApplicationType, HowToRespondApplication,
    SolicitorPaymentMethod, YesOrNo, is_no, is_yes,
};

/// The respondent's acknowledgement of service. Stored under `aos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AcknowledgementOfService {
    /// The respondent has read the application.
    pub confirm_read_petition: Option<YesOrNo>,
    /// The respondent agrees the courts have jurisdiction.
    pub jurisdiction_agree: Option<YesOrNo>,
    /// Why the respondent disagrees with jurisdiction.
    pub jurisdiction_disagree_reason: Option<String>,
    /// Whether the respondent disputes.
    pub how_to_respond_application: Option<HowToRespondApplication>,
    /// The respondent's statement of truth.
    pub statement_of_truth: Option<YesOrNo>,
    /// The respondent's prayer.
    pub prayer_has_been_given: Option<YesOrNo>,
    /// Set once the AoS has been drafted.
    pub is_drafted: Option<YesOrNo>,
    /// When the AoS was submitted.
    pub date_submitted: Option<NaiveDateTime>,
    /// The respondent wants notices by email.
    pub digital_notice_of_proceedings: Option<YesOrNo>,
}

impl AcknowledgementOfService {
    /// Whether the AoS has already been submitted.
    #[must_use]
    pub const fn is_submitted(&self) -> bool {
        self.date_submitted.is_some()
    }

    /// Whether the respondent intends to dispute.
    #[must_use]
    pub fn is_disputed(&self) -> bool {
        self.how_to_respond_application == Some(HowToRespondApplication::DisputeDivorce)
    }
}

/// One applicant's conditional order answers.
///
/// Stored under `coApplicant1` / `coApplicant2`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalOrderQuestions {
    /// The applicant wants to apply for a conditional order.
    pub apply_for_conditional_order: Option<YesOrNo>,
    /// Everything in the application is still true.
    pub is_everything_in_application_true: Option<YesOrNo>,
    /// The applicant wants to change or add to the application.
    pub change_or_add_to_application: Option<YesOrNo>,
    /// The applicant's statement of truth.
    pub statement_of_truth: Option<YesOrNo>,
    /// Set once drafted.
    pub is_drafted: Option<YesOrNo>,
    /// When the answers were submitted.
    pub submitted_date: Option<NaiveDateTime>,
}

impl ConditionalOrderQuestions {
    /// Whether the answers have been submitted.
    #[must_use]
    pub const fn is_submitted(&self) -> bool {
        self.submitted_date.is_some()
    }
}

/// The conditional order stage. Stored under `co`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalOrder {
    /// Legal advisor's decision: granted or not.
    pub granted: Option<YesOrNo>,
    /// When the legal advisor decided.
    pub decision_date: Option<NaiveDate>,
    /// What the applicant must clarify when refused.
    pub refusal_clarification_reason: Option<String>,
    /// Court that will pronounce.
    pub court: Option<ConditionalOrderCourt>,
    /// Date and time of the pronouncement hearing.
    pub date_and_time_of_hearing: Option<NaiveDateTime>,
    /// When the conditional order was pronounced.
    pub granted_date: Option<NaiveDate>,
    /// Applicant 1's answers.
    #[serde(skip)]
    pub applicant1_questions: ConditionalOrderQuestions,
    /// Applicant 2's answers.
    #[serde(skip)]
    pub applicant2_questions: ConditionalOrderQuestions,
}

impl ConditionalOrder {
    /// Whether the legal advisor granted the conditional order.
    #[must_use]
    pub const fn is_granted(&self) -> bool {
        is_yes(self.granted)
    }

    /// Whether the legal advisor refused the conditional order.
    #[must_use]
    pub const fn is_refused(&self) -> bool {
        is_no(self.granted)
    }
}

/// The final order stage. Stored unprefixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FinalOrder {
    /// Applicant 1 may apply from this date.
    pub date_final_order_eligible_from: Option<NaiveDate>,
    /// The respondent may apply from this date.
    pub date_final_order_eligible_to_respondent: Option<NaiveDate>,
    /// After this date an explanation for the delay is required.
    pub date_final_order_no_longer_eligible: Option<NaiveDate>,
    /// Applicant 1 wants to apply for the final order.
    pub does_applicant1_want_to_apply_for_final_order: Option<YesOrNo>,
    /// Explanation for applying late.
    pub applicant1_final_order_late_explanation: Option<String>,
    /// When the final order was applied for.
    pub date_final_order_submitted: Option<NaiveDateTime>,
    /// When the final order was granted.
    pub date_final_order_granted: Option<NaiveDateTime>,
}

/// A general application made to the court.
///
/// The in-progress application is stored under `generalApplication`;
/// received applications are kept in the `generalApplications` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GeneralApplication {
    /// What the court is asked to do.
    #[serde(rename = "type")]
    pub application_type: Option<GeneralApplicationType>,
    /// Details when the type is `other`.
    pub type_other_comments: Option<String>,
    /// Fees due.
    pub fee_order_summary: Option<OrderSummary>,
    /// How the fee is paid.
    pub fee_payment_method: Option<SolicitorPaymentMethod>,
    /// Help-with-fees reference when paying by HWF.
    pub fee_help_with_fees_reference_number: Option<String>,
    /// Payment-by-account number when paying by account.
    pub fee_pba_number: Option<String>,
    /// The application document.
    pub document: Option<DivorceDocument>,
    /// When the court received the application.
    pub received_date: Option<NaiveDateTime>,
}

impl GeneralApplication {
    /// Whether nothing has been entered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
