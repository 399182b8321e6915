// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A case state.
///
/// Transitions are enforced by CCD; the service only names the state an
/// event should leave the case in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum State {
    /// Application being drafted.
    Draft,
    /// Joint application returned to applicant 1.
    AwaitingApplicant1Response,
    /// Joint application waiting on applicant 2.
    AwaitingApplicant2Response,
    /// Applicant 2 has approved the joint application.
    Applicant2Approved,
    /// Waiting for the application fee.
    AwaitingPayment,
    /// Waiting for a help-with-fees decision.
    #[serde(rename = "AwaitingHWFDecision")]
    AwaitingHwfDecision,
    /// Paid, but supporting documents are outstanding.
    AwaitingDocuments,
    /// Submitted and waiting to be issued.
    Submitted,
    /// Issued and waiting for the acknowledgement of service.
    AwaitingAos,
    /// The respondent has drafted the acknowledgement.
    AosDrafted,
    /// The acknowledgement was not returned in time.
    AosOverdue,
    /// Twenty week holding period.
    Holding,
    /// The applicant(s) may apply for a conditional order.
    AwaitingConditionalOrder,
    /// Conditional order drafted.
    ConditionalOrderDrafted,
    /// One joint applicant has applied for the conditional order.
    ConditionalOrderPending,
    /// Waiting for a legal advisor.
    AwaitingLegalAdvisorReferral,
    /// The legal advisor asked for clarification.
    AwaitingClarification,
    /// Waiting for the pronouncement hearing.
    AwaitingPronouncement,
    /// Conditional order pronounced.
    ConditionalOrderPronounced,
    /// The applicant(s) may apply for a final order.
    AwaitingFinalOrder,
    /// Final order applied for.
    FinalOrderRequested,
    /// Final order applied for after the expected window.
    FinalOrderOverdue,
    /// Final order granted.
    FinalOrderComplete,
    /// A general application is waiting to be referred.
    GeneralApplicationReceived,
    /// Application withdrawn.
    Withdrawn,
    /// Application rejected.
    Rejected,
}

/// States before the application has been submitted to the court.
pub const PRE_SUBMISSION_STATES: &[State] = &[
    State::Draft,
    State::AwaitingApplicant1Response,
    State::AwaitingApplicant2Response,
    State::Applicant2Approved,
    State::AwaitingPayment,
];

/// States after submission, excluding withdrawn and rejected cases.
pub const POST_SUBMISSION_STATES: &[State] = &[
    State::AwaitingHwfDecision,
    State::AwaitingDocuments,
    State::Submitted,
    State::AwaitingAos,
    State::AosDrafted,
    State::AosOverdue,
    State::Holding,
    State::AwaitingConditionalOrder,
    State::ConditionalOrderDrafted,
    State::ConditionalOrderPending,
    State::AwaitingLegalAdvisorReferral,
    State::AwaitingClarification,
    State::AwaitingPronouncement,
    State::ConditionalOrderPronounced,
    State::AwaitingFinalOrder,
    State::FinalOrderRequested,
    State::FinalOrderOverdue,
    State::FinalOrderComplete,
    State::GeneralApplicationReceived,
];

/// States after the court has issued the application.
pub const POST_ISSUE_STATES: &[State] = &[
    State::AwaitingAos,
    State::AosDrafted,
    State::AosOverdue,
    State::Holding,
    State::AwaitingConditionalOrder,
    State::ConditionalOrderDrafted,
    State::ConditionalOrderPending,
    State::AwaitingLegalAdvisorReferral,
    State::AwaitingClarification,
    State::AwaitingPronouncement,
    State::ConditionalOrderPronounced,
    State::AwaitingFinalOrder,
    State::FinalOrderRequested,
    State::FinalOrderOverdue,
    State::FinalOrderComplete,
    State::GeneralApplicationReceived,
];

/// States in which the respondent may draft or submit the AoS.
pub const AOS_STATES: &[State] = &[State::AwaitingAos, State::AosDrafted, State::AosOverdue];

/// Every state except withdrawn and rejected.
pub const STATES_NOT_WITHDRAWN_OR_REJECTED: &[State] = &[
    State::Draft,
    State::AwaitingApplicant1Response,
    State::AwaitingApplicant2Response,
    State::Applicant2Approved,
    State::AwaitingPayment,
    State::AwaitingHwfDecision,
    State::AwaitingDocuments,
    State::Submitted,
    State::AwaitingAos,
    State::AosDrafted,
    State::AosOverdue,
    State::Holding,
    State::AwaitingConditionalOrder,
    State::ConditionalOrderDrafted,
    State::ConditionalOrderPending,
    State::AwaitingLegalAdvisorReferral,
    State::AwaitingClarification,
    State::AwaitingPronouncement,
    State::ConditionalOrderPronounced,
    State::AwaitingFinalOrder,
    State::FinalOrderRequested,
    State::FinalOrderOverdue,
    State::FinalOrderComplete,
    State::GeneralApplicationReceived,
];

impl State {
    /// Every state, in definition order.
    pub const ALL: [Self; 26] = [
        Self::Draft,
        Self::AwaitingApplicant1Response,
        Self::AwaitingApplicant2Response,
        Self::Applicant2Approved,
        Self::AwaitingPayment,
        Self::AwaitingHwfDecision,
        Self::AwaitingDocuments,
        Self::Submitted,
        Self::AwaitingAos,
        Self::AosDrafted,
        Self::AosOverdue,
        Self::Holding,
        Self::AwaitingConditionalOrder,
        Self::ConditionalOrderDrafted,
        Self::ConditionalOrderPending,
        Self::AwaitingLegalAdvisorReferral,
        Self::AwaitingClarification,
        Self::AwaitingPronouncement,
        Self::ConditionalOrderPronounced,
        Self::AwaitingFinalOrder,
        Self::FinalOrderRequested,
        Self::FinalOrderOverdue,
        Self::FinalOrderComplete,
        Self::GeneralApplicationReceived,
        Self::Withdrawn,
        Self::Rejected,
    ];

    /// Returns the state id CCD stores.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::AwaitingApplicant1Response => "AwaitingApplicant1Response",
            Self::AwaitingApplicant2Response => "AwaitingApplicant2Response",
            Self::Applicant2Approved => "Applicant2Approved",
            Self::AwaitingPayment => "AwaitingPayment",
            Self::AwaitingHwfDecision => "AwaitingHWFDecision",
            Self::AwaitingDocuments => "AwaitingDocuments",
            Self::Submitted => "Submitted",
            Self::AwaitingAos => "AwaitingAos",
            Self::AosDrafted => "AosDrafted",
            Self::AosOverdue => "AosOverdue",
            Self::Holding => "Holding",
            Self::AwaitingConditionalOrder => "AwaitingConditionalOrder",
            Self::ConditionalOrderDrafted => "ConditionalOrderDrafted",
            Self::ConditionalOrderPending => "ConditionalOrderPending",
            Self::AwaitingLegalAdvisorReferral => "AwaitingLegalAdvisorReferral",
            Self::AwaitingClarification => "AwaitingClarification",
            Self::AwaitingPronouncement => "AwaitingPronouncement",
            Self::ConditionalOrderPronounced => "ConditionalOrderPronounced",
            Self::AwaitingFinalOrder => "AwaitingFinalOrder",
            Self::FinalOrderRequested => "FinalOrderRequested",
            Self::FinalOrderOverdue => "FinalOrderOverdue",
            Self::FinalOrderComplete => "FinalOrderComplete",
            Self::GeneralApplicationReceived => "GeneralApplicationReceived",
            Self::Withdrawn => "Withdrawn",
            Self::Rejected => "Rejected",
        }
    }

    /// Returns the label shown to caseworkers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::AwaitingApplicant1Response => "Awaiting applicant 1 response",
            Self::AwaitingApplicant2Response => "Awaiting applicant 2 response",
            Self::Applicant2Approved => "Applicant 2 approved",
            Self::AwaitingPayment => "Awaiting payment",
            Self::AwaitingHwfDecision => "Awaiting HWF decision",
            Self::AwaitingDocuments => "Awaiting applicant",
            Self::Submitted => "Submitted",
            Self::AwaitingAos => "Awaiting acknowledgement of service",
            Self::AosDrafted => "AoS drafted",
            Self::AosOverdue => "AoS overdue",
            Self::Holding => "20 week holding period",
            Self::AwaitingConditionalOrder => "Awaiting conditional order",
            Self::ConditionalOrderDrafted => "Conditional order drafted",
            Self::ConditionalOrderPending => "Conditional order pending",
            Self::AwaitingLegalAdvisorReferral => "Awaiting legal advisor referral",
            Self::AwaitingClarification => "Awaiting clarification",
            Self::AwaitingPronouncement => "Awaiting pronouncement",
            Self::ConditionalOrderPronounced => "Conditional order pronounced",
            Self::AwaitingFinalOrder => "Awaiting final order",
            Self::FinalOrderRequested => "Final order requested",
            Self::FinalOrderOverdue => "Final order overdue",
            Self::FinalOrderComplete => "Final order granted",
            Self::GeneralApplicationReceived => "General application received",
            Self::Withdrawn => "Withdrawn",
            Self::Rejected => "Rejected",
        }
    }

    /// Whether the state is in the given grouping.
    #[must_use]
    pub fn is_in(self, group: &[Self]) -> bool {
        group.contains(&self)
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for State {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| DomainError::UnknownState(s.to_string()))
    }
}
