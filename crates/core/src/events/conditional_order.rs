// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Conditional order applications, decisions and pronouncement.

use async_trait::async_trait;
use chrono::NaiveDate;
use nfdiv_domain::{
    ApplicationType, CO_APPLICANT1, CO_APPLICANT2, CaseData, CaseDetails, ConditionalOrder,
    ConditionalOrderQuestions, FinalOrder, State, YesOrNo, validate_conditional_order,
};
use nfdiv_notification::EmailTemplateName;
use tracing::info;

use super::citizen::switch_to_applicant2;
use super::notify::{Party, notify, notify_applicants};
use super::{
    ABOUT_TO_SUBMIT, BOTH_APPLICANTS_GRANTS, LEGAL_ADVISOR_GRANTS, SYSTEM_GRANTS,
    triggered_by_applicant2,
};
use crate::context::EventContext;
use crate::error::CoreError;
use crate::event::{CallbackOutcome, CcdEvent, EventDefinition};

/// The questions answered by `party`.
fn questions_for(
    conditional_order: &mut ConditionalOrder,
    party: Party,
) -> &mut ConditionalOrderQuestions {
    match party {
        Party::Applicant1 => &mut conditional_order.applicant1_questions,
        Party::Applicant2 => &mut conditional_order.applicant2_questions,
    }
}

fn triggering_party(ctx: &EventContext<'_>, data: &CaseData) -> Party {
    if triggered_by_applicant2(ctx, data) {
        Party::Applicant2
    } else {
        Party::Applicant1
    }
}

pub(super) struct DraftConditionalOrder;

static DRAFT_CONDITIONAL_ORDER: EventDefinition = EventDefinition {
    id: "draft-conditional-order",
    name: "Draft conditional order",
    description: "Conditional order drafted",
    pre_states: &[
        State::AwaitingConditionalOrder,
        State::ConditionalOrderDrafted,
    ],
    post_state: Some(State::ConditionalOrderDrafted),
    grants: BOTH_APPLICANTS_GRANTS,
    show_summary: true,
    callbacks: ABOUT_TO_SUBMIT,
    mid_event_pages: &[],
};

#[async_trait]
impl CcdEvent for DraftConditionalOrder {
    fn definition(&self) -> &'static EventDefinition {
        &DRAFT_CONDITIONAL_ORDER
    }

    async fn about_to_submit(
        &self,
        ctx: &EventContext<'_>,
        details: CaseDetails,
        _before: Option<&CaseDetails>,
    ) -> Result<CallbackOutcome, CoreError> {
        let mut data: CaseData = details.data;
        let party: Party = triggering_party(ctx, &data);
        questions_for(&mut data.conditional_order, party).is_drafted = Some(YesOrNo::Yes);
        Ok(CallbackOutcome::with_state(
            data,
            State::ConditionalOrderDrafted,
        ))
    }
}

pub(super) struct SubmitConditionalOrder;

static SUBMIT_CONDITIONAL_ORDER: EventDefinition = EventDefinition {
    id: "submit-conditional-order",
    name: "Submit conditional order",
    description: "Conditional order submitted",
    pre_states: &[
        State::ConditionalOrderDrafted,
        State::ConditionalOrderPending,
    ],
    post_state: None,
    grants: BOTH_APPLICANTS_GRANTS,
    show_summary: true,
    callbacks: ABOUT_TO_SUBMIT,
    mid_event_pages: &[],
};

#[async_trait]
impl CcdEvent for SubmitConditionalOrder {
    fn definition(&self) -> &'static EventDefinition {
        &SUBMIT_CONDITIONAL_ORDER
    }

    async fn about_to_submit(
        &self,
        ctx: &EventContext<'_>,
        details: CaseDetails,
        _before: Option<&CaseDetails>,
    ) -> Result<CallbackOutcome, CoreError> {
        let party: Party = triggering_party(ctx, &details.data);
        let (questions, prefix) = match party {
            Party::Applicant1 => (
                &details.data.conditional_order.applicant1_questions,
                CO_APPLICANT1,
            ),
            Party::Applicant2 => (
                &details.data.conditional_order.applicant2_questions,
                CO_APPLICANT2,
            ),
        };
        let errors: Vec<String> = validate_conditional_order(questions, prefix);
        if !errors.is_empty() {
            return Ok(CallbackOutcome::reject(details, errors));
        }

        let case_id: Option<u64> = details.id;
        let mut data: CaseData = details.data;
        questions_for(&mut data.conditional_order, party).submitted_date = Some(ctx.now);
        let other_submitted: bool =
            questions_for(&mut data.conditional_order, party.other()).is_submitted();
        let waiting_for_partner: bool = data.is_joint() && !other_submitted;

        let state: State = if waiting_for_partner {
            State::ConditionalOrderPending
        } else {
            State::AwaitingLegalAdvisorReferral
        };

        info!(case_id = ?case_id, party = ?party, state = %state, "Conditional order submitted");
        notify(
            ctx,
            EmailTemplateName::ConditionalOrderSubmitted,
            &data,
            case_id,
            party,
        )
        .await;
        if waiting_for_partner {
            notify(
                ctx,
                EmailTemplateName::PartnerAppliedForConditionalOrder,
                &data,
                case_id,
                party.other(),
            )
            .await;
        }
        Ok(CallbackOutcome::with_state(data, state))
    }
}

pub(super) struct SwitchToSoleCo;

static SWITCH_TO_SOLE_CO: EventDefinition = EventDefinition {
    id: "switch-to-sole-co",
    name: "Switch to sole conditional order",
    description: "Joint application switched to sole after conditional order",
    pre_states: &[State::ConditionalOrderPending],
    post_state: Some(State::AwaitingLegalAdvisorReferral),
    grants: BOTH_APPLICANTS_GRANTS,
    show_summary: false,
    callbacks: ABOUT_TO_SUBMIT,
    mid_event_pages: &[],
};

#[async_trait]
impl CcdEvent for SwitchToSoleCo {
    fn definition(&self) -> &'static EventDefinition {
        &SWITCH_TO_SOLE_CO
    }

    async fn about_to_submit(
        &self,
        ctx: &EventContext<'_>,
        details: CaseDetails,
        _before: Option<&CaseDetails>,
    ) -> Result<CallbackOutcome, CoreError> {
        let mut details: CaseDetails = details;
        let party: Party = triggering_party(ctx, &details.data);
        if !questions_for(&mut details.data.conditional_order, party).is_submitted() {
            return Ok(CallbackOutcome::reject(
                details,
                vec![String::from(
                    "You must submit your conditional order before switching to sole",
                )],
            ));
        }

        let case_id: Option<u64> = details.id;
        let mut data: CaseData = details.data;
        data.application_type = ApplicationType::SoleApplication;
        if party == Party::Applicant2 {
            switch_to_applicant2(&mut data);
            let conditional_order: &mut ConditionalOrder = &mut data.conditional_order;
            std::mem::swap(
                &mut conditional_order.applicant1_questions,
                &mut conditional_order.applicant2_questions,
            );
        }
        data.conditional_order.applicant2_questions = ConditionalOrderQuestions::default();

        info!(case_id = ?case_id, party = ?party, "Switched to sole after conditional order");
        notify(
            ctx,
            EmailTemplateName::JointApplicationSwitchedToSole,
            &data,
            case_id,
            Party::Applicant2,
        )
        .await;
        Ok(CallbackOutcome::with_state(
            data,
            State::AwaitingLegalAdvisorReferral,
        ))
    }
}

pub(super) struct LegalAdvisorMakeDecision;

static LEGAL_ADVISOR_MAKE_DECISION: EventDefinition = EventDefinition {
    id: "legal-advisor-make-decision",
    name: "Make a decision",
    description: "Grant Conditional Order",
    pre_states: &[State::AwaitingLegalAdvisorReferral],
    post_state: None,
    grants: LEGAL_ADVISOR_GRANTS,
    show_summary: true,
    callbacks: ABOUT_TO_SUBMIT,
    mid_event_pages: &[],
};

#[async_trait]
impl CcdEvent for LegalAdvisorMakeDecision {
    fn definition(&self) -> &'static EventDefinition {
        &LEGAL_ADVISOR_MAKE_DECISION
    }

    async fn about_to_submit(
        &self,
        ctx: &EventContext<'_>,
        details: CaseDetails,
        _before: Option<&CaseDetails>,
    ) -> Result<CallbackOutcome, CoreError> {
        let granted: Option<YesOrNo> = details.data.conditional_order.granted;
        let has_reason: bool = details
            .data
            .conditional_order
            .refusal_clarification_reason
            .as_deref()
            .is_some_and(|reason| !reason.trim().is_empty());
        let state: State = match granted {
            None => {
                return Ok(CallbackOutcome::reject(
                    details,
                    vec![String::from("CoGranted cannot be empty or null")],
                ));
            }
            Some(YesOrNo::Yes) => State::AwaitingPronouncement,
            Some(YesOrNo::No) if !has_reason => {
                return Ok(CallbackOutcome::reject(
                    details,
                    vec![String::from(
                        "CoRefusalClarificationReason cannot be empty or null",
                    )],
                ));
            }
            Some(YesOrNo::No) => State::AwaitingClarification,
        };

        let case_id: Option<u64> = details.id;
        let mut data: CaseData = details.data;
        data.conditional_order.decision_date = Some(ctx.today);
        info!(case_id = ?case_id, state = %state, "Conditional order decision made");
        Ok(CallbackOutcome::with_state(data, state))
    }
}

pub(super) struct SystemPronounceCase;

static SYSTEM_PRONOUNCE_CASE: EventDefinition = EventDefinition {
    id: "system-pronounce-case",
    name: "Pronounce case",
    description: "Conditional order pronounced",
    pre_states: &[State::AwaitingPronouncement],
    post_state: Some(State::ConditionalOrderPronounced),
    grants: SYSTEM_GRANTS,
    show_summary: false,
    callbacks: ABOUT_TO_SUBMIT,
    mid_event_pages: &[],
};

#[async_trait]
impl CcdEvent for SystemPronounceCase {
    fn definition(&self) -> &'static EventDefinition {
        &SYSTEM_PRONOUNCE_CASE
    }

    async fn about_to_submit(
        &self,
        ctx: &EventContext<'_>,
        details: CaseDetails,
        _before: Option<&CaseDetails>,
    ) -> Result<CallbackOutcome, CoreError> {
        let case_id: Option<u64> = details.id;
        let mut data: CaseData = details.data;

        let granted: NaiveDate = data
            .conditional_order
            .date_and_time_of_hearing
            .map_or(ctx.today, |hearing| hearing.date());
        data.conditional_order.granted_date = Some(granted);

        let eligible_from: NaiveDate = ctx.timings.final_order_eligible_from(granted)?;
        data.final_order = FinalOrder {
            date_final_order_eligible_from: Some(eligible_from),
            date_final_order_eligible_to_respondent: Some(
                ctx.timings
                    .final_order_eligible_to_respondent(eligible_from)?,
            ),
            date_final_order_no_longer_eligible: Some(
                ctx.timings.final_order_overdue_from(granted)?,
            ),
            ..data.final_order
        };
        data.due_date = Some(eligible_from);

        info!(case_id = ?case_id, granted = %granted, "Conditional order pronounced");
        notify_applicants(
            ctx,
            EmailTemplateName::ConditionalOrderPronounced,
            &data,
            case_id,
        )
        .await;
        if data.is_sole() {
            notify(
                ctx,
                EmailTemplateName::ConditionalOrderPronounced,
                &data,
                case_id,
                Party::Applicant2,
            )
            .await;
        }
        Ok(CallbackOutcome::with_state(
            data,
            State::ConditionalOrderPronounced,
        ))
    }
}
