// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The respondent's acknowledgement of service.

use async_trait::async_trait;
use chrono::NaiveDate;
use nfdiv_domain::{CaseData, CaseDetails, DomainError, State, YesOrNo, validate_aos_submission};
use nfdiv_notification::EmailTemplateName;
use tracing::info;

use super::notify::{Party, notify};
use super::{ABOUT_TO_SUBMIT, APPLICANT2_GRANTS, START_AND_SUBMIT};
use crate::context::EventContext;
use crate::error::CoreError;
use crate::event::{CallbackOutcome, CcdEvent, EventDefinition};

const AOS_ALREADY_SUBMITTED: &str = "The Acknowledgement Of Service has already been submitted.";

pub(super) struct DraftAos;

static DRAFT_AOS: EventDefinition = EventDefinition {
    id: "draft-aos",
    name: "Draft AoS",
    description: "Respondent drafts Acknowledgement of Service",
    pre_states: &[State::AwaitingAos, State::AosOverdue, State::AosDrafted],
    post_state: Some(State::AosDrafted),
    grants: APPLICANT2_GRANTS,
    show_summary: true,
    callbacks: START_AND_SUBMIT,
    mid_event_pages: &[],
};

#[async_trait]
impl CcdEvent for DraftAos {
    fn definition(&self) -> &'static EventDefinition {
        &DRAFT_AOS
    }

    async fn about_to_start(
        &self,
        _ctx: &EventContext<'_>,
        details: CaseDetails,
    ) -> Result<CallbackOutcome, CoreError> {
        if details.data.acknowledgement_of_service.is_submitted() {
            return Ok(CallbackOutcome::reject(
                details,
                vec![String::from(AOS_ALREADY_SUBMITTED)],
            ));
        }
        Ok(CallbackOutcome::accept(details))
    }

    async fn about_to_submit(
        &self,
        _ctx: &EventContext<'_>,
        details: CaseDetails,
        _before: Option<&CaseDetails>,
    ) -> Result<CallbackOutcome, CoreError> {
        let mut data: CaseData = details.data;
        data.acknowledgement_of_service.is_drafted = Some(YesOrNo::Yes);
        Ok(CallbackOutcome::with_state(data, State::AosDrafted))
    }
}

pub(super) struct SubmitAos;

static SUBMIT_AOS: EventDefinition = EventDefinition {
    id: "submit-aos",
    name: "Submit AoS",
    description: "Respondent submits Acknowledgement of Service",
    pre_states: &[State::AosDrafted, State::AosOverdue],
    post_state: None,
    grants: APPLICANT2_GRANTS,
    show_summary: true,
    callbacks: ABOUT_TO_SUBMIT,
    mid_event_pages: &[],
};

#[async_trait]
impl CcdEvent for SubmitAos {
    fn definition(&self) -> &'static EventDefinition {
        &SUBMIT_AOS
    }

    async fn about_to_submit(
        &self,
        ctx: &EventContext<'_>,
        details: CaseDetails,
        _before: Option<&CaseDetails>,
    ) -> Result<CallbackOutcome, CoreError> {
        let mut errors: Vec<String> = Vec::new();
        if details.data.acknowledgement_of_service.is_submitted() {
            errors.push(String::from(AOS_ALREADY_SUBMITTED));
        }
        errors.extend(validate_aos_submission(
            &details.data.acknowledgement_of_service,
        ));
        if !errors.is_empty() {
            return Ok(CallbackOutcome::reject(details, errors));
        }

        let case_id: Option<u64> = details.id;
        let mut data: CaseData = details.data;
        data.acknowledgement_of_service.date_submitted = Some(ctx.now);
        let disputed: bool = data.acknowledgement_of_service.is_disputed();

        let state: State = if disputed {
            data.due_date = Some(ctx.timings.disputed_due_date(ctx.today)?);
            State::Holding
        } else {
            let issue_date: NaiveDate = data
                .application
                .issue_date
                .ok_or(DomainError::MissingField { field: "issueDate" })?;
            let holding_due: NaiveDate = ctx.timings.holding_due_date(issue_date)?;
            if holding_due <= ctx.today {
                data.due_date = None;
                State::AwaitingConditionalOrder
            } else {
                data.due_date = Some(holding_due);
                State::Holding
            }
        };

        info!(case_id = ?case_id, disputed, state = %state, "AoS submitted");
        let template: EmailTemplateName = if disputed {
            EmailTemplateName::AosSubmittedDisputed
        } else {
            EmailTemplateName::AosSubmittedUndisputed
        };
        notify(ctx, template, &data, case_id, Party::Applicant1).await;
        notify(ctx, template, &data, case_id, Party::Applicant2).await;
        Ok(CallbackOutcome::with_state(data, state))
    }
}
