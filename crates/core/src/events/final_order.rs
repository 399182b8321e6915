// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Applying for and granting the final order.

use async_trait::async_trait;
use nfdiv_domain::{CaseData, CaseDetails, State, is_final_order_overdue, validate_final_order};
use nfdiv_notification::EmailTemplateName;
use tracing::info;

use super::notify::notify_applicants;
use super::{ABOUT_TO_SUBMIT, APPLICANT1_GRANTS, CASEWORKER_GRANTS};
use crate::context::EventContext;
use crate::error::CoreError;
use crate::event::{CallbackOutcome, CcdEvent, EventDefinition};

pub(super) struct ApplyForFinalOrder;

static APPLY_FOR_FINAL_ORDER: EventDefinition = EventDefinition {
    id: "apply-for-final-order",
    name: "Apply for final order",
    description: "Apply for final order",
    pre_states: &[State::AwaitingFinalOrder, State::ConditionalOrderPronounced],
    post_state: None,
    grants: APPLICANT1_GRANTS,
    show_summary: true,
    callbacks: ABOUT_TO_SUBMIT,
    mid_event_pages: &[],
};

#[async_trait]
impl CcdEvent for ApplyForFinalOrder {
    fn definition(&self) -> &'static EventDefinition {
        &APPLY_FOR_FINAL_ORDER
    }

    async fn about_to_submit(
        &self,
        ctx: &EventContext<'_>,
        details: CaseDetails,
        _before: Option<&CaseDetails>,
    ) -> Result<CallbackOutcome, CoreError> {
        let errors: Vec<String> = validate_final_order(&details.data.final_order, ctx.today);
        if !errors.is_empty() {
            return Ok(CallbackOutcome::reject(details, errors));
        }

        let case_id: Option<u64> = details.id;
        let mut data: CaseData = details.data;
        data.final_order.date_final_order_submitted = Some(ctx.now);
        let state: State = if is_final_order_overdue(&data.final_order, ctx.today) {
            State::FinalOrderOverdue
        } else {
            State::FinalOrderRequested
        };

        info!(case_id = ?case_id, state = %state, "Final order applied for");
        notify_applicants(ctx, EmailTemplateName::FinalOrderRequested, &data, case_id).await;
        Ok(CallbackOutcome::with_state(data, state))
    }
}

pub(super) struct CaseworkerGrantFinalOrder;

static CASEWORKER_GRANT_FINAL_ORDER: EventDefinition = EventDefinition {
    id: "caseworker-grant-final-order",
    name: "Grant Final order",
    description: "Grant Final order",
    pre_states: &[State::FinalOrderRequested, State::FinalOrderOverdue],
    post_state: Some(State::FinalOrderComplete),
    grants: CASEWORKER_GRANTS,
    show_summary: true,
    callbacks: ABOUT_TO_SUBMIT,
    mid_event_pages: &[],
};

#[async_trait]
impl CcdEvent for CaseworkerGrantFinalOrder {
    fn definition(&self) -> &'static EventDefinition {
        &CASEWORKER_GRANT_FINAL_ORDER
    }

    async fn about_to_submit(
        &self,
        ctx: &EventContext<'_>,
        details: CaseDetails,
        _before: Option<&CaseDetails>,
    ) -> Result<CallbackOutcome, CoreError> {
        let case_id: Option<u64> = details.id;
        let mut data: CaseData = details.data;
        data.final_order.date_final_order_granted = Some(ctx.now);
        data.due_date = None;

        info!(case_id = ?case_id, "Final order granted");
        notify_applicants(ctx, EmailTemplateName::FinalOrderGranted, &data, case_id).await;
        Ok(CallbackOutcome::with_state(data, State::FinalOrderComplete))
    }
}
