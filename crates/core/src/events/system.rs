// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use async_trait::async_trait;
use chrono::NaiveDate;
use nfdiv_domain::{CaseData, CaseDetails, State};
use tracing::info;

use super::{ABOUT_TO_SUBMIT, SYSTEM_GRANTS};
use crate::context::EventContext;
use crate::error::CoreError;
use crate::event::{CallbackOutcome, CcdEvent, EventDefinition};

/// Moves a case out of the holding period once it has elapsed.
pub(super) struct SystemProgressHeldCase;

static SYSTEM_PROGRESS_HELD_CASE: EventDefinition = EventDefinition {
    id: "system-progress-held-case",
    name: "Awaiting Conditional Order",
    description: "Progress held case to awaiting conditional order",
    pre_states: &[State::Holding],
    post_state: Some(State::AwaitingConditionalOrder),
    grants: SYSTEM_GRANTS,
    show_summary: false,
    callbacks: ABOUT_TO_SUBMIT,
    mid_event_pages: &[],
};

#[async_trait]
impl CcdEvent for SystemProgressHeldCase {
    fn definition(&self) -> &'static EventDefinition {
        &SYSTEM_PROGRESS_HELD_CASE
    }

    async fn about_to_submit(
        &self,
        ctx: &EventContext<'_>,
        details: CaseDetails,
        _before: Option<&CaseDetails>,
    ) -> Result<CallbackOutcome, CoreError> {
        let Some(due_date): Option<NaiveDate> = details.data.due_date else {
            return Ok(CallbackOutcome::reject(
                details,
                vec![String::from("DueDate cannot be empty or null")],
            ));
        };
        if due_date > ctx.today {
            let message: String = format!(
                "The holding period has not ended. Case can progress from {}",
                due_date.format("%-d %B %Y")
            );
            return Ok(CallbackOutcome::reject(details, vec![message]));
        }

        let case_id: Option<u64> = details.id;
        let mut data: CaseData = details.data;
        data.due_date = None;
        info!(case_id = ?case_id, held_until = %due_date, "Held case progressed");
        Ok(CallbackOutcome::with_state(
            data,
            State::AwaitingConditionalOrder,
        ))
    }
}
