// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The case events and their callback handlers.

mod aos;
mod caseworker;
mod citizen;
mod conditional_order;
mod final_order;
mod notify;
mod solicitor;
mod system;

use std::sync::Arc;

use nfdiv_domain::{AccessProfile, CaseData, Permissions, UserRole};

use crate::context::EventContext;
use crate::event::{CallbackHook, CcdEvent};

type Grants = &'static [(UserRole, Permissions)];

const APPLICANT1_GRANTS: Grants = AccessProfile::DefaultAccess.grants();
const APPLICANT2_GRANTS: Grants = AccessProfile::Applicant2Access.grants();
const CASEWORKER_GRANTS: Grants = AccessProfile::CaseworkerAccess.grants();
const SOLICITOR_GRANTS: Grants = AccessProfile::SolicitorAccess.grants();
const LEGAL_ADVISOR_GRANTS: Grants = AccessProfile::LegalAdvisorAccess.grants();
const SYSTEM_GRANTS: Grants = AccessProfile::SystemUpdateAccess.grants();
const BOTH_APPLICANTS_GRANTS: Grants = &[
    (UserRole::Creator, Permissions::CRU),
    (UserRole::Applicant2, Permissions::CRU),
    (UserRole::Applicant1Solicitor, Permissions::CRU),
    (UserRole::Applicant2Solicitor, Permissions::CRU),
    (UserRole::SuperUser, Permissions::CRU),
    (UserRole::CaseWorker, Permissions::R),
    (UserRole::LegalAdvisor, Permissions::R),
];

const ABOUT_TO_SUBMIT: &[CallbackHook] = &[CallbackHook::AboutToSubmit];
const START_AND_SUBMIT: &[CallbackHook] =
    &[CallbackHook::AboutToStart, CallbackHook::AboutToSubmit];
const MID_EVENT_AND_SUBMIT: &[CallbackHook] =
    &[CallbackHook::MidEvent, CallbackHook::AboutToSubmit];

/// Every event the service handles, in case definition order.
pub(super) fn standard_events() -> Vec<Arc<dyn CcdEvent>> {
    vec![
        Arc::new(citizen::CitizenCreateApplication),
        Arc::new(citizen::CitizenUpdateApplication),
        Arc::new(citizen::InviteApplicant2),
        Arc::new(citizen::Applicant2Approve),
        Arc::new(citizen::Applicant2RequestChanges),
        Arc::new(citizen::SwitchToSole),
        Arc::new(citizen::CitizenSubmitApplication),
        Arc::new(citizen::CitizenPaymentMade),
        Arc::new(solicitor::SolicitorCreateApplication),
        Arc::new(solicitor::SolicitorSubmitApplication),
        Arc::new(caseworker::CaseworkerIssueApplication),
        Arc::new(aos::DraftAos),
        Arc::new(aos::SubmitAos),
        Arc::new(conditional_order::DraftConditionalOrder),
        Arc::new(conditional_order::SubmitConditionalOrder),
        Arc::new(conditional_order::SwitchToSoleCo),
        Arc::new(conditional_order::LegalAdvisorMakeDecision),
        Arc::new(conditional_order::SystemPronounceCase),
        Arc::new(system::SystemProgressHeldCase),
        Arc::new(final_order::ApplyForFinalOrder),
        Arc::new(final_order::CaseworkerGrantFinalOrder),
        Arc::new(caseworker::CaseworkerGeneralApplication),
        Arc::new(caseworker::CaseworkerAddNote),
        Arc::new(caseworker::CaseworkerWithdrawn),
    ]
}

/// Whether the user triggering the event is applicant 2 or their solicitor.
fn triggered_by_applicant2(ctx: &EventContext<'_>, case_data: &CaseData) -> bool {
    ctx.user.has_role(UserRole::Applicant2)
        || ctx.user.has_role(UserRole::Applicant2Solicitor)
        || case_data
            .case_invite
            .applicant2_user_id
            .as_deref()
            .is_some_and(|id| id == ctx.user.id)
}
