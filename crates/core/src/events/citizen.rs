// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Events triggered by applicants through the citizen frontend.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use nfdiv_domain::{
    Application, ApplicationType, CaseData, CaseDetails, CaseInvite, DivorceDocument, Fee,
    HelpWithFees, LanguagePreference, MarriageDetails, OrderSummary, State, latest_data_version,
    validate_applicant2_basic_case, validate_applicant2_request_changes, validate_basic_case,
    validate_email,
};
use nfdiv_notification::{EmailTemplateName, format_date};
use tracing::{debug, info};

use super::notify::{Party, notify, notify_applicants, notify_with};
use super::{
    ABOUT_TO_SUBMIT, APPLICANT1_GRANTS, APPLICANT2_GRANTS, BOTH_APPLICANTS_GRANTS,
    triggered_by_applicant2,
};
use crate::context::EventContext;
use crate::error::CoreError;
use crate::event::{CallbackOutcome, CcdEvent, EventDefinition};
use crate::ports::FeeQuery;

const ACCESS_CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPRSTVWXYZ23456789";
const ACCESS_CODE_LENGTH: usize = 8;

/// Personalisation key: the code applicant 2 uses to link to the case.
const ACCESS_CODE: &str = "access code";
/// Personalisation key: when applicant 2 must respond by.
const REVIEW_DEADLINE: &str = "review deadline date";

/// Generates an access code with no easily confused characters.
fn generate_access_code() -> String {
    (0..ACCESS_CODE_LENGTH)
        .map(|_| {
            let index: usize = rand::random_range(0..ACCESS_CODE_ALPHABET.len());
            char::from(ACCESS_CODE_ALPHABET[index])
        })
        .collect()
}

pub(super) struct CitizenCreateApplication;

static CITIZEN_CREATE_APPLICATION: EventDefinition = EventDefinition {
    id: "citizen-create-application",
    name: "Create draft case",
    description: "Apply for a divorce or dissolution",
    pre_states: &[],
    post_state: Some(State::Draft),
    grants: APPLICANT1_GRANTS,
    show_summary: false,
    callbacks: ABOUT_TO_SUBMIT,
    mid_event_pages: &[],
};

#[async_trait]
impl CcdEvent for CitizenCreateApplication {
    fn definition(&self) -> &'static EventDefinition {
        &CITIZEN_CREATE_APPLICATION
    }

    async fn about_to_submit(
        &self,
        _ctx: &EventContext<'_>,
        details: CaseDetails,
        _before: Option<&CaseDetails>,
    ) -> Result<CallbackOutcome, CoreError> {
        let mut data: CaseData = details.data;
        data.data_version = Some(latest_data_version());
        Ok(CallbackOutcome::with_state(data, State::Draft))
    }
}

pub(super) struct CitizenUpdateApplication;

static CITIZEN_UPDATE_APPLICATION: EventDefinition = EventDefinition {
    id: "citizen-update-application",
    name: "Patch case",
    description: "Patch a divorce or dissolution",
    pre_states: &[State::Draft, State::AwaitingApplicant1Response],
    post_state: None,
    grants: APPLICANT1_GRANTS,
    show_summary: false,
    callbacks: ABOUT_TO_SUBMIT,
    mid_event_pages: &[],
};

#[async_trait]
impl CcdEvent for CitizenUpdateApplication {
    fn definition(&self) -> &'static EventDefinition {
        &CITIZEN_UPDATE_APPLICATION
    }

    async fn about_to_submit(
        &self,
        ctx: &EventContext<'_>,
        details: CaseDetails,
        before: Option<&CaseDetails>,
    ) -> Result<CallbackOutcome, CoreError> {
        let Some(before) = before else {
            return Ok(CallbackOutcome::accept(details));
        };

        for document_id in removed_document_ids(&before.data, &details.data) {
            debug!(case_id = ?details.id, document_id = %document_id, "Deleting removed document");
            ctx.services
                .document_store
                .delete_document(ctx.auth_token, &document_id)
                .await?;
        }
        Ok(CallbackOutcome::accept(details))
    }
}

/// Ids of uploaded documents present `before` but not `after`.
fn removed_document_ids(before: &CaseData, after: &CaseData) -> Vec<String> {
    let still_present = |document: &DivorceDocument| {
        after
            .documents_uploaded
            .iter()
            .any(|lv| lv.value.document_link == document.document_link)
    };
    before
        .documents_uploaded
        .iter()
        .map(|lv| &lv.value)
        .filter(|document| !still_present(document))
        .filter_map(|document| document.document_link.as_ref())
        .filter_map(|link| link.document_id().map(str::to_string))
        .collect()
}

pub(super) struct InviteApplicant2;

static INVITE_APPLICANT2: EventDefinition = EventDefinition {
    id: "invite-applicant2",
    name: "Invite Applicant 2",
    description: "Send Application to Applicant 2 for review",
    pre_states: &[State::Draft, State::AwaitingApplicant1Response],
    post_state: Some(State::AwaitingApplicant2Response),
    grants: APPLICANT1_GRANTS,
    show_summary: false,
    callbacks: ABOUT_TO_SUBMIT,
    mid_event_pages: &[],
};

#[async_trait]
impl CcdEvent for InviteApplicant2 {
    fn definition(&self) -> &'static EventDefinition {
        &INVITE_APPLICANT2
    }

    async fn about_to_submit(
        &self,
        ctx: &EventContext<'_>,
        details: CaseDetails,
        _before: Option<&CaseDetails>,
    ) -> Result<CallbackOutcome, CoreError> {
        let mut errors: Vec<String> = validate_basic_case(&details.data, ctx.today);
        errors.extend(validate_email(
            details.data.applicant2.email.as_deref(),
            "Applicant2Email",
        ));
        if !errors.is_empty() {
            return Ok(CallbackOutcome::reject(details, errors));
        }

        let case_id: Option<u64> = details.id;
        let mut data: CaseData = details.data;
        data.case_invite = CaseInvite {
            applicant2_invite_email_address: data.applicant2.email.clone(),
            access_code: Some(generate_access_code()),
            applicant2_user_id: None,
        };
        let due_date: NaiveDate = ctx.timings.applicant2_due_date(ctx.today)?;
        data.due_date = Some(due_date);

        let language: LanguagePreference = data.applicant2.language();
        let mut vars: BTreeMap<String, String> =
            super::notify::party_vars(ctx, &data, case_id, Party::Applicant2);
        vars.insert(
            ACCESS_CODE.to_string(),
            data.case_invite.access_code.clone().unwrap_or_default(),
        );
        vars.insert(REVIEW_DEADLINE.to_string(), format_date(due_date, language));
        ctx.services
            .notifications
            .send(
                EmailTemplateName::JointApplicant2Invite,
                data.case_invite.applicant2_invite_email_address.as_deref(),
                language,
                vars,
                case_id,
            )
            .await;

        info!(case_id = ?case_id, "Applicant 2 invited");
        Ok(CallbackOutcome::with_state(
            data,
            State::AwaitingApplicant2Response,
        ))
    }
}

pub(super) struct Applicant2Approve;

static APPLICANT2_APPROVE: EventDefinition = EventDefinition {
    id: "applicant2-approve",
    name: "Applicant 2 approve",
    description: "Applicant 2 has approved",
    pre_states: &[State::AwaitingApplicant2Response],
    post_state: Some(State::Applicant2Approved),
    grants: APPLICANT2_GRANTS,
    show_summary: false,
    callbacks: ABOUT_TO_SUBMIT,
    mid_event_pages: &[],
};

#[async_trait]
impl CcdEvent for Applicant2Approve {
    fn definition(&self) -> &'static EventDefinition {
        &APPLICANT2_APPROVE
    }

    async fn about_to_submit(
        &self,
        ctx: &EventContext<'_>,
        details: CaseDetails,
        _before: Option<&CaseDetails>,
    ) -> Result<CallbackOutcome, CoreError> {
        let errors: Vec<String> = validate_applicant2_basic_case(&details.data);
        if !errors.is_empty() {
            return Ok(CallbackOutcome::reject(details, errors));
        }

        let case_id: Option<u64> = details.id;
        let mut data: CaseData = details.data;
        data.due_date = Some(ctx.timings.applicant2_due_date(ctx.today)?);

        notify(
            ctx,
            EmailTemplateName::JointApplicant2Approved,
            &data,
            case_id,
            Party::Applicant1,
        )
        .await;
        Ok(CallbackOutcome::with_state(data, State::Applicant2Approved))
    }
}

pub(super) struct Applicant2RequestChanges;

static APPLICANT2_REQUEST_CHANGES: EventDefinition = EventDefinition {
    id: "applicant2-request-changes",
    name: "Request changes",
    description: "Applicant 2 is requesting changes",
    pre_states: &[State::AwaitingApplicant2Response],
    post_state: Some(State::AwaitingApplicant1Response),
    grants: APPLICANT2_GRANTS,
    show_summary: false,
    callbacks: ABOUT_TO_SUBMIT,
    mid_event_pages: &[],
};

#[async_trait]
impl CcdEvent for Applicant2RequestChanges {
    fn definition(&self) -> &'static EventDefinition {
        &APPLICANT2_REQUEST_CHANGES
    }

    async fn about_to_submit(
        &self,
        ctx: &EventContext<'_>,
        details: CaseDetails,
        _before: Option<&CaseDetails>,
    ) -> Result<CallbackOutcome, CoreError> {
        let errors: Vec<String> = validate_applicant2_request_changes(&details.data.application);
        if !errors.is_empty() {
            return Ok(CallbackOutcome::reject(details, errors));
        }

        let mut extra: BTreeMap<String, String> = BTreeMap::new();
        extra.insert(
            String::from("applicant 2 comments"),
            details
                .data
                .application
                .applicant2_explanation_of_changes
                .clone()
                .unwrap_or_default(),
        );
        notify_with(
            ctx,
            EmailTemplateName::JointApplicant2RequestChanges,
            &details.data,
            details.id,
            Party::Applicant1,
            extra,
        )
        .await;
        Ok(CallbackOutcome::with_state(
            details.data,
            State::AwaitingApplicant1Response,
        ))
    }
}

pub(super) struct SwitchToSole;

static SWITCH_TO_SOLE: EventDefinition = EventDefinition {
    id: "switch-to-sole",
    name: "Application switched to sole",
    description: "Application type switched to sole",
    pre_states: &[
        State::AwaitingApplicant1Response,
        State::AwaitingApplicant2Response,
        State::Applicant2Approved,
    ],
    post_state: Some(State::Draft),
    grants: BOTH_APPLICANTS_GRANTS,
    show_summary: false,
    callbacks: ABOUT_TO_SUBMIT,
    mid_event_pages: &[],
};

#[async_trait]
impl CcdEvent for SwitchToSole {
    fn definition(&self) -> &'static EventDefinition {
        &SWITCH_TO_SOLE
    }

    async fn about_to_submit(
        &self,
        ctx: &EventContext<'_>,
        details: CaseDetails,
        _before: Option<&CaseDetails>,
    ) -> Result<CallbackOutcome, CoreError> {
        let case_id: Option<u64> = details.id;
        let mut data: CaseData = details.data;
        let by_applicant2: bool = triggered_by_applicant2(ctx, &data);

        data.application_type = ApplicationType::SoleApplication;
        if by_applicant2 {
            switch_to_applicant2(&mut data);
        }
        clear_applicant2_answers(&mut data.application);
        data.case_invite = CaseInvite::default();

        info!(case_id = ?case_id, by_applicant2, "Joint application switched to sole");
        notify(
            ctx,
            EmailTemplateName::JointApplicationSwitchedToSole,
            &data,
            case_id,
            Party::Applicant2,
        )
        .await;
        Ok(CallbackOutcome::with_state(data, State::Draft))
    }
}

/// Makes applicant 2 the applicant, answers included.
pub(super) fn switch_to_applicant2(data: &mut CaseData) {
    data.switch_applicants();
    let application: &mut Application = &mut data.application;
    std::mem::swap(
        &mut application.applicant1_screen_has_marriage_broken,
        &mut application.applicant2_screen_has_marriage_broken,
    );
    std::mem::swap(
        &mut application.applicant1_statement_of_truth,
        &mut application.applicant2_statement_of_truth,
    );
    std::mem::swap(
        &mut application.applicant1_prayer_has_been_given_checkbox,
        &mut application.applicant2_prayer_has_been_given_checkbox,
    );
    std::mem::swap(
        &mut application.applicant1_help_with_fees,
        &mut application.applicant2_help_with_fees,
    );
    let marriage: &mut MarriageDetails = &mut application.marriage_details;
    std::mem::swap(&mut marriage.applicant1_name, &mut marriage.applicant2_name);
}

fn clear_applicant2_answers(application: &mut Application) {
    application.applicant2_screen_has_marriage_broken = None;
    application.applicant2_statement_of_truth = None;
    application.applicant2_prayer_has_been_given_checkbox = Vec::new();
    application.applicant2_confirm_applicant1_information = None;
    application.applicant2_explanation_of_changes = None;
    application.applicant2_help_with_fees = HelpWithFees::default();
}

pub(super) struct CitizenSubmitApplication;

static CITIZEN_SUBMIT_APPLICATION: EventDefinition = EventDefinition {
    id: "citizen-submit-application",
    name: "Applicant Statement of Truth",
    description: "The applicant confirms SOT",
    pre_states: &[State::Draft, State::Applicant2Approved],
    post_state: None,
    grants: APPLICANT1_GRANTS,
    show_summary: false,
    callbacks: ABOUT_TO_SUBMIT,
    mid_event_pages: &[],
};

#[async_trait]
impl CcdEvent for CitizenSubmitApplication {
    fn definition(&self) -> &'static EventDefinition {
        &CITIZEN_SUBMIT_APPLICATION
    }

    async fn about_to_submit(
        &self,
        ctx: &EventContext<'_>,
        details: CaseDetails,
        _before: Option<&CaseDetails>,
    ) -> Result<CallbackOutcome, CoreError> {
        let mut errors: Vec<String> = validate_basic_case(&details.data, ctx.today);
        if details.data.is_joint() {
            errors.extend(validate_applicant2_basic_case(&details.data));
        }
        if !errors.is_empty() {
            return Ok(CallbackOutcome::reject(details, errors));
        }

        let case_id: Option<u64> = details.id;
        let mut data: CaseData = details.data;
        let fee: Fee = ctx
            .services
            .fees
            .lookup_fee(&FeeQuery::APPLICATION_ISSUE)
            .await?;
        data.application.application_fee_order_summary = Some(OrderSummary::single(fee));

        if !data.application.is_help_with_fees_application() {
            return Ok(CallbackOutcome::with_state(data, State::AwaitingPayment));
        }

        data.application.date_submitted = Some(ctx.now);
        send_submitted_emails(ctx, &data, case_id).await;
        Ok(CallbackOutcome::with_state(data, State::AwaitingHwfDecision))
    }
}

async fn send_submitted_emails(ctx: &EventContext<'_>, data: &CaseData, case_id: Option<u64>) {
    let template: EmailTemplateName = if data.is_joint() {
        EmailTemplateName::JointApplicationSubmitted
    } else {
        EmailTemplateName::SoleApplicationSubmitted
    };
    notify_applicants(ctx, template, data, case_id).await;
}

pub(super) struct CitizenPaymentMade;

static CITIZEN_PAYMENT_MADE: EventDefinition = EventDefinition {
    id: "citizen-payment-made",
    name: "Payment made",
    description: "Payment made",
    pre_states: &[State::AwaitingPayment],
    post_state: None,
    grants: APPLICANT1_GRANTS,
    show_summary: false,
    callbacks: ABOUT_TO_SUBMIT,
    mid_event_pages: &[],
};

#[async_trait]
impl CcdEvent for CitizenPaymentMade {
    fn definition(&self) -> &'static EventDefinition {
        &CITIZEN_PAYMENT_MADE
    }

    async fn about_to_submit(
        &self,
        ctx: &EventContext<'_>,
        details: CaseDetails,
        _before: Option<&CaseDetails>,
    ) -> Result<CallbackOutcome, CoreError> {
        let case_id: Option<u64> = details.id;
        let mut data: CaseData = details.data;

        if !data.application.has_been_paid_for() {
            info!(case_id = ?case_id, "Payment not complete, awaiting payment");
            return Ok(CallbackOutcome::with_state(data, State::AwaitingPayment));
        }

        data.application.date_submitted = Some(ctx.now);
        let state: State = if data.application.has_awaiting_documents() {
            State::AwaitingDocuments
        } else {
            State::Submitted
        };

        info!(case_id = ?case_id, state = %state, "Application paid for");
        send_submitted_emails(ctx, &data, case_id).await;
        Ok(CallbackOutcome::with_state(data, state))
    }
}
