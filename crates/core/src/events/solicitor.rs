// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Events triggered by solicitors through Manage Case.

use async_trait::async_trait;
use nfdiv_domain::{
    Applicant, CaseData, CaseDetails, CaseReference, DomainError, Fee, ListValue, Organisation,
    OrganisationPolicy, OrderSummary, Payment, PaymentStatus, SolicitorPaymentMethod, State,
    UserRole, YesOrNo, is_yes, latest_data_version, validate_basic_case, validate_email,
};
use nfdiv_notification::EmailTemplateName;
use tracing::{info, warn};

use super::notify::{Party, notify};
use super::SOLICITOR_GRANTS;
use crate::context::EventContext;
use crate::error::CoreError;
use crate::event::{CallbackHook, CallbackOutcome, CcdEvent, EventDefinition, SubmittedOutcome};
use crate::ports::{CreditAccountPayment, FeeQuery, PaymentOutcome};

/// Page on which the solicitor enters their own details.
const ABOUT_THE_SOLICITOR_PAGE: &str = "SolAboutTheSolicitor";

const STATEMENT_OF_TRUTH_NOT_SIGNED: &str =
    "Statement of truth must be accepted by the person making the application";

pub(super) struct SolicitorCreateApplication;

static SOLICITOR_CREATE_APPLICATION: EventDefinition = EventDefinition {
    id: "solicitor-create-application",
    name: "Apply: divorce or dissolution",
    description: "Apply: divorce or dissolution",
    pre_states: &[],
    post_state: Some(State::Draft),
    grants: SOLICITOR_GRANTS,
    show_summary: true,
    callbacks: &[
        CallbackHook::AboutToStart,
        CallbackHook::MidEvent,
        CallbackHook::AboutToSubmit,
    ],
    mid_event_pages: &[ABOUT_THE_SOLICITOR_PAGE],
};

#[async_trait]
impl CcdEvent for SolicitorCreateApplication {
    fn definition(&self) -> &'static EventDefinition {
        &SOLICITOR_CREATE_APPLICATION
    }

    async fn about_to_start(
        &self,
        _ctx: &EventContext<'_>,
        details: CaseDetails,
    ) -> Result<CallbackOutcome, CoreError> {
        let mut details: CaseDetails = details;
        let applicant1: &mut Applicant = &mut details.data.applicant1;
        applicant1.language_preference_welsh.get_or_insert(YesOrNo::No);
        applicant1.solicitor_represented = Some(YesOrNo::Yes);
        Ok(CallbackOutcome::accept(details))
    }

    async fn mid_event(
        &self,
        _ctx: &EventContext<'_>,
        page: &str,
        details: CaseDetails,
        _before: Option<&CaseDetails>,
    ) -> Result<CallbackOutcome, CoreError> {
        if page != ABOUT_THE_SOLICITOR_PAGE {
            return Ok(CallbackOutcome::accept(details));
        }
        let errors: Vec<String> = validate_email(
            details.data.applicant1.solicitor.email.as_deref(),
            "Applicant1SolicitorEmail",
        );
        if errors.is_empty() {
            Ok(CallbackOutcome::accept(details))
        } else {
            Ok(CallbackOutcome::reject(details, errors))
        }
    }

    async fn about_to_submit(
        &self,
        ctx: &EventContext<'_>,
        details: CaseDetails,
        _before: Option<&CaseDetails>,
    ) -> Result<CallbackOutcome, CoreError> {
        let mut data: CaseData = details.data;
        let organisation: Organisation = ctx
            .services
            .organisations
            .user_organisation(ctx.auth_token)
            .await?;

        let reference: Option<String> = data
            .applicant1
            .solicitor
            .organisation_policy
            .as_ref()
            .and_then(|policy| policy.reference.clone());
        data.applicant1.solicitor.organisation_policy = Some(OrganisationPolicy {
            organisation: Some(organisation),
            case_assigned_role: Some(UserRole::Applicant1Solicitor.as_str().to_string()),
            reference,
        });
        data.applicant2
            .solicitor
            .organisation_policy
            .get_or_insert_with(OrganisationPolicy::default)
            .case_assigned_role = Some(UserRole::Applicant2Solicitor.as_str().to_string());
        data.applicant1.solicitor_represented = Some(YesOrNo::Yes);
        data.data_version = Some(latest_data_version());

        Ok(CallbackOutcome::with_state(data, State::Draft))
    }
}

pub(super) struct SolicitorSubmitApplication;

static SOLICITOR_SUBMIT_APPLICATION: EventDefinition = EventDefinition {
    id: "solicitor-submit-application",
    name: "Sign and submit",
    description: "Agree statement of truth, pay and submit",
    pre_states: &[State::Draft],
    post_state: None,
    grants: SOLICITOR_GRANTS,
    show_summary: true,
    callbacks: &[
        CallbackHook::AboutToStart,
        CallbackHook::AboutToSubmit,
        CallbackHook::Submitted,
    ],
    mid_event_pages: &[],
};

#[async_trait]
impl CcdEvent for SolicitorSubmitApplication {
    fn definition(&self) -> &'static EventDefinition {
        &SOLICITOR_SUBMIT_APPLICATION
    }

    async fn about_to_start(
        &self,
        ctx: &EventContext<'_>,
        details: CaseDetails,
    ) -> Result<CallbackOutcome, CoreError> {
        let mut details: CaseDetails = details;
        let fee: Fee = ctx
            .services
            .fees
            .lookup_fee(&FeeQuery::APPLICATION_ISSUE)
            .await?;
        details.data.application.application_fee_order_summary = Some(OrderSummary::single(fee));
        Ok(CallbackOutcome::accept(details))
    }

    async fn about_to_submit(
        &self,
        ctx: &EventContext<'_>,
        details: CaseDetails,
        _before: Option<&CaseDetails>,
    ) -> Result<CallbackOutcome, CoreError> {
        let mut errors: Vec<String> = Vec::new();
        if !is_yes(details.data.application.solicitor_sign_statement_of_truth) {
            errors.push(String::from(STATEMENT_OF_TRUTH_NOT_SIGNED));
        }
        errors.extend(validate_basic_case(&details.data, ctx.today));
        if !errors.is_empty() {
            return Ok(CallbackOutcome::reject(details, errors));
        }

        let case_id: Option<u64> = details.id;
        match details.data.application.solicitor_payment_method {
            None => Ok(CallbackOutcome::reject(
                details,
                vec![String::from("SolPaymentHowToPay cannot be empty or null")],
            )),
            Some(SolicitorPaymentMethod::FeesHelpWith) => {
                Ok(submit(ctx, details.data, case_id, State::AwaitingHwfDecision).await)
            }
            Some(SolicitorPaymentMethod::FeePayByAccount) => {
                let reference: u64 = case_id.ok_or(DomainError::MissingField {
                    field: "caseReference",
                })?;
                match pay_by_account(ctx, reference, details.data.clone()).await? {
                    Ok(data) => Ok(submit(ctx, data, case_id, State::Submitted).await),
                    Err(errors) => Ok(CallbackOutcome::reject(details, errors)),
                }
            }
        }
    }

    async fn submitted(
        &self,
        _ctx: &EventContext<'_>,
        details: &CaseDetails,
        _before: Option<&CaseDetails>,
    ) -> Result<SubmittedOutcome, CoreError> {
        let reference: String = details
            .id
            .and_then(|id| CaseReference::from_id(id).ok())
            .map(CaseReference::formatted)
            .unwrap_or_default();
        Ok(SubmittedOutcome {
            confirmation_header: Some(format!("# Application submitted\n## {reference}")),
            confirmation_body: Some(String::from(
                "You will receive an email when the application has been issued.",
            )),
        })
    }
}

async fn submit(
    ctx: &EventContext<'_>,
    mut data: CaseData,
    case_id: Option<u64>,
    state: State,
) -> CallbackOutcome {
    data.application.date_submitted = Some(ctx.now);
    info!(case_id = ?case_id, state = %state, "Solicitor application submitted");
    notify(
        ctx,
        EmailTemplateName::SolicitorApplicationSubmitted,
        &data,
        case_id,
        Party::Applicant1,
    )
    .await;
    CallbackOutcome::with_state(data, state)
}

/// Charges the firm's fee account, returning the updated case or the
/// messages to show the solicitor.
async fn pay_by_account(
    ctx: &EventContext<'_>,
    case_id: u64,
    mut data: CaseData,
) -> Result<Result<CaseData, Vec<String>>, CoreError> {
    let Some(account_number) = data
        .application
        .pba_number
        .clone()
        .filter(|pba| !pba.trim().is_empty())
    else {
        return Ok(Err(vec![String::from("PbaNumber cannot be empty or null")]));
    };

    let order_summary: OrderSummary = match data.application.application_fee_order_summary.take()
    {
        Some(summary) => summary,
        None => OrderSummary::single(
            ctx.services
                .fees
                .lookup_fee(&FeeQuery::APPLICATION_ISSUE)
                .await?,
        ),
    };

    let payment: CreditAccountPayment = CreditAccountPayment {
        account_number,
        case_reference: case_id,
        customer_reference: data.application.fee_account_reference.clone(),
        organisation_name: data.applicant1.solicitor.firm_name.clone(),
        amount_in_pence: order_summary.total_in_pence(),
        fees: order_summary
            .fees
            .iter()
            .map(|lv| lv.value.clone())
            .collect(),
    };

    match ctx
        .services
        .payments
        .credit_account_payment(ctx.auth_token, &payment)
        .await?
    {
        PaymentOutcome::Success { reference } => {
            data.application.application_payments.push(ListValue::new(Payment {
                created: Some(ctx.now),
                updated: Some(ctx.now),
                fee_code: payment.fees.first().map(|fee| fee.code.clone()),
                amount: Some(payment.amount_in_pence),
                status: Some(PaymentStatus::Success),
                channel: Some(String::from("payment by account")),
                reference: Some(reference.clone()),
                transaction_id: None,
            }));
            let mut order_summary: OrderSummary = order_summary;
            order_summary.payment_reference = Some(reference);
            data.application.application_fee_order_summary = Some(order_summary);
            Ok(Ok(data))
        }
        PaymentOutcome::Refused { message } => {
            warn!(case_id, message = %message, "Payment by account refused");
            Ok(Err(vec![message]))
        }
    }
}
