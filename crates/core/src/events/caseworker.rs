// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Events triggered by court staff.

use async_trait::async_trait;
use chrono::NaiveDate;
use nfdiv_domain::{
    CaseData, CaseDetails, CaseReference, DivorceDocument, Document, DocumentType, Fee,
    GeneralApplication, LanguagePreference, ListValue, OrderSummary, POST_ISSUE_STATES,
    STATES_NOT_WITHDRAWN_OR_REJECTED, SolicitorPaymentMethod, State, validate_basic_case,
    validate_issue,
};
use nfdiv_notification::{EmailTemplateName, format_date};
use serde_json::{Map, Value, json};
use tracing::info;

use super::notify::{Party, notify, notify_applicants};
use super::{ABOUT_TO_SUBMIT, CASEWORKER_GRANTS, MID_EVENT_AND_SUBMIT};
use crate::context::EventContext;
use crate::error::CoreError;
use crate::event::{CallbackOutcome, CcdEvent, EventDefinition};
use crate::ports::{DocumentRequest, FeeQuery};

/// Template of the divorce or dissolution application document.
const APPLICATION_TEMPLATE: &str = "FL-NFD-GOR-ENG-Application-Sole";
/// Template of a joint application document.
const JOINT_APPLICATION_TEMPLATE: &str = "FL-NFD-GOR-ENG-Application-Joint";
/// Page on which the general application fee is shown.
const GENERAL_APPLICATION_PAYMENT_PAGE: &str = "generalApplicationPayment";

pub(super) struct CaseworkerIssueApplication;

static CASEWORKER_ISSUE_APPLICATION: EventDefinition = EventDefinition {
    id: "caseworker-issue-application",
    name: "Application issued",
    description: "Application issued",
    pre_states: &[State::Submitted, State::AwaitingDocuments],
    post_state: None,
    grants: CASEWORKER_GRANTS,
    show_summary: true,
    callbacks: ABOUT_TO_SUBMIT,
    mid_event_pages: &[],
};

#[async_trait]
impl CcdEvent for CaseworkerIssueApplication {
    fn definition(&self) -> &'static EventDefinition {
        &CASEWORKER_ISSUE_APPLICATION
    }

    async fn about_to_submit(
        &self,
        ctx: &EventContext<'_>,
        details: CaseDetails,
        _before: Option<&CaseDetails>,
    ) -> Result<CallbackOutcome, CoreError> {
        let mut errors: Vec<String> = validate_basic_case(&details.data, ctx.today);
        errors.extend(validate_issue(&details.data));
        if !errors.is_empty() {
            return Ok(CallbackOutcome::reject(details, errors));
        }

        let case_id: Option<u64> = details.id;
        let mut data: CaseData = details.data;
        data.application.issue_date = Some(ctx.today);

        let request: DocumentRequest = application_document_request(&data, case_id, ctx.today);
        let file_name: String = request.file_name.clone();
        let document: Document = ctx
            .services
            .documents
            .render(ctx.auth_token, &request)
            .await?;
        data.documents_generated
            .retain(|lv| lv.value.document_type != Some(DocumentType::Application));
        data.documents_generated.push(ListValue::new(DivorceDocument {
            document_date_added: Some(ctx.today),
            document_comment: None,
            document_file_name: Some(file_name),
            document_type: Some(DocumentType::Application),
            document_link: Some(document),
        }));

        let state: State = if data.is_sole() {
            data.due_date = Some(ctx.timings.aos_due_date(ctx.today)?);
            State::AwaitingAos
        } else {
            data.due_date = Some(ctx.timings.holding_due_date(ctx.today)?);
            State::Holding
        };

        info!(case_id = ?case_id, state = %state, "Application issued");
        if data.is_sole() {
            notify(
                ctx,
                EmailTemplateName::SoleApplicationIssued,
                &data,
                case_id,
                Party::Applicant1,
            )
            .await;
            notify(
                ctx,
                EmailTemplateName::SoleRespondentApplicationIssued,
                &data,
                case_id,
                Party::Applicant2,
            )
            .await;
        } else {
            notify_applicants(ctx, EmailTemplateName::JointApplicationIssued, &data, case_id)
                .await;
        }
        Ok(CallbackOutcome::with_state(data, state))
    }
}

/// Builds the request rendering the application document.
fn application_document_request(
    data: &CaseData,
    case_id: Option<u64>,
    issue_date: NaiveDate,
) -> DocumentRequest {
    let language: LanguagePreference = data.applicant1.language();
    let reference: String = case_id
        .and_then(|id| CaseReference::from_id(id).ok())
        .map(CaseReference::formatted)
        .unwrap_or_default();
    let connections: Vec<&str> = data
        .application
        .jurisdiction
        .connections
        .iter()
        .map(|connection| connection.description())
        .collect();
    let marriage_date: String = data
        .application
        .marriage_details
        .date
        .map(|date| format_date(date, language))
        .unwrap_or_default();

    let mut values: Map<String, Value> = Map::new();
    values.insert(String::from("ccdCaseReference"), json!(reference));
    values.insert(
        String::from("issueDate"),
        json!(format_date(issue_date, language)),
    );
    values.insert(String::from("isDivorce"), json!(data.is_divorce()));
    values.insert(
        String::from("applicant1FullName"),
        json!(data.applicant1.full_name()),
    );
    values.insert(
        String::from("applicant2FullName"),
        json!(data.applicant2.full_name()),
    );
    values.insert(String::from("marriageDate"), json!(marriage_date));
    values.insert(
        String::from("placeOfMarriage"),
        json!(data.application.marriage_details.place_of_marriage),
    );
    values.insert(String::from("jurisdictions"), json!(connections));
    if !data.applicant2.is_confidential() {
        values.insert(String::from("applicant2Email"), json!(data.applicant2.email));
    }

    let template_id: &'static str = if data.is_joint() {
        JOINT_APPLICATION_TEMPLATE
    } else {
        APPLICATION_TEMPLATE
    };
    DocumentRequest {
        template_id,
        file_name: format!(
            "{}-{}",
            DocumentType::Application.file_stem(),
            case_id.map(|id| id.to_string()).unwrap_or_default()
        ),
        values,
        language,
    }
}

pub(super) struct CaseworkerGeneralApplication;

static CASEWORKER_GENERAL_APPLICATION: EventDefinition = EventDefinition {
    id: "caseworker-general-application",
    name: "General application",
    description: "General application",
    pre_states: POST_ISSUE_STATES,
    post_state: Some(State::GeneralApplicationReceived),
    grants: CASEWORKER_GRANTS,
    show_summary: true,
    callbacks: MID_EVENT_AND_SUBMIT,
    mid_event_pages: &[GENERAL_APPLICATION_PAYMENT_PAGE],
};

#[async_trait]
impl CcdEvent for CaseworkerGeneralApplication {
    fn definition(&self) -> &'static EventDefinition {
        &CASEWORKER_GENERAL_APPLICATION
    }

    async fn mid_event(
        &self,
        ctx: &EventContext<'_>,
        page: &str,
        details: CaseDetails,
        _before: Option<&CaseDetails>,
    ) -> Result<CallbackOutcome, CoreError> {
        if page != GENERAL_APPLICATION_PAYMENT_PAGE {
            return Ok(CallbackOutcome::accept(details));
        }
        let mut details: CaseDetails = details;
        let fee: Fee = ctx
            .services
            .fees
            .lookup_fee(&FeeQuery::GENERAL_APPLICATION)
            .await?;
        details.data.general_application.fee_order_summary = Some(OrderSummary::single(fee));
        Ok(CallbackOutcome::accept(details))
    }

    async fn about_to_submit(
        &self,
        ctx: &EventContext<'_>,
        details: CaseDetails,
        _before: Option<&CaseDetails>,
    ) -> Result<CallbackOutcome, CoreError> {
        let errors: Vec<String> = validate_general_application(&details.data.general_application);
        if !errors.is_empty() {
            return Ok(CallbackOutcome::reject(details, errors));
        }

        let case_id: Option<u64> = details.id;
        let mut data: CaseData = details.data;
        let mut general_application: GeneralApplication =
            std::mem::take(&mut data.general_application);
        general_application.received_date = Some(ctx.now);
        if let Some(document) = general_application.document.clone() {
            let mut document: DivorceDocument = document;
            document.document_type = Some(DocumentType::GeneralApplication);
            document.document_date_added.get_or_insert(ctx.today);
            data.documents_uploaded.push(ListValue::new(document));
        }
        data.general_applications
            .push(ListValue::new(general_application));

        info!(case_id = ?case_id, "General application received");
        notify(
            ctx,
            EmailTemplateName::GeneralApplicationReceived,
            &data,
            case_id,
            Party::Applicant1,
        )
        .await;
        Ok(CallbackOutcome::with_state(
            data,
            State::GeneralApplicationReceived,
        ))
    }
}

fn validate_general_application(general_application: &GeneralApplication) -> Vec<String> {
    let blank = |value: Option<&String>| value.is_none_or(|v| v.trim().is_empty());
    let mut errors: Vec<String> = Vec::new();

    if general_application.document.is_none() {
        errors.push(String::from(
            "GeneralApplicationDocument cannot be empty or null",
        ));
    }
    match general_application.fee_payment_method {
        None => errors.push(String::from(
            "GeneralApplicationFeePaymentMethod cannot be empty or null",
        )),
        Some(SolicitorPaymentMethod::FeesHelpWith)
            if blank(general_application.fee_help_with_fees_reference_number.as_ref()) =>
        {
            errors.push(String::from(
                "GeneralApplicationFeeHelpWithFeesReferenceNumber cannot be empty or null",
            ));
        }
        Some(SolicitorPaymentMethod::FeePayByAccount)
            if blank(general_application.fee_pba_number.as_ref()) =>
        {
            errors.push(String::from(
                "GeneralApplicationFeePbaNumber cannot be empty or null",
            ));
        }
        Some(_) => {}
    }
    errors
}

pub(super) struct CaseworkerAddNote;

static CASEWORKER_ADD_NOTE: EventDefinition = EventDefinition {
    id: "caseworker-add-note",
    name: "Add note",
    description: "Add note",
    pre_states: STATES_NOT_WITHDRAWN_OR_REJECTED,
    post_state: None,
    grants: CASEWORKER_GRANTS,
    show_summary: true,
    callbacks: ABOUT_TO_SUBMIT,
    mid_event_pages: &[],
};

#[async_trait]
impl CcdEvent for CaseworkerAddNote {
    fn definition(&self) -> &'static EventDefinition {
        &CASEWORKER_ADD_NOTE
    }

    async fn about_to_submit(
        &self,
        ctx: &EventContext<'_>,
        details: CaseDetails,
        _before: Option<&CaseDetails>,
    ) -> Result<CallbackOutcome, CoreError> {
        let note: String = match details.data.note.as_deref() {
            Some(note) if !note.trim().is_empty() => note.to_string(),
            _ => {
                return Ok(CallbackOutcome::reject(
                    details,
                    vec![String::from("Note cannot be empty or null")],
                ));
            }
        };

        let mut details: CaseDetails = details;
        details.data.note = None;
        details
            .data
            .add_note(ctx.user.full_name(), ctx.today, note);
        Ok(CallbackOutcome::accept(details))
    }
}

pub(super) struct CaseworkerWithdrawn;

static CASEWORKER_WITHDRAWN: EventDefinition = EventDefinition {
    id: "caseworker-withdrawn",
    name: "Withdrawn",
    description: "Application withdrawn",
    pre_states: STATES_NOT_WITHDRAWN_OR_REJECTED,
    post_state: Some(State::Withdrawn),
    grants: CASEWORKER_GRANTS,
    show_summary: true,
    callbacks: ABOUT_TO_SUBMIT,
    mid_event_pages: &[],
};

#[async_trait]
impl CcdEvent for CaseworkerWithdrawn {
    fn definition(&self) -> &'static EventDefinition {
        &CASEWORKER_WITHDRAWN
    }

    async fn about_to_submit(
        &self,
        _ctx: &EventContext<'_>,
        details: CaseDetails,
        _before: Option<&CaseDetails>,
    ) -> Result<CallbackOutcome, CoreError> {
        info!(case_id = ?details.id, "Application withdrawn");
        let mut data: CaseData = details.data;
        data.due_date = None;
        Ok(CallbackOutcome::with_state(data, State::Withdrawn))
    }
}
