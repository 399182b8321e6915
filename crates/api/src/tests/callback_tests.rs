// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde_json::{Value, json};

use super::helpers::{
    CASEWORKER_TOKEN, CITIZEN_TOKEN, FakeHmcts, OTHER_SERVICE_TOKEN, SOLICITOR_TOKEN,
    create_test_request, create_test_service, create_test_service_with, credentials,
    sole_application,
};
use crate::{
    AboutToStartOrSubmitResponse, ApiError, CallbackPhase, CallbackResponse, Credentials,
    SubmittedCallbackResponse,
};

fn unwrap_about_to_submit(response: CallbackResponse) -> AboutToStartOrSubmitResponse {
    match response {
        CallbackResponse::AboutToStartOrSubmit(response) => response,
        CallbackResponse::Submitted(other) => panic!("expected data response, got {other:?}"),
    }
}

fn unwrap_submitted(response: CallbackResponse) -> SubmittedCallbackResponse {
    match response {
        CallbackResponse::Submitted(response) => response,
        CallbackResponse::AboutToStartOrSubmit(other) => {
            panic!("expected submitted response, got {other:?}")
        }
    }
}

fn with_note(note: &str) -> Value {
    let mut data: Value = sole_application();
    data["note"] = json!(note);
    data
}

#[tokio::test]
async fn test_add_note_appends_note_and_clears_input() {
    let test = create_test_service();
    let request = create_test_request("caseworker-add-note", "Submitted", &with_note("Called"));

    let response = test
        .service
        .handle(
            &CallbackPhase::AboutToSubmit,
            &credentials(CASEWORKER_TOKEN),
            request,
        )
        .await
        .unwrap();

    let response = unwrap_about_to_submit(response);
    assert!(response.errors.is_empty());
    assert!(response.data.get("note").is_none_or(Value::is_null));
    let notes: &Vec<Value> = response.data["notes"].as_array().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["value"]["note"], json!("Called"));
    assert_eq!(notes[0]["value"]["author"], json!("Case Tester"));
    assert_eq!(notes[0]["value"]["date"], json!("2024-06-01"));
}

#[tokio::test]
async fn test_blank_note_is_returned_as_an_error() {
    let test = create_test_service();
    let request = create_test_request("caseworker-add-note", "Submitted", &with_note("  "));

    let response = test
        .service
        .handle(
            &CallbackPhase::AboutToSubmit,
            &credentials(CASEWORKER_TOKEN),
            request,
        )
        .await
        .unwrap();

    let response = unwrap_about_to_submit(response);
    assert_eq!(response.errors, vec!["Note cannot be empty or null"]);
    assert_eq!(response.state.as_deref(), Some("Submitted"));
}

#[tokio::test]
async fn test_withdrawn_moves_case_to_withdrawn() {
    let test = create_test_service();
    let request = create_test_request("caseworker-withdrawn", "AwaitingAos", &sole_application());

    let response = test
        .service
        .handle(
            &CallbackPhase::AboutToSubmit,
            &credentials(CASEWORKER_TOKEN),
            request,
        )
        .await
        .unwrap();

    let response = unwrap_about_to_submit(response);
    assert_eq!(response.state.as_deref(), Some("Withdrawn"));
}

#[tokio::test]
async fn test_retired_fields_are_migrated_before_the_handler_runs() {
    let test = create_test_service();
    let mut data: Value = with_note("Migrated");
    data["applicant1ContactDetailsConfidential"] = json!("keep");
    let request = create_test_request("caseworker-add-note", "Submitted", &data);

    let response = test
        .service
        .handle(
            &CallbackPhase::AboutToSubmit,
            &credentials(CASEWORKER_TOKEN),
            request,
        )
        .await
        .unwrap();

    let response = unwrap_about_to_submit(response);
    assert_eq!(
        response.data["applicant1ContactDetailsType"],
        json!("private")
    );
    assert!(
        !response
            .data
            .contains_key("applicant1ContactDetailsConfidential")
    );
    assert_eq!(
        response.data[nfdiv_domain::DATA_VERSION_KEY],
        json!(nfdiv_domain::latest_data_version())
    );
}

#[tokio::test]
async fn test_unrecognised_case_data_is_returned_unchanged() {
    let test = create_test_service();
    let mut data: Value = with_note("Kept");
    data["someOtherField"] = json!({"nested": true});
    let request = create_test_request("caseworker-add-note", "Submitted", &data);

    let response = test
        .service
        .handle(
            &CallbackPhase::AboutToSubmit,
            &credentials(CASEWORKER_TOKEN),
            request,
        )
        .await
        .unwrap();

    let response = unwrap_about_to_submit(response);
    assert_eq!(response.data["someOtherField"], json!({"nested": true}));
}

#[tokio::test]
async fn test_about_to_start_sets_application_fee() {
    let test = create_test_service();
    let request = create_test_request(
        "solicitor-submit-application",
        "Draft",
        &sole_application(),
    );

    let response = test
        .service
        .handle(
            &CallbackPhase::AboutToStart,
            &credentials(SOLICITOR_TOKEN),
            request,
        )
        .await
        .unwrap();

    let response = unwrap_about_to_submit(response);
    assert!(response.errors.is_empty());
    assert!(response.data.contains_key("applicationFeeOrderSummary"));
    assert_eq!(test.fakes.fee_queries.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_mid_event_validates_the_named_page() {
    let test = create_test_service();
    let mut data: Value = sole_application();
    data["applicant1SolicitorEmail"] = json!("not-an-email");
    let request = create_test_request("solicitor-create-application", "Draft", &data);

    let response = test
        .service
        .handle(
            &CallbackPhase::MidEvent(String::from("SolAboutTheSolicitor")),
            &credentials(SOLICITOR_TOKEN),
            request,
        )
        .await
        .unwrap();

    let response = unwrap_about_to_submit(response);
    assert_eq!(
        response.errors,
        vec!["Applicant1SolicitorEmail is not a valid email address"]
    );
}

#[tokio::test]
async fn test_mid_event_on_another_page_accepts() {
    let test = create_test_service();
    let mut data: Value = sole_application();
    data["applicant1SolicitorEmail"] = json!("not-an-email");
    let request = create_test_request("solicitor-create-application", "Draft", &data);

    let response = test
        .service
        .handle(
            &CallbackPhase::MidEvent(String::from("SolStatementOfTruth")),
            &credentials(SOLICITOR_TOKEN),
            request,
        )
        .await
        .unwrap();

    assert!(unwrap_about_to_submit(response).errors.is_empty());
}

#[tokio::test]
async fn test_submitted_returns_confirmation() {
    let test = create_test_service();
    let request = create_test_request(
        "solicitor-submit-application",
        "Submitted",
        &sole_application(),
    );

    let response = test
        .service
        .handle(
            &CallbackPhase::Submitted,
            &credentials(SOLICITOR_TOKEN),
            request,
        )
        .await
        .unwrap();

    let response = unwrap_submitted(response);
    assert_eq!(
        response.confirmation_header.as_deref(),
        Some("# Application submitted\n## 1616-5914-0147-3378")
    );
    assert!(test.emails.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_service_token_is_rejected() {
    let test = create_test_service();
    let request = create_test_request("caseworker-add-note", "Submitted", &with_note("x"));
    let credentials: Credentials = Credentials {
        authorization: Some(CASEWORKER_TOKEN.to_string()),
        service_authorization: None,
    };

    let result = test
        .service
        .handle(&CallbackPhase::AboutToSubmit, &credentials, request)
        .await;

    assert!(matches!(
        result,
        Err(ApiError::AuthenticationFailed { ref reason }) if reason.contains("ServiceAuthorization")
    ));
}

#[tokio::test]
async fn test_service_not_on_allow_list_is_forbidden() {
    let test = create_test_service();
    let request = create_test_request("caseworker-add-note", "Submitted", &with_note("x"));
    let credentials: Credentials = Credentials {
        authorization: Some(CASEWORKER_TOKEN.to_string()),
        service_authorization: Some(OTHER_SERVICE_TOKEN.to_string()),
    };

    let result = test
        .service
        .handle(&CallbackPhase::AboutToSubmit, &credentials, request)
        .await;

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[tokio::test]
async fn test_missing_user_token_is_rejected() {
    let test = create_test_service();
    let request = create_test_request("caseworker-add-note", "Submitted", &with_note("x"));
    let mut credentials: Credentials = credentials(CASEWORKER_TOKEN);
    credentials.authorization = Some(String::from("   "));

    let result = test
        .service
        .handle(&CallbackPhase::AboutToSubmit, &credentials, request)
        .await;

    assert!(matches!(
        result,
        Err(ApiError::AuthenticationFailed { ref reason }) if reason.contains("Authorization")
    ));
}

#[tokio::test]
async fn test_unrecognised_user_token_is_rejected() {
    let test = create_test_service();
    let request = create_test_request("caseworker-add-note", "Submitted", &with_note("x"));

    let result = test
        .service
        .handle(
            &CallbackPhase::AboutToSubmit,
            &credentials("Bearer expired"),
            request,
        )
        .await;

    assert!(matches!(result, Err(ApiError::AuthenticationFailed { .. })));
}

#[tokio::test]
async fn test_identity_outage_is_a_downstream_error() {
    let test = create_test_service_with(FakeHmcts {
        idam_down: true,
        ..FakeHmcts::default()
    });
    let request = create_test_request("caseworker-add-note", "Submitted", &with_note("x"));

    let result = test
        .service
        .handle(
            &CallbackPhase::AboutToSubmit,
            &credentials(CASEWORKER_TOKEN),
            request,
        )
        .await;

    assert!(matches!(
        result,
        Err(ApiError::Downstream {
            status: Some(503),
            ..
        })
    ));
}

#[tokio::test]
async fn test_user_without_event_grant_is_forbidden() {
    let test = create_test_service();
    let request = create_test_request("caseworker-add-note", "Submitted", &with_note("x"));

    let result = test
        .service
        .handle(
            &CallbackPhase::AboutToSubmit,
            &credentials(CITIZEN_TOKEN),
            request,
        )
        .await;

    let Err(ApiError::Unauthorized { action, required }) = result else {
        panic!("expected Unauthorized, got {result:?}");
    };
    assert_eq!(action, "trigger event 'caseworker-add-note'");
    assert!(required.contains("caseworker-divorce-courtadmin_beta"));
}

#[tokio::test]
async fn test_unknown_event_is_not_found() {
    let test = create_test_service();
    let request = create_test_request("no-such-event", "Submitted", &sole_application());

    let result = test
        .service
        .handle(
            &CallbackPhase::AboutToSubmit,
            &credentials(CASEWORKER_TOKEN),
            request,
        )
        .await;

    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { ref resource_type, .. }) if resource_type == "Event"
    ));
}

#[tokio::test]
async fn test_unknown_state_is_invalid_input() {
    let test = create_test_service();
    let request = create_test_request("caseworker-add-note", "Archived", &with_note("x"));

    let result = test
        .service
        .handle(
            &CallbackPhase::AboutToSubmit,
            &credentials(CASEWORKER_TOKEN),
            request,
        )
        .await;

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "state"
    ));
}

#[tokio::test]
async fn test_malformed_case_data_is_invalid_input() {
    let test = create_test_service();
    let mut data: Value = with_note("x");
    data["applicationType"] = json!("polyApplication");
    let request = create_test_request("caseworker-add-note", "Submitted", &data);

    let result = test
        .service
        .handle(
            &CallbackPhase::AboutToSubmit,
            &credentials(CASEWORKER_TOKEN),
            request,
        )
        .await;

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_callback_phase_display() {
    assert_eq!(CallbackPhase::AboutToStart.to_string(), "about-to-start");
    assert_eq!(
        CallbackPhase::MidEvent(String::from("SolAboutTheSolicitor")).to_string(),
        "mid-event(SolAboutTheSolicitor)"
    );
    assert_eq!(CallbackPhase::Submitted.to_string(), "submitted");
}
