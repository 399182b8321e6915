// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use nfdiv_domain::{CaseDetails, State};
use serde_json::{Value, json};

use crate::{
    AboutToStartOrSubmitResponse, CallbackRequest, CallbackResponse, SubmittedCallbackResponse,
};

#[test]
fn test_callback_request_reads_platform_body() {
    let body: Value = json!({
        "event_id": "caseworker-add-note",
        "case_details": {
            "id": 1_616_591_401_473_378_u64,
            "jurisdiction": "DIVORCE",
            "case_type_id": "NFD",
            "state": "AwaitingAos",
            "case_data": {"applicationType": "jointApplication"},
            "created_date": "2024-05-01T10:00:00",
            "security_classification": "PUBLIC"
        },
        "ignore_warning": true
    });

    let request: CallbackRequest = serde_json::from_value(body).unwrap();
    assert!(request.ignore_warning);
    assert!(request.case_details_before.is_none());

    let details: CaseDetails = request.case_details.into_case_details().unwrap();
    assert_eq!(details.state, Some(State::AwaitingAos));
    assert!(details.data.is_joint());
    assert!(details.created_date.is_some());
}

#[test]
fn test_empty_state_reads_as_no_state() {
    let request: CallbackRequest = serde_json::from_value(json!({
        "event_id": "citizen-create-application",
        "case_details": {"state": "", "case_data": {}}
    }))
    .unwrap();

    let details: CaseDetails = request.case_details.into_case_details().unwrap();
    assert_eq!(details.state, None);
}

#[test]
fn test_response_without_state_omits_it() {
    let response: CallbackResponse =
        CallbackResponse::AboutToStartOrSubmit(AboutToStartOrSubmitResponse {
            errors: vec![String::from("Note cannot be empty or null")],
            ..AboutToStartOrSubmitResponse::default()
        });

    let value: Value = serde_json::to_value(&response).unwrap();
    assert_eq!(
        value,
        json!({
            "data": {},
            "errors": ["Note cannot be empty or null"],
            "warnings": []
        })
    );
}

#[test]
fn test_submitted_response_serializes_flat() {
    let response: CallbackResponse = CallbackResponse::Submitted(SubmittedCallbackResponse {
        confirmation_header: Some(String::from("# Done")),
        confirmation_body: None,
    });

    let value: Value = serde_json::to_value(&response).unwrap();
    assert_eq!(value, json!({"confirmation_header": "# Done"}));
}
