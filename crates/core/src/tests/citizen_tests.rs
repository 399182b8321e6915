// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use nfdiv_domain::{
    ApplicationType, CaseData, CaseDetails, DivorceDocument, Document, DocumentType, ListValue,
    OrderSummary, Payment, PaymentStatus, State, UserRole, YesOrNo, latest_data_version,
};
use nfdiv_notification::EmailTemplateName;

use super::helpers::{
    Harness, create_joint_case, create_test_case, create_test_fee, date, details, now,
};
use crate::CallbackOutcome;
use crate::ports::FeeQuery;

fn uploaded(id: &str) -> ListValue<DivorceDocument> {
    ListValue::new(DivorceDocument {
        document_type: Some(DocumentType::MarriageCertificate),
        document_link: Some(Document {
            document_url: format!("http://dm-store/documents/{id}"),
            document_filename: format!("{id}.pdf"),
            document_binary_url: format!("http://dm-store/documents/{id}/binary"),
        }),
        ..DivorceDocument::default()
    })
}

#[tokio::test]
async fn test_create_application_moves_to_draft_and_stamps_version() {
    let harness: Harness = Harness::new(&[UserRole::Citizen]);

    let outcome: CallbackOutcome = harness
        .about_to_submit(
            "citizen-create-application",
            details(CaseData::default(), State::Draft),
        )
        .await;

    assert_eq!(outcome.state, Some(State::Draft));
    assert_eq!(outcome.data.data_version, Some(latest_data_version()));
    assert_eq!(outcome.data.application_type, ApplicationType::SoleApplication);
}

#[tokio::test]
async fn test_update_application_deletes_removed_documents() {
    let harness: Harness = Harness::new(&[UserRole::Citizen]);
    let mut before: CaseData = create_test_case();
    before.documents_uploaded = vec![uploaded("keep"), uploaded("remove")];
    let mut after: CaseData = before.clone();
    after.documents_uploaded.retain(|lv| {
        lv.value
            .document_link
            .as_ref()
            .is_some_and(|link| link.document_url.ends_with("keep"))
    });
    let before: CaseDetails = details(before, State::Draft);

    let outcome: CallbackOutcome = harness
        .try_about_to_submit(
            "citizen-update-application",
            details(after, State::Draft),
            Some(&before),
        )
        .await
        .unwrap();

    assert!(!outcome.is_rejected());
    assert_eq!(
        *harness.fakes.deleted_documents.lock().unwrap(),
        vec![String::from("remove")]
    );
}

#[tokio::test]
async fn test_invite_applicant2_sets_access_code_and_due_date() {
    let harness: Harness = Harness::new(&[UserRole::Citizen]);
    let mut case_data: CaseData = create_test_case();
    case_data.application_type = ApplicationType::JointApplication;

    let outcome: CallbackOutcome = harness
        .about_to_submit("invite-applicant2", details(case_data, State::Draft))
        .await;

    assert_eq!(outcome.state, Some(State::AwaitingApplicant2Response));
    let access_code: String = outcome.data.case_invite.access_code.clone().unwrap();
    assert_eq!(access_code.len(), 8);
    assert!(access_code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    assert!(!access_code.contains(['I', 'O', '0', '1']));
    assert_eq!(
        outcome.data.case_invite.applicant2_invite_email_address.as_deref(),
        Some("sam@example.com")
    );
    assert_eq!(outcome.data.due_date, Some(date(2024, 6, 15)));

    let invite = harness.sent_email(EmailTemplateName::JointApplicant2Invite);
    assert_eq!(invite.recipient, "sam@example.com");
    assert_eq!(invite.personalisation["access code"], access_code);
    assert_eq!(invite.personalisation["review deadline date"], "15 June 2024");
}

#[tokio::test]
async fn test_invite_applicant2_requires_valid_email() {
    let harness: Harness = Harness::new(&[UserRole::Citizen]);
    let mut case_data: CaseData = create_test_case();
    case_data.applicant2.email = Some(String::from("not-an-email"));

    let outcome: CallbackOutcome = harness
        .about_to_submit("invite-applicant2", details(case_data, State::Draft))
        .await;

    assert_eq!(
        outcome.errors,
        vec![String::from("Applicant2Email is not a valid email address")]
    );
    assert_eq!(outcome.state, Some(State::Draft));
    assert!(harness.sent().is_empty());
}

#[tokio::test]
async fn test_applicant2_approve_emails_applicant1() {
    let harness: Harness = Harness::new(&[UserRole::Citizen]).as_applicant2();

    let outcome: CallbackOutcome = harness
        .about_to_submit(
            "applicant2-approve",
            details(create_joint_case(), State::AwaitingApplicant2Response),
        )
        .await;

    assert_eq!(outcome.state, Some(State::Applicant2Approved));
    assert_eq!(
        harness.sent(),
        vec![(
            EmailTemplateName::JointApplicant2Approved,
            String::from("alex@example.com")
        )]
    );
}

#[tokio::test]
async fn test_applicant2_approve_requires_statement_of_truth() {
    let harness: Harness = Harness::new(&[UserRole::Citizen]).as_applicant2();
    let mut case_data: CaseData = create_joint_case();
    case_data.application.applicant2_statement_of_truth = None;

    let outcome: CallbackOutcome = harness
        .about_to_submit(
            "applicant2-approve",
            details(case_data, State::AwaitingApplicant2Response),
        )
        .await;

    assert_eq!(
        outcome.errors,
        vec![String::from("Applicant2StatementOfTruth must be YES")]
    );
}

#[tokio::test]
async fn test_applicant2_request_changes_requires_explanation() {
    let harness: Harness = Harness::new(&[UserRole::Citizen]).as_applicant2();
    let mut case_data: CaseData = create_joint_case();
    case_data.application.applicant2_confirm_applicant1_information = Some(YesOrNo::No);

    let outcome: CallbackOutcome = harness
        .about_to_submit(
            "applicant2-request-changes",
            details(case_data.clone(), State::AwaitingApplicant2Response),
        )
        .await;
    assert_eq!(
        outcome.errors,
        vec![String::from(
            "Applicant2ExplanationOfChanges cannot be empty or null"
        )]
    );

    case_data.application.applicant2_explanation_of_changes =
        Some(String::from("Wrong date of marriage"));
    let outcome: CallbackOutcome = harness
        .about_to_submit(
            "applicant2-request-changes",
            details(case_data, State::AwaitingApplicant2Response),
        )
        .await;

    assert_eq!(outcome.state, Some(State::AwaitingApplicant1Response));
    let email = harness.sent_email(EmailTemplateName::JointApplicant2RequestChanges);
    assert_eq!(email.recipient, "alex@example.com");
    assert_eq!(
        email.personalisation["applicant 2 comments"],
        "Wrong date of marriage"
    );
}

#[tokio::test]
async fn test_switch_to_sole_by_applicant1_clears_applicant2_answers() {
    let harness: Harness = Harness::new(&[UserRole::Citizen]);
    let mut case_data: CaseData = create_joint_case();
    case_data.case_invite.access_code = Some(String::from("ABCD2345"));

    let outcome: CallbackOutcome = harness
        .about_to_submit(
            "switch-to-sole",
            details(case_data, State::AwaitingApplicant2Response),
        )
        .await;

    assert_eq!(outcome.state, Some(State::Draft));
    assert_eq!(outcome.data.application_type, ApplicationType::SoleApplication);
    assert_eq!(outcome.data.applicant1.first_name.as_deref(), Some("Alex"));
    assert_eq!(outcome.data.case_invite.access_code, None);
    assert_eq!(outcome.data.case_invite.applicant2_user_id, None);
    assert_eq!(outcome.data.application.applicant2_statement_of_truth, None);
    assert_eq!(
        harness.sent(),
        vec![(
            EmailTemplateName::JointApplicationSwitchedToSole,
            String::from("sam@example.com")
        )]
    );
}

#[tokio::test]
async fn test_switch_to_sole_by_applicant2_swaps_applicants() {
    let harness: Harness = Harness::new(&[UserRole::Citizen]).as_applicant2();

    let outcome: CallbackOutcome = harness
        .about_to_submit(
            "switch-to-sole",
            details(create_joint_case(), State::Applicant2Approved),
        )
        .await;

    let data: &CaseData = &outcome.data;
    assert_eq!(data.applicant1.first_name.as_deref(), Some("Sam"));
    assert_eq!(data.applicant2.first_name.as_deref(), Some("Alex"));
    assert_eq!(
        data.application.marriage_details.applicant1_name.as_deref(),
        Some("Sam Smith")
    );
    assert_eq!(
        data.application.applicant1_statement_of_truth,
        Some(YesOrNo::Yes)
    );
    assert_eq!(data.application.applicant2_statement_of_truth, None);
    assert_eq!(
        harness.sent(),
        vec![(
            EmailTemplateName::JointApplicationSwitchedToSole,
            String::from("alex@example.com")
        )]
    );
}

#[tokio::test]
async fn test_switch_to_sole_by_applicant2_solicitor_swaps_applicants() {
    let harness: Harness = Harness::new(&[UserRole::Solicitor, UserRole::Applicant2Solicitor]);

    let outcome: CallbackOutcome = harness
        .about_to_submit(
            "switch-to-sole",
            details(create_joint_case(), State::Applicant2Approved),
        )
        .await;

    let data: &CaseData = &outcome.data;
    assert_eq!(data.application_type, ApplicationType::SoleApplication);
    assert_eq!(data.applicant1.first_name.as_deref(), Some("Sam"));
    assert_eq!(data.applicant2.first_name.as_deref(), Some("Alex"));
    assert_eq!(
        harness.sent(),
        vec![(
            EmailTemplateName::JointApplicationSwitchedToSole,
            String::from("alex@example.com")
        )]
    );
}

#[tokio::test]
async fn test_submit_application_without_hwf_awaits_payment() {
    let harness: Harness = Harness::new(&[UserRole::Citizen]);

    let outcome: CallbackOutcome = harness
        .about_to_submit(
            "citizen-submit-application",
            details(create_test_case(), State::Draft),
        )
        .await;

    assert_eq!(outcome.state, Some(State::AwaitingPayment));
    let summary = outcome
        .data
        .application
        .application_fee_order_summary
        .clone()
        .unwrap();
    assert_eq!(summary.payment_total, "59300");
    assert_eq!(summary.fees[0].value.code, "FEE0002");
    assert_eq!(
        *harness.fakes.fee_queries.lock().unwrap(),
        vec![FeeQuery::APPLICATION_ISSUE]
    );
    assert_eq!(outcome.data.application.date_submitted, None);
    assert!(harness.sent().is_empty());
}

#[tokio::test]
async fn test_submit_application_with_hwf_awaits_decision() {
    let harness: Harness = Harness::new(&[UserRole::Citizen]);
    let mut case_data: CaseData = create_test_case();
    case_data.application.applicant1_help_with_fees.need_help = Some(YesOrNo::Yes);
    case_data.application.applicant1_help_with_fees.reference_number =
        Some(String::from("HWF-123-456"));

    let outcome: CallbackOutcome = harness
        .about_to_submit("citizen-submit-application", details(case_data, State::Draft))
        .await;

    assert_eq!(outcome.state, Some(State::AwaitingHwfDecision));
    assert_eq!(outcome.data.application.date_submitted, Some(now()));
    assert_eq!(
        harness.sent(),
        vec![(
            EmailTemplateName::SoleApplicationSubmitted,
            String::from("alex@example.com")
        )]
    );
}

#[tokio::test]
async fn test_submit_application_lists_every_missing_answer() {
    let harness: Harness = Harness::new(&[UserRole::Citizen]);
    let mut case_data: CaseData = create_test_case();
    case_data.application.applicant1_statement_of_truth = None;
    case_data.application.marriage_details.date = Some(date(2024, 1, 1));

    let outcome: CallbackOutcome = harness
        .about_to_submit("citizen-submit-application", details(case_data, State::Draft))
        .await;

    assert_eq!(
        outcome.errors,
        vec![
            String::from("Applicant1StatementOfTruth must be YES"),
            String::from("MarriageDate can not be less than one year ago."),
        ]
    );
    assert_eq!(outcome.state, Some(State::Draft));
}

#[tokio::test]
async fn test_payment_made_submits_paid_application() {
    let harness: Harness = Harness::new(&[UserRole::Citizen]);
    let mut case_data: CaseData = create_joint_case();
    case_data.application.application_fee_order_summary = Some(OrderSummary::single(create_test_fee("FEE0002", "59300")));
    case_data.application.application_payments = vec![ListValue::new(Payment {
        amount: Some(59300),
        status: Some(PaymentStatus::Success),
        ..Payment::default()
    })];

    let outcome: CallbackOutcome = harness
        .about_to_submit(
            "citizen-payment-made",
            details(case_data.clone(), State::AwaitingPayment),
        )
        .await;
    assert_eq!(outcome.state, Some(State::Submitted));
    assert_eq!(outcome.data.application.date_submitted, Some(now()));
    assert_eq!(
        harness.sent(),
        vec![
            (
                EmailTemplateName::JointApplicationSubmitted,
                String::from("alex@example.com")
            ),
            (
                EmailTemplateName::JointApplicationSubmitted,
                String::from("sam@example.com")
            ),
        ]
    );

    case_data.application.applicant1_cannot_upload = Some(YesOrNo::Yes);
    let outcome: CallbackOutcome = harness
        .about_to_submit(
            "citizen-payment-made",
            details(case_data, State::AwaitingPayment),
        )
        .await;
    assert_eq!(outcome.state, Some(State::AwaitingDocuments));
}

#[tokio::test]
async fn test_payment_made_with_failed_payment_stays_awaiting_payment() {
    let harness: Harness = Harness::new(&[UserRole::Citizen]);
    let mut case_data: CaseData = create_test_case();
    case_data.application.application_fee_order_summary = Some(OrderSummary::single(create_test_fee("FEE0002", "59300")));
    case_data.application.application_payments = vec![ListValue::new(Payment {
        amount: Some(59300),
        status: Some(PaymentStatus::Declined),
        ..Payment::default()
    })];

    let outcome: CallbackOutcome = harness
        .about_to_submit(
            "citizen-payment-made",
            details(case_data, State::AwaitingPayment),
        )
        .await;

    assert_eq!(outcome.state, Some(State::AwaitingPayment));
    assert_eq!(outcome.data.application.date_submitted, None);
    assert!(harness.sent().is_empty());
}
