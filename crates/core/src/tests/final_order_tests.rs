// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use nfdiv_domain::{CaseData, FinalOrder, State, UserRole, YesOrNo};
use nfdiv_notification::EmailTemplateName;

use super::helpers::{Harness, create_joint_case, create_test_case, date, details, now};
use crate::CallbackOutcome;

fn create_eligible_case() -> CaseData {
    let mut case_data: CaseData = create_test_case();
    case_data.final_order = FinalOrder {
        date_final_order_eligible_from: Some(date(2024, 5, 1)),
        date_final_order_eligible_to_respondent: Some(date(2024, 8, 1)),
        date_final_order_no_longer_eligible: Some(date(2025, 3, 19)),
        does_applicant1_want_to_apply_for_final_order: Some(YesOrNo::Yes),
        ..FinalOrder::default()
    };
    case_data
}

#[tokio::test]
async fn test_apply_for_final_order() {
    let harness: Harness = Harness::new(&[UserRole::Citizen]);

    let outcome: CallbackOutcome = harness
        .about_to_submit(
            "apply-for-final-order",
            details(create_eligible_case(), State::AwaitingFinalOrder),
        )
        .await;

    assert_eq!(outcome.state, Some(State::FinalOrderRequested));
    assert_eq!(
        outcome.data.final_order.date_final_order_submitted,
        Some(now())
    );
    assert_eq!(
        harness.sent(),
        vec![(
            EmailTemplateName::FinalOrderRequested,
            String::from("alex@example.com")
        )]
    );
}

#[tokio::test]
async fn test_apply_for_final_order_must_confirm() {
    let harness: Harness = Harness::new(&[UserRole::Citizen]);
    let mut case_data: CaseData = create_eligible_case();
    case_data.final_order.does_applicant1_want_to_apply_for_final_order = Some(YesOrNo::No);

    let outcome: CallbackOutcome = harness
        .about_to_submit(
            "apply-for-final-order",
            details(case_data, State::AwaitingFinalOrder),
        )
        .await;

    assert_eq!(
        outcome.errors,
        vec![String::from("You must select 'Yes' to apply for Final Order")]
    );
    assert_eq!(outcome.state, Some(State::AwaitingFinalOrder));
}

#[tokio::test]
async fn test_apply_for_final_order_not_before_eligibility() {
    let harness: Harness = Harness::new(&[UserRole::Citizen]);
    let mut case_data: CaseData = create_eligible_case();
    case_data.final_order.date_final_order_eligible_from = Some(date(2024, 7, 2));

    let outcome: CallbackOutcome = harness
        .about_to_submit(
            "apply-for-final-order",
            details(case_data, State::ConditionalOrderPronounced),
        )
        .await;

    assert_eq!(
        outcome.errors,
        vec![String::from(
            "You can not apply for Final Order before 2 July 2024"
        )]
    );
}

#[tokio::test]
async fn test_overdue_final_order_requires_explanation() {
    let harness: Harness = Harness::new(&[UserRole::Citizen]);
    let mut case_data: CaseData = create_eligible_case();
    case_data.final_order.date_final_order_no_longer_eligible = Some(date(2024, 5, 31));

    let outcome: CallbackOutcome = harness
        .about_to_submit(
            "apply-for-final-order",
            details(case_data.clone(), State::AwaitingFinalOrder),
        )
        .await;
    assert_eq!(
        outcome.errors,
        vec![String::from(
            "Applicant1FinalOrderLateExplanation cannot be empty or null"
        )]
    );

    case_data.final_order.applicant1_final_order_late_explanation =
        Some(String::from("I was abroad"));
    let outcome: CallbackOutcome = harness
        .about_to_submit(
            "apply-for-final-order",
            details(case_data, State::AwaitingFinalOrder),
        )
        .await;
    assert_eq!(outcome.state, Some(State::FinalOrderOverdue));
}

#[tokio::test]
async fn test_grant_final_order_completes_case() {
    let harness: Harness = Harness::new(&[UserRole::CaseWorker]);
    let mut case_data: CaseData = create_joint_case();
    case_data.due_date = Some(date(2024, 5, 1));

    let outcome: CallbackOutcome = harness
        .about_to_submit(
            "caseworker-grant-final-order",
            details(case_data, State::FinalOrderRequested),
        )
        .await;

    assert_eq!(outcome.state, Some(State::FinalOrderComplete));
    assert_eq!(
        outcome.data.final_order.date_final_order_granted,
        Some(now())
    );
    assert_eq!(outcome.data.due_date, None);
    assert_eq!(
        harness.sent(),
        vec![
            (
                EmailTemplateName::FinalOrderGranted,
                String::from("alex@example.com")
            ),
            (
                EmailTemplateName::FinalOrderGranted,
                String::from("sam@example.com")
            ),
        ]
    );
}
