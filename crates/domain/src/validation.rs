// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Case validation rules.
//!
//! Rules return the messages CCD shows the user. An empty list means the
//! case passed. Field names in messages are the capitalised wire keys.

use chrono::{Months, NaiveDate};

use crate::application::{Application, Jurisdiction};
use crate::case_data::CaseData;
use crate::orders::{AcknowledgementOfService, ConditionalOrderQuestions, FinalOrder};
use crate::types::{YesOrNo, is_no, is_yes};

/// Message when the applicant does not confirm the final order application.
pub const FINAL_ORDER_NOT_CONFIRMED: &str = "You must select 'Yes' to apply for Final Order";

const EMPTY: &str = " cannot be empty or null";
const MUST_BE_YES: &str = " must be YES";
const IN_THE_FUTURE: &str = " can not be in the future.";
const LESS_THAN_ONE_YEAR_AGO: &str = " can not be less than one year ago.";
const MORE_THAN_ONE_HUNDRED_YEARS_AGO: &str = " can not be more than 100 years ago.";

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

fn add_if_blank(value: Option<&str>, field: &str, errors: &mut Vec<String>) {
    if is_blank(value) {
        errors.push(format!("{field}{EMPTY}"));
    }
}

fn add_if_missing<T>(value: Option<&T>, field: &str, errors: &mut Vec<String>) {
    if value.is_none() {
        errors.push(format!("{field}{EMPTY}"));
    }
}

fn add_if_not_yes(value: Option<YesOrNo>, field: &str, errors: &mut Vec<String>) {
    if !is_yes(value) {
        errors.push(format!("{field}{MUST_BE_YES}"));
    }
}

/// Validates the answers every application needs before it can be
/// submitted or issued.
#[must_use]
pub fn validate_basic_case(case_data: &CaseData, today: NaiveDate) -> Vec<String> {
    let mut errors: Vec<String> = Vec::new();
    let application: &Application = &case_data.application;

    add_if_blank(
        case_data.applicant1.first_name.as_deref(),
        "Applicant1FirstName",
        &mut errors,
    );
    add_if_blank(
        case_data.applicant1.last_name.as_deref(),
        "Applicant1LastName",
        &mut errors,
    );
    add_if_blank(
        case_data.applicant2.first_name.as_deref(),
        "Applicant2FirstName",
        &mut errors,
    );
    add_if_blank(
        case_data.applicant2.last_name.as_deref(),
        "Applicant2LastName",
        &mut errors,
    );
    add_if_not_yes(
        application.applicant1_statement_of_truth,
        "Applicant1StatementOfTruth",
        &mut errors,
    );
    if !application.applicant1_prayer_given() {
        errors.push(format!("Applicant1PrayerHasBeenGivenCheckbox{EMPTY}"));
    }
    add_if_blank(
        application.marriage_details.applicant1_name.as_deref(),
        "MarriageApplicant1Name",
        &mut errors,
    );
    add_if_blank(
        application.marriage_details.applicant2_name.as_deref(),
        "MarriageApplicant2Name",
        &mut errors,
    );
    errors.extend(validate_marriage_date(
        application.marriage_details.date,
        "MarriageDate",
        today,
    ));
    errors.extend(validate_jurisdiction_connections(&application.jurisdiction));
    errors
}

/// Validates a marriage or civil partnership date.
///
/// The date must be present, not in the future, at least one year ago and
/// no more than one hundred years ago.
#[must_use]
pub fn validate_marriage_date(date: Option<NaiveDate>, field: &str, today: NaiveDate) -> Vec<String> {
    let Some(date) = date else {
        return vec![format!("{field}{EMPTY}")];
    };

    if date > today {
        return vec![format!("{field}{IN_THE_FUTURE}")];
    }

    if today
        .checked_sub_months(Months::new(12))
        .is_some_and(|one_year_ago| date > one_year_ago)
    {
        return vec![format!("{field}{LESS_THAN_ONE_YEAR_AGO}")];
    }

    if today
        .checked_sub_months(Months::new(1200))
        .is_some_and(|one_hundred_years_ago| date < one_hundred_years_ago)
    {
        return vec![format!("{field}{MORE_THAN_ONE_HUNDRED_YEARS_AGO}")];
    }

    Vec::new()
}

/// Validates that at least one legal connection has been established.
#[must_use]
pub fn validate_jurisdiction_connections(jurisdiction: &Jurisdiction) -> Vec<String> {
    if jurisdiction.connections.is_empty() {
        vec![format!("JurisdictionConnections{EMPTY}")]
    } else {
        Vec::new()
    }
}

/// Validates applicant 2's request for changes to a joint application.
#[must_use]
pub fn validate_applicant2_request_changes(application: &Application) -> Vec<String> {
    let mut errors: Vec<String> = Vec::new();
    if !is_no(application.applicant2_confirm_applicant1_information) {
        errors.push(String::from(
            "Applicant2ConfirmApplicant1Information must be NO to request changes",
        ));
    }
    add_if_blank(
        application.applicant2_explanation_of_changes.as_deref(),
        "Applicant2ExplanationOfChanges",
        &mut errors,
    );
    errors
}

/// Validates applicant 2's answers on a joint application.
#[must_use]
pub fn validate_applicant2_basic_case(case_data: &CaseData) -> Vec<String> {
    let mut errors: Vec<String> = Vec::new();
    let application: &Application = &case_data.application;

    add_if_not_yes(
        application.applicant2_confirm_applicant1_information,
        "Applicant2ConfirmApplicant1Information",
        &mut errors,
    );
    add_if_not_yes(
        application.applicant2_screen_has_marriage_broken,
        "Applicant2ScreenHasMarriageBroken",
        &mut errors,
    );
    add_if_not_yes(
        application.applicant2_statement_of_truth,
        "Applicant2StatementOfTruth",
        &mut errors,
    );
    if !application.applicant2_prayer_given() {
        errors.push(format!("Applicant2PrayerHasBeenGivenCheckbox{EMPTY}"));
    }
    errors
}

/// Validates the respondent's acknowledgement of service.
#[must_use]
pub fn validate_aos_submission(aos: &AcknowledgementOfService) -> Vec<String> {
    let mut errors: Vec<String> = Vec::new();

    add_if_not_yes(aos.statement_of_truth, "AosStatementOfTruth", &mut errors);
    add_if_not_yes(
        aos.confirm_read_petition,
        "AosConfirmReadPetition",
        &mut errors,
    );
    add_if_missing(
        aos.jurisdiction_agree.as_ref(),
        "AosJurisdictionAgree",
        &mut errors,
    );
    if is_no(aos.jurisdiction_agree) {
        add_if_blank(
            aos.jurisdiction_disagree_reason.as_deref(),
            "AosJurisdictionDisagreeReason",
            &mut errors,
        );
    }
    add_if_missing(
        aos.how_to_respond_application.as_ref(),
        "AosHowToRespondApplication",
        &mut errors,
    );
    errors
}

/// Validates one applicant's conditional order answers.
///
/// # Arguments
///
/// * `questions` - The answers
/// * `prefix` - The wire prefix of the answers, e.g. `coApplicant1`
#[must_use]
pub fn validate_conditional_order(
    questions: &ConditionalOrderQuestions,
    prefix: &str,
) -> Vec<String> {
    let field = |name: &str| format!("{}{name}", capitalise(prefix));
    let mut errors: Vec<String> = Vec::new();
    add_if_not_yes(
        questions.apply_for_conditional_order,
        &field("ApplyForConditionalOrder"),
        &mut errors,
    );
    add_if_not_yes(
        questions.statement_of_truth,
        &field("StatementOfTruth"),
        &mut errors,
    );
    errors
}

/// Validates an application for the final order.
///
/// The applicant must confirm the application and may not apply before
/// the eligibility date. Past the overdue date an explanation is required.
#[must_use]
pub fn validate_final_order(final_order: &FinalOrder, today: NaiveDate) -> Vec<String> {
    let mut errors: Vec<String> = Vec::new();

    if !is_yes(final_order.does_applicant1_want_to_apply_for_final_order) {
        errors.push(String::from(FINAL_ORDER_NOT_CONFIRMED));
    }

    match final_order.date_final_order_eligible_from {
        None => errors.push(format!("DateFinalOrderEligibleFrom{EMPTY}")),
        Some(eligible_from) if today < eligible_from => errors.push(format!(
            "You can not apply for Final Order before {}",
            eligible_from.format("%-d %B %Y")
        )),
        Some(_) => {}
    }

    if is_final_order_overdue(final_order, today) {
        add_if_blank(
            final_order.applicant1_final_order_late_explanation.as_deref(),
            "Applicant1FinalOrderLateExplanation",
            &mut errors,
        );
    }
    errors
}

/// Whether the final order is being applied for after the overdue date.
#[must_use]
pub fn is_final_order_overdue(final_order: &FinalOrder, today: NaiveDate) -> bool {
    final_order
        .date_final_order_no_longer_eligible
        .is_some_and(|overdue_from| today > overdue_from)
}

/// Validates that a case can be issued.
///
/// A sole application served by the court needs applicant 2's postal
/// address, unless applicant 1 has said they do not know it.
#[must_use]
pub fn validate_issue(case_data: &CaseData) -> Vec<String> {
    let mut errors: Vec<String> = Vec::new();
    let needs_address: bool = case_data.is_sole()
        && case_data.application.is_court_service()
        && !is_no(case_data.application.applicant1_knows_applicant2_address);

    if needs_address
        && !case_data
            .applicant2
            .address
            .as_ref()
            .is_some_and(crate::ccd::AddressGlobalUk::is_complete)
    {
        errors.push(format!("Applicant2Address{EMPTY}"));
    }
    errors
}

/// Validates an email address entered on a form.
#[must_use]
pub fn validate_email(email: Option<&str>, field: &str) -> Vec<String> {
    let Some(email) = email.map(str::trim).filter(|e| !e.is_empty()) else {
        return vec![format!("{field}{EMPTY}")];
    };

    let valid: bool = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && !domain.contains('@')
            && domain
                .split_once('.')
                .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
            && !email.contains(char::is_whitespace)
    });

    if valid {
        Vec::new()
    } else {
        vec![format!("{field} is not a valid email address")]
    }
}

fn capitalise(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        format!("{}{}", first.to_ascii_uppercase(), chars.as_str())
    })
}
