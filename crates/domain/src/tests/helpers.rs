// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{NaiveDate, NaiveDateTime};

use crate::{
    AcknowledgementOfService, AddressGlobalUk, Applicant, ApplicationType, CaseData, CaseNote,
    ConditionalOrderCourt, ConditionalOrderQuestions, ContactDetailsType, DivorceDocument,
    Document, DocumentType, Fee, Gender, GeneralApplication, GeneralApplicationType,
    HelpWithFees, HowToRespondApplication, JurisdictionConnection, ListValue, OrderSummary,
    Organisation, OrganisationPolicy, Payment, PaymentStatus, ServiceMethod, Solicitor,
    SolicitorPaymentMethod, YesOrNo,
};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn date_time(year: i32, month: u32, day: u32) -> NaiveDateTime {
    date(year, month, day).and_hms_opt(10, 30, 0).unwrap()
}

pub fn today() -> NaiveDate {
    date(2024, 6, 1)
}

pub fn create_test_address() -> AddressGlobalUk {
    AddressGlobalUk {
        address_line1: Some(String::from("1 High Street")),
        address_line2: Some(String::from("Flat 2")),
        address_line3: Some(String::from("Central")),
        post_town: Some(String::from("Swansea")),
        county: Some(String::from("West Glamorgan")),
        post_code: Some(String::from("SA1 1AA")),
        country: Some(String::from("UK")),
    }
}

pub fn create_test_document(file_name: &str, document_type: DocumentType) -> DivorceDocument {
    DivorceDocument {
        document_date_added: Some(date(2024, 1, 2)),
        document_comment: Some(String::from("uploaded")),
        document_file_name: Some(file_name.to_string()),
        document_type: Some(document_type),
        document_link: Some(Document {
            document_url: format!("http://dm-store/documents/{file_name}"),
            document_filename: file_name.to_string(),
            document_binary_url: format!("http://dm-store/documents/{file_name}/binary"),
        }),
    }
}

pub fn create_test_fee() -> Fee {
    Fee {
        amount: String::from("59300"),
        code: String::from("FEE0002"),
        description: String::from("Divorce or dissolution application fee"),
        version: String::from("4"),
    }
}

pub fn create_test_solicitor(role: &str) -> Solicitor {
    Solicitor {
        name: Some(String::from("Sol Icitor")),
        reference: Some(String::from("REF-1")),
        phone: Some(String::from("01234567890")),
        email: Some(String::from("sol@example.com")),
        firm_name: Some(String::from("Firm LLP")),
        address: Some(String::from("2 Law Street")),
        agree_to_receive_emails: Some(YesOrNo::Yes),
        organisation_policy: Some(OrganisationPolicy {
            organisation: Some(Organisation {
                organisation_id: Some(String::from("ORG1")),
                organisation_name: Some(String::from("Firm LLP")),
            }),
            case_assigned_role: Some(role.to_string()),
            reference: Some(String::from("POLICY-REF")),
        }),
    }
}

pub fn create_test_applicant(first_name: &str, gender: Gender) -> Applicant {
    Applicant {
        first_name: Some(first_name.to_string()),
        middle_name: Some(String::from("Middle")),
        last_name: Some(String::from("Smith")),
        email: Some(format!("{}@example.com", first_name.to_lowercase())),
        gender: Some(gender),
        language_preference_welsh: Some(YesOrNo::No),
        last_name_changed_when_married: Some(YesOrNo::No),
        name_different_to_marriage_certificate: Some(YesOrNo::No),
        contact_details_type: Some(ContactDetailsType::Public),
        phone_number: Some(String::from("07700900000")),
        address: Some(create_test_address()),
        financial_order: Some(YesOrNo::No),
        legal_proceedings: Some(YesOrNo::No),
        legal_proceedings_details: Some(String::from("none")),
        solicitor_represented: Some(YesOrNo::No),
        agreed_to_receive_emails: Some(YesOrNo::Yes),
        solicitor: Solicitor::default(),
    }
}

/// A sole case with every answer needed to submit and issue it.
pub fn create_valid_sole_case() -> CaseData {
    let mut case_data: CaseData = CaseData::default();
    case_data.application_type = ApplicationType::SoleApplication;
    case_data.applicant1 = create_test_applicant("Alex", Gender::Female);
    case_data.applicant2 = create_test_applicant("Sam", Gender::Male);
    let application = &mut case_data.application;
    application.applicant1_statement_of_truth = Some(YesOrNo::Yes);
    application.applicant1_prayer_has_been_given_checkbox = vec![YesOrNo::Yes];
    application.applicant1_screen_has_marriage_broken = Some(YesOrNo::Yes);
    application.marriage_details.applicant1_name = Some(String::from("Alex Smith"));
    application.marriage_details.applicant2_name = Some(String::from("Sam Smith"));
    application.marriage_details.date = Some(date(2010, 5, 1));
    application.jurisdiction.connections = vec![JurisdictionConnection::A];
    case_data
}

/// A case with every field set, so that every wire key is emitted.
pub fn create_fully_populated_case() -> CaseData {
    let mut case_data: CaseData = create_valid_sole_case();
    case_data.due_date = Some(date(2024, 7, 1));
    case_data.data_version = Some(3);
    case_data.note = Some(String::from("Called the applicant"));
    case_data.applicant1.solicitor = create_test_solicitor("[APPONESOLICITOR]");
    case_data.applicant2.solicitor = create_test_solicitor("[APPTWOSOLICITOR]");

    let application = &mut case_data.application;
    application.applicant2_screen_has_marriage_broken = Some(YesOrNo::Yes);
    application.applicant2_statement_of_truth = Some(YesOrNo::Yes);
    application.applicant2_prayer_has_been_given_checkbox = vec![YesOrNo::Yes];
    application.applicant1_knows_applicant2_address = Some(YesOrNo::Yes);
    application.applicant2_confirm_applicant1_information = Some(YesOrNo::Yes);
    application.applicant2_explanation_of_changes = Some(String::from("none"));
    application.applicant1_cannot_upload = Some(YesOrNo::Yes);
    application.applicant1_cannot_upload_supporting_document = vec![DocumentType::MarriageCertificate];
    application.date_submitted = Some(date_time(2024, 1, 3));
    application.issue_date = Some(date(2024, 1, 4));
    application.service_method = Some(ServiceMethod::CourtService);
    application.application_fee_order_summary = Some(OrderSummary::single(create_test_fee()));
    application.application_payments = vec![ListValue::new(Payment {
        created: Some(date_time(2024, 1, 3)),
        updated: Some(date_time(2024, 1, 3)),
        fee_code: Some(String::from("FEE0002")),
        amount: Some(59300),
        status: Some(PaymentStatus::Success),
        channel: Some(String::from("online")),
        reference: Some(String::from("RC-1")),
        transaction_id: Some(String::from("T-1")),
    })];
    application.solicitor_payment_method = Some(SolicitorPaymentMethod::FeePayByAccount);
    application.pba_number = Some(String::from("PBA0000001"));
    application.fee_account_reference = Some(String::from("ACC-1"));
    application.solicitor_sign_statement_of_truth = Some(YesOrNo::Yes);
    let hwf: HelpWithFees = HelpWithFees {
        reference_number: Some(String::from("HWF-123-456")),
        need_help: Some(YesOrNo::Yes),
        applied_for_fees: Some(YesOrNo::Yes),
    };
    application.applicant1_help_with_fees = hwf.clone();
    application.applicant2_help_with_fees = hwf;
    application.marriage_details.married_in_uk = Some(YesOrNo::Yes);
    application.marriage_details.place_of_marriage = Some(String::from("Cardiff"));
    application.marriage_details.country_of_marriage = Some(String::from("Wales"));
    application.marriage_details.certify_marriage_certificate_is_correct = Some(YesOrNo::Yes);
    let jurisdiction = &mut application.jurisdiction;
    jurisdiction.applicant1_residence = Some(YesOrNo::Yes);
    jurisdiction.applicant2_residence = Some(YesOrNo::Yes);
    jurisdiction.applicant1_domicile = Some(YesOrNo::Yes);
    jurisdiction.applicant2_domicile = Some(YesOrNo::Yes);
    jurisdiction.app1_habitually_res_last_twelve_months = Some(YesOrNo::Yes);
    jurisdiction.app1_habitually_res_last_six_months = Some(YesOrNo::Yes);
    jurisdiction.both_last_habitually_resident = Some(YesOrNo::Yes);

    case_data.case_invite.applicant2_invite_email_address = Some(String::from("sam@example.com"));
    case_data.case_invite.access_code = Some(String::from("ABCD2345"));
    case_data.case_invite.applicant2_user_id = Some(String::from("user-2"));

    case_data.acknowledgement_of_service = AcknowledgementOfService {
        confirm_read_petition: Some(YesOrNo::Yes),
        jurisdiction_agree: Some(YesOrNo::No),
        jurisdiction_disagree_reason: Some(String::from("Lives abroad")),
        how_to_respond_application: Some(HowToRespondApplication::DisputeDivorce),
        statement_of_truth: Some(YesOrNo::Yes),
        prayer_has_been_given: Some(YesOrNo::Yes),
        is_drafted: Some(YesOrNo::Yes),
        date_submitted: Some(date_time(2024, 2, 1)),
        digital_notice_of_proceedings: Some(YesOrNo::Yes),
    };

    let questions: ConditionalOrderQuestions = ConditionalOrderQuestions {
        apply_for_conditional_order: Some(YesOrNo::Yes),
        is_everything_in_application_true: Some(YesOrNo::Yes),
        change_or_add_to_application: Some(YesOrNo::No),
        statement_of_truth: Some(YesOrNo::Yes),
        is_drafted: Some(YesOrNo::Yes),
        submitted_date: Some(date_time(2024, 6, 20)),
    };
    let conditional_order = &mut case_data.conditional_order;
    conditional_order.granted = Some(YesOrNo::Yes);
    conditional_order.decision_date = Some(date(2024, 7, 1));
    conditional_order.refusal_clarification_reason = Some(String::from("n/a"));
    conditional_order.court = Some(ConditionalOrderCourt::Birmingham);
    conditional_order.date_and_time_of_hearing = Some(date_time(2024, 8, 1));
    conditional_order.granted_date = Some(date(2024, 8, 1));
    conditional_order.applicant1_questions = questions.clone();
    conditional_order.applicant2_questions = questions;

    let final_order = &mut case_data.final_order;
    final_order.date_final_order_eligible_from = Some(date(2024, 9, 13));
    final_order.date_final_order_eligible_to_respondent = Some(date(2024, 12, 13));
    final_order.date_final_order_no_longer_eligible = Some(date(2025, 8, 1));
    final_order.does_applicant1_want_to_apply_for_final_order = Some(YesOrNo::Yes);
    final_order.applicant1_final_order_late_explanation = Some(String::from("n/a"));
    final_order.date_final_order_submitted = Some(date_time(2024, 9, 20));
    final_order.date_final_order_granted = Some(date_time(2024, 9, 21));

    let general_application: GeneralApplication = GeneralApplication {
        application_type: Some(GeneralApplicationType::DeemedService),
        type_other_comments: Some(String::from("details")),
        fee_order_summary: Some(OrderSummary::single(create_test_fee())),
        fee_payment_method: Some(SolicitorPaymentMethod::FeesHelpWith),
        fee_help_with_fees_reference_number: Some(String::from("HWF-111-222")),
        fee_pba_number: Some(String::from("PBA0000002")),
        document: Some(create_test_document("d11.pdf", DocumentType::GeneralApplication)),
        received_date: Some(date_time(2024, 3, 1)),
    };
    case_data.general_application = general_application.clone();
    case_data.general_applications = vec![ListValue::new(general_application)];
    case_data.notes = vec![ListValue::new(CaseNote {
        author: String::from("Case Worker"),
        date: Some(date(2024, 2, 2)),
        note: String::from("Called applicant"),
    })];
    case_data.documents_generated = vec![ListValue::new(create_test_document(
        "application.pdf",
        DocumentType::Application,
    ))];
    case_data.documents_uploaded = vec![ListValue::new(create_test_document(
        "certificate.pdf",
        DocumentType::MarriageCertificate,
    ))];
    case_data
}
