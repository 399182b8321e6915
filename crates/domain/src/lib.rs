// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod access;
mod applicant;
mod application;
mod case_data;
mod case_reference;
pub mod ccd;
mod error;
mod fields;
mod migration;
mod orders;
mod state;
mod timings;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use access::{AccessProfile, Permissions, UserRole, is_granted};
pub use applicant::{Applicant, Solicitor};
pub use application::{Application, CaseInvite, HelpWithFees, Jurisdiction, MarriageDetails};
pub use case_data::{
    AOS, APPLICANT1, APPLICANT1_HWF, APPLICANT1_SOLICITOR, APPLICANT2, APPLICANT2_HWF,
    APPLICANT2_SOLICITOR, CASE_INVITE, CO_APPLICANT1, CO_APPLICANT2, CONDITIONAL_ORDER,
    CaseData, CaseDetails, GENERAL_APPLICATION, JURISDICTION, MARRIAGE,
};
pub use case_reference::CaseReference;
pub use ccd::{
    AddressGlobalUk, CaseNote, DivorceDocument, Document, Fee, ListValue, OrderSummary,
    Organisation, OrganisationPolicy, Payment,
};
pub use error::DomainError;
pub use fields::{
    FieldDefinition, FieldType, can_access, case_field_definitions, field_definition,
    readable_fields,
};
pub use migration::{DATA_VERSION_KEY, data_version, latest_data_version, migrate};
pub use orders::{
    AcknowledgementOfService, ConditionalOrder, ConditionalOrderQuestions, FinalOrder,
    GeneralApplication,
};
pub use state::{
    AOS_STATES, POST_ISSUE_STATES, POST_SUBMISSION_STATES, PRE_SUBMISSION_STATES,
    STATES_NOT_WITHDRAWN_OR_REJECTED, State,
};
pub use timings::{CaseTimings, Clock, FixedClock, SystemClock};
pub use types::{
    ApplicationType, ConditionalOrderCourt, ContactDetailsType, DivorceOrDissolution,
    DocumentType, Gender, GeneralApplicationType, HowToRespondApplication, JurisdictionConnection,
    LanguagePreference, PaymentStatus, ServiceMethod, SolicitorPaymentMethod, YesOrNo, is_no,
    is_yes,
};
pub use validation::{
    FINAL_ORDER_NOT_CONFIRMED, is_final_order_overdue, validate_aos_submission,
    validate_applicant2_basic_case, validate_applicant2_request_changes, validate_basic_case,
    validate_conditional_order, validate_email, validate_final_order, validate_issue,
    validate_jurisdiction_connections, validate_marriage_date,
};
