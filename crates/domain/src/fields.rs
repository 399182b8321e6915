// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The case field registry.
//!
//! Every wire key `CaseData` can emit is listed here with its label, CCD
//! field type and the access profile guarding it. The registry drives the
//! exported case definition and read filtering.

use std::sync::LazyLock;

use crate::access::{AccessProfile, Permissions, UserRole};
use crate::case_data::{
    AOS, APPLICANT1, APPLICANT1_HWF, APPLICANT1_SOLICITOR, APPLICANT2, APPLICANT2_HWF,
    APPLICANT2_SOLICITOR, CASE_INVITE, CO_APPLICANT1, CO_APPLICANT2, CONDITIONAL_ORDER,
    GENERAL_APPLICATION, JURISDICTION, MARRIAGE,
};
use crate::ccd::prefixed_key;
use crate::error::DomainError;

/// CCD field types used by the case definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Single-line text.
    Text,
    /// Multi-line text.
    TextArea,
    /// Email address.
    Email,
    /// UK phone number.
    PhoneUk,
    /// Whole number.
    Number,
    /// Date.
    Date,
    /// Date and time.
    DateTime,
    /// Yes/No radio.
    YesOrNo,
    /// Single choice from a fixed list.
    FixedList(&'static str),
    /// Several choices from a fixed list.
    MultiSelectList(&'static str),
    /// A collection of a complex or base type.
    Collection(&'static str),
    /// A complex type.
    Complex(&'static str),
}

impl FieldType {
    /// Returns the CCD `FieldType` column value.
    #[must_use]
    pub const fn ccd_type(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::TextArea => "TextArea",
            Self::Email => "Email",
            Self::PhoneUk => "PhoneUK",
            Self::Number => "Number",
            Self::Date => "Date",
            Self::DateTime => "DateTime",
            Self::YesOrNo => "YesOrNo",
            Self::FixedList(_) => "FixedList",
            Self::MultiSelectList(_) => "MultiSelectList",
            Self::Collection(_) => "Collection",
            Self::Complex(name) => name,
        }
    }

    /// Returns the CCD `FieldTypeParameter` column value, if any.
    #[must_use]
    pub const fn parameter(self) -> Option<&'static str> {
        match self {
            Self::FixedList(list) | Self::MultiSelectList(list) | Self::Collection(list) => {
                Some(list)
            }
            Self::Text
            | Self::TextArea
            | Self::Email
            | Self::PhoneUk
            | Self::Number
            | Self::Date
            | Self::DateTime
            | Self::YesOrNo
            | Self::Complex(_) => None,
        }
    }
}

/// One case field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    /// Wire key.
    pub id: String,
    /// Label shown in the case view.
    pub label: String,
    /// CCD field type.
    pub field_type: FieldType,
    /// Access profile.
    pub access: AccessProfile,
}

type FieldSpec = (&'static str, &'static str, FieldType);

struct Component {
    prefix: &'static str,
    owner: &'static str,
    access: AccessProfile,
    fields: &'static [FieldSpec],
}

const APPLICANT_FIELDS: &[FieldSpec] = &[
    ("firstName", "first name", FieldType::Text),
    ("middleName", "middle name", FieldType::Text),
    ("lastName", "last name", FieldType::Text),
    ("email", "email address", FieldType::Email),
    ("gender", "gender", FieldType::FixedList("Gender")),
    ("languagePreferenceWelsh", "prefers Welsh", FieldType::YesOrNo),
    (
        "lastNameChangedWhenMarried",
        "changed last name when married",
        FieldType::YesOrNo,
    ),
    (
        "nameDifferentToMarriageCertificate",
        "name differs from certificate",
        FieldType::YesOrNo,
    ),
    (
        "contactDetailsType",
        "contact details",
        FieldType::FixedList("ContactDetailsType"),
    ),
    ("phoneNumber", "phone number", FieldType::PhoneUk),
    ("address", "address", FieldType::Complex("AddressGlobalUK")),
    ("financialOrder", "applying for financial order", FieldType::YesOrNo),
    ("legalProceedings", "other legal proceedings", FieldType::YesOrNo),
    (
        "legalProceedingsDetails",
        "legal proceedings details",
        FieldType::TextArea,
    ),
    ("solicitorRepresented", "represented by a solicitor", FieldType::YesOrNo),
    ("agreedToReceiveEmails", "agreed to receive emails", FieldType::YesOrNo),
];

const SOLICITOR_FIELDS: &[FieldSpec] = &[
    ("name", "name", FieldType::Text),
    ("reference", "reference", FieldType::Text),
    ("phone", "phone number", FieldType::PhoneUk),
    ("email", "email address", FieldType::Email),
    ("firmName", "firm name", FieldType::Text),
    ("address", "firm address", FieldType::TextArea),
    ("agreeToReceiveEmails", "agrees to receive emails", FieldType::YesOrNo),
    (
        "organisationPolicy",
        "organisation policy",
        FieldType::Complex("OrganisationPolicy"),
    ),
];

const HEADER_FIELDS: &[FieldSpec] = &[
    (
        "applicationType",
        "sole or joint application",
        FieldType::FixedList("ApplicationType"),
    ),
    (
        "divorceOrDissolution",
        "divorce or dissolution",
        FieldType::FixedList("DivorceOrDissolution"),
    ),
    ("dueDate", "due date", FieldType::Date),
    (
        "documentsUploaded",
        "documents uploaded",
        FieldType::Collection("DivorceDocument"),
    ),
    (
        "documentsGenerated",
        "documents generated",
        FieldType::Collection("DivorceDocument"),
    ),
];

const CASEWORKER_HEADER_FIELDS: &[FieldSpec] = &[
    ("note", "note", FieldType::TextArea),
    ("notes", "case notes", FieldType::Collection("CaseNote")),
    (
        "generalApplications",
        "general applications",
        FieldType::Collection("GeneralApplication"),
    ),
];

const SYSTEM_HEADER_FIELDS: &[FieldSpec] =
    &[("dataVersion", "data version", FieldType::Number)];

const APPLICATION_FIELDS: &[FieldSpec] = &[
    (
        "applicant1ScreenHasMarriageBroken",
        "applicant 1 marriage broken down",
        FieldType::YesOrNo,
    ),
    (
        "applicant1StatementOfTruth",
        "applicant 1 statement of truth",
        FieldType::YesOrNo,
    ),
    (
        "applicant1PrayerHasBeenGivenCheckbox",
        "applicant 1 prayer",
        FieldType::MultiSelectList("YesOrNo"),
    ),
    (
        "applicant1KnowsApplicant2Address",
        "applicant 1 knows applicant 2's address",
        FieldType::YesOrNo,
    ),
    (
        "applicant1CannotUpload",
        "applicant 1 cannot upload documents",
        FieldType::YesOrNo,
    ),
    (
        "applicant1CannotUploadSupportingDocument",
        "documents applicant 1 cannot upload",
        FieldType::MultiSelectList("DocumentType"),
    ),
    ("dateSubmitted", "date submitted", FieldType::DateTime),
    ("issueDate", "issue date", FieldType::Date),
    (
        "serviceMethod",
        "service method",
        FieldType::FixedList("ServiceMethod"),
    ),
    (
        "applicationFeeOrderSummary",
        "application fee",
        FieldType::Complex("OrderSummary"),
    ),
    (
        "applicationPayments",
        "payments",
        FieldType::Collection("Payment"),
    ),
    (
        "solPaymentHowToPay",
        "solicitor payment method",
        FieldType::FixedList("SolicitorPaymentMethod"),
    ),
    ("pbaNumber", "PBA number", FieldType::Text),
    ("feeAccountReference", "fee account reference", FieldType::Text),
    (
        "solSignStatementOfTruth",
        "solicitor statement of truth",
        FieldType::YesOrNo,
    ),
];

const APPLICATION_APPLICANT2_FIELDS: &[FieldSpec] = &[
    (
        "applicant2ScreenHasMarriageBroken",
        "applicant 2 marriage broken down",
        FieldType::YesOrNo,
    ),
    (
        "applicant2StatementOfTruth",
        "applicant 2 statement of truth",
        FieldType::YesOrNo,
    ),
    (
        "applicant2PrayerHasBeenGivenCheckbox",
        "applicant 2 prayer",
        FieldType::MultiSelectList("YesOrNo"),
    ),
    (
        "applicant2ConfirmApplicant1Information",
        "applicant 2 confirms the information",
        FieldType::YesOrNo,
    ),
    (
        "applicant2ExplanationOfChanges",
        "changes applicant 2 wants",
        FieldType::TextArea,
    ),
];

const HELP_WITH_FEES_FIELDS: &[FieldSpec] = &[
    ("referenceNumber", "help with fees reference", FieldType::Text),
    ("needHelp", "needs help with fees", FieldType::YesOrNo),
    ("appliedForFees", "applied for help with fees", FieldType::YesOrNo),
];

const MARRIAGE_FIELDS: &[FieldSpec] = &[
    ("date", "date", FieldType::Date),
    ("applicant1Name", "applicant 1 name", FieldType::Text),
    ("applicant2Name", "applicant 2 name", FieldType::Text),
    ("marriedInUk", "took place in the UK", FieldType::YesOrNo),
    ("placeOfMarriage", "place", FieldType::Text),
    ("countryOfMarriage", "country", FieldType::Text),
    (
        "certifyMarriageCertificateIsCorrect",
        "certificate is correct",
        FieldType::YesOrNo,
    ),
];

const JURISDICTION_FIELDS: &[FieldSpec] = &[
    (
        "connections",
        "legal connections",
        FieldType::MultiSelectList("JurisdictionConnections"),
    ),
    ("applicant1Residence", "applicant 1 resident", FieldType::YesOrNo),
    ("applicant2Residence", "applicant 2 resident", FieldType::YesOrNo),
    ("applicant1Domicile", "applicant 1 domiciled", FieldType::YesOrNo),
    ("applicant2Domicile", "applicant 2 domiciled", FieldType::YesOrNo),
    (
        "app1HabituallyResLastTwelveMonths",
        "applicant 1 resident for twelve months",
        FieldType::YesOrNo,
    ),
    (
        "app1HabituallyResLastSixMonths",
        "applicant 1 resident for six months",
        FieldType::YesOrNo,
    ),
    (
        "bothLastHabituallyResident",
        "both last habitually resident",
        FieldType::YesOrNo,
    ),
];

const CASE_INVITE_FIELDS: &[FieldSpec] = &[
    (
        "applicant2InviteEmailAddress",
        "applicant 2 email address",
        FieldType::Email,
    ),
    ("accessCode", "access code", FieldType::Text),
    ("applicant2UserId", "applicant 2 user id", FieldType::Text),
];

const AOS_FIELDS: &[FieldSpec] = &[
    (
        "confirmReadPetition",
        "respondent has read the application",
        FieldType::YesOrNo,
    ),
    (
        "jurisdictionAgree",
        "respondent agrees with jurisdiction",
        FieldType::YesOrNo,
    ),
    (
        "jurisdictionDisagreeReason",
        "reason for disagreeing with jurisdiction",
        FieldType::TextArea,
    ),
    (
        "howToRespondApplication",
        "how the respondent responds",
        FieldType::FixedList("HowToRespondApplication"),
    ),
    ("statementOfTruth", "statement of truth", FieldType::YesOrNo),
    ("prayerHasBeenGiven", "prayer", FieldType::YesOrNo),
    ("isDrafted", "drafted", FieldType::YesOrNo),
    ("dateSubmitted", "date submitted", FieldType::DateTime),
    (
        "digitalNoticeOfProceedings",
        "notices by email",
        FieldType::YesOrNo,
    ),
];

const CO_DECISION_FIELDS: &[FieldSpec] = &[
    ("granted", "granted", FieldType::YesOrNo),
    ("decisionDate", "decision date", FieldType::Date),
    (
        "refusalClarificationReason",
        "clarification needed",
        FieldType::TextArea,
    ),
    (
        "court",
        "court",
        FieldType::FixedList("ConditionalOrderCourt"),
    ),
    ("dateAndTimeOfHearing", "hearing date and time", FieldType::DateTime),
    ("grantedDate", "pronounced on", FieldType::Date),
];

const CO_QUESTION_FIELDS: &[FieldSpec] = &[
    (
        "applyForConditionalOrder",
        "applies for a conditional order",
        FieldType::YesOrNo,
    ),
    (
        "isEverythingInApplicationTrue",
        "application still true",
        FieldType::YesOrNo,
    ),
    (
        "changeOrAddToApplication",
        "wants to change the application",
        FieldType::YesOrNo,
    ),
    ("statementOfTruth", "statement of truth", FieldType::YesOrNo),
    ("isDrafted", "drafted", FieldType::YesOrNo),
    ("submittedDate", "submitted on", FieldType::DateTime),
];

const FINAL_ORDER_FIELDS: &[FieldSpec] = &[
    (
        "dateFinalOrderEligibleFrom",
        "final order eligible from",
        FieldType::Date,
    ),
    (
        "dateFinalOrderEligibleToRespondent",
        "final order eligible to respondent",
        FieldType::Date,
    ),
    (
        "dateFinalOrderNoLongerEligible",
        "final order overdue from",
        FieldType::Date,
    ),
    (
        "doesApplicant1WantToApplyForFinalOrder",
        "applicant 1 applies for final order",
        FieldType::YesOrNo,
    ),
    (
        "applicant1FinalOrderLateExplanation",
        "reason for applying late",
        FieldType::TextArea,
    ),
    (
        "dateFinalOrderSubmitted",
        "final order submitted",
        FieldType::DateTime,
    ),
    ("dateFinalOrderGranted", "final order granted", FieldType::DateTime),
];

const GENERAL_APPLICATION_FIELDS: &[FieldSpec] = &[
    ("type", "type", FieldType::FixedList("GeneralApplicationType")),
    ("typeOtherComments", "details", FieldType::TextArea),
    ("feeOrderSummary", "fee", FieldType::Complex("OrderSummary")),
    (
        "feePaymentMethod",
        "payment method",
        FieldType::FixedList("SolicitorPaymentMethod"),
    ),
    (
        "feeHelpWithFeesReferenceNumber",
        "help with fees reference",
        FieldType::Text,
    ),
    ("feePbaNumber", "PBA number", FieldType::Text),
    ("document", "document", FieldType::Complex("DivorceDocument")),
    ("receivedDate", "received on", FieldType::DateTime),
];

const COMPONENTS: &[Component] = &[
    Component {
        prefix: "",
        owner: "Case",
        access: AccessProfile::DefaultAccess,
        fields: HEADER_FIELDS,
    },
    Component {
        prefix: "",
        owner: "Case",
        access: AccessProfile::CaseworkerAccess,
        fields: CASEWORKER_HEADER_FIELDS,
    },
    Component {
        prefix: "",
        owner: "Case",
        access: AccessProfile::SystemUpdateAccess,
        fields: SYSTEM_HEADER_FIELDS,
    },
    Component {
        prefix: APPLICANT1,
        owner: "Applicant 1",
        access: AccessProfile::DefaultAccess,
        fields: APPLICANT_FIELDS,
    },
    Component {
        prefix: APPLICANT2,
        owner: "Applicant 2",
        access: AccessProfile::Applicant2Access,
        fields: APPLICANT_FIELDS,
    },
    Component {
        prefix: APPLICANT1_SOLICITOR,
        owner: "Applicant 1 solicitor",
        access: AccessProfile::SolicitorAccess,
        fields: SOLICITOR_FIELDS,
    },
    Component {
        prefix: APPLICANT2_SOLICITOR,
        owner: "Applicant 2 solicitor",
        access: AccessProfile::SolicitorAccess,
        fields: SOLICITOR_FIELDS,
    },
    Component {
        prefix: "",
        owner: "Application",
        access: AccessProfile::DefaultAccess,
        fields: APPLICATION_FIELDS,
    },
    Component {
        prefix: "",
        owner: "Application",
        access: AccessProfile::Applicant2Access,
        fields: APPLICATION_APPLICANT2_FIELDS,
    },
    Component {
        prefix: APPLICANT1_HWF,
        owner: "Applicant 1",
        access: AccessProfile::DefaultAccess,
        fields: HELP_WITH_FEES_FIELDS,
    },
    Component {
        prefix: APPLICANT2_HWF,
        owner: "Applicant 2",
        access: AccessProfile::Applicant2Access,
        fields: HELP_WITH_FEES_FIELDS,
    },
    Component {
        prefix: MARRIAGE,
        owner: "Marriage",
        access: AccessProfile::DefaultAccess,
        fields: MARRIAGE_FIELDS,
    },
    Component {
        prefix: JURISDICTION,
        owner: "Jurisdiction",
        access: AccessProfile::DefaultAccess,
        fields: JURISDICTION_FIELDS,
    },
    Component {
        prefix: CASE_INVITE,
        owner: "Invitation",
        access: AccessProfile::Applicant2Access,
        fields: CASE_INVITE_FIELDS,
    },
    Component {
        prefix: AOS,
        owner: "AoS",
        access: AccessProfile::Applicant2Access,
        fields: AOS_FIELDS,
    },
    Component {
        prefix: CONDITIONAL_ORDER,
        owner: "Conditional order",
        access: AccessProfile::LegalAdvisorAccess,
        fields: CO_DECISION_FIELDS,
    },
    Component {
        prefix: CO_APPLICANT1,
        owner: "Conditional order applicant 1",
        access: AccessProfile::DefaultAccess,
        fields: CO_QUESTION_FIELDS,
    },
    Component {
        prefix: CO_APPLICANT2,
        owner: "Conditional order applicant 2",
        access: AccessProfile::Applicant2Access,
        fields: CO_QUESTION_FIELDS,
    },
    Component {
        prefix: "",
        owner: "Final order",
        access: AccessProfile::DefaultAccess,
        fields: FINAL_ORDER_FIELDS,
    },
    Component {
        prefix: GENERAL_APPLICATION,
        owner: "General application",
        access: AccessProfile::CaseworkerAccess,
        fields: GENERAL_APPLICATION_FIELDS,
    },
];

static DEFINITIONS: LazyLock<Vec<FieldDefinition>> = LazyLock::new(|| {
    COMPONENTS
        .iter()
        .flat_map(|component| {
            component
                .fields
                .iter()
                .map(|(field, label, field_type)| FieldDefinition {
                    id: prefixed_key(component.prefix, field),
                    label: format!("{} {label}", component.owner),
                    field_type: *field_type,
                    access: component.access,
                })
        })
        .collect()
});

/// Returns every case field definition.
#[must_use]
pub fn case_field_definitions() -> &'static [FieldDefinition] {
    &DEFINITIONS
}

/// Looks up the definition of a wire key.
#[must_use]
pub fn field_definition(id: &str) -> Option<&'static FieldDefinition> {
    DEFINITIONS.iter().find(|definition| definition.id == id)
}

/// Whether a user holding `roles` has `permission` on `field`.
///
/// # Errors
///
/// Returns `DomainError::UnknownField` if `field` is not part of the case.
pub fn can_access(
    field: &str,
    roles: &[UserRole],
    permission: Permissions,
) -> Result<bool, DomainError> {
    field_definition(field)
        .map(|definition| definition.access.permits(roles, permission))
        .ok_or_else(|| DomainError::UnknownField(field.to_string()))
}

/// Returns the wire keys a user holding `roles` may read.
#[must_use]
pub fn readable_fields(roles: &[UserRole]) -> Vec<&'static str> {
    DEFINITIONS
        .iter()
        .filter(|definition| definition.access.permits(roles, Permissions::R))
        .map(|definition| definition.id.as_str())
        .collect()
}
