// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Option lists shared across the case data model.
//!
//! Every enum here serializes to the exact value CCD stores for the
//! corresponding fixed list, so the variants double as the list items
//! exported in the case definition.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The CCD `YesOrNo` field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YesOrNo {
    /// Stored as `"Yes"`.
    Yes,
    /// Stored as `"No"`.
    No,
}

impl YesOrNo {
    /// Converts a boolean into `Yes`/`No`.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Yes } else { Self::No }
    }

    /// Returns `true` for `Yes`.
    #[must_use]
    pub const fn to_bool(self) -> bool {
        matches!(self, Self::Yes)
    }
}

/// Returns `true` only when the optional answer is present and `Yes`.
#[must_use]
pub const fn is_yes(answer: Option<YesOrNo>) -> bool {
    matches!(answer, Some(YesOrNo::Yes))
}

/// Returns `true` only when the optional answer is present and `No`.
#[must_use]
pub const fn is_no(answer: Option<YesOrNo>) -> bool {
    matches!(answer, Some(YesOrNo::No))
}

/// Whether the case was started by one applicant or both together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ApplicationType {
    /// One applicant; the other party is the respondent.
    #[default]
    #[serde(rename = "soleApplication")]
    SoleApplication,
    /// Both parties apply together.
    #[serde(rename = "jointApplication")]
    JointApplication,
}

/// Divorce (marriage) or dissolution (civil partnership).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum DivorceOrDissolution {
    /// Ending a marriage.
    #[default]
    Divorce,
    /// Ending a civil partnership.
    Dissolution,
}

impl DivorceOrDissolution {
    /// Returns the noun used in correspondence.
    #[must_use]
    pub const fn application_noun(self) -> &'static str {
        match self {
            Self::Divorce => "divorce",
            Self::Dissolution => "ending your civil partnership",
        }
    }
}

/// Gender of an applicant, used to pick the partner noun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
}

/// Correspondence language, derived from `languagePreferenceWelsh`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LanguagePreference {
    /// English correspondence.
    #[default]
    English,
    /// Welsh correspondence.
    Welsh,
}

impl LanguagePreference {
    /// Returns the lowercase key used in the template registry.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Welsh => "welsh",
        }
    }
}

/// Whether an applicant's contact details may be shared with the other party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactDetailsType {
    /// Details may be shared.
    Public,
    /// Details are confidential.
    Private,
}

/// The respondent's answer to how they will respond to the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HowToRespondApplication {
    /// Continue without disputing.
    WithoutDisputeDivorce,
    /// Dispute the application.
    DisputeDivorce,
}

/// How the application will be served on the respondent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServiceMethod {
    /// The court posts the application.
    CourtService,
    /// The applicant's solicitor serves the application.
    SolicitorService,
    /// The applicant arranges personal service.
    PersonalService,
}

/// Legal connection giving the courts of England and Wales jurisdiction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum JurisdictionConnection {
    /// Both parties habitually resident.
    A,
    /// Both last habitually resident and one still resides.
    B,
    /// Respondent habitually resident.
    C,
    /// Applicant habitually resident for one year.
    D,
    /// Applicant domiciled and habitually resident for six months.
    E,
    /// Both domiciled.
    F,
    /// Civil partnership registered in England or Wales.
    G,
    /// Applicant domiciled.
    H,
    /// Residual jurisdiction.
    I,
    /// Joint application, one party habitually resident.
    J,
}

impl JurisdictionConnection {
    /// All connections in list order.
    pub const ALL: [Self; 10] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
        Self::I,
        Self::J,
    ];

    /// Returns the legal statement shown to the applicant and on documents.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::A => "Both parties to the marriage or civil partnership are habitually resident in England and Wales",
            Self::B => "Both parties to the marriage or civil partnership were last habitually resident in England and Wales and one of them continues to reside there",
            Self::C => "The respondent is habitually resident in England and Wales",
            Self::D => "The applicant is habitually resident in England and Wales and has resided there for at least one year immediately before the application was made",
            Self::E => "The applicant is domiciled and habitually resident in England and Wales and has resided there for at least six months immediately before the application was made",
            Self::F => "Both parties to the marriage or civil partnership are domiciled in England and Wales",
            Self::G => "The parties registered as civil partners of each other in England or Wales",
            Self::H => "Only the applicant is domiciled in England and Wales",
            Self::I => "The court has residual jurisdiction",
            Self::J => "This is a joint application and either party is habitually resident in England and Wales",
        }
    }
}

/// Status of a card or account payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentStatus {
    /// Payment taken.
    Success,
    /// Payment started but not finished.
    InProgress,
    /// Payment declined by the provider.
    Declined,
    /// Payment journey timed out.
    TimedOut,
    /// Payment cancelled by the payer.
    Cancelled,
    /// Provider error.
    Error,
}

/// How a solicitor pays the application fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SolicitorPaymentMethod {
    /// Payment by account (PBA).
    FeePayByAccount,
    /// Help with fees.
    FeesHelpWith,
}

/// Type of a general application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GeneralApplicationType {
    /// Ask the court to deem service as having happened.
    DeemedService,
    /// Ask the court to dispense with service.
    #[serde(rename = "dispensingWithService")]
    DispenseWithService,
    /// Ask the court to expedite the case.
    Expedite,
    /// Ask the court for disclosure via the DWP.
    DisclosureViaDwp,
    /// Anything else.
    Other,
}

/// Classification of a document attached to the case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentType {
    /// The divorce or dissolution application.
    Application,
    /// Acknowledgement of service.
    AcknowledgementOfService,
    /// Conditional order application.
    ConditionalOrderApplication,
    /// Conditional order certificate.
    ConditionalOrderGranted,
    /// Final order application.
    FinalOrderApplication,
    /// Final order certificate.
    FinalOrderGranted,
    /// General application.
    GeneralApplication,
    /// Marriage or civil partnership certificate.
    MarriageCertificate,
    /// Evidence of a change of name.
    NameChangeEvidence,
    /// Anything else.
    Other,
}

impl DocumentType {
    /// Returns the file name stem used for generated documents.
    #[must_use]
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::AcknowledgementOfService => "acknowledgement-of-service",
            Self::ConditionalOrderApplication => "conditional-order-application",
            Self::ConditionalOrderGranted => "conditional-order-granted",
            Self::FinalOrderApplication => "final-order-application",
            Self::FinalOrderGranted => "final-order-granted",
            Self::GeneralApplication => "general-application",
            Self::MarriageCertificate => "marriage-certificate",
            Self::NameChangeEvidence => "name-change-evidence",
            Self::Other => "other",
        }
    }
}

/// Court handling the conditional order pronouncement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionalOrderCourt {
    /// Birmingham Civil and Family Justice Centre.
    Birmingham,
    /// Bury St. Edmunds Regional Divorce Centre.
    BuryStEdmunds,
}

macro_rules! wire_from_str {
    ($ty:ty, $field:literal) => {
        impl FromStr for $ty {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                serde_json::from_value(serde_json::Value::String(s.to_string())).map_err(|_| {
                    DomainError::InvalidOption {
                        field: $field,
                        value: s.to_string(),
                    }
                })
            }
        }
    };
}

wire_from_str!(YesOrNo, "YesOrNo");
wire_from_str!(ApplicationType, "applicationType");
wire_from_str!(DivorceOrDissolution, "divorceOrDissolution");
wire_from_str!(Gender, "gender");
wire_from_str!(HowToRespondApplication, "howToRespondApplication");
wire_from_str!(ServiceMethod, "serviceMethod");
wire_from_str!(GeneralApplicationType, "generalApplicationType");
