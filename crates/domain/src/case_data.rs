// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::applicant::Applicant;
use crate::application::{Application, CaseInvite};
use crate::ccd::{CaseNote, DivorceDocument, ListValue, read_prefixed, write_prefixed};
use crate::error::DomainError;
use crate::orders::{AcknowledgementOfService, ConditionalOrder, FinalOrder, GeneralApplication};
use crate::state::State;
use crate::types::{ApplicationType, DivorceOrDissolution};

/// Wire prefix of applicant 1's fields.
pub const APPLICANT1: &str = "applicant1";
/// Wire prefix of applicant 2's fields.
pub const APPLICANT2: &str = "applicant2";
/// Wire prefix of applicant 1's solicitor.
pub const APPLICANT1_SOLICITOR: &str = "applicant1Solicitor";
/// Wire prefix of applicant 2's solicitor.
pub const APPLICANT2_SOLICITOR: &str = "applicant2Solicitor";
/// Wire prefix of applicant 1's help-with-fees answers.
pub const APPLICANT1_HWF: &str = "applicant1HWF";
/// Wire prefix of applicant 2's help-with-fees answers.
pub const APPLICANT2_HWF: &str = "applicant2HWF";
/// Wire prefix of the marriage details.
pub const MARRIAGE: &str = "marriage";
/// Wire prefix of the jurisdiction answers.
pub const JURISDICTION: &str = "jurisdiction";
/// Wire prefix of the applicant 2 invitation.
pub const CASE_INVITE: &str = "caseInvite";
/// Wire prefix of the acknowledgement of service.
pub const AOS: &str = "aos";
/// Wire prefix of the conditional order.
pub const CONDITIONAL_ORDER: &str = "co";
/// Wire prefix of applicant 1's conditional order answers.
pub const CO_APPLICANT1: &str = "coApplicant1";
/// Wire prefix of applicant 2's conditional order answers.
pub const CO_APPLICANT2: &str = "coApplicant2";
/// Wire prefix of the in-progress general application.
pub const GENERAL_APPLICATION: &str = "generalApplication";

/// Top-level fields that belong to no component.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct CaseHeader {
    #[serde(default)]
    application_type: ApplicationType,
    #[serde(default)]
    divorce_or_dissolution: DivorceOrDissolution,
    due_date: Option<NaiveDate>,
    data_version: Option<u32>,
    note: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    notes: Vec<ListValue<CaseNote>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    general_applications: Vec<ListValue<GeneralApplication>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    documents_generated: Vec<ListValue<DivorceDocument>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    documents_uploaded: Vec<ListValue<DivorceDocument>>,
}

/// The whole case as CCD stores it.
///
/// Read with [`CaseData::from_ccd_map`] and written back with
/// [`CaseData::to_ccd_map`]. Keys the model does not recognise are kept
/// aside and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CaseData {
    /// Sole or joint.
    pub application_type: ApplicationType,
    /// Divorce or dissolution.
    pub divorce_or_dissolution: DivorceOrDissolution,
    /// Next deadline on the case.
    pub due_date: Option<NaiveDate>,
    /// Version of the data layout the case was last written with.
    pub data_version: Option<u32>,
    /// Applicant 1 (the sole applicant in sole cases).
    pub applicant1: Applicant,
    /// Applicant 2 (the respondent in sole cases).
    pub applicant2: Applicant,
    /// The application.
    pub application: Application,
    /// The invitation to applicant 2.
    pub case_invite: CaseInvite,
    /// The respondent's acknowledgement of service.
    pub acknowledgement_of_service: AcknowledgementOfService,
    /// The conditional order.
    pub conditional_order: ConditionalOrder,
    /// The final order.
    pub final_order: FinalOrder,
    /// The general application being entered.
    pub general_application: GeneralApplication,
    /// General applications received.
    pub general_applications: Vec<ListValue<GeneralApplication>>,
    /// Note being entered by a caseworker.
    pub note: Option<String>,
    /// Caseworker notes.
    pub notes: Vec<ListValue<CaseNote>>,
    /// Documents generated by the service.
    pub documents_generated: Vec<ListValue<DivorceDocument>>,
    /// Documents uploaded by the parties.
    pub documents_uploaded: Vec<ListValue<DivorceDocument>>,
    extra: Map<String, Value>,
}

impl CaseData {
    /// Reads a CCD case data map.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MalformedCaseData` if a recognised key holds a
    /// value of the wrong shape.
    pub fn from_ccd_map(map: &Map<String, Value>) -> Result<Self, DomainError> {
        let header: CaseHeader = read_prefixed(map, "")?;

        let mut applicant1: Applicant = read_prefixed(map, APPLICANT1)?;
        applicant1.solicitor = read_prefixed(map, APPLICANT1_SOLICITOR)?;
        let mut applicant2: Applicant = read_prefixed(map, APPLICANT2)?;
        applicant2.solicitor = read_prefixed(map, APPLICANT2_SOLICITOR)?;

        let mut application: Application = read_prefixed(map, "")?;
        application.applicant1_help_with_fees = read_prefixed(map, APPLICANT1_HWF)?;
        application.applicant2_help_with_fees = read_prefixed(map, APPLICANT2_HWF)?;
        application.marriage_details = read_prefixed(map, MARRIAGE)?;
        application.jurisdiction = read_prefixed(map, JURISDICTION)?;

        let mut conditional_order: ConditionalOrder = read_prefixed(map, CONDITIONAL_ORDER)?;
        conditional_order.applicant1_questions = read_prefixed(map, CO_APPLICANT1)?;
        conditional_order.applicant2_questions = read_prefixed(map, CO_APPLICANT2)?;

        let mut case_data: Self = Self {
            application_type: header.application_type,
            divorce_or_dissolution: header.divorce_or_dissolution,
            due_date: header.due_date,
            data_version: header.data_version,
            applicant1,
            applicant2,
            application,
            case_invite: read_prefixed(map, CASE_INVITE)?,
            acknowledgement_of_service: read_prefixed(map, AOS)?,
            conditional_order,
            final_order: read_prefixed(map, "")?,
            general_application: read_prefixed(map, GENERAL_APPLICATION)?,
            general_applications: header.general_applications,
            note: header.note,
            notes: header.notes,
            documents_generated: header.documents_generated,
            documents_uploaded: header.documents_uploaded,
            extra: Map::new(),
        };

        let known: Map<String, Value> = case_data.typed_map()?;
        case_data.extra = map
            .iter()
            .filter(|(key, _)| !known.contains_key(key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(case_data)
    }

    /// Writes the case back into CCD's flat layout.
    ///
    /// Unrecognised keys from the original map are included; typed values
    /// win when both are present.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MalformedCaseData` if a component fails to
    /// serialize.
    pub fn to_ccd_map(&self) -> Result<Map<String, Value>, DomainError> {
        let mut out: Map<String, Value> = self.extra.clone();
        for (key, value) in self.typed_map()? {
            out.insert(key, value);
        }
        Ok(out)
    }

    fn typed_map(&self) -> Result<Map<String, Value>, DomainError> {
        let header: CaseHeader = CaseHeader {
            application_type: self.application_type,
            divorce_or_dissolution: self.divorce_or_dissolution,
            due_date: self.due_date,
            data_version: self.data_version,
            note: self.note.clone(),
            notes: self.notes.clone(),
            general_applications: self.general_applications.clone(),
            documents_generated: self.documents_generated.clone(),
            documents_uploaded: self.documents_uploaded.clone(),
        };

        let mut out: Map<String, Value> = Map::new();
        write_prefixed(&header, "", &mut out)?;
        write_prefixed(&self.applicant1, APPLICANT1, &mut out)?;
        write_prefixed(&self.applicant1.solicitor, APPLICANT1_SOLICITOR, &mut out)?;
        write_prefixed(&self.applicant2, APPLICANT2, &mut out)?;
        write_prefixed(&self.applicant2.solicitor, APPLICANT2_SOLICITOR, &mut out)?;
        write_prefixed(&self.application, "", &mut out)?;
        write_prefixed(
            &self.application.applicant1_help_with_fees,
            APPLICANT1_HWF,
            &mut out,
        )?;
        write_prefixed(
            &self.application.applicant2_help_with_fees,
            APPLICANT2_HWF,
            &mut out,
        )?;
        write_prefixed(&self.application.marriage_details, MARRIAGE, &mut out)?;
        write_prefixed(&self.application.jurisdiction, JURISDICTION, &mut out)?;
        write_prefixed(&self.case_invite, CASE_INVITE, &mut out)?;
        write_prefixed(&self.acknowledgement_of_service, AOS, &mut out)?;
        write_prefixed(&self.conditional_order, CONDITIONAL_ORDER, &mut out)?;
        write_prefixed(
            &self.conditional_order.applicant1_questions,
            CO_APPLICANT1,
            &mut out,
        )?;
        write_prefixed(
            &self.conditional_order.applicant2_questions,
            CO_APPLICANT2,
            &mut out,
        )?;
        write_prefixed(&self.final_order, "", &mut out)?;
        write_prefixed(&self.general_application, GENERAL_APPLICATION, &mut out)?;
        Ok(out)
    }

    /// Keys carried through without interpretation.
    #[must_use]
    pub const fn unrecognised_fields(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Whether the case has a single applicant.
    #[must_use]
    pub fn is_sole(&self) -> bool {
        self.application_type == ApplicationType::SoleApplication
    }

    /// Whether both parties apply together.
    #[must_use]
    pub fn is_joint(&self) -> bool {
        self.application_type == ApplicationType::JointApplication
    }

    /// Whether the case ends a marriage rather than a civil partnership.
    #[must_use]
    pub fn is_divorce(&self) -> bool {
        self.divorce_or_dissolution == DivorceOrDissolution::Divorce
    }

    /// Swaps the two applicants, solicitors included.
    ///
    /// Organisation policies keep the case role of the side they end up on.
    pub fn switch_applicants(&mut self) {
        std::mem::swap(&mut self.applicant1, &mut self.applicant2);
        reassign_case_role(&mut self.applicant1, "[APPONESOLICITOR]");
        reassign_case_role(&mut self.applicant2, "[APPTWOSOLICITOR]");
    }

    /// Appends a note.
    pub fn add_note(&mut self, author: String, date: NaiveDate, note: String) {
        self.notes.push(ListValue::new(CaseNote {
            author,
            date: Some(date),
            note,
        }));
    }

    /// Returns all documents attached to the case, generated first.
    pub fn all_documents(&self) -> impl Iterator<Item = &DivorceDocument> {
        self.documents_generated
            .iter()
            .chain(self.documents_uploaded.iter())
            .map(|lv| &lv.value)
    }
}

fn reassign_case_role(applicant: &mut Applicant, role: &str) {
    if let Some(policy) = applicant.solicitor.organisation_policy.as_mut() {
        policy.case_assigned_role = Some(role.to_string());
    }
}

/// A case as seen by a callback: the data plus platform metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CaseDetails {
    /// CCD case reference. Absent before the case is created.
    pub id: Option<u64>,
    /// Current state. Absent before the case is created.
    pub state: Option<State>,
    /// Case data.
    pub data: CaseData,
    /// When the case was created.
    pub created_date: Option<NaiveDateTime>,
    /// When the case was last modified.
    pub last_modified: Option<NaiveDateTime>,
}
