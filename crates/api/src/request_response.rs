// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Callback request and response data transfer objects, in the shape the
//! case management platform sends and expects.

use std::str::FromStr;

use chrono::NaiveDateTime;
use nfdiv::{CallbackOutcome, SubmittedOutcome};
use nfdiv_domain::{CaseData, CaseDetails, DomainError, State, migrate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// The body of every callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallbackRequest {
    /// The event being triggered.
    pub event_id: String,
    /// The case as the user left it.
    pub case_details: CaseDetailsDto,
    /// The case before the event started.
    #[serde(default)]
    pub case_details_before: Option<CaseDetailsDto>,
    /// Whether the user chose to ignore warnings.
    #[serde(default)]
    pub ignore_warning: bool,
}

/// A case on the wire.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CaseDetailsDto {
    /// Case reference.
    #[serde(default)]
    pub id: Option<u64>,
    /// Jurisdiction, `DIVORCE`.
    #[serde(default)]
    pub jurisdiction: Option<String>,
    /// Case type id.
    #[serde(default)]
    pub case_type_id: Option<String>,
    /// State id.
    #[serde(default)]
    pub state: Option<String>,
    /// Case data map.
    #[serde(default)]
    pub case_data: Map<String, Value>,
    /// When the case was created.
    #[serde(default)]
    pub created_date: Option<NaiveDateTime>,
    /// When the case was last modified.
    #[serde(default)]
    pub last_modified: Option<NaiveDateTime>,
    /// Security classification.
    #[serde(default)]
    pub security_classification: Option<String>,
}

impl CaseDetailsDto {
    /// Migrates retired fields and reads the case into the typed model.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if the state is unknown or the data cannot be
    /// read.
    pub fn into_case_details(self) -> Result<CaseDetails, DomainError> {
        let mut case_data: Map<String, Value> = self.case_data;
        let applied: Vec<u32> = migrate(&mut case_data);
        if !applied.is_empty() {
            debug!(case_id = ?self.id, versions = ?applied, "Migrated case data");
        }

        let state: Option<State> = self
            .state
            .as_deref()
            .filter(|state| !state.is_empty())
            .map(State::from_str)
            .transpose()?;

        Ok(CaseDetails {
            id: self.id,
            state,
            data: CaseData::from_ccd_map(&case_data)?,
            created_date: self.created_date,
            last_modified: self.last_modified,
        })
    }
}

/// Response to an about-to-start, mid-event or about-to-submit callback.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AboutToStartOrSubmitResponse {
    /// Case data to show or save.
    pub data: Map<String, Value>,
    /// State to move to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Errors blocking the event.
    #[serde(default)]
    pub errors: Vec<String>,
    /// Warnings the user may accept.
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl AboutToStartOrSubmitResponse {
    /// Renders a handler outcome.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MalformedCaseData` if the case data cannot be
    /// written back.
    pub fn from_outcome(outcome: CallbackOutcome) -> Result<Self, DomainError> {
        Ok(Self {
            data: outcome.data.to_ccd_map()?,
            state: outcome.state.map(|state| state.as_str().to_string()),
            errors: outcome.errors,
            warnings: outcome.warnings,
        })
    }
}

/// Response to a submitted callback.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubmittedCallbackResponse {
    /// Markdown heading of the confirmation page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_header: Option<String>,
    /// Markdown body of the confirmation page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_body: Option<String>,
}

impl From<SubmittedOutcome> for SubmittedCallbackResponse {
    fn from(outcome: SubmittedOutcome) -> Self {
        Self {
            confirmation_header: outcome.confirmation_header,
            confirmation_body: outcome.confirmation_body,
        }
    }
}

/// Either callback response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CallbackResponse {
    /// About-to-start, mid-event or about-to-submit.
    AboutToStartOrSubmit(AboutToStartOrSubmitResponse),
    /// Submitted.
    Submitted(SubmittedCallbackResponse),
}
