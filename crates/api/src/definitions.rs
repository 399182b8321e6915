// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Case definition export.
//!
//! Renders the fields, states and events the service knows about as the
//! JSON sheets the case definition importer reads. Callback URLs point
//! at this service under `callback_base`.

use nfdiv::{CallbackHook, EventDefinition, EventRegistry};
use nfdiv_domain::{FieldDefinition, State, case_field_definitions};
use serde::Serialize;

/// Case type id of no-fault divorce cases.
pub const CASE_TYPE_ID: &str = "NFD";

/// Jurisdiction of no-fault divorce cases.
pub const JURISDICTION: &str = "DIVORCE";

const SECURITY_CLASSIFICATION: &str = "Public";

/// A `CaseField` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CaseFieldRow {
    #[serde(rename = "CaseTypeID")]
    pub case_type_id: &'static str,
    #[serde(rename = "ID")]
    pub id: String,
    pub label: String,
    pub field_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_type_parameter: Option<&'static str>,
    pub security_classification: &'static str,
}

/// An `AuthorisationCaseField` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorisationCaseFieldRow {
    #[serde(rename = "CaseTypeID")]
    pub case_type_id: &'static str,
    #[serde(rename = "CaseFieldID")]
    pub case_field_id: String,
    #[serde(rename = "UserRole")]
    pub user_role: &'static str,
    #[serde(rename = "CRUD")]
    pub crud: String,
}

/// A `State` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StateRow {
    #[serde(rename = "CaseTypeID")]
    pub case_type_id: &'static str,
    #[serde(rename = "ID")]
    pub id: &'static str,
    pub name: &'static str,
    pub display_order: usize,
}

/// A `CaseEvent` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CaseEventRow {
    #[serde(rename = "CaseTypeID")]
    pub case_type_id: &'static str,
    #[serde(rename = "ID")]
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub display_order: usize,
    #[serde(rename = "PreConditionState(s)", skip_serializing_if = "Option::is_none")]
    pub pre_condition_states: Option<String>,
    pub post_condition_state: &'static str,
    pub show_summary: &'static str,
    #[serde(
        rename = "CallBackURLAboutToStartEvent",
        skip_serializing_if = "Option::is_none"
    )]
    pub about_to_start_url: Option<String>,
    #[serde(
        rename = "CallBackURLAboutToSubmitEvent",
        skip_serializing_if = "Option::is_none"
    )]
    pub about_to_submit_url: Option<String>,
    #[serde(
        rename = "CallBackURLSubmittedEvent",
        skip_serializing_if = "Option::is_none"
    )]
    pub submitted_url: Option<String>,
}

/// An `AuthorisationCaseEvent` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorisationCaseEventRow {
    #[serde(rename = "CaseTypeID")]
    pub case_type_id: &'static str,
    #[serde(rename = "CaseEventID")]
    pub case_event_id: &'static str,
    #[serde(rename = "UserRole")]
    pub user_role: &'static str,
    #[serde(rename = "CRUD")]
    pub crud: String,
}

/// Every exported sheet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CaseDefinition {
    pub case_fields: Vec<CaseFieldRow>,
    pub authorisation_case_fields: Vec<AuthorisationCaseFieldRow>,
    pub states: Vec<StateRow>,
    pub case_events: Vec<CaseEventRow>,
    pub authorisation_case_events: Vec<AuthorisationCaseEventRow>,
}

impl CaseDefinition {
    /// Renders each sheet as a named JSON document.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if a sheet cannot be serialized.
    pub fn documents(&self) -> Result<Vec<(&'static str, String)>, serde_json::Error> {
        Ok(vec![
            ("CaseField", serde_json::to_string_pretty(&self.case_fields)?),
            (
                "AuthorisationCaseField",
                serde_json::to_string_pretty(&self.authorisation_case_fields)?,
            ),
            ("State", serde_json::to_string_pretty(&self.states)?),
            ("CaseEvent", serde_json::to_string_pretty(&self.case_events)?),
            (
                "AuthorisationCaseEvent",
                serde_json::to_string_pretty(&self.authorisation_case_events)?,
            ),
        ])
    }
}

/// Builds the case definition for every registered event.
///
/// # Arguments
///
/// * `registry` - The events to export
/// * `callback_base` - Base URL the platform should call back on
#[must_use]
pub fn export(registry: &EventRegistry, callback_base: &str) -> CaseDefinition {
    let fields: &[FieldDefinition] = case_field_definitions();
    let mut definition: CaseDefinition = CaseDefinition {
        case_fields: fields.iter().map(case_field_row).collect(),
        ..CaseDefinition::default()
    };

    for field in fields {
        for (role, permissions) in field.access.grants() {
            definition
                .authorisation_case_fields
                .push(AuthorisationCaseFieldRow {
                    case_type_id: CASE_TYPE_ID,
                    case_field_id: field.id.clone(),
                    user_role: role.as_str(),
                    crud: permissions.to_string(),
                });
        }
    }

    definition.states = State::ALL
        .iter()
        .enumerate()
        .map(|(position, state)| StateRow {
            case_type_id: CASE_TYPE_ID,
            id: state.as_str(),
            name: state.label(),
            display_order: position + 1,
        })
        .collect();

    let base: &str = callback_base.trim_end_matches('/');
    for (position, event) in registry.definitions().enumerate() {
        definition
            .case_events
            .push(case_event_row(event, position + 1, base));
        for (role, permissions) in event.grants {
            definition
                .authorisation_case_events
                .push(AuthorisationCaseEventRow {
                    case_type_id: CASE_TYPE_ID,
                    case_event_id: event.id,
                    user_role: role.as_str(),
                    crud: permissions.to_string(),
                });
        }
    }

    definition
}

fn case_field_row(field: &FieldDefinition) -> CaseFieldRow {
    CaseFieldRow {
        case_type_id: CASE_TYPE_ID,
        id: field.id.clone(),
        label: field.label.clone(),
        field_type: field.field_type.ccd_type(),
        field_type_parameter: field.field_type.parameter(),
        security_classification: SECURITY_CLASSIFICATION,
    }
}

fn case_event_row(event: &EventDefinition, display_order: usize, base: &str) -> CaseEventRow {
    let callback_url = |hook: CallbackHook| -> Option<String> {
        event
            .has_callback(hook)
            .then(|| format!("{base}/callbacks/{hook}"))
    };

    // Creation events start from no state.
    let pre_condition_states: Option<String> = if event.is_create() {
        None
    } else {
        Some(
            event
                .pre_states
                .iter()
                .map(|state| state.as_str())
                .collect::<Vec<&str>>()
                .join(";"),
        )
    };

    CaseEventRow {
        case_type_id: CASE_TYPE_ID,
        id: event.id,
        name: event.name,
        description: event.description,
        display_order,
        pre_condition_states,
        post_condition_state: event.post_state.map_or("*", State::as_str),
        show_summary: if event.show_summary { "Y" } else { "N" },
        about_to_start_url: callback_url(CallbackHook::AboutToStart),
        about_to_submit_url: callback_url(CallbackHook::AboutToSubmit),
        submitted_url: callback_url(CallbackHook::Submitted),
    }
}
