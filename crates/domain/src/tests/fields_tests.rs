// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::tests::helpers::create_fully_populated_case;
use crate::{
    AccessProfile, DomainError, FieldDefinition, FieldType, Permissions, UserRole, can_access,
    case_field_definitions, field_definition, readable_fields,
};

#[test]
fn test_every_emitted_key_has_a_definition() {
    let out: Map<String, Value> = create_fully_populated_case().to_ccd_map().unwrap();
    let missing: Vec<&String> = out
        .keys()
        .filter(|key| field_definition(key).is_none())
        .collect();
    assert!(missing.is_empty(), "keys without definitions: {missing:?}");
}

#[test]
fn test_every_definition_is_emitted_by_a_full_case() {
    let out: Map<String, Value> = create_fully_populated_case().to_ccd_map().unwrap();
    let unused: Vec<&str> = case_field_definitions()
        .iter()
        .map(|definition| definition.id.as_str())
        .filter(|id| !out.contains_key(*id))
        .collect();
    assert!(unused.is_empty(), "definitions never emitted: {unused:?}");
}

#[test]
fn test_field_ids_are_unique() {
    let ids: HashSet<&str> = case_field_definitions()
        .iter()
        .map(|definition| definition.id.as_str())
        .collect();
    assert_eq!(ids.len(), case_field_definitions().len());
}

#[test]
fn test_prefixed_definition_carries_owner_label() {
    let definition: &FieldDefinition = field_definition("applicant2FirstName").unwrap();
    assert_eq!(definition.label, "Applicant 2 first name");
    assert_eq!(definition.field_type, FieldType::Text);
    assert_eq!(definition.access, AccessProfile::Applicant2Access);
}

#[test]
fn test_citizen_can_update_own_fields_only() {
    let roles: Vec<UserRole> = vec![UserRole::Creator];
    assert!(can_access("applicant1FirstName", &roles, Permissions::RU).unwrap());
    assert!(can_access("applicant2FirstName", &roles, Permissions::R).unwrap());
    assert!(!can_access("applicant2FirstName", &roles, Permissions::RU).unwrap());
    assert!(!can_access("notes", &roles, Permissions::RU).unwrap());
}

#[test]
fn test_unknown_field_is_an_error() {
    let result: Result<bool, DomainError> =
        can_access("notAField", &[UserRole::SuperUser], Permissions::R);
    assert_eq!(result, Err(DomainError::UnknownField(String::from("notAField"))));
}

#[test]
fn test_data_version_is_hidden_from_citizens() {
    let readable: Vec<&str> = readable_fields(&[UserRole::Citizen]);
    assert!(readable.contains(&"applicant1FirstName"));
    assert!(!readable.contains(&"dataVersion"));
    assert!(!readable.contains(&"applicant1SolicitorEmail"));
}
