// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CaseReference, DomainError};

#[test]
fn test_valid_reference_is_formatted_in_groups() {
    let reference: CaseReference = CaseReference::parse("1616591401473378").unwrap();
    assert_eq!(reference.formatted(), "1616-5914-0147-3378");
    assert_eq!(reference.id(), 1_616_591_401_473_378);
}

#[test]
fn test_dashed_reference_is_accepted() {
    assert!(CaseReference::is_valid("1234-5678-9012-3452"));
}

#[test]
fn test_wrong_check_digit_is_rejected() {
    let result: Result<CaseReference, DomainError> = CaseReference::parse("1616591401473379");
    assert_eq!(
        result,
        Err(DomainError::InvalidCaseReference(String::from(
            "1616591401473379"
        )))
    );
}

#[test]
fn test_wrong_length_is_rejected() {
    assert!(!CaseReference::is_valid("123456789012345"));
    assert!(!CaseReference::is_valid("16165914014733780"));
    assert!(!CaseReference::is_valid("16165914O1473378"));
}

#[test]
fn test_from_numeric_case_id() {
    let reference: CaseReference = CaseReference::from_id(1_644_200_123_456_788).unwrap();
    assert_eq!(reference.to_string(), "1644200123456788");
}
