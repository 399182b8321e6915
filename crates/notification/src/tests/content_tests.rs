// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use nfdiv_domain::{CaseData, DivorceOrDissolution, LanguagePreference, YesOrNo};

use crate::content::{
    APPLICATION_REFERENCE, DIVORCE_OR_DISSOLUTION, FIRST_NAME, IS_DISSOLUTION, IS_DIVORCE,
    PARTNER, SIGN_IN_URL,
};
use crate::tests::helpers::create_test_case;
use crate::{CommonContent, format_date};

fn common_content() -> CommonContent {
    CommonContent::new(
        String::from("https://divorce.example/login"),
        String::from("https://civil.example/login"),
    )
}

#[test]
fn test_divorce_vars_for_applicant1() {
    let case_data: CaseData = create_test_case();
    let vars: BTreeMap<String, String> = common_content().template_vars(
        &case_data,
        Some(1_616_591_401_473_378),
        &case_data.applicant1,
        &case_data.applicant2,
    );

    assert_eq!(vars[FIRST_NAME], "Alex");
    assert_eq!(vars[PARTNER], "husband");
    assert_eq!(vars[APPLICATION_REFERENCE], "1616-5914-0147-3378");
    assert_eq!(vars[IS_DIVORCE], "yes");
    assert_eq!(vars[IS_DISSOLUTION], "no");
    assert_eq!(vars[SIGN_IN_URL], "https://divorce.example/login");
    assert_eq!(vars[DIVORCE_OR_DISSOLUTION], "divorce application");
}

#[test]
fn test_dissolution_vars_in_welsh() {
    let mut case_data: CaseData = create_test_case();
    case_data.divorce_or_dissolution = DivorceOrDissolution::Dissolution;
    case_data.applicant2.language_preference_welsh = Some(YesOrNo::Yes);

    let vars: BTreeMap<String, String> = common_content().template_vars(
        &case_data,
        None,
        &case_data.applicant2,
        &case_data.applicant1,
    );

    assert_eq!(vars[PARTNER], "partner sifil");
    assert_eq!(vars[SIGN_IN_URL], "https://civil.example/login");
    assert_eq!(vars[APPLICATION_REFERENCE], "");
    assert_eq!(vars[IS_DISSOLUTION], "yes");
}

#[test]
fn test_welsh_partner_follows_gender() {
    let mut case_data: CaseData = create_test_case();
    case_data.applicant1.language_preference_welsh = Some(YesOrNo::Yes);
    let vars: BTreeMap<String, String> = common_content().template_vars(
        &case_data,
        None,
        &case_data.applicant1,
        &case_data.applicant2,
    );
    assert_eq!(vars[PARTNER], "gŵr");
}

#[test]
fn test_dates_use_recipient_language() {
    let date: NaiveDate = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
    assert_eq!(format_date(date, LanguagePreference::English), "7 March 2024");
    assert_eq!(format_date(date, LanguagePreference::Welsh), "7 Mawrth 2024");
}
