// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Personalisation shared by every email.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use nfdiv_domain::{Applicant, CaseData, CaseReference, Gender, LanguagePreference};

/// Personalisation key: recipient's first name.
pub const FIRST_NAME: &str = "first name";
/// Personalisation key: recipient's last name.
pub const LAST_NAME: &str = "last name";
/// Personalisation key: how the recipient's partner is referred to.
pub const PARTNER: &str = "partner";
/// Personalisation key: formatted case reference.
pub const APPLICATION_REFERENCE: &str = "application reference";
/// Personalisation key: `yes` for divorce cases.
pub const IS_DIVORCE: &str = "isDivorce";
/// Personalisation key: `yes` for dissolution cases.
pub const IS_DISSOLUTION: &str = "isDissolution";
/// Personalisation key: where to sign in.
pub const SIGN_IN_URL: &str = "signin url";
/// Personalisation key: what the application is called.
pub const DIVORCE_OR_DISSOLUTION: &str = "divorce or dissolution";

const WELSH_MONTHS: [&str; 12] = [
    "Ionawr",
    "Chwefror",
    "Mawrth",
    "Ebrill",
    "Mai",
    "Mehefin",
    "Gorffennaf",
    "Awst",
    "Medi",
    "Hydref",
    "Tachwedd",
    "Rhagfyr",
];

/// Formats a date as `d MMMM yyyy` in the recipient's language.
#[must_use]
pub fn format_date(date: NaiveDate, language: LanguagePreference) -> String {
    match language {
        LanguagePreference::English => date.format("%-d %B %Y").to_string(),
        LanguagePreference::Welsh => {
            let month: &str = usize::try_from(date.month0())
                .ok()
                .and_then(|index| WELSH_MONTHS.get(index))
                .copied()
                .unwrap_or_default();
            format!("{} {month} {}", date.day(), date.year())
        }
    }
}

/// Builds the variables every template receives.
#[derive(Debug, Clone)]
pub struct CommonContent {
    divorce_sign_in_url: String,
    dissolution_sign_in_url: String,
}

impl CommonContent {
    /// Creates the builder with the frontends' sign-in URLs.
    #[must_use]
    pub const fn new(divorce_sign_in_url: String, dissolution_sign_in_url: String) -> Self {
        Self {
            divorce_sign_in_url,
            dissolution_sign_in_url,
        }
    }

    /// Returns the sign-in URL for the kind of case.
    #[must_use]
    pub fn sign_in_url(&self, case_data: &CaseData) -> &str {
        if case_data.is_divorce() {
            &self.divorce_sign_in_url
        } else {
            &self.dissolution_sign_in_url
        }
    }

    /// Returns the variables for an email to `applicant` about `partner`.
    #[must_use]
    pub fn template_vars(
        &self,
        case_data: &CaseData,
        case_id: Option<u64>,
        applicant: &Applicant,
        partner: &Applicant,
    ) -> BTreeMap<String, String> {
        let language: LanguagePreference = applicant.language();
        let yes_no = |value: bool| String::from(if value { "yes" } else { "no" });

        let mut vars: BTreeMap<String, String> = BTreeMap::new();
        vars.insert(
            FIRST_NAME.to_string(),
            applicant.first_name.clone().unwrap_or_default(),
        );
        vars.insert(
            LAST_NAME.to_string(),
            applicant.last_name.clone().unwrap_or_default(),
        );
        vars.insert(
            PARTNER.to_string(),
            partner_noun(case_data, partner, language).to_string(),
        );
        vars.insert(
            APPLICATION_REFERENCE.to_string(),
            case_id
                .and_then(|id| CaseReference::from_id(id).ok())
                .map(CaseReference::formatted)
                .unwrap_or_default(),
        );
        vars.insert(IS_DIVORCE.to_string(), yes_no(case_data.is_divorce()));
        vars.insert(IS_DISSOLUTION.to_string(), yes_no(!case_data.is_divorce()));
        vars.insert(
            SIGN_IN_URL.to_string(),
            self.sign_in_url(case_data).to_string(),
        );
        vars.insert(
            DIVORCE_OR_DISSOLUTION.to_string(),
            application_wording(case_data, language).to_string(),
        );
        vars
    }
}

/// How the partner is referred to in correspondence.
#[must_use]
pub const fn partner_noun(
    case_data: &CaseData,
    partner: &Applicant,
    language: LanguagePreference,
) -> &'static str {
    let divorce: bool = matches!(
        case_data.divorce_or_dissolution,
        nfdiv_domain::DivorceOrDissolution::Divorce
    );
    match (language, divorce, partner.gender) {
        (LanguagePreference::English, false, _) => "civil partner",
        (LanguagePreference::English, true, Some(Gender::Male)) => "husband",
        (LanguagePreference::English, true, Some(Gender::Female)) => "wife",
        (LanguagePreference::English, true, None) => "spouse",
        (LanguagePreference::Welsh, false, _) => "partner sifil",
        (LanguagePreference::Welsh, true, Some(Gender::Male)) => "gŵr",
        (LanguagePreference::Welsh, true, Some(Gender::Female)) => "gwraig",
        (LanguagePreference::Welsh, true, None) => "priod",
    }
}

const fn application_wording(case_data: &CaseData, language: LanguagePreference) -> &'static str {
    let divorce: bool = matches!(
        case_data.divorce_or_dissolution,
        nfdiv_domain::DivorceOrDissolution::Divorce
    );
    match (language, divorce) {
        (LanguagePreference::English, true) => "divorce application",
        (LanguagePreference::English, false) => "application to end your civil partnership",
        (LanguagePreference::Welsh, true) => "cais am ysgariad",
        (LanguagePreference::Welsh, false) => "cais i ddod â’ch partneriaeth sifil i ben",
    }
}
