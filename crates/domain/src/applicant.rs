// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

use crate::ccd::{AddressGlobalUk, OrganisationPolicy};
use crate::types::{ContactDetailsType, Gender, LanguagePreference, YesOrNo, is_yes};

/// One party to the case.
///
/// Stored under the `applicant1` or `applicant2` prefix. The represented
/// party's solicitor lives under its own prefix and is attached by
/// `CaseData` when the case is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Applicant {
    /// First name.
    pub first_name: Option<String>,
    /// Middle name(s).
    pub middle_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Email address used for notifications.
    pub email: Option<String>,
    /// Gender, used for the partner noun in correspondence.
    pub gender: Option<Gender>,
    /// Whether correspondence should be in Welsh.
    pub language_preference_welsh: Option<YesOrNo>,
    /// Whether the applicant changed their last name when married.
    pub last_name_changed_when_married: Option<YesOrNo>,
    /// Whether the name differs from the marriage certificate.
    pub name_different_to_marriage_certificate: Option<YesOrNo>,
    /// Whether contact details are confidential.
    pub contact_details_type: Option<ContactDetailsType>,
    /// Phone number.
    pub phone_number: Option<String>,
    /// Postal address.
    pub address: Option<AddressGlobalUk>,
    /// Whether a financial order is being applied for.
    pub financial_order: Option<YesOrNo>,
    /// Whether there are other legal proceedings.
    pub legal_proceedings: Option<YesOrNo>,
    /// Details of other legal proceedings.
    pub legal_proceedings_details: Option<String>,
    /// Whether the applicant is represented by a solicitor.
    pub solicitor_represented: Option<YesOrNo>,
    /// Whether the applicant agreed to receive emails.
    pub agreed_to_receive_emails: Option<YesOrNo>,
    /// The applicant's solicitor, stored under `<prefix>Solicitor`.
    #[serde(skip)]
    pub solicitor: Solicitor,
}

impl Applicant {
    /// Returns first, middle and last name joined by single spaces.
    #[must_use]
    pub fn full_name(&self) -> String {
        [&self.first_name, &self.middle_name, &self.last_name]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<&str>>()
            .join(" ")
    }

    /// Whether a solicitor acts for this applicant.
    #[must_use]
    pub const fn is_represented(&self) -> bool {
        is_yes(self.solicitor_represented)
    }

    /// The correspondence language.
    #[must_use]
    pub const fn language(&self) -> LanguagePreference {
        if is_yes(self.language_preference_welsh) {
            LanguagePreference::Welsh
        } else {
            LanguagePreference::English
        }
    }

    /// Whether contact details must not be shared with the other party.
    #[must_use]
    pub fn is_confidential(&self) -> bool {
        self.contact_details_type == Some(ContactDetailsType::Private)
    }

    /// Returns the address to correspond with, preferring the solicitor's
    /// email when represented.
    #[must_use]
    pub fn correspondence_email(&self) -> Option<&str> {
        let email: Option<&str> = if self.is_represented() {
            self.solicitor.email.as_deref()
        } else {
            self.email.as_deref()
        };
        email.filter(|e| !e.trim().is_empty())
    }
}

/// A solicitor acting for one of the parties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Solicitor {
    /// Solicitor's name.
    pub name: Option<String>,
    /// Firm's reference for the case.
    pub reference: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Firm name.
    pub firm_name: Option<String>,
    /// Firm address as free text.
    pub address: Option<String>,
    /// Whether the solicitor agreed to receive emails.
    pub agree_to_receive_emails: Option<YesOrNo>,
    /// Organisation holding the solicitor case role.
    pub organisation_policy: Option<OrganisationPolicy>,
}

impl Solicitor {
    /// Returns the PRD organisation id from the organisation policy.
    #[must_use]
    pub fn organisation_id(&self) -> Option<&str> {
        self.organisation_policy
            .as_ref()
            .and_then(|policy| policy.organisation.as_ref())
            .and_then(|org| org.organisation_id.as_deref())
    }
}
