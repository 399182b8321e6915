// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashMap;
use std::path::Path;

use nfdiv_domain::LanguagePreference;
use serde::Deserialize;

use crate::error::NotificationError;

/// The emails the service sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailTemplateName {
    /// Sole applicant: application submitted.
    SoleApplicationSubmitted,
    /// Both joint applicants: application submitted.
    JointApplicationSubmitted,
    /// Applicant 2: invitation to join a joint application.
    JointApplicant2Invite,
    /// Applicant 1: applicant 2 approved the application.
    JointApplicant2Approved,
    /// Applicant 1: applicant 2 asked for changes.
    JointApplicant2RequestChanges,
    /// The other party: joint application switched to sole.
    JointApplicationSwitchedToSole,
    /// Sole applicant: application issued.
    SoleApplicationIssued,
    /// Respondent: application issued.
    SoleRespondentApplicationIssued,
    /// Both joint applicants: application issued.
    JointApplicationIssued,
    /// Applicant: the respondent will not dispute.
    AosSubmittedUndisputed,
    /// Applicant: the respondent intends to dispute.
    AosSubmittedDisputed,
    /// Applicant: conditional order application received.
    ConditionalOrderSubmitted,
    /// Joint applicant: the partner applied for the conditional order.
    PartnerAppliedForConditionalOrder,
    /// Applicants: conditional order pronounced.
    ConditionalOrderPronounced,
    /// Applicant: final order application received.
    FinalOrderRequested,
    /// Applicants: final order granted.
    FinalOrderGranted,
    /// Applicant: general application received.
    GeneralApplicationReceived,
    /// Solicitor: application submitted.
    SolicitorApplicationSubmitted,
}

impl EmailTemplateName {
    /// Every template.
    pub const ALL: [Self; 18] = [
        Self::SoleApplicationSubmitted,
        Self::JointApplicationSubmitted,
        Self::JointApplicant2Invite,
        Self::JointApplicant2Approved,
        Self::JointApplicant2RequestChanges,
        Self::JointApplicationSwitchedToSole,
        Self::SoleApplicationIssued,
        Self::SoleRespondentApplicationIssued,
        Self::JointApplicationIssued,
        Self::AosSubmittedUndisputed,
        Self::AosSubmittedDisputed,
        Self::ConditionalOrderSubmitted,
        Self::PartnerAppliedForConditionalOrder,
        Self::ConditionalOrderPronounced,
        Self::FinalOrderRequested,
        Self::FinalOrderGranted,
        Self::GeneralApplicationReceived,
        Self::SolicitorApplicationSubmitted,
    ];

    /// Returns the key used in the template file.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SoleApplicationSubmitted => "sole_application_submitted",
            Self::JointApplicationSubmitted => "joint_application_submitted",
            Self::JointApplicant2Invite => "joint_applicant2_invite",
            Self::JointApplicant2Approved => "joint_applicant2_approved",
            Self::JointApplicant2RequestChanges => "joint_applicant2_request_changes",
            Self::JointApplicationSwitchedToSole => "joint_application_switched_to_sole",
            Self::SoleApplicationIssued => "sole_application_issued",
            Self::SoleRespondentApplicationIssued => "sole_respondent_application_issued",
            Self::JointApplicationIssued => "joint_application_issued",
            Self::AosSubmittedUndisputed => "aos_submitted_undisputed",
            Self::AosSubmittedDisputed => "aos_submitted_disputed",
            Self::ConditionalOrderSubmitted => "conditional_order_submitted",
            Self::PartnerAppliedForConditionalOrder => "partner_applied_for_conditional_order",
            Self::ConditionalOrderPronounced => "conditional_order_pronounced",
            Self::FinalOrderRequested => "final_order_requested",
            Self::FinalOrderGranted => "final_order_granted",
            Self::GeneralApplicationReceived => "general_application_received",
            Self::SolicitorApplicationSubmitted => "solicitor_application_submitted",
        }
    }
}

impl std::fmt::Display for EmailTemplateName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct TemplateFile {
    #[serde(default)]
    english: HashMap<EmailTemplateName, String>,
    #[serde(default)]
    welsh: HashMap<EmailTemplateName, String>,
}

/// Maps a template and language to a GOV.UK Notify template id.
///
/// Welsh lookups fall back to the English template when no Welsh version
/// is configured.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    english: HashMap<EmailTemplateName, String>,
    welsh: HashMap<EmailTemplateName, String>,
}

impl TemplateRegistry {
    /// Parses a registry from TOML with `[english]` and `[welsh]` tables.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::InvalidTemplateConfig` if the TOML is
    /// malformed or names an unknown template.
    pub fn from_toml_str(input: &str) -> Result<Self, NotificationError> {
        let file: TemplateFile =
            toml::from_str(input).map_err(|e| NotificationError::InvalidTemplateConfig {
                message: e.to_string(),
            })?;
        Ok(Self {
            english: file.english,
            welsh: file.welsh,
        })
    }

    /// Reads a registry from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::InvalidTemplateConfig` if the file cannot
    /// be read or parsed.
    pub fn load(path: &Path) -> Result<Self, NotificationError> {
        let input: String =
            std::fs::read_to_string(path).map_err(|e| NotificationError::InvalidTemplateConfig {
                message: format!("{}: {e}", path.display()),
            })?;
        Self::from_toml_str(&input)
    }

    /// Registers a template id.
    pub fn insert(
        &mut self,
        language: LanguagePreference,
        template: EmailTemplateName,
        template_id: String,
    ) {
        match language {
            LanguagePreference::English => self.english.insert(template, template_id),
            LanguagePreference::Welsh => self.welsh.insert(template, template_id),
        };
    }

    /// Returns the Notify template id for a template in a language.
    #[must_use]
    pub fn template_id(
        &self,
        language: LanguagePreference,
        template: EmailTemplateName,
    ) -> Option<&str> {
        let welsh: Option<&String> = match language {
            LanguagePreference::Welsh => self.welsh.get(&template),
            LanguagePreference::English => None,
        };
        welsh.or_else(|| self.english.get(&template)).map(String::as_str)
    }

    /// Returns the templates with no English id configured.
    #[must_use]
    pub fn missing_templates(&self) -> Vec<EmailTemplateName> {
        EmailTemplateName::ALL
            .into_iter()
            .filter(|template| !self.english.contains_key(template))
            .collect()
    }
}
