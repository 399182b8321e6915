// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

use nfdiv_domain::{Applicant, CaseData};
use nfdiv_notification::EmailTemplateName;

use crate::context::EventContext;

/// One side of the case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Party {
    Applicant1,
    Applicant2,
}

impl Party {
    pub(super) const fn other(self) -> Self {
        match self {
            Self::Applicant1 => Self::Applicant2,
            Self::Applicant2 => Self::Applicant1,
        }
    }

    /// Returns this party and their partner.
    pub(super) const fn applicants(self, case_data: &CaseData) -> (&Applicant, &Applicant) {
        match self {
            Self::Applicant1 => (&case_data.applicant1, &case_data.applicant2),
            Self::Applicant2 => (&case_data.applicant2, &case_data.applicant1),
        }
    }
}

/// Variables for an email to `party`.
pub(super) fn party_vars(
    ctx: &EventContext<'_>,
    case_data: &CaseData,
    case_id: Option<u64>,
    party: Party,
) -> BTreeMap<String, String> {
    let (applicant, partner) = party.applicants(case_data);
    ctx.services
        .content
        .template_vars(case_data, case_id, applicant, partner)
}

/// Emails `party` at their correspondence address.
pub(super) async fn notify(
    ctx: &EventContext<'_>,
    template: EmailTemplateName,
    case_data: &CaseData,
    case_id: Option<u64>,
    party: Party,
) {
    notify_with(ctx, template, case_data, case_id, party, BTreeMap::new()).await;
}

/// Emails `party` with extra variables on top of the common ones.
pub(super) async fn notify_with(
    ctx: &EventContext<'_>,
    template: EmailTemplateName,
    case_data: &CaseData,
    case_id: Option<u64>,
    party: Party,
    extra: BTreeMap<String, String>,
) {
    let (applicant, _) = party.applicants(case_data);
    let mut vars: BTreeMap<String, String> = party_vars(ctx, case_data, case_id, party);
    vars.extend(extra);
    ctx.services
        .notifications
        .send(
            template,
            applicant.correspondence_email(),
            applicant.language(),
            vars,
            case_id,
        )
        .await;
}

/// Emails both applicants, or only applicant 1 on a sole case.
pub(super) async fn notify_applicants(
    ctx: &EventContext<'_>,
    template: EmailTemplateName,
    case_data: &CaseData,
    case_id: Option<u64>,
) {
    notify(ctx, template, case_data, case_id, Party::Applicant1).await;
    if case_data.is_joint() {
        notify(ctx, template, case_data, case_id, Party::Applicant2).await;
    }
}
