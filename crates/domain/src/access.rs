// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Roles, permissions and the access profiles granted on case fields.

use serde::{Deserialize, Serialize};

/// An IDAM role or a CCD case role.
///
/// Case roles (in square brackets) are assigned per case by CCD. The
/// service only sees IDAM roles, so a case role is treated as satisfied
/// by the IDAM role it is normally held alongside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UserRole {
    /// Court admin.
    #[serde(rename = "caseworker-divorce-courtadmin_beta")]
    CaseWorker,
    /// Legal advisor.
    #[serde(rename = "caseworker-divorce-courtadmin-la")]
    LegalAdvisor,
    /// Super user.
    #[serde(rename = "caseworker-divorce-superuser")]
    SuperUser,
    /// System update user used by scheduled jobs.
    #[serde(rename = "caseworker-divorce-systemupdate")]
    SystemUpdate,
    /// Professional user.
    #[serde(rename = "caseworker-divorce-solicitor")]
    Solicitor,
    /// Member of the public.
    #[serde(rename = "citizen")]
    Citizen,
    /// The citizen who created the case.
    #[serde(rename = "[CREATOR]")]
    Creator,
    /// The citizen linked as applicant 2.
    #[serde(rename = "[APPLICANTTWO]")]
    Applicant2,
    /// Applicant 1's solicitor.
    #[serde(rename = "[APPONESOLICITOR]")]
    Applicant1Solicitor,
    /// Applicant 2's solicitor.
    #[serde(rename = "[APPTWOSOLICITOR]")]
    Applicant2Solicitor,
}

impl UserRole {
    /// Every role, IDAM roles first.
    pub const ALL: [Self; 10] = [
        Self::CaseWorker,
        Self::LegalAdvisor,
        Self::SuperUser,
        Self::SystemUpdate,
        Self::Solicitor,
        Self::Citizen,
        Self::Creator,
        Self::Applicant2,
        Self::Applicant1Solicitor,
        Self::Applicant2Solicitor,
    ];

    /// Returns the role id as IDAM and CCD spell it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CaseWorker => "caseworker-divorce-courtadmin_beta",
            Self::LegalAdvisor => "caseworker-divorce-courtadmin-la",
            Self::SuperUser => "caseworker-divorce-superuser",
            Self::SystemUpdate => "caseworker-divorce-systemupdate",
            Self::Solicitor => "caseworker-divorce-solicitor",
            Self::Citizen => "citizen",
            Self::Creator => "[CREATOR]",
            Self::Applicant2 => "[APPLICANTTWO]",
            Self::Applicant1Solicitor => "[APPONESOLICITOR]",
            Self::Applicant2Solicitor => "[APPTWOSOLICITOR]",
        }
    }

    /// Parses a role id, returning `None` for roles this case type ignores.
    #[must_use]
    pub fn from_role_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == id)
    }

    /// Whether this is a case role.
    #[must_use]
    pub const fn is_case_role(self) -> bool {
        self.base_role().is_some()
    }

    /// The IDAM role a case role is held alongside.
    #[must_use]
    pub const fn base_role(self) -> Option<Self> {
        match self {
            Self::Creator | Self::Applicant2 => Some(Self::Citizen),
            Self::Applicant1Solicitor | Self::Applicant2Solicitor => Some(Self::Solicitor),
            Self::CaseWorker
            | Self::LegalAdvisor
            | Self::SuperUser
            | Self::SystemUpdate
            | Self::Solicitor
            | Self::Citizen => None,
        }
    }

    /// Whether holding `self` satisfies a grant made to `granted`.
    #[must_use]
    pub fn satisfies(self, granted: Self) -> bool {
        self == granted || granted.base_role() == Some(self)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CCD create/read/update/delete flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Permissions {
    /// Create.
    pub create: bool,
    /// Read.
    pub read: bool,
    /// Update.
    pub update: bool,
    /// Delete.
    pub delete: bool,
}

impl Permissions {
    /// Read only.
    pub const R: Self = Self::new(false, true, false, false);
    /// Create and read.
    pub const CR: Self = Self::new(true, true, false, false);
    /// Read and update.
    pub const RU: Self = Self::new(false, true, true, false);
    /// Create, read and update.
    pub const CRU: Self = Self::new(true, true, true, false);
    /// Everything.
    pub const CRUD: Self = Self::new(true, true, true, true);

    const fn new(create: bool, read: bool, update: bool, delete: bool) -> Self {
        Self {
            create,
            read,
            update,
            delete,
        }
    }

    /// Whether every flag set in `required` is also set here.
    #[must_use]
    pub const fn includes(self, required: Self) -> bool {
        (self.create || !required.create)
            && (self.read || !required.read)
            && (self.update || !required.update)
            && (self.delete || !required.delete)
    }
}

impl std::fmt::Display for Permissions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (flag, letter) in [
            (self.create, 'C'),
            (self.read, 'R'),
            (self.update, 'U'),
            (self.delete, 'D'),
        ] {
            if flag {
                write!(f, "{letter}")?;
            }
        }
        Ok(())
    }
}

/// A role-to-permission grant list applied to a group of case fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessProfile {
    /// Fields applicant 1's side owns.
    DefaultAccess,
    /// Fields applicant 2's side owns.
    Applicant2Access,
    /// Fields only court staff edit.
    CaseworkerAccess,
    /// Solicitor details.
    SolicitorAccess,
    /// Legal advisor decisions.
    LegalAdvisorAccess,
    /// Fields only the system writes.
    SystemUpdateAccess,
}

use Permissions as P;
use UserRole as U;

const DEFAULT_GRANTS: &[(UserRole, Permissions)] = &[
    (U::Creator, P::CRU),
    (U::Applicant1Solicitor, P::CRU),
    (U::Applicant2, P::R),
    (U::Applicant2Solicitor, P::R),
    (U::CaseWorker, P::R),
    (U::LegalAdvisor, P::R),
    (U::SuperUser, P::CRU),
    (U::SystemUpdate, P::CRU),
];

const APPLICANT2_GRANTS: &[(UserRole, Permissions)] = &[
    (U::Applicant2, P::CRU),
    (U::Applicant2Solicitor, P::CRU),
    (U::Creator, P::R),
    (U::Applicant1Solicitor, P::R),
    (U::CaseWorker, P::R),
    (U::LegalAdvisor, P::R),
    (U::SuperUser, P::CRU),
    (U::SystemUpdate, P::CRU),
];

const CASEWORKER_GRANTS: &[(UserRole, Permissions)] = &[
    (U::CaseWorker, P::CRU),
    (U::LegalAdvisor, P::CRU),
    (U::SuperUser, P::CRU),
    (U::SystemUpdate, P::CRU),
    (U::Creator, P::R),
    (U::Applicant2, P::R),
    (U::Applicant1Solicitor, P::R),
    (U::Applicant2Solicitor, P::R),
];

const SOLICITOR_GRANTS: &[(UserRole, Permissions)] = &[
    (U::Applicant1Solicitor, P::CRU),
    (U::Applicant2Solicitor, P::CRU),
    (U::CaseWorker, P::R),
    (U::LegalAdvisor, P::R),
    (U::SuperUser, P::CRU),
    (U::SystemUpdate, P::CRU),
];

const LEGAL_ADVISOR_GRANTS: &[(UserRole, Permissions)] = &[
    (U::LegalAdvisor, P::CRU),
    (U::CaseWorker, P::R),
    (U::SuperUser, P::CRU),
    (U::SystemUpdate, P::CRU),
    (U::Creator, P::R),
    (U::Applicant2, P::R),
    (U::Applicant1Solicitor, P::R),
    (U::Applicant2Solicitor, P::R),
];

const SYSTEM_UPDATE_GRANTS: &[(UserRole, Permissions)] = &[
    (U::SystemUpdate, P::CRUD),
    (U::SuperUser, P::CRU),
    (U::CaseWorker, P::R),
    (U::LegalAdvisor, P::R),
];

impl AccessProfile {
    /// Returns the roles granted by this profile.
    #[must_use]
    pub const fn grants(self) -> &'static [(UserRole, Permissions)] {
        match self {
            Self::DefaultAccess => DEFAULT_GRANTS,
            Self::Applicant2Access => APPLICANT2_GRANTS,
            Self::CaseworkerAccess => CASEWORKER_GRANTS,
            Self::SolicitorAccess => SOLICITOR_GRANTS,
            Self::LegalAdvisorAccess => LEGAL_ADVISOR_GRANTS,
            Self::SystemUpdateAccess => SYSTEM_UPDATE_GRANTS,
        }
    }

    /// Whether any of `roles` holds `required` under this profile.
    #[must_use]
    pub fn permits(self, roles: &[UserRole], required: Permissions) -> bool {
        is_granted(self.grants(), roles, required)
    }
}

/// Whether any held role satisfies a grant carrying `required`.
#[must_use]
pub fn is_granted(
    grants: &[(UserRole, Permissions)],
    roles: &[UserRole],
    required: Permissions,
) -> bool {
    grants.iter().any(|(granted, permissions)| {
        permissions.includes(required) && roles.iter().any(|held| held.satisfies(*granted))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permissions_render_as_flags() {
        assert_eq!(Permissions::CRU.to_string(), "CRU");
        assert_eq!(Permissions::R.to_string(), "R");
        assert_eq!(Permissions::CRUD.to_string(), "CRUD");
    }

    #[test]
    fn test_case_role_satisfied_by_base_role() {
        assert!(UserRole::Citizen.satisfies(UserRole::Creator));
        assert!(UserRole::Solicitor.satisfies(UserRole::Applicant2Solicitor));
        assert!(!UserRole::Citizen.satisfies(UserRole::CaseWorker));
    }

    #[test]
    fn test_read_only_grant_does_not_permit_update() {
        let roles: Vec<UserRole> = vec![UserRole::CaseWorker];
        assert!(AccessProfile::DefaultAccess.permits(&roles, Permissions::R));
        assert!(!AccessProfile::DefaultAccess.permits(&roles, Permissions::RU));
        assert!(AccessProfile::CaseworkerAccess.permits(&roles, Permissions::CRU));
    }
}
