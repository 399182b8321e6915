// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use nfdiv_domain::CaseTimings;
use nfdiv_notification::{CommonContent, NotificationDispatcher};

use crate::ports::{
    DocumentGenerator, DocumentStore, FeeLookup, IdamLookup, OrganisationLookup, PaymentService,
    ServiceAuthLookup, UserDetails,
};

/// Every outbound service an event may call.
#[derive(Clone)]
pub struct Services {
    /// IDAM user lookup.
    pub idam: Arc<dyn IdamLookup>,
    /// Service-to-service token lookup.
    pub service_auth: Arc<dyn ServiceAuthLookup>,
    /// Fees register.
    pub fees: Arc<dyn FeeLookup>,
    /// Payments.
    pub payments: Arc<dyn PaymentService>,
    /// Document Assembly.
    pub documents: Arc<dyn DocumentGenerator>,
    /// Document Management.
    pub document_store: Arc<dyn DocumentStore>,
    /// Professional reference data.
    pub organisations: Arc<dyn OrganisationLookup>,
    /// Email dispatch.
    pub notifications: NotificationDispatcher,
    /// Variables shared by every email.
    pub content: CommonContent,
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("notifications", &self.notifications)
            .field("content", &self.content)
            .finish_non_exhaustive()
    }
}

/// Everything a callback can see besides the case itself.
#[derive(Debug, Clone, Copy)]
pub struct EventContext<'a> {
    /// Outbound services.
    pub services: &'a Services,
    /// The user triggering the event.
    pub user: &'a UserDetails,
    /// The user's bearer token, forwarded to downstream services.
    pub auth_token: &'a str,
    /// Current local time in the UK.
    pub now: NaiveDateTime,
    /// Current date in the UK.
    pub today: NaiveDate,
    /// Case deadlines.
    pub timings: &'a CaseTimings,
}

impl<'a> EventContext<'a> {
    /// Builds a context for one callback.
    #[must_use]
    pub fn new(
        services: &'a Services,
        user: &'a UserDetails,
        auth_token: &'a str,
        now: NaiveDateTime,
        timings: &'a CaseTimings,
    ) -> Self {
        Self {
            services,
            user,
            auth_token,
            now,
            today: now.date(),
            timings,
        }
    }
}
