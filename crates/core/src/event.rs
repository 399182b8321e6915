// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use async_trait::async_trait;
use nfdiv_domain::{CaseData, CaseDetails, Permissions, State, UserRole};

use crate::context::EventContext;
use crate::error::CoreError;

/// The points in an event's lifecycle at which the platform calls back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallbackHook {
    /// When the user starts the event.
    AboutToStart,
    /// When the user leaves a page of the event.
    MidEvent,
    /// When the user submits, before the case is saved.
    AboutToSubmit,
    /// After the case has been saved.
    Submitted,
}

impl CallbackHook {
    /// Returns the path segment of the hook's endpoint.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AboutToStart => "about-to-start",
            Self::MidEvent => "mid-event",
            Self::AboutToSubmit => "about-to-submit",
            Self::Submitted => "submitted",
        }
    }
}

impl std::fmt::Display for CallbackHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of a case event, as exported to the case definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventDefinition {
    /// Event id.
    pub id: &'static str,
    /// Name shown in the event list.
    pub name: &'static str,
    /// Description shown in the case history.
    pub description: &'static str,
    /// States the event can start from. Empty for case creation.
    pub pre_states: &'static [State],
    /// State the case ends in, or `None` when it is left unchanged or
    /// decided by the handler.
    pub post_state: Option<State>,
    /// Who may trigger the event.
    pub grants: &'static [(UserRole, Permissions)],
    /// Whether the check-your-answers page is shown.
    pub show_summary: bool,
    /// Callbacks the event registers.
    pub callbacks: &'static [CallbackHook],
    /// Pages with a mid-event callback.
    pub mid_event_pages: &'static [&'static str],
}

impl EventDefinition {
    /// Whether the event creates the case.
    #[must_use]
    pub const fn is_create(&self) -> bool {
        self.pre_states.is_empty()
    }

    /// Whether the event registers `hook`.
    #[must_use]
    pub fn has_callback(&self, hook: CallbackHook) -> bool {
        self.callbacks.contains(&hook)
    }

    /// Whether a user with `roles` may trigger the event.
    #[must_use]
    pub fn can_trigger(&self, roles: &[UserRole]) -> bool {
        nfdiv_domain::is_granted(self.grants, roles, Permissions::CR)
    }
}

/// The result of an about-to-start, mid-event or about-to-submit callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackOutcome {
    /// Case data to save or show.
    pub data: CaseData,
    /// State to move the case to, if any.
    pub state: Option<State>,
    /// Errors blocking the event.
    pub errors: Vec<String>,
    /// Warnings the user may accept.
    pub warnings: Vec<String>,
}

impl CallbackOutcome {
    /// Passes the case through unchanged.
    #[must_use]
    pub fn accept(details: CaseDetails) -> Self {
        Self {
            data: details.data,
            state: details.state,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Accepts `data` and moves the case to `state`.
    #[must_use]
    pub const fn with_state(data: CaseData, state: State) -> Self {
        Self {
            data,
            state: Some(state),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Blocks the event with `errors`, returning the case unchanged.
    #[must_use]
    pub fn reject(details: CaseDetails, errors: Vec<String>) -> Self {
        Self {
            data: details.data,
            state: details.state,
            errors,
            warnings: Vec::new(),
        }
    }

    /// Whether the outcome blocks the event.
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// The result of a submitted callback.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmittedOutcome {
    /// Markdown heading of the confirmation page.
    pub confirmation_header: Option<String>,
    /// Markdown body of the confirmation page.
    pub confirmation_body: Option<String>,
}

/// A case event with its callback handlers.
///
/// Every handler defaults to passing the case through unchanged.
#[async_trait]
pub trait CcdEvent: Send + Sync {
    /// The event's static definition.
    fn definition(&self) -> &'static EventDefinition;

    /// Called when the user starts the event.
    ///
    /// # Errors
    ///
    /// Returns a `CoreError` if a downstream service fails.
    async fn about_to_start(
        &self,
        _ctx: &EventContext<'_>,
        details: CaseDetails,
    ) -> Result<CallbackOutcome, CoreError> {
        Ok(CallbackOutcome::accept(details))
    }

    /// Called when the user leaves `page`.
    ///
    /// # Errors
    ///
    /// Returns a `CoreError` if a downstream service fails.
    async fn mid_event(
        &self,
        _ctx: &EventContext<'_>,
        _page: &str,
        details: CaseDetails,
        _before: Option<&CaseDetails>,
    ) -> Result<CallbackOutcome, CoreError> {
        Ok(CallbackOutcome::accept(details))
    }

    /// Called when the user submits the event.
    ///
    /// # Errors
    ///
    /// Returns a `CoreError` if the case cannot be processed.
    async fn about_to_submit(
        &self,
        _ctx: &EventContext<'_>,
        details: CaseDetails,
        _before: Option<&CaseDetails>,
    ) -> Result<CallbackOutcome, CoreError> {
        Ok(CallbackOutcome::accept(details))
    }

    /// Called after the case has been saved.
    ///
    /// # Errors
    ///
    /// Returns a `CoreError` if a downstream service fails.
    async fn submitted(
        &self,
        _ctx: &EventContext<'_>,
        _details: &CaseDetails,
        _before: Option<&CaseDetails>,
    ) -> Result<SubmittedOutcome, CoreError> {
        Ok(SubmittedOutcome::default())
    }
}
