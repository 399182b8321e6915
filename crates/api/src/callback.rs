// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Callback dispatch.
//!
//! Every callback runs the same pipeline: authenticate the calling
//! service, resolve the user, check the user may trigger the event,
//! migrate and read the case, run the handler for the phase and render
//! the response.

use std::sync::Arc;

use nfdiv::{
    CallbackHook, CallbackOutcome, CcdEvent, EventContext, EventDefinition, EventRegistry,
    Services, SubmittedOutcome, UserDetails,
};
use nfdiv_domain::{CaseDetails, CaseTimings, Clock, UserRole};
use tracing::{Instrument, info, info_span, warn};

use crate::error::{ApiError, translate_auth_error, translate_core_error, translate_domain_error};
use crate::request_response::{
    AboutToStartOrSubmitResponse, CallbackRequest, CallbackResponse, CaseDetailsDto,
    SubmittedCallbackResponse,
};

/// The point in the event lifecycle a callback was made at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackPhase {
    /// The user started the event.
    AboutToStart,
    /// The user left a page.
    MidEvent(String),
    /// The user submitted the event.
    AboutToSubmit,
    /// The case has been saved.
    Submitted,
}

impl CallbackPhase {
    /// The hook this phase calls.
    #[must_use]
    pub const fn hook(&self) -> CallbackHook {
        match self {
            Self::AboutToStart => CallbackHook::AboutToStart,
            Self::MidEvent(_) => CallbackHook::MidEvent,
            Self::AboutToSubmit => CallbackHook::AboutToSubmit,
            Self::Submitted => CallbackHook::Submitted,
        }
    }
}

impl std::fmt::Display for CallbackPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MidEvent(page) => write!(f, "mid-event({page})"),
            other => f.write_str(other.hook().as_str()),
        }
    }
}

/// The tokens presented with a callback.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Credentials {
    /// The user's IDAM token, from `Authorization`.
    pub authorization: Option<String>,
    /// The calling service's S2S token, from `ServiceAuthorization`.
    pub service_authorization: Option<String>,
}

/// Handles callbacks for the registered events.
pub struct CallbackService {
    registry: EventRegistry,
    services: Services,
    timings: CaseTimings,
    clock: Arc<dyn Clock>,
    allowed_services: Vec<String>,
}

impl std::fmt::Debug for CallbackService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackService")
            .field("registry", &self.registry)
            .field("timings", &self.timings)
            .field("allowed_services", &self.allowed_services)
            .finish_non_exhaustive()
    }
}

impl CallbackService {
    /// Creates the service.
    ///
    /// # Arguments
    ///
    /// * `registry` - The events to handle
    /// * `services` - Outbound services the handlers call
    /// * `timings` - Case deadlines
    /// * `clock` - Source of the current time
    /// * `allowed_services` - S2S service names allowed to call back
    #[must_use]
    pub fn new(
        registry: EventRegistry,
        services: Services,
        timings: CaseTimings,
        clock: Arc<dyn Clock>,
        allowed_services: Vec<String>,
    ) -> Self {
        Self {
            registry,
            services,
            timings,
            clock,
            allowed_services,
        }
    }

    /// The registered events.
    #[must_use]
    pub const fn registry(&self) -> &EventRegistry {
        &self.registry
    }

    /// Handles one callback.
    ///
    /// # Arguments
    ///
    /// * `phase` - The lifecycle point of the callback
    /// * `credentials` - Tokens from the request headers
    /// * `request` - The callback body
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` if authentication or authorization fails, the
    /// event is unknown, the case cannot be read or a handler fails.
    /// Validation failures are not errors: they are returned as `errors`
    /// on the response.
    pub async fn handle(
        &self,
        phase: &CallbackPhase,
        credentials: &Credentials,
        request: CallbackRequest,
    ) -> Result<CallbackResponse, ApiError> {
        let span = info_span!(
            "callback",
            event_id = %request.event_id,
            case_id = ?request.case_details.id,
            phase = %phase,
        );
        self.dispatch(phase, credentials, request)
            .instrument(span)
            .await
    }

    async fn dispatch(
        &self,
        phase: &CallbackPhase,
        credentials: &Credentials,
        request: CallbackRequest,
    ) -> Result<CallbackResponse, ApiError> {
        self.authenticate_service(credentials).await?;
        let auth_token: &str = required_token(credentials.authorization.as_deref(), "Authorization")?;
        let user: UserDetails = self
            .services
            .idam
            .user_details(auth_token)
            .await
            .map_err(translate_auth_error)?;

        let event: Arc<dyn CcdEvent> =
            self.registry
                .get(&request.event_id)
                .ok_or_else(|| ApiError::ResourceNotFound {
                    resource_type: String::from("Event"),
                    message: format!("No event with id '{}'", request.event_id),
                })?;
        authorize(event.definition(), &user)?;

        let details: CaseDetails = read_case(request.case_details)?;
        let before: Option<CaseDetails> = request
            .case_details_before
            .map(read_case)
            .transpose()?;

        let ctx: EventContext<'_> = EventContext::new(
            &self.services,
            &user,
            auth_token,
            self.clock.now(),
            &self.timings,
        );

        let response: CallbackResponse = match phase {
            CallbackPhase::AboutToStart => {
                let outcome: CallbackOutcome = event
                    .about_to_start(&ctx, details)
                    .await
                    .map_err(translate_core_error)?;
                render(outcome)?
            }
            CallbackPhase::MidEvent(page) => {
                let outcome: CallbackOutcome = event
                    .mid_event(&ctx, page, details, before.as_ref())
                    .await
                    .map_err(translate_core_error)?;
                render(outcome)?
            }
            CallbackPhase::AboutToSubmit => {
                let outcome: CallbackOutcome = event
                    .about_to_submit(&ctx, details, before.as_ref())
                    .await
                    .map_err(translate_core_error)?;
                render(outcome)?
            }
            CallbackPhase::Submitted => {
                let outcome: SubmittedOutcome = event
                    .submitted(&ctx, &details, before.as_ref())
                    .await
                    .map_err(translate_core_error)?;
                CallbackResponse::Submitted(SubmittedCallbackResponse::from(outcome))
            }
        };

        info!(user_id = %user.id, "Callback handled");
        Ok(response)
    }

    /// Checks the S2S token and that its service may call back.
    async fn authenticate_service(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let service_token: &str = required_token(
            credentials.service_authorization.as_deref(),
            "ServiceAuthorization",
        )?;
        let service_name: String = self
            .services
            .service_auth
            .service_name(service_token)
            .await
            .map_err(translate_auth_error)?;

        if self.allowed_services.iter().any(|allowed| *allowed == service_name) {
            Ok(())
        } else {
            warn!(service = %service_name, "Callback from a service not on the allow-list");
            Err(ApiError::Unauthorized {
                action: String::from("callback"),
                required: format!("an allowed service, not '{service_name}'"),
            })
        }
    }
}

fn required_token<'a>(token: Option<&'a str>, header: &str) -> Result<&'a str, ApiError> {
    token
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::AuthenticationFailed {
            reason: format!("Missing {header} header"),
        })
}

/// Checks the user holds a role that may create the event.
fn authorize(definition: &EventDefinition, user: &UserDetails) -> Result<(), ApiError> {
    let roles: Vec<UserRole> = user.user_roles();
    if definition.can_trigger(&roles) {
        return Ok(());
    }
    warn!(user_id = %user.id, roles = ?user.roles, "User may not trigger event");
    let granted: Vec<&str> = definition
        .grants
        .iter()
        .filter(|(_, permissions)| permissions.create)
        .map(|(role, _)| role.as_str())
        .collect();
    Err(ApiError::Unauthorized {
        action: format!("trigger event '{}'", definition.id),
        required: format!("one of the roles [{}]", granted.join(", ")),
    })
}

fn read_case(dto: CaseDetailsDto) -> Result<CaseDetails, ApiError> {
    dto.into_case_details().map_err(translate_domain_error)
}

fn render(outcome: CallbackOutcome) -> Result<CallbackResponse, ApiError> {
    AboutToStartOrSubmitResponse::from_outcome(outcome)
        .map(CallbackResponse::AboutToStartOrSubmit)
        .map_err(translate_domain_error)
}
