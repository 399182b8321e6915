// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the callback boundary.

use nfdiv::CoreError;
use nfdiv_domain::DomainError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A token was missing or not recognised.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The caller is authenticated but may not do this.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// What the caller would need.
        required: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A downstream service failed.
    Downstream {
        /// The failing service.
        service: String,
        /// Status the service returned, if any.
        status: Option<u16>,
        /// What went wrong.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized { action, required } => {
                write!(f, "Unauthorized: '{action}' requires {required}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Downstream { message, .. } => {
                write!(f, "Downstream error: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidOption { field, value } => ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("'{value}' is not a valid option"),
        },
        DomainError::UnknownState(state) => ApiError::InvalidInput {
            field: String::from("state"),
            message: format!("'{state}' is not a state of this case type"),
        },
        DomainError::InvalidCaseReference(reference) => ApiError::InvalidInput {
            field: String::from("id"),
            message: format!("'{reference}' is not a valid case reference"),
        },
        DomainError::MalformedCaseData { message } => ApiError::InvalidInput {
            field: String::from("case_data"),
            message,
        },
        DomainError::MissingField { field } => ApiError::DomainRuleViolation {
            rule: String::from("required_field"),
            message: format!("{field} is required for this event"),
        },
        DomainError::DateArithmeticOverflow { operation } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Date arithmetic overflow while {operation}"),
        },
        DomainError::UnknownField(field) => ApiError::InvalidInput {
            message: format!("'{field}' is not a case field"),
            field,
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::Domain(domain_err) => translate_domain_error(domain_err),
        CoreError::Downstream {
            service,
            status,
            message,
        } => ApiError::Downstream {
            service: service.to_string(),
            status,
            message,
        },
        CoreError::UnknownEvent(event_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Event"),
            message: format!("No event with id '{event_id}'"),
        },
        CoreError::Internal { message } => ApiError::Internal { message },
    }
}

/// Translates a failed token lookup.
///
/// A token the identity service rejects is an authentication failure;
/// any other failure keeps its downstream meaning.
#[must_use]
pub fn translate_auth_error(err: CoreError) -> ApiError {
    match err {
        CoreError::Downstream {
            service,
            status: Some(401 | 403),
            message,
        } => ApiError::AuthenticationFailed {
            reason: format!("{service} rejected the token: {message}"),
        },
        other => translate_core_error(other),
    }
}
