// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use nfdiv_domain::DomainError;

/// Errors that stop an event callback from producing a response.
///
/// Problems a user can correct are returned as messages on the
/// callback outcome instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Case data could not be read or a domain calculation failed.
    Domain(DomainError),
    /// A downstream service returned an error.
    Downstream {
        /// The service that failed, e.g. `idam`.
        service: &'static str,
        /// HTTP status returned, if any.
        status: Option<u16>,
        /// What went wrong.
        message: String,
    },
    /// No event is registered with this id.
    UnknownEvent(String),
    /// An unexpected internal failure.
    Internal {
        /// What went wrong.
        message: String,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Domain(err) => write!(f, "Domain error: {err}"),
            Self::Downstream {
                service,
                status: Some(status),
                message,
            } => write!(f, "{service} returned {status}: {message}"),
            Self::Downstream {
                service,
                status: None,
                message,
            } => write!(f, "{service} request failed: {message}"),
            Self::UnknownEvent(event_id) => write!(f, "Unknown event '{event_id}'"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}
