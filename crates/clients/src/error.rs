// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use nfdiv::CoreError;
use nfdiv_notification::NotificationError;

use crate::config::ConfigError;

/// Errors raised while calling a downstream service.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request could not be sent or the connection failed.
    #[error("HTTP request to {endpoint} failed: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status.
    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// The response body was not the expected shape.
    #[error("failed to decode response from {endpoint}: {message}")]
    Deserialization { endpoint: String, message: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// The HTTP status the service returned, if it answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http { .. } | Self::Deserialization { .. } | Self::Config(_) => None,
        }
    }
}

/// Translates a client failure into the error the event handlers see.
///
/// The downstream status is kept so the callback boundary can answer
/// with it.
///
/// # Arguments
///
/// * `service` - Short name of the failing service, e.g. `fees`
/// * `err` - The client error
#[must_use]
pub fn translate_client_error(service: &'static str, err: &ClientError) -> CoreError {
    CoreError::Downstream {
        service,
        status: err.status(),
        message: err.to_string(),
    }
}

/// Translates a client failure into a notification delivery failure.
#[must_use]
pub fn translate_to_notification_error(err: &ClientError) -> NotificationError {
    NotificationError::Delivery {
        message: err.to_string(),
    }
}
