// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors raised while configuring or sending notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    /// No template id is configured for the template.
    TemplateNotFound {
        /// The template key.
        template: String,
        /// The language requested.
        language: String,
    },
    /// The template file could not be read or parsed.
    InvalidTemplateConfig {
        /// What went wrong.
        message: String,
    },
    /// The email provider rejected or failed the request.
    Delivery {
        /// What went wrong.
        message: String,
    },
}

impl std::fmt::Display for NotificationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TemplateNotFound { template, language } => {
                write!(f, "No {language} template configured for {template}")
            }
            Self::InvalidTemplateConfig { message } => {
                write!(f, "Invalid template configuration: {message}")
            }
            Self::Delivery { message } => write!(f, "Email delivery failed: {message}"),
        }
    }
}

impl std::error::Error for NotificationError {}
