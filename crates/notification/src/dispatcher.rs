// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use nfdiv_domain::LanguagePreference;
use tracing::{info, warn};

use crate::error::NotificationError;
use crate::template::{EmailTemplateName, TemplateRegistry};

/// One email ready to hand to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailNotification {
    /// Which email this is.
    pub template: EmailTemplateName,
    /// Provider template id.
    pub template_id: String,
    /// Recipient address.
    pub recipient: String,
    /// Template variables.
    pub personalisation: BTreeMap<String, String>,
    /// Reference stored with the email, usually the case id.
    pub reference: Option<String>,
}

/// Sends emails through a provider.
#[async_trait]
pub trait NotificationClient: Send + Sync {
    /// Sends one email, returning the provider's notification id.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::Delivery` if the provider fails.
    async fn send_email(&self, notification: &EmailNotification)
    -> Result<String, NotificationError>;
}

/// Resolves templates and sends emails without ever failing the caller.
#[derive(Clone)]
pub struct NotificationDispatcher {
    client: Arc<dyn NotificationClient>,
    registry: Arc<TemplateRegistry>,
}

impl std::fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationDispatcher")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl NotificationDispatcher {
    /// Creates a dispatcher.
    #[must_use]
    pub fn new(client: Arc<dyn NotificationClient>, registry: TemplateRegistry) -> Self {
        Self {
            client,
            registry: Arc::new(registry),
        }
    }

    /// The template registry in use.
    #[must_use]
    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Sends `template` to `recipient`.
    ///
    /// A blank recipient, a missing template id or a provider failure is
    /// logged and otherwise ignored. Returns whether the email was accepted.
    ///
    /// # Arguments
    ///
    /// * `template` - The email to send
    /// * `recipient` - Recipient address, if known
    /// * `language` - The recipient's language
    /// * `personalisation` - Template variables
    /// * `case_id` - Case the email is about
    pub async fn send(
        &self,
        template: EmailTemplateName,
        recipient: Option<&str>,
        language: LanguagePreference,
        personalisation: BTreeMap<String, String>,
        case_id: Option<u64>,
    ) -> bool {
        let Some(recipient) = recipient.map(str::trim).filter(|r| !r.is_empty()) else {
            info!(template = %template, case_id = ?case_id, "Skipping email with no recipient");
            return false;
        };

        let Some(template_id) = self.registry.template_id(language, template) else {
            let err: NotificationError = NotificationError::TemplateNotFound {
                template: template.to_string(),
                language: language.as_str().to_string(),
            };
            warn!(case_id = ?case_id, error = %err, "Email not sent");
            return false;
        };

        let notification: EmailNotification = EmailNotification {
            template,
            template_id: template_id.to_string(),
            recipient: recipient.to_string(),
            personalisation,
            reference: case_id.map(|id| id.to_string()),
        };

        match self.client.send_email(&notification).await {
            Ok(notification_id) => {
                info!(
                    template = %template,
                    case_id = ?case_id,
                    notification_id = %notification_id,
                    "Email sent"
                );
                true
            }
            Err(err) => {
                warn!(template = %template, case_id = ?case_id, error = %err, "Email not sent");
                false
            }
        }
    }
}
