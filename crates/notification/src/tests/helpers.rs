// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Mutex;

use async_trait::async_trait;
use nfdiv_domain::{Applicant, CaseData, Gender, YesOrNo};

use crate::{EmailNotification, NotificationClient, NotificationError};

/// Records every email instead of sending it.
#[derive(Default)]
pub struct RecordingClient {
    pub sent: Mutex<Vec<EmailNotification>>,
    pub fail: bool,
}

#[async_trait]
impl NotificationClient for RecordingClient {
    async fn send_email(
        &self,
        notification: &EmailNotification,
    ) -> Result<String, NotificationError> {
        if self.fail {
            return Err(NotificationError::Delivery {
                message: String::from("provider unavailable"),
            });
        }
        self.sent.lock().unwrap().push(notification.clone());
        Ok(String::from("notification-1"))
    }
}

pub const TEMPLATES: &str = r#"
[english]
sole_application_submitted = "english-submitted"
joint_applicant2_invite = "english-invite"

[welsh]
sole_application_submitted = "welsh-submitted"
"#;

pub fn create_test_applicant(first_name: &str, gender: Gender, welsh: bool) -> Applicant {
    Applicant {
        first_name: Some(first_name.to_string()),
        last_name: Some(String::from("Smith")),
        email: Some(format!("{}@example.com", first_name.to_lowercase())),
        gender: Some(gender),
        language_preference_welsh: Some(YesOrNo::from_bool(welsh)),
        ..Applicant::default()
    }
}

pub fn create_test_case() -> CaseData {
    let mut case_data: CaseData = CaseData::default();
    case_data.applicant1 = create_test_applicant("Alex", Gender::Female, false);
    case_data.applicant2 = create_test_applicant("Sam", Gender::Male, false);
    case_data
}
