// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use nfdiv_domain::{
    ApplicationType, CaseData, CaseDetails, CaseTimings, Document, Fee, Gender,
    JurisdictionConnection, LanguagePreference, Organisation, State, UserRole, YesOrNo,
};
use nfdiv_notification::{
    CommonContent, EmailNotification, EmailTemplateName, NotificationClient,
    NotificationDispatcher, NotificationError, TemplateRegistry,
};

use crate::ports::{
    CreditAccountPayment, DocumentGenerator, DocumentRequest, DocumentStore, FeeLookup, FeeQuery,
    IdamLookup, OrganisationLookup, PaymentOutcome, PaymentService, ServiceAuthLookup,
    UserDetails,
};
use crate::{CallbackOutcome, CcdEvent, CoreError, EventContext, EventRegistry, Services};

pub const CASE_ID: u64 = 1_616_591_401_473_378;
pub const AUTH_TOKEN: &str = "Bearer user-token";
pub const APPLICANT2_USER_ID: &str = "applicant-2-id";

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn now() -> NaiveDateTime {
    date(2024, 6, 1).and_hms_opt(9, 15, 0).unwrap()
}

pub fn today() -> NaiveDate {
    now().date()
}

pub fn create_test_fee(code: &str, amount: &str) -> Fee {
    Fee {
        amount: amount.to_string(),
        code: code.to_string(),
        description: String::from("Application fee"),
        version: String::from("1"),
    }
}

/// In-memory stand-in for every downstream service.
pub struct FakeServices {
    pub fee: Fee,
    pub payment_outcome: PaymentOutcome,
    pub fail_documents: bool,
    pub deleted_documents: Mutex<Vec<String>>,
    pub payments: Mutex<Vec<CreditAccountPayment>>,
    pub rendered: Mutex<Vec<DocumentRequest>>,
    pub fee_queries: Mutex<Vec<FeeQuery>>,
}

impl Default for FakeServices {
    fn default() -> Self {
        Self {
            fee: create_test_fee("FEE0002", "59300"),
            payment_outcome: PaymentOutcome::Success {
                reference: String::from("RC-1234-5678"),
            },
            fail_documents: false,
            deleted_documents: Mutex::new(Vec::new()),
            payments: Mutex::new(Vec::new()),
            rendered: Mutex::new(Vec::new()),
            fee_queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl IdamLookup for FakeServices {
    async fn user_details(&self, _auth_token: &str) -> Result<UserDetails, CoreError> {
        Ok(UserDetails::default())
    }
}

#[async_trait]
impl ServiceAuthLookup for FakeServices {
    async fn service_name(&self, _service_token: &str) -> Result<String, CoreError> {
        Ok(String::from("ccd_data"))
    }
}

#[async_trait]
impl FeeLookup for FakeServices {
    async fn lookup_fee(&self, query: &FeeQuery) -> Result<Fee, CoreError> {
        self.fee_queries.lock().unwrap().push(query.clone());
        Ok(self.fee.clone())
    }
}

#[async_trait]
impl PaymentService for FakeServices {
    async fn credit_account_payment(
        &self,
        _auth_token: &str,
        payment: &CreditAccountPayment,
    ) -> Result<PaymentOutcome, CoreError> {
        self.payments.lock().unwrap().push(payment.clone());
        Ok(self.payment_outcome.clone())
    }
}

#[async_trait]
impl DocumentGenerator for FakeServices {
    async fn render(
        &self,
        _auth_token: &str,
        request: &DocumentRequest,
    ) -> Result<Document, CoreError> {
        if self.fail_documents {
            return Err(CoreError::Downstream {
                service: "doc-assembly",
                status: Some(500),
                message: String::from("rendering failed"),
            });
        }
        self.rendered.lock().unwrap().push(request.clone());
        Ok(Document {
            document_url: String::from("http://dm-store/documents/rendered-1"),
            document_filename: format!("{}.pdf", request.file_name),
            document_binary_url: String::from("http://dm-store/documents/rendered-1/binary"),
        })
    }
}

#[async_trait]
impl DocumentStore for FakeServices {
    async fn delete_document(&self, _auth_token: &str, document_id: &str) -> Result<(), CoreError> {
        self.deleted_documents
            .lock()
            .unwrap()
            .push(document_id.to_string());
        Ok(())
    }
}

#[async_trait]
impl OrganisationLookup for FakeServices {
    async fn user_organisation(&self, _auth_token: &str) -> Result<Organisation, CoreError> {
        Ok(Organisation {
            organisation_id: Some(String::from("ORG-1")),
            organisation_name: Some(String::from("Firm LLP")),
        })
    }
}

/// Records every email instead of sending it.
#[derive(Default)]
pub struct RecordingClient {
    pub sent: Mutex<Vec<EmailNotification>>,
}

#[async_trait]
impl NotificationClient for RecordingClient {
    async fn send_email(
        &self,
        notification: &EmailNotification,
    ) -> Result<String, NotificationError> {
        self.sent.lock().unwrap().push(notification.clone());
        Ok(String::from("notification-1"))
    }
}

/// Everything needed to run an event handler.
pub struct Harness {
    pub fakes: Arc<FakeServices>,
    pub emails: Arc<RecordingClient>,
    pub services: Services,
    pub user: UserDetails,
    pub timings: CaseTimings,
    pub registry: EventRegistry,
}

impl Harness {
    pub fn new(roles: &[UserRole]) -> Self {
        Self::with_fakes(FakeServices::default(), roles)
    }

    pub fn with_fakes(fakes: FakeServices, roles: &[UserRole]) -> Self {
        let fakes: Arc<FakeServices> = Arc::new(fakes);
        let emails: Arc<RecordingClient> = Arc::new(RecordingClient::default());
        let mut registry: TemplateRegistry = TemplateRegistry::default();
        for template in EmailTemplateName::ALL {
            registry.insert(
                LanguagePreference::English,
                template,
                format!("template-{template}"),
            );
        }
        let services: Services = Services {
            idam: fakes.clone(),
            service_auth: fakes.clone(),
            fees: fakes.clone(),
            payments: fakes.clone(),
            documents: fakes.clone(),
            document_store: fakes.clone(),
            organisations: fakes.clone(),
            notifications: NotificationDispatcher::new(emails.clone(), registry),
            content: CommonContent::new(
                String::from("https://divorce.example/login"),
                String::from("https://dissolution.example/login"),
            ),
        };
        Self {
            fakes,
            emails,
            services,
            user: UserDetails {
                id: String::from("user-1"),
                email: String::from("user@example.com"),
                forename: String::from("Case"),
                surname: String::from("Worker"),
                roles: roles.iter().map(|role| role.as_str().to_string()).collect(),
            },
            timings: CaseTimings::default(),
            registry: EventRegistry::standard(),
        }
    }

    /// Switches the signed-in user to applicant 2.
    pub fn as_applicant2(mut self) -> Self {
        self.user.id = APPLICANT2_USER_ID.to_string();
        self
    }

    pub fn context(&self) -> EventContext<'_> {
        EventContext::new(&self.services, &self.user, AUTH_TOKEN, now(), &self.timings)
    }

    pub fn event(&self, event_id: &str) -> Arc<dyn CcdEvent> {
        self.registry.get(event_id).unwrap()
    }

    pub async fn about_to_start(&self, event_id: &str, details: CaseDetails) -> CallbackOutcome {
        self.event(event_id)
            .about_to_start(&self.context(), details)
            .await
            .unwrap()
    }

    pub async fn mid_event(
        &self,
        event_id: &str,
        page: &str,
        details: CaseDetails,
    ) -> CallbackOutcome {
        self.event(event_id)
            .mid_event(&self.context(), page, details, None)
            .await
            .unwrap()
    }

    pub async fn about_to_submit(&self, event_id: &str, details: CaseDetails) -> CallbackOutcome {
        self.try_about_to_submit(event_id, details, None)
            .await
            .unwrap()
    }

    pub async fn try_about_to_submit(
        &self,
        event_id: &str,
        details: CaseDetails,
        before: Option<&CaseDetails>,
    ) -> Result<CallbackOutcome, CoreError> {
        self.event(event_id)
            .about_to_submit(&self.context(), details, before)
            .await
    }

    /// Templates and recipients of every email sent so far.
    pub fn sent(&self) -> Vec<(EmailTemplateName, String)> {
        self.emails
            .sent
            .lock()
            .unwrap()
            .iter()
            .map(|email| (email.template, email.recipient.clone()))
            .collect()
    }

    pub fn sent_email(&self, template: EmailTemplateName) -> EmailNotification {
        self.emails
            .sent
            .lock()
            .unwrap()
            .iter()
            .find(|email| email.template == template)
            .cloned()
            .unwrap()
    }
}

pub fn create_test_case() -> CaseData {
    let mut case_data: CaseData = CaseData::default();
    case_data.application_type = ApplicationType::SoleApplication;
    for (applicant, name, gender) in [
        (&mut case_data.applicant1, "Alex", Gender::Female),
        (&mut case_data.applicant2, "Sam", Gender::Male),
    ] {
        applicant.first_name = Some(name.to_string());
        applicant.last_name = Some(String::from("Smith"));
        applicant.email = Some(format!("{}@example.com", name.to_lowercase()));
        applicant.gender = Some(gender);
        applicant.language_preference_welsh = Some(YesOrNo::No);
    }
    let application = &mut case_data.application;
    application.applicant1_statement_of_truth = Some(YesOrNo::Yes);
    application.applicant1_prayer_has_been_given_checkbox = vec![YesOrNo::Yes];
    application.applicant1_screen_has_marriage_broken = Some(YesOrNo::Yes);
    application.marriage_details.applicant1_name = Some(String::from("Alex Smith"));
    application.marriage_details.applicant2_name = Some(String::from("Sam Smith"));
    application.marriage_details.date = Some(date(2010, 5, 1));
    application.marriage_details.place_of_marriage = Some(String::from("Cardiff"));
    application.jurisdiction.connections = vec![JurisdictionConnection::A];
    application.applicant1_knows_applicant2_address = Some(YesOrNo::No);
    case_data
}

/// A joint case with applicant 2 linked and their answers complete.
pub fn create_joint_case() -> CaseData {
    let mut case_data: CaseData = create_test_case();
    case_data.application_type = ApplicationType::JointApplication;
    case_data.case_invite.applicant2_user_id = Some(APPLICANT2_USER_ID.to_string());
    let application = &mut case_data.application;
    application.applicant2_confirm_applicant1_information = Some(YesOrNo::Yes);
    application.applicant2_screen_has_marriage_broken = Some(YesOrNo::Yes);
    application.applicant2_statement_of_truth = Some(YesOrNo::Yes);
    application.applicant2_prayer_has_been_given_checkbox = vec![YesOrNo::Yes];
    case_data
}

pub fn details(data: CaseData, state: State) -> CaseDetails {
    CaseDetails {
        id: Some(CASE_ID),
        state: Some(state),
        data,
        created_date: None,
        last_modified: None,
    }
}
