// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use nfdiv::ports::{
    CreditAccountPayment, DocumentGenerator, DocumentRequest, DocumentStore, FeeLookup, FeeQuery,
    IdamLookup, OrganisationLookup, PaymentOutcome, PaymentService, ServiceAuthLookup,
};
use nfdiv::{CoreError, EventRegistry, Services, UserDetails};
use nfdiv_domain::{
    CaseTimings, Document, Fee, FixedClock, LanguagePreference, Organisation, UserRole,
};
use nfdiv_notification::{
    CommonContent, EmailNotification, EmailTemplateName, NotificationClient,
    NotificationDispatcher, NotificationError, TemplateRegistry,
};
use serde_json::{Map, Value, json};

use crate::{CallbackRequest, CallbackService, CaseDetailsDto, Credentials};

pub const CASE_ID: u64 = 1_616_591_401_473_378;
pub const CCD_SERVICE_TOKEN: &str = "Bearer s2s-ccd";
pub const OTHER_SERVICE_TOKEN: &str = "Bearer s2s-other";
pub const CASEWORKER_TOKEN: &str = "Bearer caseworker-token";
pub const SOLICITOR_TOKEN: &str = "Bearer solicitor-token";
pub const CITIZEN_TOKEN: &str = "Bearer citizen-token";

pub fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(9, 15, 0)
        .unwrap()
}

fn user(id: &str, forename: &str, role: UserRole) -> UserDetails {
    UserDetails {
        id: id.to_string(),
        email: format!("{id}@example.com"),
        forename: forename.to_string(),
        surname: String::from("Tester"),
        roles: vec![role.as_str().to_string()],
    }
}

/// Identity and downstream stand-ins keyed by token.
pub struct FakeHmcts {
    pub users: HashMap<&'static str, UserDetails>,
    pub services: HashMap<&'static str, &'static str>,
    pub idam_down: bool,
    pub fee_queries: Mutex<Vec<FeeQuery>>,
}

impl Default for FakeHmcts {
    fn default() -> Self {
        Self {
            users: HashMap::from([
                (
                    CASEWORKER_TOKEN,
                    user("caseworker-1", "Case", UserRole::CaseWorker),
                ),
                (
                    SOLICITOR_TOKEN,
                    user("solicitor-1", "Sol", UserRole::Solicitor),
                ),
                (CITIZEN_TOKEN, user("citizen-1", "Alex", UserRole::Citizen)),
            ]),
            services: HashMap::from([
                (CCD_SERVICE_TOKEN, "ccd_data"),
                (OTHER_SERVICE_TOKEN, "other_service"),
            ]),
            idam_down: false,
            fee_queries: Mutex::new(Vec::new()),
        }
    }
}

fn rejected(service: &'static str) -> CoreError {
    CoreError::Downstream {
        service,
        status: Some(401),
        message: String::from("token not recognised"),
    }
}

#[async_trait]
impl IdamLookup for FakeHmcts {
    async fn user_details(&self, auth_token: &str) -> Result<UserDetails, CoreError> {
        if self.idam_down {
            return Err(CoreError::Downstream {
                service: "idam",
                status: Some(503),
                message: String::from("unavailable"),
            });
        }
        self.users
            .get(auth_token)
            .cloned()
            .ok_or_else(|| rejected("idam"))
    }
}

#[async_trait]
impl ServiceAuthLookup for FakeHmcts {
    async fn service_name(&self, service_token: &str) -> Result<String, CoreError> {
        self.services
            .get(service_token)
            .map(|name| (*name).to_string())
            .ok_or_else(|| rejected("s2s"))
    }
}

#[async_trait]
impl FeeLookup for FakeHmcts {
    async fn lookup_fee(&self, query: &FeeQuery) -> Result<Fee, CoreError> {
        self.fee_queries.lock().unwrap().push(query.clone());
        Ok(Fee {
            amount: String::from("59300"),
            code: String::from("FEE0002"),
            description: String::from("Application fee"),
            version: String::from("1"),
        })
    }
}

#[async_trait]
impl PaymentService for FakeHmcts {
    async fn credit_account_payment(
        &self,
        _auth_token: &str,
        _payment: &CreditAccountPayment,
    ) -> Result<PaymentOutcome, CoreError> {
        Ok(PaymentOutcome::Success {
            reference: String::from("RC-1234-5678"),
        })
    }
}

#[async_trait]
impl DocumentGenerator for FakeHmcts {
    async fn render(
        &self,
        _auth_token: &str,
        request: &DocumentRequest,
    ) -> Result<Document, CoreError> {
        Ok(Document {
            document_url: String::from("http://dm-store/documents/rendered-1"),
            document_filename: format!("{}.pdf", request.file_name),
            document_binary_url: String::from("http://dm-store/documents/rendered-1/binary"),
        })
    }
}

#[async_trait]
impl DocumentStore for FakeHmcts {
    async fn delete_document(
        &self,
        _auth_token: &str,
        _document_id: &str,
    ) -> Result<(), CoreError> {
        Ok(())
    }
}

#[async_trait]
impl OrganisationLookup for FakeHmcts {
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

pub fn create_test_services(fakes: &Arc<FakeHmcts>, emails: &Arc<RecordingClient>) -> Services {
    let mut templates: TemplateRegistry = TemplateRegistry::default();
    for template in EmailTemplateName::ALL {
        templates.insert(
            LanguagePreference::English,
            template,
            format!("template-{template}"),
        );
    }
    Services {
        idam: fakes.clone(),
        service_auth: fakes.clone(),
        fees: fakes.clone(),
        payments: fakes.clone(),
        documents: fakes.clone(),
        document_store: fakes.clone(),
        organisations: fakes.clone(),
        notifications: NotificationDispatcher::new(emails.clone(), templates),
        content: CommonContent::new(
            String::from("https://divorce.example/login"),
            String::from("https://dissolution.example/login"),
        ),
    }
}

/// A callback service over fakes, with the fakes kept for assertions.
pub struct TestService {
    pub service: CallbackService,
    pub fakes: Arc<FakeHmcts>,
    pub emails: Arc<RecordingClient>,
}

pub fn create_test_service() -> TestService {
    create_test_service_with(FakeHmcts::default())
}

pub fn create_test_service_with(fakes: FakeHmcts) -> TestService {
    let fakes: Arc<FakeHmcts> = Arc::new(fakes);
    let emails: Arc<RecordingClient> = Arc::new(RecordingClient::default());
    let service: CallbackService = CallbackService::new(
        EventRegistry::standard(),
        create_test_services(&fakes, &emails),
        CaseTimings::default(),
        Arc::new(FixedClock(now())),
        vec![String::from("ccd_data")],
    );
    TestService {
        service,
        fakes,
        emails,
    }
}

pub fn credentials(user_token: &str) -> Credentials {
    Credentials {
        authorization: Some(user_token.to_string()),
        service_authorization: Some(CCD_SERVICE_TOKEN.to_string()),
    }
}

pub fn case_data(value: &Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

pub fn create_test_request(event_id: &str, state: &str, data: &Value) -> CallbackRequest {
    CallbackRequest {
        event_id: event_id.to_string(),
        case_details: CaseDetailsDto {
            id: Some(CASE_ID),
            jurisdiction: Some(String::from("DIVORCE")),
            case_type_id: Some(String::from("NFD")),
            state: Some(state.to_string()),
            case_data: case_data(data),
            ..CaseDetailsDto::default()
        },
        case_details_before: None,
        ignore_warning: false,
    }
}

pub fn sole_application() -> Value {
    json!({
        "applicationType": "soleApplication",
        "divorceOrDissolution": "divorce",
        "applicant1FirstName": "Alex",
        "applicant1LastName": "Smith",
        "applicant1Email": "alex@example.com",
    })
}
