// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod config;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::{Parser, Subcommand};
use nfdiv::EventRegistry;
use nfdiv_api::{
    ApiError, CallbackPhase, CallbackRequest, CallbackResponse, CallbackService, Credentials,
    definitions,
};
use nfdiv_clients::{ClientConfig, HmctsClients};
use nfdiv_domain::{CaseTimings, SystemClock};
use nfdiv_notification::{EmailTemplateName, TemplateRegistry};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::config::ServerConfig;

/// Callback server for no-fault divorce and dissolution cases.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind the server to
    #[arg(short, long, default_value = "0.0.0.0")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 4013)]
    port: u16,

    /// TOML file of GOV.UK Notify template ids
    #[arg(short, long)]
    templates: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Writes the case definition JSON sheets and exits
    ExportDefinitions {
        /// Directory to write the sheets to
        dir: PathBuf,

        /// Base URL the platform should call back on
        #[arg(long, default_value = "http://nfdiv-case-api:4013")]
        callback_base: String,
    },
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// Dispatches callbacks to the event handlers.
    callbacks: Arc<CallbackService>,
}

/// Query of the mid-event endpoint.
#[derive(Debug, Clone, Deserialize)]
struct MidEventQuery {
    /// The page the user is leaving.
    page: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Downstream { status, .. } => match status {
                Some(401) => StatusCode::UNAUTHORIZED,
                Some(403) => StatusCode::FORBIDDEN,
                Some(404) => StatusCode::NOT_FOUND,
                _ => StatusCode::BAD_GATEWAY,
            },
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(status = %status, error = %err, "Callback failed");
        } else {
            warn!(status = %status, error = %err, "Callback refused");
        }
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Reads the user and service tokens from the request headers.
fn credentials(headers: &HeaderMap) -> Credentials {
    let header = |name: &str| -> Option<String> {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(String::from)
    };
    Credentials {
        authorization: header("Authorization"),
        service_authorization: header("ServiceAuthorization"),
    }
}

async fn run_callback(
    app_state: &AppState,
    phase: &CallbackPhase,
    headers: &HeaderMap,
    request: CallbackRequest,
) -> Result<Json<CallbackResponse>, HttpError> {
    let response: CallbackResponse = app_state
        .callbacks
        .handle(phase, &credentials(headers), request)
        .await?;
    Ok(Json(response))
}

/// Handler for POST `/callbacks/about-to-start`.
async fn handle_about_to_start(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(request): Json<CallbackRequest>,
) -> Result<Json<CallbackResponse>, HttpError> {
    run_callback(&app_state, &CallbackPhase::AboutToStart, &headers, request).await
}

/// Handler for POST `/callbacks/mid-event?page=`.
async fn handle_mid_event(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<MidEventQuery>,
    headers: HeaderMap,
    Json(request): Json<CallbackRequest>,
) -> Result<Json<CallbackResponse>, HttpError> {
    run_callback(
        &app_state,
        &CallbackPhase::MidEvent(query.page),
        &headers,
        request,
    )
    .await
}

/// Handler for POST `/callbacks/about-to-submit`.
async fn handle_about_to_submit(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(request): Json<CallbackRequest>,
) -> Result<Json<CallbackResponse>, HttpError> {
    run_callback(&app_state, &CallbackPhase::AboutToSubmit, &headers, request).await
}

/// Handler for POST `/callbacks/submitted`.
async fn handle_submitted(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(request): Json<CallbackRequest>,
) -> Result<Json<CallbackResponse>, HttpError> {
    run_callback(&app_state, &CallbackPhase::Submitted, &headers, request).await
}

/// Handler for GET `/health`.
async fn handle_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "UP" }))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/callbacks/about-to-start", post(handle_about_to_start))
        .route("/callbacks/mid-event", post(handle_mid_event))
        .route("/callbacks/about-to-submit", post(handle_about_to_submit))
        .route("/callbacks/submitted", post(handle_submitted))
        .route("/health", get(handle_health))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Writes every definition sheet to `dir` as `<sheet>.json`.
fn export_definitions(dir: &Path, callback_base: &str) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(dir)?;
    let exported: definitions::CaseDefinition =
        definitions::export(&EventRegistry::standard(), callback_base);
    for (name, document) in exported.documents()? {
        let path: PathBuf = dir.join(format!("{name}.json"));
        std::fs::write(&path, document)?;
        info!("Wrote {}", path.display());
    }
    Ok(())
}

/// Loads the Notify template ids, warning about any left unconfigured.
fn load_templates(path: Option<&Path>) -> Result<TemplateRegistry, Box<dyn std::error::Error>> {
    let templates: TemplateRegistry = match path {
        Some(path) => {
            info!("Loading email templates from {}", path.display());
            TemplateRegistry::load(path)?
        }
        None => {
            warn!("No email templates configured; notifications will be skipped");
            TemplateRegistry::default()
        }
    };
    let missing: Vec<EmailTemplateName> = templates.missing_templates();
    if !missing.is_empty() {
        warn!(missing = ?missing, "Email templates without an English id");
    }
    Ok(templates)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Some(Command::ExportDefinitions { dir, callback_base }) = &args.command {
        return export_definitions(dir, callback_base);
    }

    info!("Initializing no-fault divorce case API");

    let server_config: ServerConfig = ServerConfig::from_env();
    let client_config: ClientConfig = ClientConfig::from_env()?;
    let timings: CaseTimings = CaseTimings::from_env()?;
    let templates: TemplateRegistry = load_templates(args.templates.as_deref())?;

    let clients: HmctsClients = HmctsClients::new(&client_config)?;
    let registry: EventRegistry = EventRegistry::standard();
    info!(
        events = registry.len(),
        authorised_services = ?server_config.authorised_services,
        "Registered case events"
    );

    let callbacks: CallbackService = CallbackService::new(
        registry,
        clients.services(templates, server_config.common_content()),
        timings,
        Arc::new(SystemClock),
        server_config.authorised_services,
    );
    let app: Router = build_router(AppState {
        callbacks: Arc::new(callbacks),
    });

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
