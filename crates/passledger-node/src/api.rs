//! HTTP API server for the Passledger node.
//!
//! Exposes the three registry operations plus health, status, and
//! passport reads. Caller identity arrives out-of-band in the
//! `x-caller-id` header, the way the original execution environment
//! supplied it; `?preview=true` selects the side-effect-free form of any
//! mutating route.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;

use passledger_core::{AccountId, CallContext, DocumentFingerprint};
use passledger_registry::RegistryError;

use crate::state::AppState;

/// Header carrying the caller's account identity.
pub const CALLER_HEADER: &str = "x-caller-id";

// --- Request / response types ---

#[derive(Deserialize)]
pub struct CallMode {
    /// Run the operation without committing any state change.
    #[serde(default)]
    pub preview: bool,
}

#[derive(Deserialize)]
pub struct InitPassportRequest {
    pub nickname: String,
}

#[derive(Serialize, Deserialize)]
pub struct InitPassportResponse {
    pub nickname: String,
    pub controller: String,
}

#[derive(Deserialize)]
pub struct AddDocumentRequest {
    pub fingerprint: String,
}

#[derive(Serialize, Deserialize)]
pub struct DocumentResponse {
    pub passport: String,
    pub fingerprint: String,
    pub trust_score: u64,
}

#[derive(Serialize)]
pub struct DocumentSummary {
    pub fingerprint: String,
    pub trust_score: u64,
    pub voter_count: usize,
}

#[derive(Serialize)]
pub struct PassportResponse {
    pub controller: String,
    pub nickname: String,
    pub created_at: String,
    pub documents: Vec<DocumentSummary>,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub version: String,
    pub uptime_secs: u64,
    pub passport_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

// --- Error mapping ---

fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
            kind: "BadRequest".into(),
        }),
    )
}

fn internal_error(message: impl Into<String>) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message.into(),
            kind: "Internal".into(),
        }),
    )
}

/// Map a rejected state transition onto an HTTP status, keeping the
/// variant name in the body so callers can assert on why it failed.
fn registry_error(err: RegistryError) -> ApiError {
    let status = match &err {
        RegistryError::PassportNotFound(_) | RegistryError::DocumentNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        RegistryError::NotController { .. } => StatusCode::FORBIDDEN,
        RegistryError::AlreadyInitialized(_)
        | RegistryError::DuplicateDocument(_)
        | RegistryError::AlreadyVoted { .. } => StatusCode::CONFLICT,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            kind: err.kind().into(),
        }),
    )
}

fn caller_context(headers: &HeaderMap) -> Result<CallContext, ApiError> {
    let value = headers
        .get(CALLER_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| bad_request(format!("missing {} header", CALLER_HEADER)))?;
    let caller = AccountId::new(value).map_err(|e| bad_request(e.to_string()))?;
    Ok(CallContext::new(caller))
}

fn parse_account(s: &str) -> Result<AccountId, ApiError> {
    AccountId::new(s).map_err(|e| bad_request(e.to_string()))
}

fn parse_fingerprint(s: &str) -> Result<DocumentFingerprint, ApiError> {
    DocumentFingerprint::from_hex(s).map_err(|e| bad_request(e.to_string()))
}

// --- Handlers ---

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
    })
}

async fn handle_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        passport_count: state.registry.passport_count(),
    })
}

async fn handle_get_passport(
    State(state): State<Arc<AppState>>,
    Path(account): Path<String>,
) -> Result<Json<PassportResponse>, ApiError> {
    let account = parse_account(&account)?;
    let passport = state
        .registry
        .passport(&account)
        .ok_or_else(|| registry_error(RegistryError::PassportNotFound(account.clone())))?;

    let mut documents: Vec<DocumentSummary> = passport
        .documents
        .values()
        .map(|record| DocumentSummary {
            fingerprint: record.fingerprint.to_hex(),
            trust_score: record.trust_score,
            voter_count: record.voters.len(),
        })
        .collect();
    documents.sort_by(|a, b| a.fingerprint.cmp(&b.fingerprint));

    Ok(Json(PassportResponse {
        controller: passport.controller.to_string(),
        nickname: passport.nickname.clone(),
        created_at: passport.created_at.to_rfc3339(),
        documents,
    }))
}

async fn handle_init_passport(
    State(state): State<Arc<AppState>>,
    Query(mode): Query<CallMode>,
    headers: HeaderMap,
    Json(req): Json<InitPassportRequest>,
) -> Result<Json<InitPassportResponse>, ApiError> {
    let ctx = caller_context(&headers)?;

    let (nickname, controller) = if mode.preview {
        state.registry.preview_init_passport(&ctx, &req.nickname)
    } else {
        state.registry.init_passport(&ctx, &req.nickname)
    }
    .map_err(registry_error)?;

    if !mode.preview {
        state
            .persist(&controller)
            .map_err(|e| internal_error(e.to_string()))?;
    }

    Ok(Json(InitPassportResponse {
        nickname,
        controller: controller.to_string(),
    }))
}

async fn handle_add_document(
    State(state): State<Arc<AppState>>,
    Path(account): Path<String>,
    Query(mode): Query<CallMode>,
    headers: HeaderMap,
    Json(req): Json<AddDocumentRequest>,
) -> Result<Json<DocumentResponse>, ApiError> {
    let ctx = caller_context(&headers)?;
    let passport_address = parse_account(&account)?;
    let fingerprint = parse_fingerprint(&req.fingerprint)?;

    let (passport, fingerprint, trust_score) = if mode.preview {
        state
            .registry
            .preview_add_id_file(&ctx, &passport_address, fingerprint)
    } else {
        state
            .registry
            .add_id_file(&ctx, &passport_address, fingerprint)
    }
    .map_err(registry_error)?;

    if !mode.preview {
        state
            .persist(&passport)
            .map_err(|e| internal_error(e.to_string()))?;
    }

    Ok(Json(DocumentResponse {
        passport: passport.to_string(),
        fingerprint: fingerprint.to_hex(),
        trust_score,
    }))
}

async fn handle_vote(
    State(state): State<Arc<AppState>>,
    Path((account, fingerprint)): Path<(String, String)>,
    Query(mode): Query<CallMode>,
    headers: HeaderMap,
) -> Result<Json<DocumentResponse>, ApiError> {
    let ctx = caller_context(&headers)?;
    let passport_address = parse_account(&account)?;
    let fingerprint = parse_fingerprint(&fingerprint)?;

    let (passport, fingerprint, trust_score) = if mode.preview {
        state
            .registry
            .preview_vote_for_doc(&ctx, &passport_address, fingerprint)
    } else {
        state
            .registry
            .vote_for_doc(&ctx, &passport_address, fingerprint)
    }
    .map_err(registry_error)?;

    if !mode.preview {
        state
            .persist(&passport)
            .map_err(|e| internal_error(e.to_string()))?;
    }

    Ok(Json(DocumentResponse {
        passport: passport.to_string(),
        fingerprint: fingerprint.to_hex(),
        trust_score,
    }))
}

// --- Server ---

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(handle_health))
        .route("/api/v1/status", get(handle_status))
        .route("/api/v1/passports", post(handle_init_passport))
        .route("/api/v1/passports/{account}", get(handle_get_passport))
        .route(
            "/api/v1/passports/{account}/documents",
            post(handle_add_document),
        )
        .route(
            "/api/v1/passports/{account}/documents/{fingerprint}/votes",
            post(handle_vote),
        )
        .with_state(state)
}

pub async fn start_api_server(listen_addr: SocketAddr, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    tracing::info!(%listen_addr, "HTTP API server started");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to listen for ctrl-c");
    tracing::info!("received shutdown signal");
}
