use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Path, State};
use axum::Json;
use routeguard_types::{FieldElement, RouteGuardError};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Instant;

use super::responses::*;
use crate::relay::{
    RawClaimRequest, RawSubmitRequest, RelayDispatcher, RelayResponse, RelayStatusResponse,
};

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<RelayDispatcher>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(dispatcher: RelayDispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            started_at: Instant::now(),
        }
    }
}

/// Bodies are read raw so oversized or malformed JSON still gets the
/// `{error}` shape. The size cap is `DefaultBodyLimit`, applied while buffering.
fn parse_body<T: DeserializeOwned>(body: Result<Bytes, BytesRejection>) -> Result<T, ApiError> {
    let body = body.map_err(|rejection| ApiError::new(rejection.status(), rejection.body_text()))?;
    serde_json::from_slice(&body).map_err(|e| {
        ApiError::from(RouteGuardError::Validation(format!("Invalid JSON body: {}", e)))
    })
}

fn parse_field(name: &str, raw: &str) -> Result<FieldElement, ApiError> {
    FieldElement::parse(raw).map_err(|e| {
        ApiError::from(RouteGuardError::Validation(format!("Invalid {}: {}", name, e.reason())))
    })
}

pub async fn submit_report(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<RelayResponse> {
    let raw: RawSubmitRequest = parse_body(body)?;
    Ok(Json(state.dispatcher.submit(&raw).await?))
}

pub async fn relay_status(State(state): State<AppState>) -> Json<RelayStatusResponse> {
    Json(state.dispatcher.status())
}

pub async fn claim_rewards(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<RelayResponse> {
    let raw: RawClaimRequest = parse_body(body)?;
    Ok(Json(state.dispatcher.claim(&raw).await?))
}

pub async fn report_count(State(state): State<AppState>) -> ApiResult<ReportCountResponse> {
    let ledger = state.dispatcher.ledger()?;
    let count = ledger.get_report_count().await?;
    Ok(Json(ReportCountResponse { count }))
}

pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ReportResponse> {
    let report_id: u64 = id.parse().map_err(|_| {
        ApiError::from(RouteGuardError::Validation(format!("Invalid report id: {}", id)))
    })?;
    let ledger = state.dispatcher.ledger()?;
    let report = ledger.get_report(report_id).await?;
    Ok(Json(report.into()))
}

pub async fn pending_rewards(
    State(state): State<AppState>,
    Path(commitment): Path<String>,
) -> ApiResult<PendingRewardsResponse> {
    let commitment = parse_field("commitment", &commitment)?;
    let ledger = state.dispatcher.ledger()?;
    let amount = ledger.get_pending_rewards(&commitment).await?;
    Ok(Json(PendingRewardsResponse {
        commitment: commitment.to_hex(),
        amount: amount.to_string(),
        amount_formatted: format_regards(amount),
    }))
}

pub async fn nullifier_status(
    State(state): State<AppState>,
    Path(nullifier): Path<String>,
) -> ApiResult<NullifierResponse> {
    let nullifier = parse_field("nullifier", &nullifier)?;
    let ledger = state.dispatcher.ledger()?;
    let used = ledger.is_nullifier_used(&nullifier).await?;
    Ok(Json(NullifierResponse {
        nullifier: nullifier.to_hex(),
        used,
    }))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        healthy: true,
        mode: state.dispatcher.mode(),
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}

pub async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}
