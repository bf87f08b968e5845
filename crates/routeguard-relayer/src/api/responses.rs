use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use routeguard_types::{ReportRecord, RouteGuardError, REGARDS_DECIMALS};
use serde::Serialize;
use tracing::{error, warn};

use crate::config::RelayMode;

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Handler error rendered as `{"error": reason}` with a status derived from the kind.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    reason: String,
}

impl ApiError {
    pub fn new(status: StatusCode, reason: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
        }
    }

    pub fn too_many_requests(reason: &str) -> Self {
        Self::new(StatusCode::TOO_MANY_REQUESTS, reason)
    }

    pub fn not_found(reason: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, reason)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

pub fn status_for(err: &RouteGuardError) -> StatusCode {
    match err {
        RouteGuardError::Validation(_)
        | RouteGuardError::InvalidInput(_)
        | RouteGuardError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        RouteGuardError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        RouteGuardError::RelayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<RouteGuardError> for ApiError {
    fn from(err: RouteGuardError) -> Self {
        let status = status_for(&err);
        if status.is_server_error() {
            error!("[Relayer] Error: {}", err);
        } else {
            warn!("Rejected request: {}", err);
        }
        Self::new(status, err.reason())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.reason })).into_response()
    }
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub healthy: bool,
    pub mode: RelayMode,
    pub version: &'static str,
    pub uptime_secs: u64,
}

#[derive(Serialize)]
pub struct ReportCountResponse {
    pub count: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub report_id: u64,
    pub commitment: String,
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_scaled: i64,
    pub longitude_scaled: i64,
    pub event_type: u8,
    pub event_name: &'static str,
    pub status: String,
    pub submitted_at: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at_iso: Option<String>,
    pub confirmations: u32,
    pub regards: String,
    pub regards_formatted: String,
}

impl From<ReportRecord> for ReportResponse {
    fn from(report: ReportRecord) -> Self {
        Self {
            report_id: report.report_id,
            commitment: report.commitment.to_hex(),
            latitude: report.latitude_degrees(),
            longitude: report.longitude_degrees(),
            latitude_scaled: report.latitude,
            longitude_scaled: report.longitude,
            event_type: report.event_type.ordinal(),
            event_name: report.event_type.label(),
            status: report.status.to_string(),
            submitted_at: report.submitted_at,
            submitted_at_iso: report.submitted_at_utc().map(|t| t.to_rfc3339()),
            confirmations: report.confirmations,
            regards: report.regards.to_string(),
            regards_formatted: format_regards(report.regards),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingRewardsResponse {
    pub commitment: String,
    pub amount: String,
    pub amount_formatted: String,
}

#[derive(Serialize)]
pub struct NullifierResponse {
    pub nullifier: String,
    pub used: bool,
}

/// Base units to a decimal string with trailing zeros trimmed, e.g. `1.5`.
pub fn format_regards(amount: u128) -> String {
    let scale = 10u128.pow(REGARDS_DECIMALS as u32);
    let whole = amount / scale;
    let frac = amount % scale;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:0width$}", frac, width = REGARDS_DECIMALS as usize);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}
