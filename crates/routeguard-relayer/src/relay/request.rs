use crate::ledger::{ClaimSubmission, ReportSubmission};
use routeguard_crypto::{verify_nullifier, ClaimContext};
use routeguard_types::{
    scale_coordinate, EventType, FieldElement, RouteGuardError, RouteGuardResult,
};
use serde::Deserialize;
use serde_json::Value;

/// Submit body exactly as received. Fields stay untyped so a wrong JSON type
/// is a validation error with a readable reason rather than a decode failure.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSubmitRequest {
    pub commitment: Option<Value>,
    pub latitude: Option<Value>,
    pub longitude: Option<Value>,
    pub event_type: Option<Value>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedSubmit {
    pub latitude: f64,
    pub longitude: f64,
    pub submission: ReportSubmission,
}

impl RawSubmitRequest {
    pub fn validate(&self) -> RouteGuardResult<ValidatedSubmit> {
        let commitment = match self.commitment.as_ref() {
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim(),
            _ => return Err(missing_fields()),
        };
        let latitude = number(self.latitude.as_ref()).ok_or_else(missing_fields)?;
        let longitude = number(self.longitude.as_ref()).ok_or_else(missing_fields)?;

        let event_type = self
            .event_type
            .as_ref()
            .and_then(Value::as_i64)
            .and_then(EventType::from_ordinal)
            .ok_or_else(|| RouteGuardError::Validation("Invalid eventType (0-5)".into()))?;

        let commitment = FieldElement::parse(commitment).map_err(|e| {
            RouteGuardError::Validation(format!("Invalid commitment: {}", e.reason()))
        })?;
        if commitment.is_zero() {
            return Err(RouteGuardError::Validation(
                "Invalid commitment: must be non-zero".into(),
            ));
        }

        Ok(ValidatedSubmit {
            latitude,
            longitude,
            submission: ReportSubmission {
                commitment,
                latitude: scale_coordinate(latitude)?,
                longitude: scale_coordinate(longitude)?,
                event_type,
            },
        })
    }
}

fn number(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn missing_fields() -> RouteGuardError {
    RouteGuardError::Validation("Missing required fields".into())
}

/// Claim body. `reportId` is optional; when present the nullifier is checked
/// against it before anything is sent.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawClaimRequest {
    pub secret: Option<String>,
    pub salt: Option<String>,
    pub nullifier: Option<String>,
    pub recipient: Option<String>,
    pub report_id: Option<u64>,
}

impl std::fmt::Debug for RawClaimRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawClaimRequest")
            .field("nullifier", &self.nullifier)
            .field("recipient", &self.recipient)
            .field("report_id", &self.report_id)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedClaim {
    pub report_id: Option<u64>,
    pub claim: ClaimSubmission,
}

impl RawClaimRequest {
    pub fn validate(&self) -> RouteGuardResult<ValidatedClaim> {
        let field = |name: &str, value: &Option<String>| -> RouteGuardResult<FieldElement> {
            let raw = value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .ok_or_else(missing_fields)?;
            FieldElement::parse(raw).map_err(|e| {
                RouteGuardError::Validation(format!("Invalid {}: {}", name, e.reason()))
            })
        };

        let claim = ClaimSubmission {
            secret: field("secret", &self.secret)?,
            salt: field("salt", &self.salt)?,
            nullifier: field("nullifier", &self.nullifier)?,
            recipient: field("recipient", &self.recipient)?,
        };

        if claim.recipient.is_zero() {
            return Err(RouteGuardError::Validation(
                "Invalid recipient: must be non-zero".into(),
            ));
        }

        if let Some(report_id) = self.report_id {
            let context = ClaimContext::for_report(report_id);
            if !verify_nullifier(&claim.secret, &context, &claim.nullifier) {
                return Err(RouteGuardError::Validation(
                    "Nullifier does not match secret and reportId".into(),
                ));
            }
        }

        Ok(ValidatedClaim {
            report_id: self.report_id,
            claim,
        })
    }
}
