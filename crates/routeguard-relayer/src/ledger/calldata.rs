//! Felt layouts of the contract entry points.
//!
//! Signed integers travel as `x mod P`, enums as their variant ordinal,
//! `u256` as `(low, high)` 128-bit limbs.

use super::{ClaimSubmission, ReportSubmission};
use routeguard_crypto::selector;
use routeguard_types::{
    EventType, FieldElement, ReportRecord, ReportStatus, RouteGuardError, RouteGuardResult,
};

pub const SUBMIT_REPORT: &str = "submit_report";
pub const CONFIRM_REPORT: &str = "confirm_report";
pub const SEND_REGARDS: &str = "send_regards";
pub const CLAIM_REWARDS: &str = "claim_rewards";
pub const GET_REPORT_COUNT: &str = "get_report_count";
pub const GET_REPORT: &str = "get_report";
pub const GET_PENDING_REWARDS: &str = "get_pending_rewards";
pub const IS_NULLIFIER_USED: &str = "is_nullifier_used";

/// Felts returned by `get_report`.
pub const REPORT_FELT_LEN: usize = 9;

/// A single contract invocation, ready for the account to sign.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedCall {
    pub entry_point: &'static str,
    pub selector: FieldElement,
    pub calldata: Vec<FieldElement>,
}

impl EncodedCall {
    pub fn new(entry_point: &'static str, calldata: Vec<FieldElement>) -> Self {
        Self {
            entry_point,
            selector: selector(entry_point),
            calldata,
        }
    }
}

pub fn submit_report(submission: &ReportSubmission) -> EncodedCall {
    EncodedCall::new(
        SUBMIT_REPORT,
        vec![
            submission.commitment,
            FieldElement::from_i64(submission.latitude),
            FieldElement::from_i64(submission.longitude),
            FieldElement::from(submission.event_type.ordinal() as u64),
        ],
    )
}

pub fn confirm_report(report_id: u64) -> EncodedCall {
    EncodedCall::new(CONFIRM_REPORT, vec![FieldElement::from(report_id)])
}

pub fn send_regards(report_id: u64, amount: u128) -> EncodedCall {
    let [low, high] = encode_u256(amount);
    EncodedCall::new(SEND_REGARDS, vec![FieldElement::from(report_id), low, high])
}

pub fn claim_rewards(claim: &ClaimSubmission) -> EncodedCall {
    EncodedCall::new(
        CLAIM_REWARDS,
        vec![claim.secret, claim.salt, claim.nullifier, claim.recipient],
    )
}

pub fn get_report_count() -> EncodedCall {
    EncodedCall::new(GET_REPORT_COUNT, vec![])
}

pub fn get_report(report_id: u64) -> EncodedCall {
    EncodedCall::new(GET_REPORT, vec![FieldElement::from(report_id)])
}

pub fn get_pending_rewards(commitment: &FieldElement) -> EncodedCall {
    EncodedCall::new(GET_PENDING_REWARDS, vec![*commitment])
}

pub fn is_nullifier_used(nullifier: &FieldElement) -> EncodedCall {
    EncodedCall::new(IS_NULLIFIER_USED, vec![*nullifier])
}

/// Amounts are carried as `u128`; the high limb is always zero.
pub fn encode_u256(value: u128) -> [FieldElement; 2] {
    [FieldElement::from(value), FieldElement::ZERO]
}

pub fn decode_u256(low: &FieldElement, high: &FieldElement) -> RouteGuardResult<u128> {
    if !high.is_zero() {
        return Err(RouteGuardError::Ledger(
            "u256 value exceeds 128 bits".into(),
        ));
    }
    low.to_u128()
        .ok_or_else(|| RouteGuardError::Ledger("u256 low limb exceeds 128 bits".into()))
}

pub fn decode_u64(result: &[FieldElement]) -> RouteGuardResult<u64> {
    let value = expect_len(result, 1, GET_REPORT_COUNT)?;
    value[0]
        .to_u64()
        .ok_or_else(|| RouteGuardError::Ledger(format!("value {} exceeds u64", value[0])))
}

pub fn decode_bool(result: &[FieldElement]) -> RouteGuardResult<bool> {
    let value = expect_len(result, 1, IS_NULLIFIER_USED)?;
    match value[0].to_u64() {
        Some(0) => Ok(false),
        Some(1) => Ok(true),
        _ => Err(RouteGuardError::Ledger(format!(
            "expected bool, got {}",
            value[0]
        ))),
    }
}

pub fn decode_pending_rewards(result: &[FieldElement]) -> RouteGuardResult<u128> {
    let value = expect_len(result, 2, GET_PENDING_REWARDS)?;
    decode_u256(&value[0], &value[1])
}

/// Layout: commitment, latitude, longitude, event type, status, timestamp,
/// confirmations, regards (low, high).
pub fn decode_report(report_id: u64, result: &[FieldElement]) -> RouteGuardResult<ReportRecord> {
    let f = expect_len(result, REPORT_FELT_LEN, GET_REPORT)?;

    let signed = |idx: usize, what: &str| {
        f[idx]
            .to_i64()
            .ok_or_else(|| RouteGuardError::Ledger(format!("{} out of range: {}", what, f[idx])))
    };
    let unsigned = |idx: usize, what: &str| {
        f[idx]
            .to_u64()
            .ok_or_else(|| RouteGuardError::Ledger(format!("{} out of range: {}", what, f[idx])))
    };

    let event_ordinal = unsigned(3, "event type")?;
    let event_type = i64::try_from(event_ordinal)
        .ok()
        .and_then(EventType::from_ordinal)
        .ok_or_else(|| RouteGuardError::Ledger(format!("unknown event type {}", event_ordinal)))?;

    let status_ordinal = unsigned(4, "status")?;
    let status = ReportStatus::from_ordinal(status_ordinal)
        .ok_or_else(|| RouteGuardError::Ledger(format!("unknown report status {}", status_ordinal)))?;

    let confirmations = u32::try_from(unsigned(6, "confirmations")?)
        .map_err(|_| RouteGuardError::Ledger("confirmations exceed u32".into()))?;

    Ok(ReportRecord {
        report_id,
        commitment: f[0],
        latitude: signed(1, "latitude")?,
        longitude: signed(2, "longitude")?,
        event_type,
        status,
        submitted_at: unsigned(5, "timestamp")?,
        confirmations,
        regards: decode_u256(&f[7], &f[8])?,
    })
}

fn expect_len<'a>(
    result: &'a [FieldElement],
    len: usize,
    entry_point: &str,
) -> RouteGuardResult<&'a [FieldElement]> {
    if result.len() != len {
        return Err(RouteGuardError::Ledger(format!(
            "{} returned {} felts, expected {}",
            entry_point,
            result.len(),
            len
        )));
    }
    Ok(result)
}
