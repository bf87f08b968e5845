//! Typed boundary to the RouteGuard contract.
//!
//! Everything the relayer needs from the ledger goes through [`LedgerGateway`],
//! so the relay logic can be driven by [`StarknetGateway`] in production and
//! by an in-memory double in tests.

pub mod calldata;
mod client;
#[cfg(test)]
pub(crate) mod memory;

pub use client::StarknetGateway;

use async_trait::async_trait;
use routeguard_types::{EventType, FieldElement, ReportRecord, RouteGuardResult};
use serde::Serialize;
use std::fmt;

/// Arguments of `submit_report`, coordinates already scaled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSubmission {
    pub commitment: FieldElement,
    pub latitude: i64,
    pub longitude: i64,
    pub event_type: EventType,
}

/// Arguments of `claim_rewards`.
#[derive(Clone, PartialEq, Eq)]
pub struct ClaimSubmission {
    pub secret: FieldElement,
    pub salt: FieldElement,
    pub nullifier: FieldElement,
    pub recipient: FieldElement,
}

impl fmt::Debug for ClaimSubmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClaimSubmission")
            .field("nullifier", &self.nullifier)
            .field("recipient", &self.recipient)
            .finish_non_exhaustive()
    }
}

/// Contract calls and reads the relayer depends on.
///
/// Write methods return the transaction hash as soon as the transaction is
/// accepted; [`LedgerGateway::wait_for_confirmation`] blocks until it is
/// included and fails if it reverted.
#[async_trait]
pub trait LedgerGateway: Send + Sync {
    fn relayer_address(&self) -> FieldElement;

    fn contract_address(&self) -> FieldElement;

    async fn submit_report(&self, submission: &ReportSubmission) -> RouteGuardResult<FieldElement>;

    async fn confirm_report(&self, report_id: u64) -> RouteGuardResult<FieldElement>;

    async fn send_regards(&self, report_id: u64, amount: u128) -> RouteGuardResult<FieldElement>;

    async fn claim_rewards(&self, claim: &ClaimSubmission) -> RouteGuardResult<FieldElement>;

    async fn wait_for_confirmation(&self, tx_hash: &FieldElement) -> RouteGuardResult<()>;

    async fn get_report_count(&self) -> RouteGuardResult<u64>;

    async fn get_report(&self, report_id: u64) -> RouteGuardResult<ReportRecord>;

    async fn get_pending_rewards(&self, commitment: &FieldElement) -> RouteGuardResult<u128>;

    async fn is_nullifier_used(&self, nullifier: &FieldElement) -> RouteGuardResult<bool>;
}

#[cfg(test)]
mod tests;
