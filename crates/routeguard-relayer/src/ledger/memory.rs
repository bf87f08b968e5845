//! Recording in-memory ledger used by relay and API tests.

use super::{ClaimSubmission, LedgerGateway, ReportSubmission};
use async_trait::async_trait;
use parking_lot::Mutex;
use routeguard_crypto::compute_commitment;
use routeguard_types::{FieldElement, ReportRecord, ReportStatus, RouteGuardError, RouteGuardResult};
use std::collections::{HashMap, HashSet};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum RecordedCall {
    SubmitReport(ReportSubmission),
    ConfirmReport(u64),
    SendRegards(u64, u128),
    ClaimRewards(ClaimSubmission),
    WaitForConfirmation(FieldElement),
    Read(&'static str),
}

#[derive(Clone, Debug)]
pub(crate) enum Confirmation {
    Confirm,
    Revert(String),
    Hang,
}

#[derive(Default)]
struct LedgerState {
    reports: Vec<ReportRecord>,
    rewards: HashMap<FieldElement, u128>,
    used_nullifiers: HashSet<FieldElement>,
    calls: Vec<RecordedCall>,
    next_tx: u64,
}

pub(crate) struct InMemoryLedger {
    relayer: FieldElement,
    contract: FieldElement,
    state: Mutex<LedgerState>,
    submit_error: Option<RouteGuardError>,
    submit_hangs: bool,
    confirmation: Confirmation,
}

impl InMemoryLedger {
    pub(crate) fn new() -> Self {
        Self {
            relayer: FieldElement::from(0x5e1a7e5u64),
            contract: FieldElement::from(0xc0417acu64),
            state: Mutex::new(LedgerState {
                next_tx: 1,
                ..Default::default()
            }),
            submit_error: None,
            submit_hangs: false,
            confirmation: Confirmation::Confirm,
        }
    }

    pub(crate) fn failing_submit(mut self, err: RouteGuardError) -> Self {
        self.submit_error = Some(err);
        self
    }

    /// `submit_report` never answers, as with an unresponsive RPC node.
    pub(crate) fn hanging_submit(mut self) -> Self {
        self.submit_hangs = true;
        self
    }

    pub(crate) fn with_confirmation(mut self, confirmation: Confirmation) -> Self {
        self.confirmation = confirmation;
        self
    }

    pub(crate) fn with_used_nullifier(self, nullifier: FieldElement) -> Self {
        self.state.lock().used_nullifiers.insert(nullifier);
        self
    }

    pub(crate) fn with_pending_rewards(self, commitment: FieldElement, amount: u128) -> Self {
        self.state.lock().rewards.insert(commitment, amount);
        self
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().calls.clone()
    }

    pub(crate) fn submissions(&self) -> Vec<ReportSubmission> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                RecordedCall::SubmitReport(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: RecordedCall) {
        self.state.lock().calls.push(call);
    }

    fn next_tx_hash(state: &mut LedgerState) -> FieldElement {
        let hash = FieldElement::from(0x7a0000u64 + state.next_tx);
        state.next_tx += 1;
        hash
    }
}

#[async_trait]
impl LedgerGateway for InMemoryLedger {
    fn relayer_address(&self) -> FieldElement {
        self.relayer
    }

    fn contract_address(&self) -> FieldElement {
        self.contract
    }

    async fn submit_report(&self, submission: &ReportSubmission) -> RouteGuardResult<FieldElement> {
        self.record(RecordedCall::SubmitReport(submission.clone()));
        if let Some(err) = &self.submit_error {
            return Err(err.clone());
        }
        if self.submit_hangs {
            return std::future::pending().await;
        }

        let mut state = self.state.lock();
        let report_id = state.reports.len() as u64;
        state.reports.push(ReportRecord {
            report_id,
            commitment: submission.commitment,
            latitude: submission.latitude,
            longitude: submission.longitude,
            event_type: submission.event_type,
            status: ReportStatus::Active,
            submitted_at: chrono::Utc::now().timestamp() as u64,
            confirmations: 0,
            regards: 0,
        });
        Ok(Self::next_tx_hash(&mut state))
    }

    async fn confirm_report(&self, report_id: u64) -> RouteGuardResult<FieldElement> {
        self.record(RecordedCall::ConfirmReport(report_id));
        let mut state = self.state.lock();
        let report = state
            .reports
            .get_mut(report_id as usize)
            .ok_or_else(|| RouteGuardError::Relay(format!("report {} not found", report_id)))?;
        report.confirmations += 1;
        report.status = ReportStatus::Confirmed;
        Ok(Self::next_tx_hash(&mut state))
    }

    async fn send_regards(&self, report_id: u64, amount: u128) -> RouteGuardResult<FieldElement> {
        self.record(RecordedCall::SendRegards(report_id, amount));
        let mut state = self.state.lock();
        let commitment = {
            let report = state
                .reports
                .get_mut(report_id as usize)
                .ok_or_else(|| RouteGuardError::Relay(format!("report {} not found", report_id)))?;
            report.regards += amount;
            report.commitment
        };
        *state.rewards.entry(commitment).or_default() += amount;
        Ok(Self::next_tx_hash(&mut state))
    }

    async fn claim_rewards(&self, claim: &ClaimSubmission) -> RouteGuardResult<FieldElement> {
        self.record(RecordedCall::ClaimRewards(claim.clone()));
        let mut state = self.state.lock();
        if !state.used_nullifiers.insert(claim.nullifier) {
            return Err(RouteGuardError::Relay("nullifier already used".into()));
        }
        let commitment = compute_commitment(&claim.secret, &claim.salt);
        state.rewards.remove(&commitment);
        Ok(Self::next_tx_hash(&mut state))
    }

    async fn wait_for_confirmation(&self, tx_hash: &FieldElement) -> RouteGuardResult<()> {
        self.record(RecordedCall::WaitForConfirmation(*tx_hash));
        match &self.confirmation {
            Confirmation::Confirm => Ok(()),
            Confirmation::Revert(reason) => Err(RouteGuardError::Relay(format!(
                "Transaction {} reverted: {}",
                tx_hash, reason
            ))),
            Confirmation::Hang => std::future::pending().await,
        }
    }

    async fn get_report_count(&self) -> RouteGuardResult<u64> {
        self.record(RecordedCall::Read("get_report_count"));
        Ok(self.state.lock().reports.len() as u64)
    }

    async fn get_report(&self, report_id: u64) -> RouteGuardResult<ReportRecord> {
        self.record(RecordedCall::Read("get_report"));
        self.state
            .lock()
            .reports
            .get(report_id as usize)
            .cloned()
            .ok_or_else(|| RouteGuardError::Ledger(format!("report {} not found", report_id)))
    }

    async fn get_pending_rewards(&self, commitment: &FieldElement) -> RouteGuardResult<u128> {
        self.record(RecordedCall::Read("get_pending_rewards"));
        Ok(self.state.lock().rewards.get(commitment).copied().unwrap_or(0))
    }

    async fn is_nullifier_used(&self, nullifier: &FieldElement) -> RouteGuardResult<bool> {
        self.record(RecordedCall::Read("is_nullifier_used"));
        Ok(self.state.lock().used_nullifiers.contains(nullifier))
    }
}
