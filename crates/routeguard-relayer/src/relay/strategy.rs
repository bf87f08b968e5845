use super::request::{ValidatedClaim, ValidatedSubmit};
use super::response::{Location, RelayResponse};
use super::state::RelayState;
use crate::config::RelayMode;
use crate::ledger::LedgerGateway;
use async_trait::async_trait;
use routeguard_crypto::bind_hash;
use routeguard_types::{FieldElement, RouteGuardError, RouteGuardResult};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub const DEMO_RELAYER_ADDRESS: &str = "demo-relayer";

const DEMO_SUBMIT_MESSAGE: &str =
    "DEMO MODE: report recorded locally. In production this is submitted to Starknet via the relayer.";
const DEMO_CLAIM_MESSAGE: &str =
    "DEMO MODE: claim accepted locally. In production this is submitted to Starknet via the relayer.";
const LIVE_SUBMIT_MESSAGE: &str = "Report submitted anonymously via relayer";
const LIVE_CLAIM_MESSAGE: &str = "Rewards claimed anonymously via relayer";

/// How validated requests reach (or do not reach) the ledger.
#[async_trait]
pub trait RelayStrategy: Send + Sync {
    fn mode(&self) -> RelayMode;

    fn relayer_address(&self) -> String;

    /// Gateway for read queries, `None` when there is no ledger behind this strategy.
    fn ledger(&self) -> Option<Arc<dyn LedgerGateway>>;

    async fn submit_report(&self, request: &ValidatedSubmit) -> RouteGuardResult<RelayResponse>;

    async fn claim_rewards(&self, request: &ValidatedClaim) -> RouteGuardResult<RelayResponse>;

    fn dispatch_state(&self) -> RelayState {
        match self.mode() {
            RelayMode::Demo => RelayState::DemoRespond,
            RelayMode::Active => RelayState::ProductionDispatch,
        }
    }
}

/// Answers without any I/O. Responses are tagged `demoMode: true`.
#[derive(Debug, Default)]
pub struct MockRelay;

impl MockRelay {
    pub fn new() -> Self {
        Self
    }

    fn mock_tx_hash(seed: &FieldElement) -> FieldElement {
        let now_millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
        bind_hash(seed, &FieldElement::from(now_millis))
    }
}

#[async_trait]
impl RelayStrategy for MockRelay {
    fn mode(&self) -> RelayMode {
        RelayMode::Demo
    }

    fn relayer_address(&self) -> String {
        DEMO_RELAYER_ADDRESS.to_string()
    }

    fn ledger(&self) -> Option<Arc<dyn LedgerGateway>> {
        None
    }

    async fn submit_report(&self, request: &ValidatedSubmit) -> RouteGuardResult<RelayResponse> {
        let commitment = request.submission.commitment;
        let tx_hash = Self::mock_tx_hash(&commitment);
        info!("[DEMO] Mock TX: {} | commitment: {}", tx_hash, commitment);

        let mut response =
            RelayResponse::new(tx_hash.to_hex(), true, self.relayer_address(), DEMO_SUBMIT_MESSAGE);
        response.commitment = Some(commitment.to_hex());
        response.event_type = Some(request.submission.event_type.name().to_string());
        response.location = Some(Location {
            latitude: request.latitude,
            longitude: request.longitude,
        });
        Ok(response)
    }

    async fn claim_rewards(&self, request: &ValidatedClaim) -> RouteGuardResult<RelayResponse> {
        let nullifier = request.claim.nullifier;
        let tx_hash = Self::mock_tx_hash(&nullifier);
        info!("[DEMO] Mock claim TX: {} | nullifier: {}", tx_hash, nullifier);

        let mut response =
            RelayResponse::new(tx_hash.to_hex(), true, self.relayer_address(), DEMO_CLAIM_MESSAGE);
        response.nullifier = Some(nullifier.to_hex());
        Ok(response)
    }
}

/// Signs with the relayer's account through a [`LedgerGateway`] and waits for
/// inclusion. Both waits are bounded; running out of time means the outcome
/// is unknown, not that the transaction failed.
pub struct LiveRelay {
    gateway: Arc<dyn LedgerGateway>,
    submit_timeout: Duration,
    confirmation_timeout: Duration,
}

impl LiveRelay {
    pub fn new(
        gateway: Arc<dyn LedgerGateway>,
        submit_timeout: Duration,
        confirmation_timeout: Duration,
    ) -> Self {
        Self {
            gateway,
            submit_timeout,
            confirmation_timeout,
        }
    }

    /// Sends a transaction, then waits for it, each under its own deadline.
    async fn send_and_confirm<F>(&self, what: &str, send: F) -> RouteGuardResult<FieldElement>
    where
        F: Future<Output = RouteGuardResult<FieldElement>> + Send,
    {
        let tx_hash = tokio::time::timeout(self.submit_timeout, send)
            .await
            .map_err(|_| RouteGuardError::RelayTimeout(format!("sending {}", what)))?
            .map_err(into_relay_error)?;

        info!("[Relayer] TX: {}", tx_hash);

        tokio::time::timeout(
            self.confirmation_timeout,
            self.gateway.wait_for_confirmation(&tx_hash),
        )
        .await
        .map_err(|_| {
            warn!("Confirmation of {} timed out", tx_hash);
            RouteGuardError::RelayTimeout(format!("waiting for confirmation of {}", tx_hash))
        })?
        .map_err(into_relay_error)?;

        Ok(tx_hash)
    }
}

#[async_trait]
impl RelayStrategy for LiveRelay {
    fn mode(&self) -> RelayMode {
        RelayMode::Active
    }

    fn relayer_address(&self) -> String {
        self.gateway.relayer_address().to_hex()
    }

    fn ledger(&self) -> Option<Arc<dyn LedgerGateway>> {
        Some(Arc::clone(&self.gateway))
    }

    async fn submit_report(&self, request: &ValidatedSubmit) -> RouteGuardResult<RelayResponse> {
        let submission = &request.submission;
        info!(
            "Relaying {} report at ({}, {})",
            submission.event_type, submission.latitude, submission.longitude
        );

        let tx_hash = self
            .send_and_confirm("submit_report", self.gateway.submit_report(submission))
            .await?;

        Ok(RelayResponse::new(
            tx_hash.to_hex(),
            false,
            self.relayer_address(),
            LIVE_SUBMIT_MESSAGE,
        ))
    }

    async fn claim_rewards(&self, request: &ValidatedClaim) -> RouteGuardResult<RelayResponse> {
        let claim = &request.claim;

        let used = tokio::time::timeout(
            self.submit_timeout,
            self.gateway.is_nullifier_used(&claim.nullifier),
        )
        .await
        .map_err(|_| RouteGuardError::Relay("timeout while checking nullifier".into()))?
        .map_err(into_relay_error)?;

        if used {
            return Err(RouteGuardError::Validation("Nullifier already used".into()));
        }

        info!("Relaying claim for nullifier {}", claim.nullifier);

        let tx_hash = self
            .send_and_confirm("claim_rewards", self.gateway.claim_rewards(claim))
            .await?;

        let mut response = RelayResponse::new(
            tx_hash.to_hex(),
            false,
            self.relayer_address(),
            LIVE_CLAIM_MESSAGE,
        );
        response.nullifier = Some(claim.nullifier.to_hex());
        Ok(response)
    }
}

/// Gateway failures surface as relay errors carrying the underlying reason.
fn into_relay_error(err: RouteGuardError) -> RouteGuardError {
    match err {
        RouteGuardError::Relay(_) | RouteGuardError::RelayTimeout(_) => err,
        other => RouteGuardError::Relay(other.reason()),
    }
}
