use super::request::{RawClaimRequest, RawSubmitRequest};
use super::response::{RelayResponse, RelayStatusResponse};
use super::state::{RelayLifecycle, RelayState};
use super::strategy::{LiveRelay, MockRelay, RelayStrategy};
use crate::config::{RelayMode, RelayerConfig};
use crate::ledger::{LedgerGateway, StarknetGateway};
use routeguard_types::{RouteGuardError, RouteGuardResult};
use std::sync::Arc;
use tracing::{info, warn};

const DEMO_STATUS_MESSAGE: &str = "Running in demo mode, contract not deployed";

/// Entry point for relay requests. The strategy is fixed at construction;
/// restart the process to pick up new credentials.
#[derive(Clone)]
pub struct RelayDispatcher {
    strategy: Arc<dyn RelayStrategy>,
    network: String,
    contract: String,
}

impl RelayDispatcher {
    pub fn new(strategy: Arc<dyn RelayStrategy>, network: impl Into<String>, contract: impl Into<String>) -> Self {
        Self {
            strategy,
            network: network.into(),
            contract: contract.into(),
        }
    }

    pub async fn from_config(config: &RelayerConfig) -> RouteGuardResult<Self> {
        let ledger = &config.ledger;

        let strategy: Arc<dyn RelayStrategy> = match ledger.relay_credentials()? {
            None => {
                warn!("Relay credentials missing, running in demo mode");
                Arc::new(MockRelay::new())
            }
            Some(credentials) => {
                let gateway = StarknetGateway::connect(ledger, &credentials).await?;
                Arc::new(LiveRelay::new(
                    Arc::new(gateway),
                    ledger.submit_timeout(),
                    ledger.confirmation_timeout(),
                ))
            }
        };

        info!("Relay dispatcher ready in {} mode", strategy.mode());
        Ok(Self::new(strategy, ledger.network.clone(), ledger.contract_display()))
    }

    pub fn mode(&self) -> RelayMode {
        self.strategy.mode()
    }

    pub async fn submit(&self, raw: &RawSubmitRequest) -> RouteGuardResult<RelayResponse> {
        let mut lifecycle = RelayLifecycle::new("submit");
        lifecycle.advance(RelayState::Validating)?;

        let request = raw.validate().map_err(|e| lifecycle.fail(e))?;

        lifecycle.advance(self.strategy.dispatch_state())?;
        let response = self
            .strategy
            .submit_report(&request)
            .await
            .map_err(|e| lifecycle.fail(e))?;
        lifecycle.advance(RelayState::Completed)?;

        Ok(response)
    }

    pub async fn claim(&self, raw: &RawClaimRequest) -> RouteGuardResult<RelayResponse> {
        let mut lifecycle = RelayLifecycle::new("claim");
        lifecycle.advance(RelayState::Validating)?;

        let request = raw.validate().map_err(|e| lifecycle.fail(e))?;

        lifecycle.advance(self.strategy.dispatch_state())?;
        let response = self
            .strategy
            .claim_rewards(&request)
            .await
            .map_err(|e| lifecycle.fail(e))?;
        lifecycle.advance(RelayState::Completed)?;

        Ok(response)
    }

    pub fn status(&self) -> RelayStatusResponse {
        match self.mode() {
            RelayMode::Demo => RelayStatusResponse {
                status: RelayMode::Demo,
                relayer_address: None,
                contract: self.contract.clone(),
                network: self.network.clone(),
                message: Some(DEMO_STATUS_MESSAGE.to_string()),
            },
            RelayMode::Active => RelayStatusResponse {
                status: RelayMode::Active,
                relayer_address: Some(self.strategy.relayer_address()),
                contract: self.contract.clone(),
                network: self.network.clone(),
                message: None,
            },
        }
    }

    /// Ledger for read queries. Demo mode has none.
    pub fn ledger(&self) -> RouteGuardResult<Arc<dyn LedgerGateway>> {
        self.strategy.ledger().ok_or_else(|| {
            RouteGuardError::Unavailable("Ledger queries are unavailable in demo mode".into())
        })
    }
}
