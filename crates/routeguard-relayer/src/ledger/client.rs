use super::calldata::{self, EncodedCall};
use super::{ClaimSubmission, LedgerGateway, ReportSubmission};
use crate::config::{LedgerConfig, RelayCredentials};
use async_trait::async_trait;
use routeguard_types::{FieldElement, ReportRecord, RouteGuardError, RouteGuardResult};
use starknet::{
    accounts::{Account, ConnectedAccount, ExecutionEncoding, SingleOwnerAccount},
    core::types::{
        BlockId, BlockTag, Call, ExecutionResult, Felt, FunctionCall, StarknetError,
    },
    providers::{jsonrpc::HttpTransport, JsonRpcClient, Provider, ProviderError, Url},
    signers::{LocalWallet, SigningKey},
};
use std::time::Duration;
use tracing::{debug, info};

type RelayAccount = SingleOwnerAccount<JsonRpcClient<HttpTransport>, LocalWallet>;

/// Live gateway: a JSON-RPC provider plus the relayer's single-owner account.
pub struct StarknetGateway {
    account: RelayAccount,
    contract_address: FieldElement,
    poll_interval: Duration,
}

impl StarknetGateway {
    pub async fn connect(
        config: &LedgerConfig,
        credentials: &RelayCredentials,
    ) -> RouteGuardResult<Self> {
        info!("Connecting to RPC: {}", config.rpc_url);

        let url = Url::parse(config.rpc_url.trim())
            .map_err(|e| RouteGuardError::Config(format!("Invalid RPC URL: {}", e)))?;
        let provider = JsonRpcClient::new(HttpTransport::new(url));

        let chain_id = provider
            .chain_id()
            .await
            .map_err(|e| RouteGuardError::Network(format!("Failed to get chain ID: {}", e)))?;

        let signer = LocalWallet::from(SigningKey::from_secret_scalar(Felt::from(
            *credentials.signing_key,
        )));

        let mut account = SingleOwnerAccount::new(
            provider,
            signer,
            Felt::from(credentials.relayer_address),
            chain_id,
            ExecutionEncoding::New,
        );
        account.set_block_id(BlockId::Tag(BlockTag::Pending));

        info!(
            "Connected to chain {} as relayer {}",
            FieldElement::from(chain_id),
            credentials.relayer_address
        );

        Ok(Self {
            account,
            contract_address: credentials.contract_address,
            poll_interval: config.poll_interval(),
        })
    }

    async fn invoke(&self, call: EncodedCall) -> RouteGuardResult<FieldElement> {
        debug!("Invoking {} with {} felts", call.entry_point, call.calldata.len());

        let result = self
            .account
            .execute_v3(vec![Call {
                to: self.contract_address.into(),
                selector: call.selector.into(),
                calldata: call.calldata.iter().map(|&f| Felt::from(f)).collect(),
            }])
            .send()
            .await
            .map_err(|e| {
                RouteGuardError::Relay(format!("Failed to send {}: {}", call.entry_point, e))
            })?;

        let tx_hash = FieldElement::from(result.transaction_hash);
        info!("{} sent: {}", call.entry_point, tx_hash);
        Ok(tx_hash)
    }

    async fn read(&self, call: EncodedCall) -> RouteGuardResult<Vec<FieldElement>> {
        let result = self
            .account
            .provider()
            .call(
                FunctionCall {
                    contract_address: self.contract_address.into(),
                    entry_point_selector: call.selector.into(),
                    calldata: call.calldata.iter().map(|&f| Felt::from(f)).collect(),
                },
                BlockId::Tag(BlockTag::Latest),
            )
            .await
            .map_err(|e| {
                RouteGuardError::Ledger(format!("Failed to call {}: {}", call.entry_point, e))
            })?;

        Ok(result.into_iter().map(FieldElement::from).collect())
    }
}

#[async_trait]
impl LedgerGateway for StarknetGateway {
    fn relayer_address(&self) -> FieldElement {
        FieldElement::from(self.account.address())
    }

    fn contract_address(&self) -> FieldElement {
        self.contract_address
    }

    async fn submit_report(&self, submission: &ReportSubmission) -> RouteGuardResult<FieldElement> {
        self.invoke(calldata::submit_report(submission)).await
    }

    async fn confirm_report(&self, report_id: u64) -> RouteGuardResult<FieldElement> {
        self.invoke(calldata::confirm_report(report_id)).await
    }

    async fn send_regards(&self, report_id: u64, amount: u128) -> RouteGuardResult<FieldElement> {
        self.invoke(calldata::send_regards(report_id, amount)).await
    }

    async fn claim_rewards(&self, claim: &ClaimSubmission) -> RouteGuardResult<FieldElement> {
        self.invoke(calldata::claim_rewards(claim)).await
    }

    async fn wait_for_confirmation(&self, tx_hash: &FieldElement) -> RouteGuardResult<()> {
        let hash = Felt::from(*tx_hash);
        loop {
            match self.account.provider().get_transaction_receipt(hash).await {
                Ok(receipt) => {
                    return match receipt.receipt.execution_result() {
                        ExecutionResult::Succeeded => {
                            info!("Transaction confirmed: {}", tx_hash);
                            Ok(())
                        }
                        ExecutionResult::Reverted { reason } => Err(RouteGuardError::Relay(
                            format!("Transaction {} reverted: {}", tx_hash, reason),
                        )),
                    };
                }
                Err(ProviderError::StarknetError(StarknetError::TransactionHashNotFound)) => {
                    debug!("Transaction {} not yet known, polling", tx_hash);
                }
                Err(e) => {
                    return Err(RouteGuardError::Network(format!(
                        "Failed to fetch receipt for {}: {}",
                        tx_hash, e
                    )));
                }
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn get_report_count(&self) -> RouteGuardResult<u64> {
        let result = self.read(calldata::get_report_count()).await?;
        calldata::decode_u64(&result)
    }

    async fn get_report(&self, report_id: u64) -> RouteGuardResult<ReportRecord> {
        let result = self.read(calldata::get_report(report_id)).await?;
        calldata::decode_report(report_id, &result)
    }

    async fn get_pending_rewards(&self, commitment: &FieldElement) -> RouteGuardResult<u128> {
        let result = self.read(calldata::get_pending_rewards(commitment)).await?;
        calldata::decode_pending_rewards(&result)
    }

    async fn is_nullifier_used(&self, nullifier: &FieldElement) -> RouteGuardResult<bool> {
        let result = self.read(calldata::is_nullifier_used(nullifier)).await?;
        calldata::decode_bool(&result)
    }
}
