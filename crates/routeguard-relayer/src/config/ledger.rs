use routeguard_types::{is_null_sentinel, FieldElement, RouteGuardError, RouteGuardResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use zeroize::Zeroizing;

use super::constants::{
    DEFAULT_CONFIRMATION_TIMEOUT_SECS, DEFAULT_NETWORK, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_RPC_URL, DEFAULT_SUBMIT_TIMEOUT_SECS,
};

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub rpc_url: String,
    pub network: String,
    pub contract_address: Option<String>,
    pub relayer_address: Option<String>,
    /// Only ever read from the file or `RELAYER_PRIVATE_KEY`; never written back.
    #[serde(skip_serializing)]
    pub relayer_private_key: Option<String>,
    pub submit_timeout_secs: u64,
    pub confirmation_timeout_secs: u64,
    pub poll_interval_ms: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            network: DEFAULT_NETWORK.to_string(),
            contract_address: None,
            relayer_address: None,
            relayer_private_key: None,
            submit_timeout_secs: DEFAULT_SUBMIT_TIMEOUT_SECS,
            confirmation_timeout_secs: DEFAULT_CONFIRMATION_TIMEOUT_SECS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl fmt::Debug for LedgerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LedgerConfig")
            .field("rpc_url", &self.rpc_url)
            .field("network", &self.network)
            .field("contract_address", &self.contract_address)
            .field("relayer_address", &self.relayer_address)
            .field(
                "relayer_private_key",
                &self.relayer_private_key.as_ref().map(|_| "<redacted>"),
            )
            .field("submit_timeout_secs", &self.submit_timeout_secs)
            .field("confirmation_timeout_secs", &self.confirmation_timeout_secs)
            .field("poll_interval_ms", &self.poll_interval_ms)
            .finish()
    }
}

impl LedgerConfig {
    pub fn submit_timeout(&self) -> Duration {
        Duration::from_secs(self.submit_timeout_secs)
    }

    pub fn confirmation_timeout(&self) -> Duration {
        Duration::from_secs(self.confirmation_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// True when any of the three relay credentials is absent or the null sentinel.
    pub fn is_demo(&self) -> bool {
        is_null_sentinel(self.relayer_private_key.as_deref())
            || is_null_sentinel(self.relayer_address.as_deref())
            || is_null_sentinel(self.contract_address.as_deref())
    }

    /// Parsed credentials, or `None` in demo mode. Values that are set but
    /// malformed are a configuration error, not a silent fallback to demo.
    pub fn relay_credentials(&self) -> RouteGuardResult<Option<RelayCredentials>> {
        if self.is_demo() {
            return Ok(None);
        }

        let parse = |label: &str, value: Option<&String>| -> RouteGuardResult<FieldElement> {
            let raw = value.map(String::as_str).unwrap_or_default().trim();
            FieldElement::parse(raw)
                .map_err(|e| RouteGuardError::Config(format!("Invalid {}: {}", label, e.reason())))
        };

        Ok(Some(RelayCredentials {
            signing_key: Zeroizing::new(parse(
                "relayer private key",
                self.relayer_private_key.as_ref(),
            )?),
            relayer_address: parse("relayer address", self.relayer_address.as_ref())?,
            contract_address: parse("contract address", self.contract_address.as_ref())?,
        }))
    }

    /// Contract address for display, the null sentinel when unset.
    pub fn contract_display(&self) -> String {
        match self.contract_address.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => routeguard_types::NULL_SENTINEL.to_string(),
        }
    }
}

/// Everything the live relay signs with. The signing key is wiped on drop.
pub struct RelayCredentials {
    pub signing_key: Zeroizing<FieldElement>,
    pub relayer_address: FieldElement,
    pub contract_address: FieldElement,
}

impl fmt::Debug for RelayCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayCredentials")
            .field("signing_key", &"<redacted>")
            .field("relayer_address", &self.relayer_address)
            .field("contract_address", &self.contract_address)
            .finish()
    }
}
