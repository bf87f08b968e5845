use crate::config::RelayMode;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Success body for submit and claim relays.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayResponse {
    pub success: bool,
    pub tx_hash: String,
    pub demo_mode: bool,
    pub relayer_address: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commitment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullifier: Option<String>,
}

impl RelayResponse {
    pub fn new(tx_hash: String, demo_mode: bool, relayer_address: String, message: &str) -> Self {
        Self {
            success: true,
            tx_hash,
            demo_mode,
            relayer_address,
            message: message.to_string(),
            commitment: None,
            event_type: None,
            location: None,
            nullifier: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayStatusResponse {
    pub status: RelayMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relayer_address: Option<String>,
    pub contract: String,
    pub network: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
