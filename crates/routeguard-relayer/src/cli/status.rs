use super::commands::OutputFormat;
use super::utils::emit;
use routeguard_relayer::config::RelayerConfig;
use routeguard_types::RouteGuardResult;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusView {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    relayer_address: Option<String>,
    contract: String,
    network: String,
    rpc_url: String,
    api: String,
}

/// Mode as the configuration selects it; does not contact the ledger.
pub fn show_status(config_path: &Path, format: OutputFormat) -> RouteGuardResult<()> {
    let config = RelayerConfig::load_validated(config_path)?;
    let mode = config.relay_mode();
    let view = StatusView {
        status: mode.to_string(),
        relayer_address: if mode.is_demo() {
            None
        } else {
            config.ledger.relayer_address.clone()
        },
        contract: config.ledger.contract_display(),
        network: config.ledger.network.clone(),
        rpc_url: config.ledger.rpc_url.clone(),
        api: config.api.socket_addr().to_string(),
    };

    emit(format, &view, |v| {
        let color = if mode.is_demo() { "220" } else { "46" };
        println!("Status:   \x1b[38;5;{}m{}\x1b[0m", color, v.status);
        if let Some(addr) = &v.relayer_address {
            println!("Relayer:  {}", addr);
        }
        println!("Contract: {}", v.contract);
        println!("Network:  {}", v.network);
        println!("RPC:      {}", v.rpc_url);
        println!("API:      http://{}", v.api);
    })
}
