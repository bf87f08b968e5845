use super::utils::print_banner;
use routeguard_relayer::{ApiServer, RelayDispatcher, RelayerConfig};
use routeguard_types::RouteGuardResult;
use std::path::Path;
use tracing::{info, warn};

pub async fn run_server(config_path: &Path) -> RouteGuardResult<()> {
    print_banner();
    info!("Starting RouteGuard relayer v{}", env!("CARGO_PKG_VERSION"));

    if !config_path.exists() {
        info!("Config file {:?} not found, using defaults", config_path);
    }
    let config = RelayerConfig::load_validated(config_path)?;

    config.log_security_warnings();

    let dispatcher = RelayDispatcher::from_config(&config).await?;
    let status = dispatcher.status();
    info!(
        "Mode: {} | network: {} | contract: {}",
        status.status, status.network, status.contract
    );
    if let Some(relayer) = &status.relayer_address {
        info!("Relayer account: {}", relayer);
    }

    let server = ApiServer::new(config.api.clone(), dispatcher);
    server.serve(shutdown_signal()).await?;

    info!("RouteGuard relayer shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal, shutting down...");
}
