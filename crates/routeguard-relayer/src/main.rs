mod cli;

use clap::Parser;
use cli::{
    handle_config, init_logging, new_passphrase, run_server, show_commitment, show_nullifier,
    show_status, Cli, Commands,
};
use routeguard_relayer::RelayerConfig;
use routeguard_types::RouteGuardResult;

#[tokio::main]
async fn main() -> RouteGuardResult<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(RelayerConfig::default_path);

    // Logging comes up before any command runs. A broken config file falls
    // back to default logging so the command can still report the problem.
    let logging = RelayerConfig::load(&config_path)
        .map(|config| config.logging)
        .unwrap_or_default();
    init_logging(&cli, &logging)?;

    match cli.command {
        Commands::Serve => {
            run_server(&config_path).await?;
        }
        Commands::Passphrase { words } => {
            new_passphrase(words, cli.format)?;
        }
        Commands::Commit { passphrase, reveal } => {
            show_commitment(passphrase, reveal, cli.format)?;
        }
        Commands::Nullifier {
            passphrase,
            report_id,
            recipient,
        } => {
            show_nullifier(passphrase, report_id, recipient, cli.format)?;
        }
        Commands::Status => {
            show_status(&config_path, cli.format)?;
        }
        Commands::Config { action } => {
            handle_config(&config_path, action, cli.format)?;
        }
    }

    Ok(())
}
