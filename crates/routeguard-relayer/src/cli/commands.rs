use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const BUILD_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "routeguard")]
#[command(version = BUILD_VERSION)]
#[command(about = "RouteGuard Relayer - Anonymous road-incident reports on Starknet")]
#[command(long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[arg(short, long, global = true, value_name = "FILE", env = "ROUTEGUARD_CONFIG", help = "Path to config file")]
    pub config: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true, help = "Increase verbosity (-v, -vv, -vvv)")]
    pub verbose: u8,

    #[arg(short, long, global = true, help = "Suppress non-error output")]
    pub quiet: bool,

    #[arg(long, global = true, value_name = "FILE", help = "Write logs to file")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, default_value = "text", help = "Output format")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Start the relay HTTP server")]
    #[command(long_about = "Start the relay HTTP server.\n\nWithout RELAYER_PRIVATE_KEY, RELAYER_ADDRESS and ROUTEGUARD_CONTRACT_ADDRESS the relayer runs in demo mode and never contacts the ledger.")]
    Serve,

    #[command(about = "Generate a random passphrase")]
    Passphrase {
        #[arg(short, long, default_value_t = routeguard_types::DEFAULT_PASSPHRASE_WORDS, help = "Number of words")]
        words: usize,
    },

    #[command(about = "Derive the report commitment for a passphrase")]
    Commit {
        #[arg(short, long, env = "ROUTEGUARD_PASSPHRASE", hide_env_values = true, help = "Passphrase")]
        passphrase: String,
        #[arg(long, help = "Also print secret and salt")]
        reveal: bool,
    },

    #[command(about = "Derive the claim nullifier for a report")]
    #[command(long_about = "Derive the claim nullifier for a report.\n\nWith --recipient, prints the full claim body accepted by POST /api/relay/claim.")]
    Nullifier {
        #[arg(short, long, env = "ROUTEGUARD_PASSPHRASE", hide_env_values = true, help = "Passphrase")]
        passphrase: String,
        #[arg(short, long, help = "Report id being claimed")]
        report_id: u64,
        #[arg(long, value_name = "ADDRESS", help = "Reward recipient address (0x...)")]
        recipient: Option<String>,
    },

    #[command(about = "Show relay mode and addresses")]
    Status,

    #[command(about = "Manage configuration")]
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    #[command(about = "Show effective configuration (secrets redacted)")]
    Show,
    #[command(about = "Validate configuration")]
    Validate,
    #[command(about = "Write a default configuration file")]
    Init {
        #[arg(short, long, help = "Overwrite existing configuration")]
        force: bool,
    },
}
