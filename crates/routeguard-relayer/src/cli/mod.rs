mod commands;
mod config_cmd;
mod derive;
mod serve;
mod status;
mod utils;

pub use commands::{Cli, Commands};
pub use config_cmd::handle_config;
pub use derive::{new_passphrase, show_commitment, show_nullifier};
pub use serve::run_server;
pub use status::show_status;
pub use utils::init_logging;
