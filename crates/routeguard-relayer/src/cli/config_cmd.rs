use super::commands::{ConfigAction, OutputFormat};
use super::utils::emit;
use routeguard_relayer::config::RelayerConfig;
use routeguard_types::RouteGuardResult;
use std::path::Path;

pub fn handle_config(
    config_path: &Path,
    action: Option<ConfigAction>,
    format: OutputFormat,
) -> RouteGuardResult<()> {
    match action {
        Some(ConfigAction::Show) | None => {
            let config = RelayerConfig::load(config_path)?;
            emit(format, &config, |c| println!("{}", c.redacted()))?;
        }
        Some(ConfigAction::Validate) => {
            println!("{}", validation_report(config_path));
        }
        Some(ConfigAction::Init { force }) => {
            if config_path.exists() && !force {
                println!("\x1b[38;5;245mConfiguration already exists at {:?}\x1b[0m", config_path);
                println!("Use '\x1b[38;5;51mrouteguard config init --force\x1b[0m' to overwrite");
                return Ok(());
            }
            RelayerConfig::default().save(config_path)?;
            println!("\x1b[38;5;46m[+]\x1b[0m Wrote default configuration to {:?}", config_path);
            println!("Set RELAYER_PRIVATE_KEY in the environment; it is never written to disk.");
        }
    }
    Ok(())
}

/// One-line verdict for `config validate`. Load and validation failures are
/// reported, not returned.
fn validation_report(config_path: &Path) -> String {
    match RelayerConfig::load_validated(config_path) {
        Ok(config) => format!(
            "\x1b[38;5;46m[+]\x1b[0m Configuration is valid ({} mode)",
            config.relay_mode()
        ),
        Err(e) => format!("\x1b[38;5;196m[-]\x1b[0m Configuration error: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "routeguard-{}-{}.toml",
            name,
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_validate_reports_malformed_credential() {
        let path = write_config(
            "bad-address",
            r#"
[ledger]
relayer_private_key = "0x1"
relayer_address = "not-an-address"
contract_address = "0x2"
"#,
        );

        assert!(RelayerConfig::load(&path).is_ok());

        let report = validation_report(&path);
        assert!(report.contains("Configuration error"), "{}", report);
        assert!(report.contains("relayer address"), "{}", report);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_validate_reports_unparsable_file() {
        let path = write_config("garbage", "[ledger\nrpc_url = ");
        let report = validation_report(&path);
        assert!(report.contains("Failed to parse config"), "{}", report);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_init_force_overwrites_broken_file() {
        let path = write_config("init-force", "[ledger\nrpc_url = ");
        handle_config(&path, Some(ConfigAction::Init { force: true }), OutputFormat::Text).unwrap();

        assert!(validation_report(&path).contains("Configuration is valid"));
        std::fs::remove_file(&path).unwrap();
    }
}
