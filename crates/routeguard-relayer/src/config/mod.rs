mod api;
mod constants;
mod ledger;
mod logging;
mod relayer;
mod types;

pub use api::ApiConfig;
pub use constants::*;
pub use ledger::{LedgerConfig, RelayCredentials};
pub use logging::LoggingConfig;
pub use relayer::{RedactedConfig, RelayerConfig};
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::net::{IpAddr, Ipv4Addr};

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn live_env() -> impl Fn(&str) -> Option<String> {
        env(&[
            ("RELAYER_PRIVATE_KEY", "0x1234"),
            ("RELAYER_ADDRESS", "0xabc"),
            ("ROUTEGUARD_CONTRACT_ADDRESS", "0xdef"),
        ])
    }

    #[test]
    fn test_default_config_validation() {
        let config = RelayerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.relay_mode(), RelayMode::Demo);
    }

    #[test]
    fn test_api_defaults_to_localhost() {
        let config = RelayerConfig::default();
        assert!(config.api.is_localhost_only());
        assert_eq!(config.api.bind_address, IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[test]
    fn test_invalid_port() {
        let mut config = RelayerConfig::default();
        config.api.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_rpc_url() {
        let mut config = RelayerConfig::default();
        config.ledger.rpc_url = "not a url".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides_select_active_mode() {
        let mut config = RelayerConfig::default();
        config.apply_env_overrides_from(live_env());
        assert_eq!(config.relay_mode(), RelayMode::Active);

        let creds = config.ledger.relay_credentials().unwrap().unwrap();
        assert_eq!(creds.relayer_address.to_hex(), "0xabc");
        assert_eq!(creds.contract_address.to_hex(), "0xdef");
    }

    #[test]
    fn test_each_missing_credential_forces_demo() {
        for missing in ["RELAYER_PRIVATE_KEY", "RELAYER_ADDRESS", "ROUTEGUARD_CONTRACT_ADDRESS"] {
            let full = live_env();
            let mut config = RelayerConfig::default();
            config.apply_env_overrides_from(|k| if k == missing { None } else { full(k) });
            assert_eq!(config.relay_mode(), RelayMode::Demo, "missing {}", missing);
            assert!(config.ledger.relay_credentials().unwrap().is_none());
        }
    }

    #[test]
    fn test_null_sentinel_contract_forces_demo() {
        let full = live_env();
        let mut config = RelayerConfig::default();
        config.apply_env_overrides_from(|k| {
            if k == "ROUTEGUARD_CONTRACT_ADDRESS" {
                Some("0x0".to_string())
            } else {
                full(k)
            }
        });
        assert_eq!(config.relay_mode(), RelayMode::Demo);
    }

    #[test]
    fn test_malformed_credential_is_config_error() {
        let mut config = RelayerConfig::default();
        config.apply_env_overrides_from(env(&[
            ("RELAYER_PRIVATE_KEY", "0x1234"),
            ("RELAYER_ADDRESS", "not-an-address"),
            ("ROUTEGUARD_CONTRACT_ADDRESS", "0xdef"),
        ]));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_overrides() {
        let mut config = RelayerConfig::default();
        config.apply_env_overrides_from(env(&[
            ("ROUTEGUARD_LOG_LEVEL", "DEBUG"),
            ("ROUTEGUARD_LOG_JSON", "1"),
            ("ROUTEGUARD_API_PORT", "9000"),
            ("ROUTEGUARD_NETWORK", "starknet-mainnet"),
        ]));
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert!(config.logging.json);
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.ledger.network, "starknet-mainnet");
    }

    #[test]
    fn test_redacted_config_hides_key() {
        let mut config = RelayerConfig::default();
        config.apply_env_overrides_from(live_env());
        let shown = format!("{}", config.redacted());
        assert!(shown.contains("API:"));
        assert!(shown.contains("Mode: active"));
        assert!(!shown.contains("0x1234"));
        assert!(!format!("{:?}", config).contains("0x1234"));
    }

    #[test]
    fn test_config_serialization_skips_private_key() {
        let mut config = RelayerConfig::default();
        config.apply_env_overrides_from(live_env());
        let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");
        assert!(!toml_str.contains("0x1234"));

        let parsed: RelayerConfig = toml::from_str(&toml_str).expect("Failed to parse");
        assert_eq!(parsed.api.port, config.api.port);
        assert_eq!(parsed.ledger.contract_address, config.ledger.contract_address);
        assert!(parsed.ledger.relayer_private_key.is_none());
    }

    #[test]
    fn test_security_warnings() {
        let mut config = RelayerConfig::default();
        assert!(!config.check_security_warnings().is_empty());

        config.apply_env_overrides_from(live_env());
        assert!(config.check_security_warnings().is_empty());

        config.api.rate_limit_enabled = false;
        assert!(config
            .check_security_warnings()
            .iter()
            .any(|w| w.severity == WarningSeverity::High));
    }
}
