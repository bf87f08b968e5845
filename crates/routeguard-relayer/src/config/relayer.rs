use routeguard_types::{RouteGuardError, RouteGuardResult};
use serde::{Deserialize, Serialize};
use starknet::providers::Url;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::api::ApiConfig;
use super::constants::MIN_BODY_SIZE;
use super::ledger::LedgerConfig;
use super::logging::LoggingConfig;
use super::types::{LogLevel, RelayMode, SecurityWarning, WarningSeverity};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayerConfig {
    pub ledger: LedgerConfig,
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

impl RelayerConfig {
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("routeguard")
            .join("relayer.toml")
    }

    /// Reads the file (defaults when it is missing) and applies environment
    /// overrides. Does not validate; callers that act on the config run
    /// [`RelayerConfig::validate`] themselves.
    pub fn load(path: impl AsRef<Path>) -> RouteGuardResult<Self> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| RouteGuardError::Config(format!("Failed to read config: {}", e)))?;

            toml::from_str(&contents)
                .map_err(|e| RouteGuardError::Config(format!("Failed to parse config: {}", e)))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// [`RelayerConfig::load`] followed by [`RelayerConfig::validate`].
    pub fn load_validated(path: impl AsRef<Path>) -> RouteGuardResult<Self> {
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> RouteGuardResult<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| RouteGuardError::Config(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                RouteGuardError::Config(format!("Failed to create config dir: {}", e))
            })?;
        }

        std::fs::write(path.as_ref(), contents)
            .map_err(|e| RouteGuardError::Config(format!("Failed to write config: {}", e)))?;

        info!("Configuration saved to {:?}", path.as_ref());
        Ok(())
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_env_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup, so tests need not touch the
    /// process environment.
    pub fn apply_env_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("RELAYER_PRIVATE_KEY") {
            self.ledger.relayer_private_key = Some(key);
        }

        if let Some(addr) = lookup("RELAYER_ADDRESS") {
            self.ledger.relayer_address = Some(addr);
        }

        if let Some(addr) = lookup("ROUTEGUARD_CONTRACT_ADDRESS") {
            self.ledger.contract_address = Some(addr);
        }

        if let Some(rpc) = lookup("STARKNET_RPC_URL") {
            self.ledger.rpc_url = rpc;
        }

        if let Some(network) = lookup("ROUTEGUARD_NETWORK") {
            self.ledger.network = network;
        }

        if let Some(port) = lookup("ROUTEGUARD_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        if let Some(bind) = lookup("ROUTEGUARD_API_BIND") {
            if let Ok(addr) = bind.parse::<IpAddr>() {
                self.api.bind_address = addr;
            }
        }

        if let Some(level) = lookup("ROUTEGUARD_LOG_LEVEL") {
            self.logging.level = LogLevel::parse(&level).unwrap_or(LogLevel::Info);
        }

        if lookup("ROUTEGUARD_LOG_JSON").is_some() {
            self.logging.json = true;
        }
    }

    pub fn validate(&self) -> RouteGuardResult<()> {
        if self.api.port == 0 {
            return Err(RouteGuardError::Config("API port cannot be 0".into()));
        }

        if self.api.max_body_size < MIN_BODY_SIZE {
            return Err(RouteGuardError::Config(
                "Max body size must be at least 1024 bytes".into(),
            ));
        }

        if self.api.rate_limit_enabled
            && (self.api.requests_per_second == 0 || self.api.burst_size == 0)
        {
            return Err(RouteGuardError::Config(
                "Rate limit requests_per_second and burst_size must be positive".into(),
            ));
        }

        Url::parse(self.ledger.rpc_url.trim()).map_err(|e| {
            RouteGuardError::Config(format!("Invalid ledger RPC URL '{}': {}", self.ledger.rpc_url, e))
        })?;

        if self.ledger.submit_timeout_secs == 0 || self.ledger.confirmation_timeout_secs == 0 {
            return Err(RouteGuardError::Config("Ledger timeouts must be positive".into()));
        }

        if self.ledger.poll_interval_ms == 0 {
            return Err(RouteGuardError::Config(
                "Ledger poll interval must be positive".into(),
            ));
        }

        self.ledger.relay_credentials()?;

        Ok(())
    }

    pub fn relay_mode(&self) -> RelayMode {
        if self.ledger.is_demo() {
            RelayMode::Demo
        } else {
            RelayMode::Active
        }
    }

    pub fn check_security_warnings(&self) -> Vec<SecurityWarning> {
        let mut warnings = Vec::new();

        if self.relay_mode().is_demo() {
            warnings.push(SecurityWarning {
                severity: WarningSeverity::Medium,
                message: "Relayer is in demo mode. Submissions are not sent to the ledger.".into(),
                recommendation:
                    "Set RELAYER_PRIVATE_KEY, RELAYER_ADDRESS and ROUTEGUARD_CONTRACT_ADDRESS.".into(),
            });
        }

        if !self.api.is_localhost_only() {
            warnings.push(SecurityWarning {
                severity: WarningSeverity::Medium,
                message: format!(
                    "API server bound to non-localhost address: {}",
                    self.api.bind_address
                ),
                recommendation: "Ensure firewall rules restrict access. Use localhost binding if possible."
                    .into(),
            });
        }

        if !self.api.rate_limit_enabled {
            warnings.push(SecurityWarning {
                severity: WarningSeverity::High,
                message: "Rate limiting is disabled. The relayer pays fees for every submission."
                    .into(),
                recommendation: "Enable rate limiting: api.rate_limit_enabled = true".into(),
            });
        }

        warnings
    }

    pub fn log_security_warnings(&self) {
        let warnings = self.check_security_warnings();
        if warnings.is_empty() {
            info!("Security check passed - no warnings");
            return;
        }

        for warning in &warnings {
            match warning.severity {
                WarningSeverity::High => {
                    warn!("SECURITY: {}", warning.message);
                    warn!("  -> {}", warning.recommendation);
                }
                WarningSeverity::Medium => {
                    warn!("{}", warning.message);
                    info!("  -> {}", warning.recommendation);
                }
                WarningSeverity::Low => {
                    info!("Note: {}", warning.message);
                }
            }
        }
    }

    pub fn redacted(&self) -> RedactedConfig {
        RedactedConfig {
            mode: self.relay_mode(),
            network: self.ledger.network.clone(),
            rpc_url: self.ledger.rpc_url.clone(),
            contract: self.ledger.contract_display(),
            relayer_address: self.ledger.relayer_address.clone(),
            private_key_set: self.ledger.relayer_private_key.is_some(),
            api_bind: self.api.bind_address,
            api_port: self.api.port,
            rate_limiting: self.api.rate_limit_enabled,
            log_level: self.logging.level,
        }
    }
}

#[derive(Debug)]
pub struct RedactedConfig {
    pub mode: RelayMode,
    pub network: String,
    pub rpc_url: String,
    pub contract: String,
    pub relayer_address: Option<String>,
    pub private_key_set: bool,
    pub api_bind: IpAddr,
    pub api_port: u16,
    pub rate_limiting: bool,
    pub log_level: LogLevel,
}

impl std::fmt::Display for RedactedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "RouteGuard Relayer Configuration")?;
        writeln!(f, "===============================")?;
        writeln!(f, "Mode: {}", self.mode)?;
        writeln!(f, "Network: {}", self.network)?;
        writeln!(f, "RPC: {}", self.rpc_url)?;
        writeln!(f, "Contract: {}", self.contract)?;
        writeln!(
            f,
            "Relayer: {}",
            self.relayer_address.as_deref().unwrap_or("(unset)")
        )?;
        writeln!(
            f,
            "Private key: {}",
            if self.private_key_set { "<set>" } else { "(unset)" }
        )?;
        writeln!(f, "API: {}:{}", self.api_bind, self.api_port)?;
        writeln!(
            f,
            "Rate limiting: {}",
            if self.rate_limiting { "enabled" } else { "disabled" }
        )?;
        write!(f, "Log level: {}", self.log_level)
    }
}
