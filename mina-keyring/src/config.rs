//! Keyring configuration

use serde::{Deserialize, Serialize};

use crate::account::AccountIndex;
use crate::error::{Error, Result};
use crate::network::Network;

pub const DEFAULT_FAUCET_URL: &str = "https://faucet.minaprotocol.com/api/v1/faucet";
pub const DEFAULT_EXPLORER_URL: &str = "https://minascan.io";
pub const DEFAULT_FAUCET_TIMEOUT_SECS: u64 = 30;

/// Faucet endpoint configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaucetConfig {
    /// Faucet API URL
    pub url: String,
    /// Block explorer base URL used to build transaction links
    pub explorer_url: String,
    /// Timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FaucetConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FAUCET_URL.to_string(),
            explorer_url: DEFAULT_EXPLORER_URL.to_string(),
            timeout_secs: DEFAULT_FAUCET_TIMEOUT_SECS,
        }
    }
}

/// Keyring configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyringConfig {
    /// Network keys are derived for
    pub network: Network,
    /// Account used when the caller does not name one
    pub account_index: u32,
    pub faucet: FaucetConfig,
}

impl Default for KeyringConfig {
    fn default() -> Self {
        Self {
            network: Network::Berkeley,
            account_index: 0,
            faucet: FaucetConfig::default(),
        }
    }
}

impl KeyringConfig {
    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| Error::InvalidInput(format!("Invalid configuration: {}", e)))?;

        // Unknown network names fail the same way the registry does
        if let Some(name) = value.get("network").and_then(|n| n.as_str()) {
            name.parse::<Network>()?;
        }

        let config: Self = serde_json::from_value(value)
            .map_err(|e| Error::InvalidInput(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `MINA_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(network) = lookup("MINA_NETWORK") {
            config.network = network.parse()?;
        }
        if let Some(index) = lookup("MINA_ACCOUNT_INDEX") {
            config.account_index = parse_number("MINA_ACCOUNT_INDEX", &index)?;
        }
        if let Some(url) = lookup("MINA_FAUCET_URL") {
            config.faucet.url = url;
        }
        if let Some(url) = lookup("MINA_EXPLORER_URL") {
            config.faucet.explorer_url = url;
        }
        if let Some(timeout) = lookup("MINA_FAUCET_TIMEOUT_SECS") {
            config.faucet.timeout_secs = parse_number("MINA_FAUCET_TIMEOUT_SECS", &timeout)?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        AccountIndex::try_from(self.account_index)?;
        if self.faucet.timeout_secs == 0 {
            return Err(Error::InvalidInput("Faucet timeout must be positive".to_string()));
        }
        Ok(())
    }

    /// The configured default account
    pub fn account(&self) -> Result<AccountIndex> {
        AccountIndex::try_from(self.account_index)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::InvalidInput(format!("{} is not a valid number: {}", key, value)))
}
