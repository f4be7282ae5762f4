//! Deployment configuration
//!
//! Read once at startup and never mutated afterwards.

use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

/// Environment variable overriding the configuration file path.
pub const CONFIG_PATH_ENV: &str = "SWAP_INTENTS_SVM_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config/swap-intents-svm.toml";

fn default_timeout_secs() -> u64 {
    30
}

/// Configuration for one Solana deployment of the intent program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SvmIntentConfig {
    /// Human-readable name for the deployment
    pub name: String,
    /// RPC endpoint URL for Solana chain communication
    pub rpc_url: String,
    /// Network ID the program was initialized with
    pub network_id: String,
    /// Program ID of the intent program (base58)
    pub program_id: String,
    /// HTTP timeout for RPC reads
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl SvmIntentConfig {
    /// Loads configuration from the TOML file.
    ///
    /// The path is taken from `SWAP_INTENTS_SVM_CONFIG_PATH` when set, else
    /// `config/swap-intents-svm.toml`.
    ///
    /// # Returns
    ///
    /// * `Ok(SvmIntentConfig)` - Loaded and validated configuration
    /// * `Err(anyhow::Error)` - Missing file, invalid TOML or invalid values
    pub fn load() -> anyhow::Result<Self> {
        let config_path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        if !Path::new(&config_path).exists() {
            return Err(anyhow::anyhow!(
                "Configuration file '{}' not found. Set {} or create {}.",
                config_path,
                CONFIG_PATH_ENV,
                DEFAULT_CONFIG_PATH
            ));
        }
        Self::load_from_path(&config_path)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: SvmIntentConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        tracing::info!(name = %config.name, network_id = %config.network_id, "Loaded SVM intent config");
        Ok(config)
    }

    /// Validates values that TOML parsing alone does not check.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Configuration is valid
    /// * `Err(anyhow::Error)` - Empty network id, bad URL scheme, invalid program id or zero timeout
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.network_id.is_empty() {
            return Err(anyhow::anyhow!(
                "Configuration error: network_id of '{}' must not be empty",
                self.name
            ));
        }
        if self.network_id.len() > 32 {
            return Err(anyhow::anyhow!(
                "Configuration error: network_id '{}' exceeds 32 bytes and cannot be used as an address seed",
                self.network_id
            ));
        }
        if !(self.rpc_url.starts_with("http://") || self.rpc_url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "Configuration error: rpc_url '{}' must start with http:// or https://",
                self.rpc_url
            ));
        }
        if self.timeout_secs == 0 {
            return Err(anyhow::anyhow!("Configuration error: timeout_secs must be positive"));
        }
        self.program_pubkey()?;
        Ok(())
    }

    pub fn program_pubkey(&self) -> anyhow::Result<Pubkey> {
        Pubkey::from_str(&self.program_id)
            .with_context(|| format!("Invalid program_id '{}' (expected base58)", self.program_id))
    }
}
