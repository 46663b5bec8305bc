//! Operator configuration

use anyhow::{Context, Result};
use crate::scenario::Amount;
use collateral_pool::{Address, PoolConfig};
use serde::{Deserialize, Serialize};

/// Env var naming the config file
pub const CONFIG_ENV: &str = "POOL_OPERATOR_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "pool-operator.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorConfig {
    /// Reserve account holding pooled deposits
    pub reserve: Address,

    /// Owner allowed to release deposits
    pub owner: Address,

    /// Deposit asset identity
    pub deposit_asset: Address,

    /// Payout asset identity
    pub payout_asset: Address,

    /// Liquidation premium in basis points (2500 = 25%)
    pub premium_rate_bps: u16,

    /// Payout asset minted into the reserve before the scenario runs
    pub payout_reserve_funding: Amount,

    /// Scenario file to execute
    pub scenario_path: String,
}

impl OperatorConfig {
    /// Config file path: `$POOL_OPERATOR_CONFIG` or the default, `~` expanded
    pub fn path() -> String {
        let raw = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        shellexpand::tilde(&raw).into_owned()
    }

    /// Load configuration from TOML file
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &str) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path))?;

        let config: OperatorConfig = toml::from_str(&config_str)
            .context("Failed to parse config TOML")?;

        Ok(config)
    }

    /// Local config with derived addresses and a 25% premium
    pub fn default_local() -> Self {
        Self {
            reserve: Address::derive("reserve"),
            owner: Address::derive("owner"),
            deposit_asset: Address::derive("deposit-asset"),
            payout_asset: Address::derive("payout-asset"),
            premium_rate_bps: 2_500,
            payout_reserve_funding: Amount(1_000_000_000_000),
            scenario_path: "scenario.toml".to_string(),
        }
    }

    /// Pool construction parameters
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig::new(self.reserve, self.premium_rate_bps)
    }

    /// Scenario path with `~` expanded
    pub fn scenario_path(&self) -> String {
        shellexpand::tilde(&self.scenario_path).into_owned()
    }

    /// Write default config to file
    pub fn write_default(path: &str) -> Result<()> {
        let config = Self::default_local();
        let toml_str = toml::to_string_pretty(&config)
            .context("Failed to serialize config")?;

        std::fs::write(path, toml_str)
            .context(format!("Failed to write config to {}", path))?;

        log::info!("Created default config at {}", path);
        Ok(())
    }
}
