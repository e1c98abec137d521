//! Configuration loading from TOML with environment variable resolution.
//!
//! Reads `funding.toml` and deserializes into strongly-typed structs.
//! The fork URL usually embeds a provider API key, so the config only names
//! the env var holding it; the value is resolved at runtime and kept in a
//! `SecretString`.

use alloy::primitives::utils::{parse_units, ParseUnits};
use alloy::primitives::{Address, U256};
use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::Deserialize;
use std::fs;
use std::str::FromStr;

use crate::engine::{FundingPlan, PlanEntry};
use crate::presets::TokenPreset;
use crate::types::HolderList;

/// Default config file, overridable with `FORKFUND_CONFIG`.
pub const DEFAULT_CONFIG_PATH: &str = "funding.toml";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub node: NodeConfig,
    pub run: RunConfig,
    #[serde(default)]
    pub tokens: Vec<TokenConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NodeConfig {
    /// Attach to an already-running fork at this URL.
    #[serde(default)]
    pub rpc_url: Option<String>,
    /// Spawn a local anvil fork instead of attaching.
    #[serde(default)]
    pub spawn: bool,
    /// Env var holding the upstream RPC URL to fork from.
    #[serde(default)]
    pub fork_url_env: Option<String>,
    #[serde(default)]
    pub fork_block: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RunConfig {
    pub recipient: String,
    /// Exit non-zero when any token falls short.
    #[serde(default = "default_true")]
    pub require_full: bool,
    #[serde(default)]
    pub report_path: Option<String>,
}

/// One token to fund. Either names a preset, or spells out
/// `address`/`decimals`/`holders` itself; explicit fields override the
/// preset's.
#[derive(Debug, Deserialize, Clone)]
pub struct TokenConfig {
    #[serde(default)]
    pub preset: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub decimals: Option<u8>,
    #[serde(default)]
    pub holders: Option<Vec<String>>,
    /// Human units, e.g. `"10000"` or `"0.5"`.
    pub amount: String,
    #[serde(default)]
    pub expect_exact_balance: bool,
}

fn default_true() -> bool {
    true
}

/// Problems turning a parsed config into something runnable.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown token preset: {0}")]
    UnknownPreset(String),

    #[error("Invalid address for {field}: {value} ({reason})")]
    InvalidAddress {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Token entry {0} needs either a preset or address, decimals and holders")]
    IncompleteToken(String),

    #[error("Invalid amount {amount} for {symbol}: {reason}")]
    InvalidAmount {
        symbol: String,
        amount: String,
        reason: String,
    },

    #[error("Environment variable not set: {0}")]
    MissingEnv(String),

    #[error("No node configured: set node.rpc_url, or node.spawn with node.fork_url_env")]
    NoNode,
}

/// Where the ledger should come from.
#[derive(Debug)]
pub enum NodeTarget {
    Attach(String),
    SpawnFork {
        fork_url: SecretString,
        fork_block: Option<u64>,
    },
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Resolve an environment variable name to its value, as a secret.
    pub fn resolve_env(env_name: &str) -> Result<SecretString, ConfigError> {
        std::env::var(env_name)
            .map(SecretString::new)
            .map_err(|_| ConfigError::MissingEnv(env_name.to_string()))
    }

    /// Decide whether to attach to a node or spawn a fork.
    pub fn node_target(&self) -> Result<NodeTarget, ConfigError> {
        if self.node.spawn {
            let env = self.node.fork_url_env.as_deref().ok_or(ConfigError::NoNode)?;
            return Ok(NodeTarget::SpawnFork {
                fork_url: Self::resolve_env(env)?,
                fork_block: self.node.fork_block,
            });
        }
        self.node
            .rpc_url
            .clone()
            .map(NodeTarget::Attach)
            .ok_or(ConfigError::NoNode)
    }

    /// Build the funding plan described by `[run]` and `[[tokens]]`.
    pub fn plan(&self) -> Result<FundingPlan, ConfigError> {
        let recipient = parse_address("run.recipient", &self.run.recipient)?;
        let entries = self
            .tokens
            .iter()
            .enumerate()
            .map(|(i, t)| t.to_entry(i))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FundingPlan { recipient, entries })
    }
}

impl TokenConfig {
    fn to_entry(&self, index: usize) -> Result<PlanEntry, ConfigError> {
        let preset = match &self.preset {
            Some(name) => Some(
                TokenPreset::by_symbol(name)
                    .ok_or_else(|| ConfigError::UnknownPreset(name.clone()))?,
            ),
            None => None,
        };

        let label = self
            .symbol
            .clone()
            .or_else(|| preset.map(|p| p.symbol.to_string()))
            .unwrap_or_else(|| format!("tokens[{index}]"));

        let token = match (&self.address, preset) {
            (Some(addr), _) => parse_address(&format!("{label}.address"), addr)?,
            (None, Some(p)) => p.address,
            (None, None) => return Err(ConfigError::IncompleteToken(label)),
        };

        let decimals = self
            .decimals
            .or(preset.map(|p| p.decimals))
            .ok_or_else(|| ConfigError::IncompleteToken(label.clone()))?;

        let holders = match (&self.holders, preset) {
            (Some(list), _) => HolderList::new(
                list.iter()
                    .map(|h| parse_address(&format!("{label}.holders"), h))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            (None, Some(p)) => p.holders(),
            (None, None) => return Err(ConfigError::IncompleteToken(label)),
        };

        let desired = scale_amount(&label, &self.amount, decimals)?;

        Ok(PlanEntry {
            symbol: label,
            token,
            holders,
            desired,
            expect_exact_balance: self.expect_exact_balance,
        })
    }
}

/// Parse a hex address. Any casing is accepted, the way the fixtures
/// normalise through checksumming before use.
fn parse_address(field: &str, value: &str) -> Result<Address, ConfigError> {
    Address::from_str(value.trim()).map_err(|e| ConfigError::InvalidAddress {
        field: field.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Convert a human amount into base units.
fn scale_amount(symbol: &str, amount: &str, decimals: u8) -> Result<U256, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidAmount {
        symbol: symbol.to_string(),
        amount: amount.to_string(),
        reason,
    };
    match parse_units(amount.trim(), decimals).map_err(|e| invalid(e.to_string()))? {
        ParseUnits::U256(value) => Ok(value),
        ParseUnits::I256(_) => Err(invalid("amount must not be negative".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::{USDC, WBTC};
    use alloy::primitives::address;

    const SAMPLE: &str = r#"
        [node]
        rpc_url = "http://127.0.0.1:8545"

        [run]
        recipient = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        report_path = "report.json"

        [[tokens]]
        preset = "usdc"
        amount = "10000"
        expect_exact_balance = true

        [[tokens]]
        preset = "WBTC"
        amount = "0"

        [[tokens]]
        symbol = "DAI"
        address = "0x6B175474E89094C44Da98b954EedeAC495271d0F"
        decimals = 18
        holders = ["0x40ec5B33f54e0E8A33A975908C5BA1c14e5BbbDf"]
        amount = "1.5"
    "#;

    #[test]
    fn test_load_config() {
        let cfg = AppConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(cfg.tokens.len(), 3);
        assert!(cfg.run.require_full);
        assert!(!cfg.node.spawn);
        assert_eq!(cfg.run.report_path.as_deref(), Some("report.json"));
    }

    #[test]
    fn test_plan_resolves_presets_and_units() {
        let plan = AppConfig::from_toml_str(SAMPLE).unwrap().plan().unwrap();

        assert_eq!(
            plan.recipient,
            address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
        );

        let usdc = &plan.entries[0];
        assert_eq!(usdc.symbol, "USDC");
        assert_eq!(usdc.token, USDC.address);
        assert_eq!(usdc.desired, U256::from(10_000u64 * 10u64.pow(6)));
        assert_eq!(usdc.holders.len(), 50);
        assert!(usdc.expect_exact_balance);

        let wbtc = &plan.entries[1];
        assert_eq!(wbtc.token, WBTC.address);
        assert_eq!(wbtc.desired, U256::ZERO);

        let dai = &plan.entries[2];
        assert_eq!(dai.symbol, "DAI");
        assert_eq!(dai.desired, U256::from(15u64) * U256::from(10u64).pow(U256::from(17)));
        assert_eq!(dai.holders.len(), 1);
    }

    #[test]
    fn test_preset_holders_can_be_overridden() {
        let cfg = AppConfig::from_toml_str(
            r#"
            [node]
            rpc_url = "http://localhost:8545"
            [run]
            recipient = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
            [[tokens]]
            preset = "usdc"
            holders = ["0x28C6c06298d514Db089934071355E5743bf21d60"]
            amount = "1"
            "#,
        )
        .unwrap();
        let plan = cfg.plan().unwrap();
        assert_eq!(plan.entries[0].holders.len(), 1);
        assert_eq!(plan.entries[0].desired, U256::from(1_000_000u64));
    }

    #[test]
    fn test_unknown_preset_rejected() {
        let cfg = AppConfig::from_toml_str(
            r#"
            [node]
            rpc_url = "http://localhost:8545"
            [run]
            recipient = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
            [[tokens]]
            preset = "doge"
            amount = "1"
            "#,
        )
        .unwrap();
        assert!(matches!(cfg.plan(), Err(ConfigError::UnknownPreset(p)) if p == "doge"));
    }

    #[test]
    fn test_bad_recipient_rejected() {
        let cfg = AppConfig::from_toml_str(
            r#"
            [node]
            rpc_url = "http://localhost:8545"
            [run]
            recipient = "0x1234"
            "#,
        )
        .unwrap();
        assert!(matches!(cfg.plan(), Err(ConfigError::InvalidAddress { .. })));
    }

    #[test]
    fn test_incomplete_token_rejected() {
        let cfg = AppConfig::from_toml_str(
            r#"
            [node]
            rpc_url = "http://localhost:8545"
            [run]
            recipient = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
            [[tokens]]
            address = "0x6B175474E89094C44Da98b954EedeAC495271d0F"
            amount = "1"
            "#,
        )
        .unwrap();
        assert!(matches!(cfg.plan(), Err(ConfigError::IncompleteToken(_))));
    }

    #[test]
    fn test_scale_amount() {
        assert_eq!(scale_amount("USDC", "10000", 6).unwrap(), U256::from(10_000_000_000u64));
        assert_eq!(scale_amount("WBTC", "0.5", 8).unwrap(), U256::from(50_000_000u64));
        assert!(scale_amount("USDC", "-1", 6).is_err());
        assert!(scale_amount("USDC", "lots", 6).is_err());
    }

    #[test]
    fn test_node_target() {
        let cfg = AppConfig::from_toml_str(SAMPLE).unwrap();
        assert!(matches!(
            cfg.node_target(),
            Ok(NodeTarget::Attach(url)) if url == "http://127.0.0.1:8545"
        ));

        let spawn = AppConfig::from_toml_str(
            r#"
            [node]
            spawn = true
            fork_url_env = "FORKFUND_TEST_UNSET_FORK_URL"
            [run]
            recipient = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
            "#,
        )
        .unwrap();
        assert!(matches!(spawn.node_target(), Err(ConfigError::MissingEnv(_))));
    }
}
