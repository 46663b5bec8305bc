//! Scripted ledger sessions
//!
//! A scenario is an ordered list of steps read from TOML:
//!
//! ```toml
//! [[steps]]
//! op = "deposit"
//! participant = "alice"
//! amount = "10500000000000000000000"
//! ```
//!
//! Parties are base58 addresses or labels; a label is hashed into an address,
//! except `owner` and `reserve` which resolve to the configured accounts.
//! Amounts are TOML integers or decimal strings for values past `i64`.

use anyhow::{Context, Result};
use collateral_pool::Address;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount {0:?} is not a non-negative integer")]
    Invalid(String),
}

/// Amount as written in TOML
#[derive(Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Int(u64),
    Text(String),
}

/// Token amount in the asset's smallest unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "RawAmount", into = "String")]
pub struct Amount(pub u128);

impl TryFrom<RawAmount> for Amount {
    type Error = AmountError;

    fn try_from(raw: RawAmount) -> Result<Self, Self::Error> {
        match raw {
            RawAmount::Int(v) => Ok(Amount(v as u128)),
            RawAmount::Text(s) => s
                .trim()
                .replace('_', "")
                .parse::<u128>()
                .map(Amount)
                .map_err(|_| AmountError::Invalid(s)),
        }
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.0.to_string()
    }
}

/// Which in-memory asset a mint targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    #[default]
    Deposit,
    Payout,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Mint {
        to: String,
        amount: Amount,
        #[serde(default)]
        asset: AssetKind,
    },
    /// Allow the reserve to pull `amount` of deposit asset from `owner`
    Approve { owner: String, amount: Amount },
    Deposit { participant: String, amount: Amount },
    Withdraw { participant: String, amount: Amount },
    PayCollateral { amount: Amount },
    /// Release as `caller`, the configured owner when omitted
    Release {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caller: Option<String>,
        amount: Amount,
    },
    WithdrawClaimable { participant: String, amount: Amount },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Mint { to, amount, asset } => write!(f, "mint {:?} {} to {}", asset, amount.0, to),
            Step::Approve { owner, amount } => write!(f, "approve {} for {}", amount.0, owner),
            Step::Deposit { participant, amount } => write!(f, "deposit {} by {}", amount.0, participant),
            Step::Withdraw { participant, amount } => write!(f, "withdraw {} by {}", amount.0, participant),
            Step::PayCollateral { amount } => write!(f, "pay_collateral {}", amount.0),
            Step::Release { caller, amount } => write!(
                f,
                "release {} by {}",
                amount.0,
                caller.as_deref().unwrap_or("owner")
            ),
            Step::WithdrawClaimable { participant, amount } => {
                write!(f, "withdraw_claimable {} by {}", amount.0, participant)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Scenario {
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn load(path: &str) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .context(format!("Failed to read scenario file: {}", path))?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse scenario TOML")
    }

    /// Two depositors, a liquidation, a claim and an owner release
    pub fn example() -> Self {
        Self {
            steps: vec![
                Step::Mint { to: "alice".into(), amount: Amount(10_000), asset: AssetKind::Deposit },
                Step::Mint { to: "bob".into(), amount: Amount(10_000), asset: AssetKind::Deposit },
                Step::Approve { owner: "alice".into(), amount: Amount(10_000) },
                Step::Approve { owner: "bob".into(), amount: Amount(10_000) },
                Step::Deposit { participant: "alice".into(), amount: Amount(3_000) },
                Step::Deposit { participant: "bob".into(), amount: Amount(7_000) },
                Step::PayCollateral { amount: Amount(1_000) },
                Step::WithdrawClaimable { participant: "alice".into(), amount: Amount(375) },
                Step::Release { caller: None, amount: Amount(2_000) },
                Step::Withdraw { participant: "bob".into(), amount: Amount(4_900) },
            ],
        }
    }

    pub fn write_example(path: &str) -> Result<()> {
        let toml_str = toml::to_string_pretty(&Self::example())
            .context("Failed to serialize scenario")?;

        std::fs::write(path, toml_str)
            .context(format!("Failed to write scenario to {}", path))?;

        log::info!("Created example scenario at {}", path);
        Ok(())
    }
}

/// Resolve a party label to an address
pub fn resolve_party(label: &str, owner: &Address, reserve: &Address) -> Address {
    match label {
        "owner" => *owner,
        "reserve" => *reserve,
        _ => label.parse().unwrap_or_else(|_| Address::derive(label)),
    }
}
