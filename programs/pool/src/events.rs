//! Observable pool events
//!
//! Exactly one event is appended per successful operation and none on
//! failure, in commit order.

use crate::address::Address;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PoolEvent {
    Deposit {
        participant: Address,
        amount: u128,
    },
    Withdraw {
        participant: Address,
        amount: u128,
    },
    Release {
        owner: Address,
        amount: u128,
    },
    CollateralPaid {
        liquidation_amount: u128,
        payout: u128,
    },
    ClaimWithdrawn {
        participant: Address,
        amount: u128,
    },
}

impl PoolEvent {
    /// Short event name, used in log lines
    pub fn name(&self) -> &'static str {
        match self {
            PoolEvent::Deposit { .. } => "Deposit",
            PoolEvent::Withdraw { .. } => "Withdraw",
            PoolEvent::Release { .. } => "Release",
            PoolEvent::CollateralPaid { .. } => "CollateralPaid",
            PoolEvent::ClaimWithdrawn { .. } => "ClaimWithdrawn",
        }
    }
}
