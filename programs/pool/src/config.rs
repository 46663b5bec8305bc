//! Pool construction parameters

use crate::address::Address;
use crate::error::PoolError;
use ledger_safety::math::MAX_PREMIUM_RATE_BPS;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Identity the pool holds both assets under
    pub reserve: Address,

    /// Liquidation premium in basis points, immutable once the pool exists
    pub premium_rate_bps: u16,
}

impl PoolConfig {
    pub fn new(reserve: Address, premium_rate_bps: u16) -> Self {
        Self {
            reserve,
            premium_rate_bps,
        }
    }

    pub fn validate(&self) -> Result<(), PoolError> {
        if self.premium_rate_bps > MAX_PREMIUM_RATE_BPS {
            return Err(PoolError::InvalidPremiumRate(self.premium_rate_bps));
        }
        Ok(())
    }
}
