//! Pure state model of the pool ledger

use arrayvec::ArrayVec;

/// Small fixed bound keeps the model tractable for Kani
pub const MAX_USERS: usize = 6;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Account {
    pub principal: u128,
    pub claimable: u128,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Params {
    pub premium_rate_bps: u16,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    /// Deposit asset held by the pool
    pub reserve: u128,
    /// Payout asset paid out to claimants so far
    pub claims_paid: u128,
    pub total_principal: u128,
    pub total_claimable: u128,
    /// Accounts addressed by uid
    pub users: ArrayVec<Account, MAX_USERS>,
    /// Registered uids in enumeration order (dense, swap-remove)
    pub registry: ArrayVec<usize, MAX_USERS>,
    pub params: Params,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            premium_rate_bps: 2_500,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self {
            reserve: 0,
            claims_paid: 0,
            total_principal: 0,
            total_claimable: 0,
            users: ArrayVec::new(),
            registry: ArrayVec::new(),
            params: Params::default(),
        }
    }
}

impl State {
    /// Empty ledger with `n` zeroed accounts (capped at MAX_USERS)
    pub fn with_users(n: usize, params: Params) -> Self {
        let mut s = State {
            params,
            ..State::default()
        };
        for _ in 0..n.min(MAX_USERS) {
            s.users.push(Account::default());
        }
        s
    }

    pub fn is_registered(&self, uid: usize) -> bool {
        self.registry.iter().any(|r| *r == uid)
    }
}
