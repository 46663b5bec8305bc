//! Error types for the pool ledger and its asset collaborators

use crate::address::Address;
use thiserror::Error;

/// Failure reported by a fungible asset collaborator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("insufficient balance: {holder} holds {available}, transfer needs {requested}")]
    InsufficientBalance {
        holder: Address,
        available: u128,
        requested: u128,
    },

    #[error("insufficient allowance: {spender} may move {available} for {owner}, transfer needs {requested}")]
    InsufficientAllowance {
        owner: Address,
        spender: Address,
        available: u128,
        requested: u128,
    },

    #[error("balance overflow for {0}")]
    BalanceOverflow(Address),

    #[error("transfer rejected: {0}")]
    Rejected(String),
}

/// Every failure aborts the operation with no observable ledger mutation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    #[error("amount must be greater than zero")]
    InvalidAmount,

    #[error("insufficient balance")]
    InsufficientBalance,

    #[error("caller is not the owner")]
    Unauthorized,

    #[error("no pooled principal to distribute against")]
    NoParticipants,

    #[error("asset transfer failed: {0}")]
    AssetTransferFailed(#[from] AssetError),

    #[error("premium rate {0} bps exceeds 10000")]
    InvalidPremiumRate(u16),

    #[error("arithmetic overflow")]
    ArithmeticOverflow,

    #[error("re-entrant call rejected")]
    Reentrant,

    #[error("the reserve cannot act as a participant")]
    ReserveAsParticipant,
}

pub type PoolResult<T> = Result<T, PoolError>;
