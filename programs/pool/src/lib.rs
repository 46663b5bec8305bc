//! Collateral pool ledger
//!
//! Participants deposit a fungible asset into a shared reserve. An operator
//! liquidates a notional amount of pooled principal against a premium-adjusted
//! payout that is booked pro-rata as claimable balance; the owner can release
//! principal out of the reserve.
//!
//! - `state`: participant registry and ledger store, the sole mutation path
//! - `instructions`: deposit/withdraw, liquidation, release and claims
//! - `asset` / `access`: external collaborator seams
//! - `guard`: reentrancy guard held for the lifetime of every mutating call

pub mod access;
pub mod address;
pub mod asset;
pub mod config;
pub mod distribution;
pub mod error;
pub mod events;
pub mod guard;
pub mod instructions;
pub mod pool;
pub mod state;

#[cfg(test)]
mod test_support;

pub use access::*;
pub use address::*;
pub use asset::*;
pub use config::*;
pub use error::*;
pub use events::*;
pub use pool::*;
pub use state::*;
