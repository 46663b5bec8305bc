//! Pool operations
//!
//! Each module adds one family of mutating operations to `CollateralPool`.
//! All of them follow the same shape:
//! 1. enter the reentrancy guard
//! 2. validate arguments and authorization
//! 3. commit ledger/registry changes (inbound pulls happen before this step)
//! 4. issue outbound transfers, rolling back step 3 on failure
//! 5. emit exactly one event

pub mod claims;
pub mod deposit;
pub mod liquidation;
pub mod release;
pub mod withdraw;
