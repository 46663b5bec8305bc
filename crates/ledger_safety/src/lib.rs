//! Pure Rust safety model for the collateral pool ledger
//! No I/O, no unwrap/panic, all functions total

pub mod state;
pub mod math;
pub mod allocation;
pub mod helpers;
pub mod transitions;

// Re-export commonly used types
pub use state::*;
pub use allocation::*;
pub use helpers::*;
pub use transitions::*;
