//! Access-control collaborator

use crate::address::Address;
use crate::error::PoolError;

/// Source of the pool owner and guard for owner-only calls
pub trait AccessControl {
    fn owner(&self) -> Address;

    /// `Unauthorized` unless `caller` is the current owner
    fn ensure_owner(&self, caller: &Address) -> Result<(), PoolError> {
        if *caller == self.owner() {
            Ok(())
        } else {
            Err(PoolError::Unauthorized)
        }
    }
}

/// Owner fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedOwner {
    owner: Address,
}

impl FixedOwner {
    pub fn new(owner: Address) -> Self {
        Self { owner }
    }
}

impl AccessControl for FixedOwner {
    fn owner(&self) -> Address {
        self.owner
    }
}
