//! Reentrancy guard
//!
//! Every mutating pool operation holds a `GuardToken` for its whole
//! duration, including calls into asset collaborators. A second `enter`
//! while a token is alive fails with `PoolError::Reentrant`. The flag is
//! cleared when the token drops, on success and error paths alike.

use crate::error::PoolError;
use std::cell::Cell;

#[derive(Debug, Default)]
pub struct ReentrancyGuard {
    entered: Cell<bool>,
}

#[must_use = "the guard is released as soon as the token is dropped"]
#[derive(Debug)]
pub struct GuardToken<'a> {
    guard: &'a ReentrancyGuard,
}

impl ReentrancyGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&self) -> Result<GuardToken<'_>, PoolError> {
        if self.entered.replace(true) {
            return Err(PoolError::Reentrant);
        }
        Ok(GuardToken { guard: self })
    }

    pub fn is_entered(&self) -> bool {
        self.entered.get()
    }
}

impl Drop for GuardToken<'_> {
    fn drop(&mut self) {
        self.guard.entered.set(false);
    }
}
