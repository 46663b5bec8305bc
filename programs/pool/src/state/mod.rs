//! Pool state: ledger store plus participant registry
//!
//! `PoolState` is the single mutation path for balances and membership.
//! Engines open a `Journal` before touching state and hand it back to
//! `rollback` if a later step (usually an outbound transfer) fails.

pub mod ledger;
pub mod registry;

pub use ledger::*;
pub use registry::*;

use crate::address::Address;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolState {
    pub(crate) ledger: LedgerStore,
    pub(crate) registry: ParticipantRegistry,
}

/// Undo log for one operation
#[derive(Debug)]
pub struct Journal {
    ledger: LedgerCheckpoint,
    /// (identity, slot) in removal order
    removals: Vec<(Address, usize)>,
}

impl PoolState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ledger(&self) -> &LedgerStore {
        &self.ledger
    }

    pub fn registry(&self) -> &ParticipantRegistry {
        &self.registry
    }

    /// Start an undo log covering the records of `ids`
    pub(crate) fn begin<'a, I>(&self, ids: I) -> Journal
    where
        I: IntoIterator<Item = &'a Address>,
    {
        Journal {
            ledger: self.ledger.checkpoint(ids),
            removals: Vec::new(),
        }
    }

    /// Drop `id` from the registry once its principal reached zero
    pub(crate) fn retire_if_empty(&mut self, id: &Address, journal: &mut Journal) {
        if self.ledger.principal_of(id) != 0 {
            return;
        }
        if let Some(slot) = self.registry.remove(id) {
            log::debug!("Participant {} left the registry (slot {})", id, slot);
            journal.removals.push((*id, slot));
        }
    }

    /// Undo everything recorded in `journal`
    pub(crate) fn rollback(&mut self, journal: Journal) {
        for (id, slot) in journal.removals.into_iter().rev() {
            self.registry.restore(id, slot);
        }
        self.ledger.rollback(journal.ledger);
    }

    /// Conservation and registry membership invariants
    pub fn invariants_hold(&self) -> bool {
        let mut principal = 0u128;
        let mut claimable = 0u128;
        for (id, record) in self.ledger.records() {
            principal = match principal.checked_add(record.principal) {
                Some(v) => v,
                None => return false,
            };
            claimable = match claimable.checked_add(record.claimable) {
                Some(v) => v,
                None => return false,
            };
            if (record.principal > 0) != self.registry.contains(id) {
                return false;
            }
        }

        principal == self.ledger.total_principal()
            && claimable == self.ledger.total_claimable()
            && self
                .registry
                .iter()
                .all(|id| self.ledger.principal_of(id) > 0)
    }
}
