//! Ledger store: per-participant balances plus pool aggregates
//!
//! Each mutation computes the new participant record and the new aggregate
//! first and writes both only if every checked step succeeded, so a failed
//! call leaves the store untouched and the aggregate never disagrees with
//! the records.

use crate::address::Address;
use crate::error::{PoolError, PoolResult};
use ledger_safety::math::{add_u128, sub_u128};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParticipantRecord {
    pub principal: u128,
    pub claimable: u128,
}

impl ParticipantRecord {
    pub fn is_empty(&self) -> bool {
        self.principal == 0 && self.claimable == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerStore {
    records: HashMap<Address, ParticipantRecord>,
    total_principal: u128,
    total_claimable: u128,
}

/// Saved records for a set of identities plus both aggregates
#[derive(Debug, Clone)]
pub struct LedgerCheckpoint {
    records: Vec<(Address, Option<ParticipantRecord>)>,
    total_principal: u128,
    total_claimable: u128,
}

#[derive(Clone, Copy)]
enum Balance {
    Principal,
    Claimable,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn principal_of(&self, id: &Address) -> u128 {
        self.records.get(id).map(|r| r.principal).unwrap_or(0)
    }

    pub fn claimable_of(&self, id: &Address) -> u128 {
        self.records.get(id).map(|r| r.claimable).unwrap_or(0)
    }

    pub fn total_principal(&self) -> u128 {
        self.total_principal
    }

    pub fn total_claimable(&self) -> u128 {
        self.total_claimable
    }

    pub fn record(&self, id: &Address) -> Option<ParticipantRecord> {
        self.records.get(id).copied()
    }

    /// Every identity with a non-zero balance
    pub fn records(&self) -> impl Iterator<Item = (&Address, &ParticipantRecord)> {
        self.records.iter()
    }

    /// Returns the participant's new principal
    pub fn credit_principal(&mut self, id: &Address, amount: u128) -> PoolResult<u128> {
        self.credit(id, amount, Balance::Principal)
    }

    /// Returns the participant's remaining principal
    pub fn debit_principal(&mut self, id: &Address, amount: u128) -> PoolResult<u128> {
        self.debit(id, amount, Balance::Principal)
    }

    /// Returns the participant's new claimable balance
    pub fn credit_claimable(&mut self, id: &Address, amount: u128) -> PoolResult<u128> {
        self.credit(id, amount, Balance::Claimable)
    }

    /// Returns the participant's remaining claimable balance
    pub fn debit_claimable(&mut self, id: &Address, amount: u128) -> PoolResult<u128> {
        self.debit(id, amount, Balance::Claimable)
    }

    fn credit(&mut self, id: &Address, amount: u128, which: Balance) -> PoolResult<u128> {
        if amount == 0 {
            return Err(PoolError::InvalidAmount);
        }

        let mut record = self.record(id).unwrap_or_default();
        let (field, total) = match which {
            Balance::Principal => (&mut record.principal, self.total_principal),
            Balance::Claimable => (&mut record.claimable, self.total_claimable),
        };
        let new_balance = add_u128(*field, amount).ok_or(PoolError::ArithmeticOverflow)?;
        let new_total = add_u128(total, amount).ok_or(PoolError::ArithmeticOverflow)?;
        *field = new_balance;

        self.commit(id, record, which, new_total);
        Ok(new_balance)
    }

    fn debit(&mut self, id: &Address, amount: u128, which: Balance) -> PoolResult<u128> {
        if amount == 0 {
            return Err(PoolError::InvalidAmount);
        }

        let mut record = self.record(id).unwrap_or_default();
        let (field, total) = match which {
            Balance::Principal => (&mut record.principal, self.total_principal),
            Balance::Claimable => (&mut record.claimable, self.total_claimable),
        };
        let new_balance = sub_u128(*field, amount).ok_or(PoolError::InsufficientBalance)?;
        let new_total = sub_u128(total, amount).ok_or(PoolError::ArithmeticOverflow)?;
        *field = new_balance;

        self.commit(id, record, which, new_total);
        Ok(new_balance)
    }

    fn commit(&mut self, id: &Address, record: ParticipantRecord, which: Balance, total: u128) {
        if record.is_empty() {
            self.records.remove(id);
        } else {
            self.records.insert(*id, record);
        }
        match which {
            Balance::Principal => self.total_principal = total,
            Balance::Claimable => self.total_claimable = total,
        }
    }

    /// Capture the records of `ids` and both aggregates
    pub fn checkpoint<'a, I>(&self, ids: I) -> LedgerCheckpoint
    where
        I: IntoIterator<Item = &'a Address>,
    {
        LedgerCheckpoint {
            records: ids.into_iter().map(|id| (*id, self.record(id))).collect(),
            total_principal: self.total_principal,
            total_claimable: self.total_claimable,
        }
    }

    /// Restore every captured record and both aggregates
    pub fn rollback(&mut self, checkpoint: LedgerCheckpoint) {
        for (id, record) in checkpoint.records {
            match record {
                Some(r) => {
                    self.records.insert(id, r);
                }
                None => {
                    self.records.remove(&id);
                }
            }
        }
        self.total_principal = checkpoint.total_principal;
        self.total_claimable = checkpoint.total_claimable;
    }
}
