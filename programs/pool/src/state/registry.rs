//! Enumerable participant registry
//!
//! A hash index from identity to slot, paired with a dense vector of
//! identities. Removal swaps the last identity into the vacated slot, so
//! add/remove/contains are O(1) and enumeration is a plain slice walk.
//! Enumeration order changes after removals but is fixed between them.

use crate::address::Address;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantRegistry {
    index: HashMap<Address, usize>,
    members: Vec<Address>,
}

impl ParticipantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `id` at the end; no-op if already present.
    /// Returns true if the identity was inserted.
    pub fn add(&mut self, id: Address) -> bool {
        if self.index.contains_key(&id) {
            return false;
        }
        self.index.insert(id, self.members.len());
        self.members.push(id);
        true
    }

    /// Remove `id` by swap-with-last. Returns the slot it occupied.
    pub fn remove(&mut self, id: &Address) -> Option<usize> {
        let slot = self.index.remove(id)?;
        self.members.swap_remove(slot);
        if let Some(moved) = self.members.get(slot) {
            self.index.insert(*moved, slot);
        }
        Some(slot)
    }

    /// Exact inverse of `remove(id) == Some(slot)`, provided nothing else
    /// changed in between. Undoing several removals must run in reverse.
    pub(crate) fn restore(&mut self, id: Address, slot: usize) {
        if self.index.contains_key(&id) {
            return;
        }
        let end = self.members.len();
        match self.members.get_mut(slot) {
            Some(current) => {
                let moved = std::mem::replace(current, id);
                self.index.insert(moved, end);
                self.members.push(moved);
                self.index.insert(id, slot);
            }
            None => {
                self.index.insert(id, end);
                self.members.push(id);
            }
        }
    }

    pub fn contains(&self, id: &Address) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Lazy walk over the current members; call again to restart
    pub fn iter(&self) -> std::slice::Iter<'_, Address> {
        self.members.iter()
    }

    /// Owned copy of the current order, fixed for a distribution pass
    pub fn snapshot(&self) -> Vec<Address> {
        self.members.clone()
    }
}

impl<'a> IntoIterator for &'a ParticipantRegistry {
    type Item = &'a Address;
    type IntoIter = std::slice::Iter<'a, Address>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
