//! Pro-rata distribution plans
//!
//! A plan is computed from one registry snapshot before any record is
//! touched. Principal shares and payout shares are each allocated with
//! floor division plus a residual pass, so their sums match the requested
//! totals exactly.

use crate::address::Address;
use crate::error::{PoolError, PoolResult};
use crate::state::{Journal, PoolState};
use ledger_safety::allocation::allocate_pro_rata;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub participant: Address,
    pub principal_share: u128,
    pub payout_share: u128,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionPlan {
    pub allocations: Vec<Allocation>,
    pub principal_total: u128,
    pub payout_total: u128,
}

impl DistributionPlan {
    /// Debit `principal_amount` and credit `payout` across every registered
    /// participant, weighted by current principal
    pub fn build(state: &PoolState, principal_amount: u128, payout: u128) -> PoolResult<Self> {
        let snapshot_total = state.ledger().total_principal();
        if snapshot_total == 0 {
            return Err(PoolError::NoParticipants);
        }
        if principal_amount > snapshot_total {
            return Err(PoolError::InsufficientBalance);
        }

        let participants = state.registry().snapshot();
        let weights: Vec<u128> = participants
            .iter()
            .map(|p| state.ledger().principal_of(p))
            .collect();
        debug_assert_eq!(weights.iter().sum::<u128>(), snapshot_total);

        let debits =
            allocate_pro_rata(principal_amount, &weights).ok_or(PoolError::ArithmeticOverflow)?;
        let credits = if payout == 0 {
            vec![0; weights.len()]
        } else {
            allocate_pro_rata(payout, &weights).ok_or(PoolError::ArithmeticOverflow)?
        };

        let mut allocations = Vec::with_capacity(participants.len());
        for (((participant, weight), principal_share), payout_share) in participants
            .into_iter()
            .zip(weights)
            .zip(debits)
            .zip(credits)
        {
            if principal_share > weight {
                return Err(PoolError::InsufficientBalance);
            }
            allocations.push(Allocation {
                participant,
                principal_share,
                payout_share,
            });
        }

        log::debug!(
            "Distribution plan: {} participants, principal {}, payout {}",
            allocations.len(),
            principal_amount,
            payout
        );

        Ok(Self {
            allocations,
            principal_total: principal_amount,
            payout_total: payout,
        })
    }

    /// Apply every allocation, then retire emptied participants in
    /// snapshot order. On error the caller rolls `journal` back.
    pub(crate) fn apply(&self, state: &mut PoolState, journal: &mut Journal) -> PoolResult<()> {
        for a in &self.allocations {
            if a.principal_share > 0 {
                state.ledger.debit_principal(&a.participant, a.principal_share)?;
            }
            if a.payout_share > 0 {
                state.ledger.credit_claimable(&a.participant, a.payout_share)?;
            }
        }
        for a in &self.allocations {
            state.retire_if_empty(&a.participant, journal);
        }
        Ok(())
    }

    pub fn participants(&self) -> impl Iterator<Item = &Address> {
        self.allocations.iter().map(|a| &a.participant)
    }
}
