//! Claims: pay booked claimable balance out in the payout asset

use crate::access::AccessControl;
use crate::address::Address;
use crate::asset::FungibleAsset;
use crate::error::{PoolError, PoolResult};
use crate::events::PoolEvent;
use crate::pool::CollateralPool;

impl<D, P, A> CollateralPool<D, P, A>
where
    D: FungibleAsset,
    P: FungibleAsset,
    A: AccessControl,
{
    /// Debit `amount` of claimable balance and transfer it in the payout
    /// asset from the reserve to `participant`. Principal and registry
    /// membership are untouched.
    pub fn withdraw_claimable(&self, participant: &Address, amount: u128) -> PoolResult<()> {
        let _entered = self.guard.enter()?;

        if amount == 0 {
            return Err(PoolError::InvalidAmount);
        }

        if *participant == self.config.reserve {
            return Err(PoolError::ReserveAsParticipant);
        }

        let journal = {
            let mut state = self.state.borrow_mut();
            let journal = state.begin([participant]);
            state.ledger.debit_claimable(participant, amount)?;
            journal
        };

        if let Err(e) = self
            .payout_asset
            .transfer(&self.config.reserve, participant, amount)
        {
            log::warn!(
                "Claim transfer failed, rolling back: participant={} amount={}: {}",
                participant,
                amount,
                e
            );
            self.state.borrow_mut().rollback(journal);
            return Err(e.into());
        }

        self.emit(PoolEvent::ClaimWithdrawn {
            participant: *participant,
            amount,
        });
        Ok(())
    }
}
