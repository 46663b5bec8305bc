//! Withdraw: debit principal, then return the deposit asset

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
    /// Debit `amount` of principal and transfer it back to `participant`
    ///
    /// The debit (and registry removal when principal reaches zero) commits
    /// before the transfer is issued; a failed transfer rolls both back.
    pub fn withdraw(&self, participant: &Address, amount: u128) -> PoolResult<()> {
        let _entered = self.guard.enter()?;

        if amount == 0 {
            return Err(PoolError::InvalidAmount);
        }

        if *participant == self.config.reserve {
            return Err(PoolError::ReserveAsParticipant);
        }

        let journal = {
            let mut state = self.state.borrow_mut();
            let mut journal = state.begin([participant]);
            state.ledger.debit_principal(participant, amount)?;
            state.retire_if_empty(participant, &mut journal);
            journal
        };

        if let Err(e) = self
            .deposit_asset
            .transfer(&self.config.reserve, participant, amount)
        {
            log::warn!(
                "Withdraw transfer failed, rolling back: participant={} amount={}: {}",
                participant,
                amount,
                e
            );
            self.state.borrow_mut().rollback(journal);
            return Err(e.into());
        }

        self.emit(PoolEvent::Withdraw {
            participant: *participant,
            amount,
        });
        Ok(())
    }
}
