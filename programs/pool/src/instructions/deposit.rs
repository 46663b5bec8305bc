//! Deposit: pull the deposit asset from the participant, then credit principal

use crate::access::AccessControl;
use crate::address::Address;
use crate::asset::FungibleAsset;
use crate::error::{PoolError, PoolResult};
use crate::events::PoolEvent;
use crate::pool::CollateralPool;
use ledger_safety::math::add_u128;

impl<D, P, A> CollateralPool<D, P, A>
where
    D: FungibleAsset,
    P: FungibleAsset,
    A: AccessControl,
{
    /// Pull `amount` of the deposit asset from `participant` into the
    /// reserve and credit it as principal
    ///
    /// The pull needs an allowance from `participant` to the reserve. If it
    /// fails nothing is credited.
    pub fn deposit(&self, participant: &Address, amount: u128) -> PoolResult<()> {
        let _entered = self.guard.enter()?;

        if amount == 0 {
            return Err(PoolError::InvalidAmount);
        }

        if *participant == self.config.reserve {
            return Err(PoolError::ReserveAsParticipant);
        }

        // Refuse before moving funds if the credit could not be booked
        add_u128(self.total_principal(), amount).ok_or(PoolError::ArithmeticOverflow)?;

        let reserve = self.config.reserve;
        if let Err(e) = self
            .deposit_asset
            .transfer_from(&reserve, participant, &reserve, amount)
        {
            log::warn!("Deposit pull failed: participant={} amount={}: {}", participant, amount, e);
            return Err(e.into());
        }

        {
            let mut state = self.state.borrow_mut();
            state.ledger.credit_principal(participant, amount)?;
            state.registry.add(*participant);
        }

        self.emit(PoolEvent::Deposit {
            participant: *participant,
            amount,
        });
        Ok(())
    }
}
