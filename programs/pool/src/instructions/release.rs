//! Owner release of pooled principal
//!
//! Released principal is taken from participants pro-rata, with the same
//! floor-plus-residual split as liquidation, so the aggregate keeps equal
//! to the sum of participant principal.

use crate::access::AccessControl;
use crate::address::Address;
use crate::asset::FungibleAsset;
use crate::distribution::DistributionPlan;
use crate::error::{PoolError, PoolResult};
use crate::events::PoolEvent;
use crate::pool::CollateralPool;
use ledger_safety::math::min_u128;

impl<D, P, A> CollateralPool<D, P, A>
where
    D: FungibleAsset,
    P: FungibleAsset,
    A: AccessControl,
{
    /// Transfer up to `amount` of pooled principal to the owner.
    /// Returns the amount actually released, `min(amount, total_principal)`.
    pub fn release_deposits(&self, caller: &Address, amount: u128) -> PoolResult<u128> {
        let _entered = self.guard.enter()?;

        if let Err(e) = self.access.ensure_owner(caller) {
            log::warn!("Release rejected for non-owner {}", caller);
            return Err(e);
        }
        if amount == 0 {
            return Err(PoolError::InvalidAmount);
        }

        let owner = self.access.owner();
        let released = min_u128(amount, self.total_principal());

        if released > 0 {
            let journal = {
                let mut state = self.state.borrow_mut();
                let plan = DistributionPlan::build(&state, released, 0)?;
                let mut journal = state.begin(plan.participants());
                if let Err(e) = plan.apply(&mut state, &mut journal) {
                    state.rollback(journal);
                    return Err(e);
                }
                journal
            };

            if let Err(e) = self
                .deposit_asset
                .transfer(&self.config.reserve, &owner, released)
            {
                log::warn!("Release transfer failed, rolling back: amount={}: {}", released, e);
                self.state.borrow_mut().rollback(journal);
                return Err(e.into());
            }
        }

        self.emit(PoolEvent::Release {
            owner,
            amount: released,
        });
        Ok(released)
    }
}
