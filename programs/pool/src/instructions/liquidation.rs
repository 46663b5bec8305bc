//! Liquidation: pro-rata collateral deduction and premium payout booking
//!
//! No asset moves here. The liquidated principal leaves participant
//! records, and the premium-adjusted payout is booked as claimable against
//! the payout asset, both split over one registry snapshot.

use crate::access::AccessControl;
use crate::asset::FungibleAsset;
use crate::distribution::DistributionPlan;
use crate::error::{PoolError, PoolResult};
use crate::events::PoolEvent;
use crate::pool::CollateralPool;

impl<D, P, A> CollateralPool<D, P, A>
where
    D: FungibleAsset,
    P: FungibleAsset,
    A: AccessControl,
{
    /// Liquidate `liquidation_amount` of pooled principal and book the
    /// payout pro-rata as claimable. Returns the payout.
    ///
    /// Σ principal debits == `liquidation_amount` and Σ claimable credits
    /// == payout, exactly. Fails with `InsufficientBalance` when the amount
    /// exceeds pooled principal.
    pub fn pay_collateral(&self, liquidation_amount: u128) -> PoolResult<u128> {
        let _entered = self.guard.enter()?;

        if liquidation_amount == 0 {
            return Err(PoolError::InvalidAmount);
        }

        let payout = self.calculate_payout(liquidation_amount)?;

        {
            let mut state = self.state.borrow_mut();
            let plan = DistributionPlan::build(&state, liquidation_amount, payout)?;
            let mut journal = state.begin(plan.participants());
            if let Err(e) = plan.apply(&mut state, &mut journal) {
                log::warn!("Collateral distribution aborted: {}", e);
                state.rollback(journal);
                return Err(e);
            }
        }

        self.emit(PoolEvent::CollateralPaid {
            liquidation_amount,
            payout,
        });
        Ok(payout)
    }
}
