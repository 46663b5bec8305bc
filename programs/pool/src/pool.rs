//! The pool aggregate: configuration, state, collaborators and event log

use crate::access::AccessControl;
use crate::address::Address;
use crate::asset::FungibleAsset;
use crate::config::PoolConfig;
use crate::error::{PoolError, PoolResult};
use crate::events::PoolEvent;
use crate::guard::ReentrancyGuard;
use crate::state::{ParticipantRecord, PoolState};
use ledger_safety::helpers::reserve_covers;
use ledger_safety::math::apply_premium_bps;
use std::cell::RefCell;

/// Collateral pool over a deposit asset `D`, a payout asset `P` and an
/// access-control collaborator `A`
///
/// Operations take `&self`. State sits behind a `RefCell` that is never
/// borrowed across a collaborator call, and the reentrancy guard rejects
/// nested mutating calls, so a collaborator that calls back in sees
/// committed balances and cannot start a second mutation.
pub struct CollateralPool<D, P, A> {
    pub(crate) config: PoolConfig,
    pub(crate) deposit_asset: D,
    pub(crate) payout_asset: P,
    pub(crate) access: A,
    pub(crate) state: RefCell<PoolState>,
    pub(crate) events: RefCell<Vec<PoolEvent>>,
    pub(crate) guard: ReentrancyGuard,
}

impl<D, P, A> CollateralPool<D, P, A>
where
    D: FungibleAsset,
    P: FungibleAsset,
    A: AccessControl,
{
    pub fn new(config: PoolConfig, deposit_asset: D, payout_asset: P, access: A) -> PoolResult<Self> {
        config.validate()?;

        log::info!(
            "Pool created: reserve={} deposit_asset={} payout_asset={} premium_rate_bps={}",
            config.reserve,
            deposit_asset.asset_id(),
            payout_asset.asset_id(),
            config.premium_rate_bps
        );

        Ok(Self {
            config,
            deposit_asset,
            payout_asset,
            access,
            state: RefCell::new(PoolState::new()),
            events: RefCell::new(Vec::new()),
            guard: ReentrancyGuard::new(),
        })
    }

    // ------------------------------------------------------------------
    // Read endpoints
    // ------------------------------------------------------------------

    pub fn principal_of(&self, participant: &Address) -> u128 {
        self.state.borrow().ledger().principal_of(participant)
    }

    pub fn claimable_of(&self, participant: &Address) -> u128 {
        self.state.borrow().ledger().claimable_of(participant)
    }

    pub fn record_of(&self, participant: &Address) -> ParticipantRecord {
        self.state
            .borrow()
            .ledger()
            .record(participant)
            .unwrap_or_default()
    }

    pub fn total_principal(&self) -> u128 {
        self.state.borrow().ledger().total_principal()
    }

    pub fn total_claimable(&self) -> u128 {
        self.state.borrow().ledger().total_claimable()
    }

    pub fn premium_rate_bps(&self) -> u16 {
        self.config.premium_rate_bps
    }

    pub fn deposit_asset_id(&self) -> Address {
        self.deposit_asset.asset_id()
    }

    pub fn payout_asset_id(&self) -> Address {
        self.payout_asset.asset_id()
    }

    pub fn owner(&self) -> Address {
        self.access.owner()
    }

    pub fn reserve_address(&self) -> Address {
        self.config.reserve
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    pub fn deposit_asset(&self) -> &D {
        &self.deposit_asset
    }

    pub fn payout_asset(&self) -> &P {
        &self.payout_asset
    }

    /// Registered participants in current enumeration order
    pub fn participants(&self) -> Vec<Address> {
        self.state.borrow().registry().snapshot()
    }

    pub fn participant_count(&self) -> usize {
        self.state.borrow().registry().len()
    }

    pub fn is_participant(&self, participant: &Address) -> bool {
        self.state.borrow().registry().contains(participant)
    }

    /// Snapshot of the full ledger state
    pub fn state(&self) -> PoolState {
        self.state.borrow().clone()
    }

    /// Ledger invariants plus reserve cover: the reserve's deposit asset
    /// balance is at least the total booked principal
    pub fn invariants_hold(&self) -> bool {
        let reserve_balance = self.deposit_asset.balance_of(&self.config.reserve);
        let state = self.state.borrow();
        state.invariants_hold() && reserve_covers(reserve_balance, state.ledger.total_principal())
    }

    pub fn events(&self) -> Vec<PoolEvent> {
        self.events.borrow().clone()
    }

    /// Take every event recorded so far
    pub fn drain_events(&self) -> Vec<PoolEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// floor(liquidation_amount * (10000 + premium_rate_bps) / 10000)
    pub fn calculate_payout(&self, liquidation_amount: u128) -> PoolResult<u128> {
        apply_premium_bps(liquidation_amount, self.config.premium_rate_bps)
            .ok_or(PoolError::ArithmeticOverflow)
    }

    pub(crate) fn emit(&self, event: PoolEvent) {
        log::info!("{}: {:?}", event.name(), event);
        self.events.borrow_mut().push(event);
    }
}
