//! In-memory ledger session driven by scenario steps

use crate::config::OperatorConfig;
use crate::scenario::{resolve_party, AssetKind, Step};
use anyhow::{Context, Result};
use collateral_pool::{Address, CollateralPool, FixedOwner, FungibleAsset, InMemoryAsset, PoolEvent};
use serde::Serialize;
use std::rc::Rc;

pub type OperatorPool = CollateralPool<Rc<InMemoryAsset>, Rc<InMemoryAsset>, FixedOwner>;

/// Balances of one participant in the final report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantReport {
    pub participant: Address,
    pub principal: u128,
    pub claimable: u128,
    pub deposit_balance: u128,
    pub payout_balance: u128,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub premium_rate_bps: u16,
    pub total_principal: u128,
    pub total_claimable: u128,
    pub reserve_deposit_balance: u128,
    pub reserve_payout_balance: u128,
    pub participants: Vec<ParticipantReport>,
    pub invariants_hold: bool,
}

/// Tally of a scenario run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
}

pub struct Session {
    pool: OperatorPool,
    deposit_asset: Rc<InMemoryAsset>,
    payout_asset: Rc<InMemoryAsset>,
    owner: Address,
    reserve: Address,
    /// Every party a step has touched, in first-seen order
    seen: Vec<Address>,
}

impl Session {
    pub fn new(config: &OperatorConfig) -> Result<Self> {
        let deposit_asset = Rc::new(InMemoryAsset::new(config.deposit_asset));
        let payout_asset = Rc::new(InMemoryAsset::new(config.payout_asset));

        let pool = CollateralPool::new(
            config.pool_config(),
            Rc::clone(&deposit_asset),
            Rc::clone(&payout_asset),
            FixedOwner::new(config.owner),
        )
        .context("Failed to create pool")?;

        if config.payout_reserve_funding.0 > 0 {
            payout_asset
                .mint(&config.reserve, config.payout_reserve_funding.0)
                .context("Failed to fund payout reserve")?;
        }

        Ok(Self {
            pool,
            deposit_asset,
            payout_asset,
            owner: config.owner,
            reserve: config.reserve,
            seen: Vec::new(),
        })
    }

    pub fn pool(&self) -> &OperatorPool {
        &self.pool
    }

    fn party(&mut self, label: &str) -> Address {
        let id = resolve_party(label, &self.owner, &self.reserve);
        if id != self.reserve && !self.seen.contains(&id) {
            self.seen.push(id);
        }
        id
    }

    /// Execute one step; returns a one-line outcome for the log
    pub fn apply(&mut self, step: &Step) -> Result<String> {
        match step {
            Step::Mint { to, amount, asset } => {
                let to = self.party(to);
                let target = match asset {
                    AssetKind::Deposit => &self.deposit_asset,
                    AssetKind::Payout => &self.payout_asset,
                };
                target.mint(&to, amount.0).context("Mint failed")?;
                Ok(format!("minted {} to {}", amount.0, to))
            }
            Step::Approve { owner, amount } => {
                let owner = self.party(owner);
                self.deposit_asset.approve(&owner, &self.reserve, amount.0);
                Ok(format!("{} approved reserve for {}", owner, amount.0))
            }
            Step::Deposit { participant, amount } => {
                let id = self.party(participant);
                self.pool.deposit(&id, amount.0).context("Deposit failed")?;
                Ok(format!("principal of {} is now {}", id, self.pool.principal_of(&id)))
            }
            Step::Withdraw { participant, amount } => {
                let id = self.party(participant);
                self.pool.withdraw(&id, amount.0).context("Withdraw failed")?;
                Ok(format!("principal of {} is now {}", id, self.pool.principal_of(&id)))
            }
            Step::PayCollateral { amount } => {
                let payout = self
                    .pool
                    .pay_collateral(amount.0)
                    .context("Liquidation failed")?;
                Ok(format!("liquidated {} for payout {}", amount.0, payout))
            }
            Step::Release { caller, amount } => {
                let caller = match caller {
                    Some(label) => self.party(label),
                    None => self.owner,
                };
                let released = self
                    .pool
                    .release_deposits(&caller, amount.0)
                    .context("Release failed")?;
                Ok(format!("released {} of {} requested", released, amount.0))
            }
            Step::WithdrawClaimable { participant, amount } => {
                let id = self.party(participant);
                self.pool
                    .withdraw_claimable(&id, amount.0)
                    .context("Claim withdrawal failed")?;
                Ok(format!("claimable of {} is now {}", id, self.pool.claimable_of(&id)))
            }
        }
    }

    /// Run every step in order; a failing step is logged and the run continues
    pub fn run(&mut self, steps: &[Step]) -> RunSummary {
        let mut summary = RunSummary::default();

        for (i, step) in steps.iter().enumerate() {
            match self.apply(step) {
                Ok(outcome) => {
                    log::info!("Step {} ({}): {}", i + 1, step, outcome);
                    summary.succeeded += 1;
                }
                Err(e) => {
                    log::error!("Step {} ({}) failed: {:#}", i + 1, step, e);
                    summary.failed += 1;
                }
            }
        }

        summary
    }

    pub fn events(&self) -> Vec<PoolEvent> {
        self.pool.events()
    }

    pub fn report(&self) -> Report {
        let participants = self
            .seen
            .iter()
            .filter(|id| **id != self.owner)
            .map(|id| ParticipantReport {
                participant: *id,
                principal: self.pool.principal_of(id),
                claimable: self.pool.claimable_of(id),
                deposit_balance: self.deposit_asset.balance_of(id),
                payout_balance: self.payout_asset.balance_of(id),
            })
            .collect();

        Report {
            premium_rate_bps: self.pool.premium_rate_bps(),
            total_principal: self.pool.total_principal(),
            total_claimable: self.pool.total_claimable(),
            reserve_deposit_balance: self.deposit_asset.balance_of(&self.reserve),
            reserve_payout_balance: self.payout_asset.balance_of(&self.reserve),
            participants,
            invariants_hold: self.pool.invariants_hold(),
        }
    }
}
