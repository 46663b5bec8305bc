//! Shared fixtures for unit tests

use crate::*;
use std::rc::Rc;

pub type TestPool = CollateralPool<Rc<InMemoryAsset>, Rc<InMemoryAsset>, FixedOwner>;

pub struct Harness {
    pub pool: TestPool,
    pub deposit_asset: Rc<InMemoryAsset>,
    pub payout_asset: Rc<InMemoryAsset>,
    pub reserve: Address,
    pub owner: Address,
}

impl Harness {
    pub fn new(premium_rate_bps: u16) -> Self {
        let reserve = Address::new_unique();
        let owner = Address::new_unique();
        let deposit_asset = Rc::new(InMemoryAsset::new(Address::new_unique()));
        let payout_asset = Rc::new(InMemoryAsset::new(Address::new_unique()));
        let pool = CollateralPool::new(
            PoolConfig::new(reserve, premium_rate_bps),
            Rc::clone(&deposit_asset),
            Rc::clone(&payout_asset),
            FixedOwner::new(owner),
        )
        .expect("valid pool config");

        Self {
            pool,
            deposit_asset,
            payout_asset,
            reserve,
            owner,
        }
    }

    /// New participant holding `amount` of the deposit asset, with the
    /// same allowance granted to the reserve
    pub fn funded_participant(&self, amount: u128) -> Address {
        let id = Address::new_unique();
        self.deposit_asset.mint(&id, amount).expect("mint");
        self.deposit_asset.approve(&id, &self.reserve, amount);
        id
    }

    /// One participant per entry, each having deposited that amount
    pub fn deposited(&self, principals: &[u128]) -> Vec<Address> {
        principals
            .iter()
            .map(|amount| {
                let id = self.funded_participant(*amount);
                self.pool.deposit(&id, *amount).expect("deposit");
                id
            })
            .collect()
    }
}
