//! Fungible asset collaborator
//!
//! The ledger never holds asset balances itself; it asks an asset
//! implementation to move funds between identities. Calls take `&self`
//! so an implementation can call back into the pool while a transfer is
//! in flight; the pool's reentrancy guard rejects such calls.

use crate::address::Address;
use crate::error::AssetError;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// Fungible-token capability used for the deposit and payout assets
pub trait FungibleAsset {
    /// Identity of the asset itself
    fn asset_id(&self) -> Address;

    fn balance_of(&self, holder: &Address) -> u128;

    /// Move `amount` of `from`'s own funds to `to`
    fn transfer(&self, from: &Address, to: &Address, amount: u128) -> Result<(), AssetError>;

    /// Move `amount` from `from` to `to` on behalf of `spender`, consuming
    /// an allowance previously granted by `from`
    fn transfer_from(
        &self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<(), AssetError>;
}

impl<T: FungibleAsset + ?Sized> FungibleAsset for Rc<T> {
    fn asset_id(&self) -> Address {
        (**self).asset_id()
    }

    fn balance_of(&self, holder: &Address) -> u128 {
        (**self).balance_of(holder)
    }

    fn transfer(&self, from: &Address, to: &Address, amount: u128) -> Result<(), AssetError> {
        (**self).transfer(from, to, amount)
    }

    fn transfer_from(
        &self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<(), AssetError> {
        (**self).transfer_from(spender, from, to, amount)
    }
}

/// Callback invoked after every successful balance movement, with
/// `(from, to, amount)`
pub type TransferHook = Box<dyn FnMut(&Address, &Address, u128)>;

/// In-memory fungible asset with balances, allowances and failure injection
pub struct InMemoryAsset {
    id: Address,
    balances: RefCell<HashMap<Address, u128>>,
    /// (owner, spender) -> remaining allowance
    allowances: RefCell<HashMap<(Address, Address), u128>>,
    total_supply: Cell<u128>,
    fail_transfers: Cell<bool>,
    hook: RefCell<Option<TransferHook>>,
}

impl InMemoryAsset {
    pub fn new(id: Address) -> Self {
        Self {
            id,
            balances: RefCell::new(HashMap::new()),
            allowances: RefCell::new(HashMap::new()),
            total_supply: Cell::new(0),
            fail_transfers: Cell::new(false),
            hook: RefCell::new(None),
        }
    }

    /// Create `amount` new units for `to`
    pub fn mint(&self, to: &Address, amount: u128) -> Result<(), AssetError> {
        let supply = self
            .total_supply
            .get()
            .checked_add(amount)
            .ok_or(AssetError::BalanceOverflow(*to))?;
        let mut balances = self.balances.borrow_mut();
        let balance = balances.entry(*to).or_insert(0);
        *balance = balance
            .checked_add(amount)
            .ok_or(AssetError::BalanceOverflow(*to))?;
        self.total_supply.set(supply);
        Ok(())
    }

    /// Set the allowance `spender` may move on behalf of `owner`
    pub fn approve(&self, owner: &Address, spender: &Address, amount: u128) {
        self.allowances
            .borrow_mut()
            .insert((*owner, *spender), amount);
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> u128 {
        self.allowances
            .borrow()
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(0)
    }

    pub fn total_supply(&self) -> u128 {
        self.total_supply.get()
    }

    /// Make every subsequent transfer fail with `AssetError::Rejected`
    pub fn set_fail_transfers(&self, fail: bool) {
        self.fail_transfers.set(fail);
    }

    /// Install a callback run after each successful transfer
    pub fn set_transfer_hook(&self, hook: TransferHook) {
        *self.hook.borrow_mut() = Some(hook);
    }

    pub fn clear_transfer_hook(&self) {
        self.hook.borrow_mut().take();
    }

    fn move_balance(&self, from: &Address, to: &Address, amount: u128) -> Result<(), AssetError> {
        if self.fail_transfers.get() {
            return Err(AssetError::Rejected(format!("asset {} is halted", self.id)));
        }

        {
            let mut balances = self.balances.borrow_mut();
            let available = balances.get(from).copied().unwrap_or(0);
            if available < amount {
                return Err(AssetError::InsufficientBalance {
                    holder: *from,
                    available,
                    requested: amount,
                });
            }
            if from != to {
                let to_balance = balances.get(to).copied().unwrap_or(0);
                let credited = to_balance
                    .checked_add(amount)
                    .ok_or(AssetError::BalanceOverflow(*to))?;
                balances.insert(*from, available - amount);
                balances.insert(*to, credited);
            }
        }

        // Hook runs with no borrow held so it may re-enter this asset
        let hook = self.hook.borrow_mut().take();
        if let Some(mut hook) = hook {
            hook(from, to, amount);
            let mut slot = self.hook.borrow_mut();
            if slot.is_none() {
                *slot = Some(hook);
            }
        }

        Ok(())
    }
}

impl FungibleAsset for InMemoryAsset {
    fn asset_id(&self) -> Address {
        self.id
    }

    fn balance_of(&self, holder: &Address) -> u128 {
        self.balances.borrow().get(holder).copied().unwrap_or(0)
    }

    fn transfer(&self, from: &Address, to: &Address, amount: u128) -> Result<(), AssetError> {
        self.move_balance(from, to, amount)
    }

    fn transfer_from(
        &self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<(), AssetError> {
        let available = self.allowance(from, spender);
        if available < amount {
            return Err(AssetError::InsufficientAllowance {
                owner: *from,
                spender: *spender,
                available,
                requested: amount,
            });
        }
        // Spent before the move; restored if the move fails
        self.approve(from, spender, available - amount);
        if let Err(e) = self.move_balance(from, to, amount) {
            let current = self.allowance(from, spender);
            self.approve(from, spender, current.saturating_add(amount));
            return Err(e);
        }
        Ok(())
    }
}
