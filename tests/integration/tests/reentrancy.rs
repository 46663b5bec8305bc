//! Re-entrant calls from inside asset transfers
//!
//! The in-memory asset runs a hook after each balance movement. Here the
//! hook calls back into the pool while the outer operation still holds
//! the reentrancy guard.

use collateral_pool::*;
use collateral_pool_integration_tests::*;
use std::cell::RefCell;
use std::rc::Rc;

type Observed = Rc<RefCell<Vec<(PoolResult<()>, u128)>>>;

/// Install a hook that tries `withdraw(victim, 1)` and records the result
/// together with the victim's principal as seen from inside the transfer
fn install_withdraw_hook(f: &PoolFixture, victim: Address) -> Observed {
    let observed: Observed = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&observed);
    let weak = Rc::downgrade(&f.pool);

    f.deposit_asset.set_transfer_hook(Box::new(move |_: &Address, _: &Address, _: u128| {
        if let Some(pool) = weak.upgrade() {
            let result = pool.withdraw(&victim, 1);
            sink.borrow_mut().push((result, pool.principal_of(&victim)));
        }
    }));
    observed
}

#[test]
fn test_reentrant_withdraw_rejected_and_sees_committed_debit() {
    let f = PoolFixture::new(2_500, 1);
    let alice = f.participants[0];
    f.deposit_all(&[100]);
    let observed = install_withdraw_hook(&f, alice);

    f.pool.withdraw(&alice, 100).unwrap();

    let observed = observed.borrow();
    assert_eq!(observed.len(), 1);
    assert_eq!(observed[0].0, Err(PoolError::Reentrant));
    // the ledger was already debited when the transfer ran
    assert_eq!(observed[0].1, 0);

    assert_eq!(f.pool.principal_of(&alice), 0);
    assert_eq!(f.deposit_asset.balance_of(&alice), STARTING_BALANCE);
    assert_eq!(f.pool.events().len(), 2);
}

#[test]
fn test_reentrant_call_during_deposit_pull_rejected() {
    let f = PoolFixture::new(2_500, 1);
    let alice = f.participants[0];
    f.deposit_all(&[50]);
    let observed = install_withdraw_hook(&f, alice);

    f.pool.deposit(&alice, 25).unwrap();

    assert_eq!(observed.borrow()[0].0, Err(PoolError::Reentrant));
    assert_eq!(f.pool.principal_of(&alice), 75);
    assert!(f.pool.invariants_hold());
}

#[test]
fn test_reentrant_liquidation_during_release_rejected() {
    let f = PoolFixture::new(2_500, 2);
    f.deposit_all(&[100, 100]);

    let results: Rc<RefCell<Vec<PoolResult<u128>>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&results);
    let weak = Rc::downgrade(&f.pool);
    f.deposit_asset.set_transfer_hook(Box::new(move |_: &Address, _: &Address, _: u128| {
        if let Some(pool) = weak.upgrade() {
            sink.borrow_mut().push(pool.pay_collateral(10));
        }
    }));

    assert_eq!(f.pool.release_deposits(&f.owner, 50), Ok(50));
    let expected: Vec<PoolResult<u128>> = vec![Err(PoolError::Reentrant)];
    assert_eq!(*results.borrow(), expected);
    assert_eq!(f.pool.total_principal(), 150);
    assert_eq!(f.pool.total_claimable(), 0);
}

#[test]
fn test_guard_released_after_failed_operation() {
    let f = PoolFixture::new(2_500, 1);
    let alice = f.participants[0];
    f.deposit_all(&[10]);

    f.deposit_asset.set_fail_transfers(true);
    assert!(f.pool.withdraw(&alice, 10).is_err());
    f.deposit_asset.set_fail_transfers(false);

    assert_eq!(f.pool.withdraw(&alice, 10), Ok(()));
    assert_eq!(f.pool.principal_of(&alice), 0);
}

#[test]
fn test_reads_allowed_during_transfer() {
    let f = PoolFixture::new(2_500, 2);
    f.deposit_all(&[30, 70]);

    let seen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);
    let weak = Rc::downgrade(&f.pool);
    f.deposit_asset.set_transfer_hook(Box::new(move |_: &Address, _: &Address, _: u128| {
        if let Some(pool) = weak.upgrade() {
            *sink.borrow_mut() = Some((pool.total_principal(), pool.participants().len()));
        }
    }));

    f.pool.withdraw(&f.participants[0], 30).unwrap();
    assert_eq!(*seen.borrow(), Some((70, 1)));
}
