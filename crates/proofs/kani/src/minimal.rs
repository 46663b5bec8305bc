//! Concrete Kani proofs: fixed ledgers first, then small symbolic inputs

use ledger_safety::{helpers::*, state::*, transitions::*};

fn funded(principals: &[u128], premium_rate_bps: u16) -> State {
    let mut s = State::with_users(principals.len(), Params { premium_rate_bps });
    for (uid, p) in principals.iter().enumerate() {
        if let Some(next) = deposit(s.clone(), uid, *p) {
            s = next;
        }
    }
    s
}

// === Level 1: Concrete ledgers ===

/// Three depositors, 25% premium, 6000 liquidated
#[kani::proof]
#[kani::unwind(5)]
fn liquidation_concrete_three_users() {
    let s = funded(&[10_500, 12_000, 7_500], 2_500);

    let (after, payout) = match pay_collateral(s, 6_000) {
        Some(r) => r,
        None => panic!("liquidation within principal must succeed"),
    };

    assert_eq!(payout, 7_500);
    assert_eq!(after.users[0].principal, 8_400);
    assert_eq!(after.users[1].principal, 9_600);
    assert_eq!(after.users[2].principal, 6_000);
    assert_eq!(after.users[0].claimable, 2_625);
    assert_eq!(after.users[1].claimable, 3_000);
    assert_eq!(after.users[2].claimable, 1_875);
    assert!(invariants_ok(&after));
}

/// Emptying the first registered account swap-removes it
#[kani::proof]
#[kani::unwind(5)]
fn withdraw_to_zero_concrete() {
    let s = funded(&[100, 200, 300], 0);

    let after = match withdraw(s, 0, 100) {
        Some(s) => s,
        None => panic!("full withdraw must succeed"),
    };

    assert_eq!(after.registry.as_slice(), &[2, 1]);
    assert_eq!(after.reserve, 500);
    assert!(invariants_ok(&after));
}

/// Release larger than the pool drains it and clears the registry
#[kani::proof]
#[kani::unwind(5)]
fn release_everything_concrete() {
    let s = funded(&[30, 70], 1_000);

    let (after, released) = match release(s, 1_000) {
        Some(r) => r,
        None => panic!("non-zero release must succeed"),
    };

    assert_eq!(released, 100);
    assert_eq!(after.total_principal, 0);
    assert_eq!(after.reserve, 0);
    assert!(after.registry.is_empty());
}

// === Level 2: Small bounded symbolic inputs ===

/// Liquidation of any in-range amount keeps every invariant
#[kani::proof]
#[kani::unwind(5)]
fn liquidation_bounded_amount() {
    let s = funded(&[105, 120, 75], 2_500);
    let amount: u8 = kani::any();
    kani::assume(amount > 0);

    if let Some((after, payout)) = pay_collateral(s, amount as u128) {
        kani::assert(after.total_principal == 300 - amount as u128, "Principal drops by amount");
        kani::assert(after.total_claimable == payout, "Claimable equals payout");
        kani::assert(invariants_ok(&after), "Invariants hold");
    }
}

/// Claim withdrawal never goes below zero
#[kani::proof]
#[kani::unwind(5)]
fn claim_bounded_amount() {
    let s = funded(&[40, 60], 5_000);
    let (s, _) = match pay_collateral(s, 100) {
        Some(r) => r,
        None => panic!("full liquidation must succeed"),
    };
    let amount: u8 = kani::any();

    match withdraw_claimable(s.clone(), 0, amount as u128) {
        Some(after) => {
            kani::assert(amount > 0 && amount as u128 <= s.users[0].claimable, "Only covered claims pass");
            kani::assert(after.claims_paid == amount as u128, "Paid claims are tracked");
        }
        None => {
            kani::assert(amount == 0 || amount as u128 > s.users[0].claimable, "Covered claims pass");
        }
    }
}
