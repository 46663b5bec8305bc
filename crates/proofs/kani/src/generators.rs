//! Generators for arbitrary ledger states (for Kani)

#[cfg(kani)]
use kani::any;
#[cfg(kani)]
use arrayvec::ArrayVec;
#[cfg(kani)]
use ledger_safety::state::*;

// Small bounds keep SAT solving fast
#[cfg(kani)]
const MAX_VAL: u128 = 100;
#[cfg(kani)]
const MAX_GEN_USERS: usize = 3;

#[cfg(kani)]
pub fn any_account() -> Account {
    let principal_raw: u8 = any();
    let claimable_raw: u8 = any();

    Account {
        principal: (principal_raw as u128) % MAX_VAL,
        claimable: (claimable_raw as u128) % MAX_VAL,
    }
}

#[cfg(kani)]
pub fn any_params() -> Params {
    let rate_raw: u16 = any();
    Params {
        premium_rate_bps: rate_raw % 10_001,
    }
}

/// Arbitrary state that already satisfies every ledger invariant
///
/// Registry order is either ascending or rotated by one, so proofs also
/// see a registry that does not follow uid order.
#[cfg(kani)]
pub fn any_state_bounded() -> State {
    let n: usize = (any::<u8>() as usize) % (MAX_GEN_USERS + 1);

    let mut users: ArrayVec<Account, MAX_USERS> = ArrayVec::new();
    for _ in 0..n {
        let _ = users.try_push(any_account());
    }

    let mut registry: ArrayVec<usize, MAX_USERS> = ArrayVec::new();
    for (uid, u) in users.iter().enumerate() {
        if u.principal > 0 {
            let _ = registry.try_push(uid);
        }
    }
    if any::<bool>() && registry.len() > 1 {
        registry.rotate_left(1);
    }

    let total_principal: u128 = users.iter().map(|u| u.principal).sum();
    let total_claimable: u128 = users.iter().map(|u| u.claimable).sum();
    let surplus_raw: u8 = any();

    State {
        reserve: total_principal + (surplus_raw as u128) % MAX_VAL,
        claims_paid: 0,
        total_principal,
        total_claimable,
        users,
        registry,
        params: any_params(),
    }
}
