//! State transition functions - all total, no panics
//!
//! Each transition returns `None` when the real ledger would reject the
//! operation; the caller keeps the previous state in that case.

use crate::allocation::*;
use crate::math::*;
use crate::state::*;
use arrayvec::ArrayVec;

fn register(s: &mut State, uid: usize) -> Option<()> {
    if !s.is_registered(uid) {
        s.registry.try_push(uid).ok()?;
    }
    Some(())
}

fn unregister(s: &mut State, uid: usize) {
    if let Some(pos) = s.registry.iter().position(|r| *r == uid) {
        s.registry.swap_remove(pos);
    }
}

/// Debit `amounts` from the principal of `order`, pairwise, then drop
/// emptied accounts from the registry in `order` sequence
fn debit_in_order(s: &mut State, order: &[usize], amounts: &[u128]) -> Option<()> {
    for (uid, amount) in order.iter().zip(amounts) {
        let u = s.users.get_mut(*uid)?;
        u.principal = sub_u128(u.principal, *amount)?;
    }
    for uid in order {
        if s.users.get(*uid)?.principal == 0 {
            unregister(s, *uid);
        }
    }
    Some(())
}

fn registry_weights(s: &State) -> Option<(ArrayVec<usize, MAX_USERS>, Vec<u128>)> {
    let order = s.registry.clone();
    let mut weights = Vec::with_capacity(order.len());
    for uid in order.iter() {
        weights.push(s.users.get(*uid)?.principal);
    }
    Some((order, weights))
}

/// Deposit funds (increases principal, aggregate and reserve)
pub fn deposit(mut s: State, uid: usize, amount: u128) -> Option<State> {
    if amount == 0 {
        return None;
    }

    let u = s.users.get_mut(uid)?;
    u.principal = add_u128(u.principal, amount)?;
    s.total_principal = add_u128(s.total_principal, amount)?;
    s.reserve = add_u128(s.reserve, amount)?;
    register(&mut s, uid)?;

    Some(s)
}

/// Withdraw principal back to the participant
pub fn withdraw(mut s: State, uid: usize, amount: u128) -> Option<State> {
    if amount == 0 {
        return None;
    }

    let u = s.users.get_mut(uid)?;
    u.principal = sub_u128(u.principal, amount)?;
    let emptied = u.principal == 0;

    s.total_principal = sub_u128(s.total_principal, amount)?;
    s.reserve = sub_u128(s.reserve, amount)?;
    if emptied {
        unregister(&mut s, uid);
    }

    Some(s)
}

/// Liquidate `amount` of pooled principal; returns the booked payout
///
/// Principal shares and payout shares are both allocated pro-rata over the
/// registry order, so Σ debits == amount and Σ credits == payout.
pub fn pay_collateral(mut s: State, amount: u128) -> Option<(State, u128)> {
    if amount == 0 || s.total_principal == 0 || amount > s.total_principal {
        return None;
    }

    let payout = apply_premium_bps(amount, s.params.premium_rate_bps)?;
    let (order, weights) = registry_weights(&s)?;
    let debits = allocate_pro_rata(amount, &weights)?;
    let credits = allocate_pro_rata(payout, &weights)?;

    for (uid, credit) in order.iter().zip(credits.iter()) {
        let u = s.users.get_mut(*uid)?;
        u.claimable = add_u128(u.claimable, *credit)?;
    }
    debit_in_order(&mut s, &order, &debits)?;

    s.total_principal = sub_u128(s.total_principal, amount)?;
    s.total_claimable = add_u128(s.total_claimable, payout)?;

    Some((s, payout))
}

/// Owner release of pooled principal, pro-rated across participants;
/// returns the released amount
pub fn release(mut s: State, amount: u128) -> Option<(State, u128)> {
    if amount == 0 {
        return None;
    }

    let released = min_u128(amount, s.total_principal);
    if released > 0 {
        let (order, weights) = registry_weights(&s)?;
        let debits = allocate_pro_rata(released, &weights)?;
        debit_in_order(&mut s, &order, &debits)?;
        s.total_principal = sub_u128(s.total_principal, released)?;
        s.reserve = sub_u128(s.reserve, released)?;
    }

    Some((s, released))
}

/// Pay out claimable balance in the payout asset
pub fn withdraw_claimable(mut s: State, uid: usize, amount: u128) -> Option<State> {
    if amount == 0 {
        return None;
    }

    let u = s.users.get_mut(uid)?;
    u.claimable = sub_u128(u.claimable, amount)?;
    s.total_claimable = sub_u128(s.total_claimable, amount)?;
    s.claims_paid = add_u128(s.claims_paid, amount)?;

    Some(s)
}
