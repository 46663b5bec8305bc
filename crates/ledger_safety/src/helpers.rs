//! Invariant checking helpers

use crate::state::*;

/// Σ principal over every account, `None` on overflow
pub fn sum_principal(s: &State) -> Option<u128> {
    s.users.iter().try_fold(0u128, |acc, u| acc.checked_add(u.principal))
}

/// Σ claimable over every account, `None` on overflow
pub fn sum_claimable(s: &State) -> Option<u128> {
    s.users.iter().try_fold(0u128, |acc, u| acc.checked_add(u.claimable))
}

/// Conservation: aggregates equal the per-account sums
pub fn conservation_ok(s: &State) -> bool {
    sum_principal(s) == Some(s.total_principal) && sum_claimable(s) == Some(s.total_claimable)
}

/// The registry holds exactly the uids with principal > 0, each once
pub fn registry_consistent(s: &State) -> bool {
    for (i, uid) in s.registry.iter().enumerate() {
        if *uid >= s.users.len() {
            return false;
        }
        if s.registry[i + 1..].contains(uid) {
            return false;
        }
    }
    s.users
        .iter()
        .enumerate()
        .all(|(uid, u)| (u.principal > 0) == s.is_registered(uid))
}

/// A reserve balance covers the principal booked against it
pub fn reserve_covers(reserve: u128, total_principal: u128) -> bool {
    reserve >= total_principal
}

/// The deposit reserve always covers outstanding principal
pub fn reserve_covers_principal(s: &State) -> bool {
    reserve_covers(s.reserve, s.total_principal)
}

/// All invariants at once
pub fn invariants_ok(s: &State) -> bool {
    conservation_ok(s) && registry_consistent(s) && reserve_covers_principal(s)
}

/// Balances and aggregates unchanged between two states
pub fn balances_unchanged(before: &State, after: &State) -> bool {
    before.reserve == after.reserve
        && before.claims_paid == after.claims_paid
        && before.total_principal == after.total_principal
        && before.total_claimable == after.total_claimable
        && before.users == after.users
}
