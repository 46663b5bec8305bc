//! State space sanitizer - bounds values for Kani exploration

use ledger_safety::state::*;

pub const N_USERS: usize = 3;
pub const MAX_STEPS: u8 = 4;

/// Bounds for tractable verification
const MAX_PRINCIPAL: u128 = 1_000_000u128;
const MAX_CLAIMABLE: u128 = 1_000_000u128;
const MAX_SURPLUS: u128 = 10_000_000u128;

pub trait Sanitize {
    fn sanitize(self) -> Self;
}

impl Sanitize for State {
    /// Clamp values, then rebuild aggregates and registry from the accounts
    /// so the result satisfies every ledger invariant
    fn sanitize(mut self) -> State {
        while self.users.len() > N_USERS {
            self.users.pop();
        }

        for u in self.users.iter_mut() {
            if u.principal > MAX_PRINCIPAL {
                u.principal %= MAX_PRINCIPAL;
            }
            if u.claimable > MAX_CLAIMABLE {
                u.claimable %= MAX_CLAIMABLE;
            }
        }

        // Keep surviving registry order, drop stale uids, append the rest
        let users = &self.users;
        self.registry
            .retain(|uid| users.get(*uid).map_or(false, |u| u.principal > 0));
        let mut i = 0;
        while i < self.registry.len() {
            if self.registry[..i].contains(&self.registry[i]) {
                self.registry.remove(i);
            } else {
                i += 1;
            }
        }
        for (uid, u) in self.users.iter().enumerate() {
            if u.principal > 0 && !self.registry.contains(&uid) {
                let _ = self.registry.try_push(uid);
            }
        }

        self.total_principal = self.users.iter().map(|u| u.principal).sum();
        self.total_claimable = self.users.iter().map(|u| u.claimable).sum();

        let surplus = self.reserve.saturating_sub(self.total_principal) % MAX_SURPLUS;
        self.reserve = self.total_principal + surplus;

        if self.params.premium_rate_bps > 10_000 {
            self.params.premium_rate_bps %= 10_001;
        }

        self
    }
}
