//! Kani safety proofs for the ledger invariants

use kani::{any, assume};
use ledger_safety::{allocation::*, helpers::*, math::*, transitions::*};
use crate::{adversary::*, generators::*, sanitizer::*};

/// Conservation: aggregates track per-account sums across short
/// adversarial sequences, and the reserve keeps covering principal
#[kani::proof]
#[kani::unwind(8)]
fn conservation_holds_across_short_adversary_sequences() {
    let mut s = any_state_bounded().sanitize();
    assume(invariants_ok(&s));

    let mut steps: u8 = any();
    steps = (steps % MAX_STEPS) + 1;

    for _ in 0..steps {
        s = adversary_step(s);
        kani::assert(conservation_ok(&s), "Aggregates must equal per-account sums");
        kani::assert(reserve_covers_principal(&s), "Reserve must cover principal");
        kani::assert(registry_consistent(&s), "Registry must hold exactly the funded accounts");
    }
}

/// Pro-rata allocation hands out exactly `amount`, never more than a weight
#[kani::proof]
#[kani::unwind(5)]
fn allocation_is_exact_and_bounded() {
    let w0 = (any::<u8>() as u128) % 50;
    let w1 = (any::<u8>() as u128) % 50;
    let w2 = (any::<u8>() as u128) % 50;
    let weights = [w0, w1, w2];
    let total = w0 + w1 + w2;
    assume(total > 0);

    let amount = (any::<u8>() as u128) % (total + 1);
    let shares = allocate_pro_rata(amount, &weights);
    kani::assert(shares.is_some(), "Allocation with non-zero total must succeed");

    if let Some(shares) = shares {
        kani::assert(sum_u128(&shares) == Some(amount), "Shares must sum to amount");
        for (share, weight) in shares.iter().zip(weights.iter()) {
            kani::assert(share <= weight, "A share never exceeds its weight");
        }
    }
}

/// Liquidation debits exactly `amount` and books exactly the premium payout
#[kani::proof]
#[kani::unwind(8)]
fn pay_collateral_conserves() {
    let s = any_state_bounded().sanitize();
    let amount = (any::<u8>() as u128) % 200;
    let before = s.clone();

    match pay_collateral(s, amount) {
        Some((after, payout)) => {
            kani::assert(
                Some(payout) == apply_premium_bps(amount, before.params.premium_rate_bps),
                "Payout must be the premium-scaled amount",
            );
            kani::assert(
                after.total_principal + amount == before.total_principal,
                "Principal must drop by exactly the liquidated amount",
            );
            kani::assert(
                after.total_claimable == before.total_claimable + payout,
                "Claimable must grow by exactly the payout",
            );
            kani::assert(after.reserve == before.reserve, "Liquidation moves no deposit asset");
            kani::assert(invariants_ok(&after), "Invariants must hold after liquidation");
        }
        None => {
            kani::assert(
                amount == 0 || amount > before.total_principal,
                "Liquidation within total principal must succeed",
            );
        }
    }
}

/// Release never takes more than the pooled principal and keeps invariants
#[kani::proof]
#[kani::unwind(8)]
fn release_is_capped_and_conserves() {
    let s = any_state_bounded().sanitize();
    let amount = (any::<u8>() as u128) % 250;
    let before = s.clone();

    if let Some((after, released)) = release(s, amount) {
        kani::assert(released <= amount, "Release never exceeds the request");
        kani::assert(released <= before.total_principal, "Release never exceeds principal");
        kani::assert(
            after.reserve + released == before.reserve,
            "Reserve must drop by exactly the released amount",
        );
        kani::assert(after.total_claimable == before.total_claimable, "Release leaves claims alone");
        kani::assert(invariants_ok(&after), "Invariants must hold after release");
    } else {
        kani::assert(amount == 0, "Only a zero release is rejected");
    }
}

/// A withdrawal above the recorded principal is rejected outright
#[kani::proof]
fn over_withdraw_is_rejected() {
    let s = any_state_bounded().sanitize();
    assume(!s.users.is_empty());

    let uid: usize = (any::<u8>() as usize) % s.users.len();
    let extra = (any::<u8>() as u128) + 1;
    let amount = s.users[uid].principal + extra;

    kani::assert(withdraw(s, uid, amount).is_none(), "Over-withdraw must be rejected");
}

/// Zero amounts are rejected by every mutating operation
#[kani::proof]
fn zero_amounts_are_rejected() {
    let s = any_state_bounded().sanitize();
    assume(!s.users.is_empty());
    let uid: usize = (any::<u8>() as usize) % s.users.len();

    kani::assert(deposit(s.clone(), uid, 0).is_none(), "Zero deposit rejected");
    kani::assert(withdraw(s.clone(), uid, 0).is_none(), "Zero withdraw rejected");
    kani::assert(pay_collateral(s.clone(), 0).is_none(), "Zero liquidation rejected");
    kani::assert(release(s.clone(), 0).is_none(), "Zero release rejected");
    kani::assert(withdraw_claimable(s, uid, 0).is_none(), "Zero claim rejected");
}

/// Deposits register the participant and raise principal and reserve equally
#[kani::proof]
fn deposit_registers_and_grows_reserve() {
    let s = any_state_bounded().sanitize();
    assume(!s.users.is_empty());

    let uid: usize = (any::<u8>() as usize) % s.users.len();
    let amount = (any::<u8>() as u128) + 1;
    let before = s.clone();

    if let Some(after) = deposit(s, uid, amount) {
        kani::assert(after.is_registered(uid), "Depositor must be registered");
        kani::assert(
            after.users[uid].principal == before.users[uid].principal + amount,
            "Principal grows by the deposit",
        );
        kani::assert(after.reserve == before.reserve + amount, "Reserve grows by the deposit");
        kani::assert(invariants_ok(&after), "Invariants must hold after deposit");
    }
}
