//! Adversarial step generator

#[cfg(kani)]
use kani::any;
#[cfg(kani)]
use ledger_safety::{state::*, transitions::*};

#[derive(Clone, Copy, Debug)]
pub enum Step {
    Deposit,
    Withdraw,
    PayCollateral,
    Release,
    WithdrawClaimable,
}

#[cfg(kani)]
impl kani::Arbitrary for Step {
    fn any() -> Self {
        let choice: u8 = any();
        match choice % 5 {
            0 => Step::Deposit,
            1 => Step::Withdraw,
            2 => Step::PayCollateral,
            3 => Step::Release,
            _ => Step::WithdrawClaimable,
        }
    }
}

/// One arbitrary operation; a rejected operation leaves `s` as it was
#[cfg(kani)]
pub fn adversary_step(s: State) -> State {
    if s.users.is_empty() {
        return s;
    }

    let uid: usize = (any::<u8>() as usize) % s.users.len();
    let x: u128 = (any::<u16>() as u128) % 1_000;
    let prev = s.clone();

    let next = match any::<Step>() {
        Step::Deposit => deposit(s, uid, x),
        Step::Withdraw => withdraw(s, uid, x),
        Step::PayCollateral => pay_collateral(s, x).map(|(s, _)| s),
        Step::Release => release(s, x).map(|(s, _)| s),
        Step::WithdrawClaimable => withdraw_claimable(s, uid, x),
    };

    next.unwrap_or(prev)
}
