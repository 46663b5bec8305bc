//! Property tests: the pool against the pure ledger model
//!
//! Random operation sequences run against both the real pool and
//! `ledger_safety::transitions`. Both must accept and reject the same
//! operations and agree on every balance, every aggregate and the registry
//! order after each step.

use collateral_pool::*;
use collateral_pool_integration_tests::*;
use ledger_safety::allocation::allocate_pro_rata;
use ledger_safety::helpers::invariants_ok;
use ledger_safety::state::State;
use ledger_safety::transitions as model;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

const USERS: usize = 4;

#[derive(Debug, Clone)]
enum Op {
    Deposit(usize, u128),
    Withdraw(usize, u128),
    PayCollateral(u128),
    Release(u128),
    WithdrawClaimable(usize, u128),
    ReleaseByOutsider(u128),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..USERS, 0u128..5_000).prop_map(|(u, a)| Op::Deposit(u, a)),
        2 => (0..USERS, 0u128..5_000).prop_map(|(u, a)| Op::Withdraw(u, a)),
        2 => (0u128..8_000).prop_map(Op::PayCollateral),
        1 => (0u128..3_000).prop_map(Op::Release),
        1 => (0..USERS, 0u128..2_000).prop_map(|(u, a)| Op::WithdrawClaimable(u, a)),
        1 => (1u128..1_000).prop_map(Op::ReleaseByOutsider),
    ]
}

/// Apply `op` to pool and model; returns whether the pool accepted it
fn step(f: &PoolFixture, state: &mut State, op: &Op) -> Result<bool, TestCaseError> {
    let accepted = match *op {
        Op::Deposit(uid, amount) => {
            let expected = model::deposit(state.clone(), uid, amount);
            let got = f.pool.deposit(&f.participants[uid], amount);
            prop_assert_eq!(got.is_ok(), expected.is_some(), "{:?} -> {:?}", op, got);
            if let Some(next) = expected {
                *state = next;
            }
            got.is_ok()
        }
        Op::Withdraw(uid, amount) => {
            let expected = model::withdraw(state.clone(), uid, amount);
            let got = f.pool.withdraw(&f.participants[uid], amount);
            prop_assert_eq!(got.is_ok(), expected.is_some(), "{:?} -> {:?}", op, got);
            if let Some(next) = expected {
                *state = next;
            }
            got.is_ok()
        }
        Op::PayCollateral(amount) => {
            let expected = model::pay_collateral(state.clone(), amount);
            let got = f.pool.pay_collateral(amount);
            match (&got, expected) {
                (Ok(payout), Some((next, model_payout))) => {
                    prop_assert_eq!(*payout, model_payout);
                    *state = next;
                }
                (Err(_), None) => {}
                (got, expected) => {
                    return Err(TestCaseError::fail(format!(
                        "{:?}: pool {:?}, model {:?}",
                        op,
                        got,
                        expected.map(|(_, p)| p)
                    )));
                }
            }
            got.is_ok()
        }
        Op::Release(amount) => {
            let expected = model::release(state.clone(), amount);
            let got = f.pool.release_deposits(&f.owner, amount);
            match (&got, expected) {
                (Ok(released), Some((next, model_released))) => {
                    prop_assert_eq!(*released, model_released);
                    *state = next;
                }
                (Err(_), None) => {}
                (got, expected) => {
                    return Err(TestCaseError::fail(format!(
                        "{:?}: pool {:?}, model {:?}",
                        op,
                        got,
                        expected.map(|(_, r)| r)
                    )));
                }
            }
            got.is_ok()
        }
        Op::WithdrawClaimable(uid, amount) => {
            let expected = model::withdraw_claimable(state.clone(), uid, amount);
            let got = f.pool.withdraw_claimable(&f.participants[uid], amount);
            prop_assert_eq!(got.is_ok(), expected.is_some(), "{:?} -> {:?}", op, got);
            if let Some(next) = expected {
                *state = next;
            }
            got.is_ok()
        }
        Op::ReleaseByOutsider(amount) => {
            let got = f.pool.release_deposits(&Address::derive("outsider"), amount);
            prop_assert_eq!(got, Err(PoolError::Unauthorized));
            false
        }
    };
    Ok(accepted)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_pool_matches_model(
        premium_rate_bps in 0u16..=10_000,
        ops in prop::collection::vec(op_strategy(), 1..48),
    ) {
        let f = PoolFixture::new(premium_rate_bps, USERS);
        f.fund_payout_reserve(u64::MAX as u128);
        let mut state = f.model();
        let mut expected_events = 0usize;

        for op in &ops {
            if step(&f, &mut state, op)? {
                expected_events += 1;
            }

            prop_assert!(f.matches_model(&state), "diverged after {:?}", op);
            prop_assert!(invariants_ok(&state));
            prop_assert!(f.pool.invariants_hold());
            prop_assert_eq!(f.sum_principal(), f.pool.total_principal());
            prop_assert_eq!(f.sum_claimable(), f.pool.total_claimable());
            prop_assert_eq!(f.pool.events().len(), expected_events);
        }
    }

    #[test]
    fn prop_deposit_withdraw_round_trip(
        initial in 1u128..100_000,
        amount in 1u128..100_000,
    ) {
        let f = PoolFixture::new(2_500, 1);
        let id = f.participants[0];
        f.pool.deposit(&id, initial).unwrap();

        let before = f.pool.principal_of(&id);
        f.pool.deposit(&id, amount).unwrap();
        f.pool.withdraw(&id, amount).unwrap();

        prop_assert_eq!(f.pool.principal_of(&id), before);
        prop_assert_eq!(f.deposit_asset.balance_of(&id), STARTING_BALANCE - initial);
    }

    #[test]
    fn prop_allocation_conserves_and_respects_weights(
        weights in prop::collection::vec(0u128..1_000_000, 1..12),
        fraction_bps in 0u128..=10_000,
    ) {
        let total: u128 = weights.iter().sum();
        prop_assume!(total > 0);
        let amount = total * fraction_bps / 10_000;

        let shares = allocate_pro_rata(amount, &weights).unwrap();
        prop_assert_eq!(shares.iter().sum::<u128>(), amount);
        for (share, weight) in shares.iter().zip(&weights) {
            prop_assert!(share <= weight);
            let floor = amount * weight / total;
            prop_assert!(*share == floor || *share == floor + 1);
        }
    }
}
