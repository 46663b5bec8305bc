//! End-to-end ledger flows against in-memory assets

use collateral_pool::*;
use collateral_pool_integration_tests::*;

/// 10^18, the smallest-unit scale of an 18-decimal asset
const WAD: u128 = 1_000_000_000_000_000_000;

/// Route pool logs through the test harness (`RUST_LOG=debug` to see them)
fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ═══════════════════════════════════════════════════════════════════════════
// CONSTRUCTION
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_constructor_sets_globals() {
    let f = PoolFixture::new(2_500, 0);
    assert_eq!(f.pool.premium_rate_bps(), 2_500);
    assert_eq!(f.pool.deposit_asset_id(), Address::derive("deposit-asset"));
    assert_eq!(f.pool.payout_asset_id(), Address::derive("payout-asset"));
    assert_eq!(f.pool.owner(), f.owner);
    assert_eq!(f.pool.reserve_address(), f.reserve);
    assert_eq!(f.pool.total_principal(), 0);
    assert_eq!(f.pool.total_claimable(), 0);
}

#[test]
fn test_constructor_rejects_rate_above_100_percent() {
    let asset = || InMemoryAsset::new(Address::new_unique());
    let result = CollateralPool::new(
        PoolConfig::new(Address::new_unique(), 10_001),
        asset(),
        asset(),
        FixedOwner::new(Address::new_unique()),
    );
    assert!(matches!(result, Err(PoolError::InvalidPremiumRate(10_001))));
}

// ═══════════════════════════════════════════════════════════════════════════
// DEPOSIT / WITHDRAW
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_deposit_then_withdraw_moves_tokens_both_ways() {
    let f = PoolFixture::new(2_500, 1);
    let alice = f.participants[0];
    let amount = 100 * WAD;

    f.pool.deposit(&alice, amount).unwrap();
    assert_eq!(f.pool.principal_of(&alice), amount);
    assert_eq!(f.pool.total_principal(), amount);
    assert_eq!(f.deposit_asset.balance_of(&alice), STARTING_BALANCE - amount);
    assert_eq!(f.deposit_asset.balance_of(&f.reserve), amount);

    f.pool.withdraw(&alice, amount).unwrap();
    assert_eq!(f.pool.principal_of(&alice), 0);
    assert_eq!(f.pool.total_principal(), 0);
    assert_eq!(f.deposit_asset.balance_of(&alice), STARTING_BALANCE);
    assert_eq!(f.deposit_asset.balance_of(&f.reserve), 0);

    assert_eq!(
        f.pool.events(),
        vec![
            PoolEvent::Deposit { participant: alice, amount },
            PoolEvent::Withdraw { participant: alice, amount },
        ]
    );
}

#[test]
fn test_withdraw_more_than_deposit_fails_without_effect() {
    let f = PoolFixture::new(2_500, 2);
    f.deposit_all(&[100, 50]);
    let alice = f.participants[0];
    let reserve_before = f.deposit_asset.balance_of(&f.reserve);

    assert_eq!(f.pool.withdraw(&alice, 110), Err(PoolError::InsufficientBalance));

    assert_eq!(f.pool.principal_of(&alice), 100);
    assert_eq!(f.pool.total_principal(), 150);
    assert_eq!(f.deposit_asset.balance_of(&f.reserve), reserve_before);
    assert_eq!(f.pool.events().len(), 2);
}

// ═══════════════════════════════════════════════════════════════════════════
// LIQUIDATION
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_calculate_payout_quarter_premium() {
    let f = PoolFixture::new(2_500, 0);
    assert_eq!(f.pool.calculate_payout(100), Ok(125));
}

#[test]
fn test_pay_collateral_eighteen_decimals_has_no_dust() {
    init_logging();
    let f = PoolFixture::new(2_500, 3);
    f.deposit_all(&[105 * WAD, 120 * WAD, 75 * WAD]);

    let payout = f.pool.pay_collateral(60 * WAD).unwrap();
    assert_eq!(payout, 75 * WAD);

    let [a, b, c] = [f.participants[0], f.participants[1], f.participants[2]];
    assert_eq!(f.pool.principal_of(&a), 105 * WAD - 21 * WAD);
    assert_eq!(f.pool.principal_of(&b), 120 * WAD - 24 * WAD);
    assert_eq!(f.pool.principal_of(&c), 75 * WAD - 15 * WAD);

    // 26.25, 30 and 18.75 whole tokens
    assert_eq!(f.pool.claimable_of(&a), 26_250_000_000_000_000_000);
    assert_eq!(f.pool.claimable_of(&b), 30 * WAD);
    assert_eq!(f.pool.claimable_of(&c), 18_750_000_000_000_000_000);

    assert_eq!(f.sum_claimable(), 75 * WAD);
    assert_eq!(f.pool.total_claimable(), 75 * WAD);
    assert_eq!(f.sum_principal(), f.pool.total_principal());

    // Liquidation only rebooks; the pooled tokens stay in the reserve
    assert_eq!(f.deposit_asset.balance_of(&f.reserve), 300 * WAD);
    assert_eq!(f.deposit_asset.balance_of(&a), STARTING_BALANCE - 105 * WAD);
    assert!(f.pool.invariants_hold());
}

#[test]
fn test_pay_collateral_requires_principal() {
    let f = PoolFixture::new(2_500, 1);
    assert_eq!(f.pool.pay_collateral(60), Err(PoolError::NoParticipants));

    f.deposit_all(&[10]);
    f.pool.withdraw(&f.participants[0], 10).unwrap();
    assert_eq!(f.pool.pay_collateral(60), Err(PoolError::NoParticipants));
}

#[test]
fn test_liquidation_does_not_move_assets() {
    let f = PoolFixture::new(2_500, 2);
    f.deposit_all(&[500, 500]);
    f.pool.pay_collateral(100).unwrap();

    assert_eq!(f.deposit_asset.balance_of(&f.reserve), 1_000);
    assert_eq!(f.payout_asset.balance_of(&f.reserve), 0);
}

// ═══════════════════════════════════════════════════════════════════════════
// RELEASE
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_release_above_total_transfers_exactly_total() {
    let f = PoolFixture::new(2_500, 3);
    f.deposit_all(&[105, 120, 75]);
    let owner_before = f.deposit_asset.balance_of(&f.owner);

    let released = f.pool.release_deposits(&f.owner, 10_000).unwrap();

    assert_eq!(released, 300);
    assert_eq!(f.pool.total_principal(), 0);
    assert_eq!(f.sum_principal(), 0);
    assert_eq!(f.deposit_asset.balance_of(&f.owner) - owner_before, 300);
    assert_eq!(f.deposit_asset.balance_of(&f.reserve), 0);
}

#[test]
fn test_release_by_non_owner_changes_nothing() {
    let f = PoolFixture::new(2_500, 2);
    f.deposit_all(&[100, 100]);

    let outsider = Address::derive("outsider");
    assert_eq!(f.pool.release_deposits(&outsider, 50), Err(PoolError::Unauthorized));
    assert_eq!(
        f.pool.release_deposits(&f.participants[0], 50),
        Err(PoolError::Unauthorized)
    );

    assert_eq!(f.pool.total_principal(), 200);
    assert_eq!(f.deposit_asset.balance_of(&f.reserve), 200);
}

#[test]
fn test_release_after_liquidation_keeps_conservation() {
    init_logging();
    let f = PoolFixture::new(1_000, 3);
    f.deposit_all(&[7, 11, 13]);
    f.pool.pay_collateral(5).unwrap();
    f.pool.release_deposits(&f.owner, 9).unwrap();

    assert_eq!(f.pool.total_principal(), 31 - 5 - 9);
    assert_eq!(f.sum_principal(), f.pool.total_principal());
    assert_eq!(f.sum_claimable(), f.pool.total_claimable());
    assert!(f.pool.invariants_hold());
}

// ═══════════════════════════════════════════════════════════════════════════
// FULL LIFECYCLE
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_full_lifecycle_event_order() {
    init_logging();
    let f = PoolFixture::new(2_500, 2);
    f.fund_payout_reserve(1_000);
    let [a, b] = [f.participants[0], f.participants[1]];

    f.pool.deposit(&a, 100).unwrap();
    f.pool.deposit(&b, 300).unwrap();
    f.pool.pay_collateral(40).unwrap();
    f.pool.withdraw_claimable(&b, 30).unwrap();
    f.pool.withdraw(&a, 90).unwrap();
    f.pool.release_deposits(&f.owner, 20).unwrap();

    let names: Vec<&str> = f.pool.events().iter().map(|e| e.name()).collect();
    assert_eq!(
        names,
        vec!["Deposit", "Deposit", "CollateralPaid", "ClaimWithdrawn", "Withdraw", "Release"]
    );

    // a: 100 - 10 = 90, withdrawn fully; b: 300 - 30 - 20 = 250
    // payout 50 floors to 12 + 37, the residual unit goes to a
    assert_eq!(f.pool.principal_of(&a), 0);
    assert_eq!(f.pool.principal_of(&b), 250);
    assert_eq!(f.pool.claimable_of(&a), 13);
    assert_eq!(f.pool.claimable_of(&b), 7);
    assert_eq!(f.pool.participants(), vec![b]);
    assert_eq!(f.payout_asset.balance_of(&b), 30);
    assert!(f.pool.invariants_hold());

    let json = serde_json::to_string(&f.pool.drain_events()).unwrap();
    assert!(json.contains("\"event\":\"collateral_paid\""));
    assert!(f.pool.events().is_empty());
}
