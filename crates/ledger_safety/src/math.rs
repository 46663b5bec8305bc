//! Checked arithmetic helpers - no unwrap, no panics, no lossy casts
//!
//! Every helper returns `None` instead of wrapping or saturating. Callers
//! map `None` to an overflow error and abort the operation.

use primitive_types::U256;

/// 100% expressed in basis points
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Largest premium rate a pool accepts (100%)
pub const MAX_PREMIUM_RATE_BPS: u16 = 10_000;

/// Add u128, `None` on overflow
pub fn add_u128(a: u128, b: u128) -> Option<u128> {
    a.checked_add(b)
}

/// Subtract u128, `None` on underflow
pub fn sub_u128(a: u128, b: u128) -> Option<u128> {
    a.checked_sub(b)
}

/// Minimum of two u128
pub fn min_u128(a: u128, b: u128) -> u128 {
    if a < b { a } else { b }
}

/// floor(a * b / denom) with a 256-bit intermediate product
///
/// Returns `None` if `denom` is zero or the quotient does not fit in u128.
/// The product of two u128 values always fits in 256 bits, so only the
/// final narrowing can fail.
pub fn mul_div_floor(a: u128, b: u128, denom: u128) -> Option<u128> {
    if denom == 0 {
        return None;
    }
    let num = U256::from(a).checked_mul(U256::from(b))?;
    let q = num.checked_div(U256::from(denom))?;
    if q.bits() > 128 {
        return None;
    }
    Some(q.low_u128())
}

/// Premium-adjusted amount: floor(amount * (10000 + rate_bps) / 10000)
pub fn apply_premium_bps(amount: u128, rate_bps: u16) -> Option<u128> {
    let factor = add_u128(BPS_DENOMINATOR, rate_bps as u128)?;
    mul_div_floor(amount, factor, BPS_DENOMINATOR)
}

/// Sum a slice of u128, `None` on overflow
pub fn sum_u128(values: &[u128]) -> Option<u128> {
    values.iter().try_fold(0u128, |acc, v| add_u128(acc, *v))
}
