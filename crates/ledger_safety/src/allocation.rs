//! Pro-rata allocation with exact conservation
//!
//! `allocate_pro_rata` splits `amount` across `weights` so that:
//! - every slot receives floor(amount * w / Σw), plus at most one residual unit
//! - residual units go to non-zero weights in slice order
//! - Σ allocation == amount exactly
//!
//! The residual after flooring is strictly below the number of non-zero
//! weights, so one pass over the slice always exhausts it.

use crate::math::*;

/// floor(amount * weight / total)
pub fn pro_rata_floor(amount: u128, weight: u128, total: u128) -> Option<u128> {
    mul_div_floor(amount, weight, total)
}

/// Split `amount` across `weights` proportionally, conserving every unit
///
/// Returns `None` when all weights are zero or on arithmetic overflow.
pub fn allocate_pro_rata(amount: u128, weights: &[u128]) -> Option<Vec<u128>> {
    let total = sum_u128(weights)?;
    if total == 0 {
        return None;
    }

    let mut shares = Vec::with_capacity(weights.len());
    for w in weights {
        shares.push(pro_rata_floor(amount, *w, total)?);
    }

    let floored = sum_u128(&shares)?;
    let mut residual = sub_u128(amount, floored)?;

    for (share, w) in shares.iter_mut().zip(weights) {
        if residual == 0 {
            break;
        }
        if *w == 0 {
            continue;
        }
        *share = add_u128(*share, 1)?;
        residual -= 1;
    }

    if residual != 0 {
        return None;
    }

    Some(shares)
}
