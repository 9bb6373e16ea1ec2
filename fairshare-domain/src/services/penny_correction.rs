//! Exact splitting of one amount across weighted participants.
//!
//! Every share is first floored to whole minor units. The shortfall left by
//! truncation is then handed out one minor unit at a time, heaviest weight
//! first, so that:
//! 1. The shares always sum to the input amount exactly
//! 2. Extra units land on the participants who already pay the most
//! 3. Equal weights are served in encounter order, which keeps results deterministic

use crate::model::{Money, Weight};
use rust_decimal::{Decimal, prelude::ToPrimitive};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightedSplit {
    pub shares: Vec<Money>,
    /// Every weight was zero, so the amount was split evenly instead.
    pub equal_split_fallback: bool,
}

/// Splits `amount` proportionally to `weights`.
///
/// Shares are returned in the order of `weights`. When the weights sum to
/// zero the amount is split evenly across all slots instead.
pub fn split_by_weight(amount: Money, weights: &[Weight]) -> WeightedSplit {
    if weights.is_empty() {
        return WeightedSplit {
            shares: Vec::new(),
            equal_split_fallback: false,
        };
    }

    let total_weight: Weight = weights.iter().copied().sum();
    if total_weight.is_zero() {
        tracing::debug!(
            amount = %amount,
            slot_count = weights.len(),
            "All weights are zero; splitting evenly"
        );
        return WeightedSplit {
            shares: split_even(amount, weights.len()),
            equal_split_fallback: true,
        };
    }

    let amount_units = Decimal::from(amount.minor_units());
    let mut shares: Vec<Money> = weights
        .iter()
        .map(|weight| floor_share(amount_units, *weight, total_weight))
        .collect();

    let distributed: Money = shares.iter().sum();
    distribute_shortfall(&mut shares, weights, amount - distributed);

    WeightedSplit {
        shares,
        equal_split_fallback: false,
    }
}

/// Splits `amount` into `count` equal shares; leftover minor units go to the
/// earliest slots.
pub fn split_even(amount: Money, count: usize) -> Vec<Money> {
    if count == 0 {
        return Vec::new();
    }

    let count_i64 = count as i64;
    let base = amount.minor_units().div_euclid(count_i64);
    let mut shares = vec![Money::from_minor(base); count];
    let weights = vec![Weight::ONE; count];
    let distributed = Money::from_minor(base * count_i64);
    distribute_shortfall(&mut shares, &weights, amount - distributed);
    shares
}

fn floor_share(amount_units: Decimal, weight: Weight, total_weight: Weight) -> Money {
    // weight <= total_weight, so the floored value never exceeds the amount
    let exact = amount_units * weight.value() / total_weight.value();
    Money::from_minor(exact.floor().to_i64().unwrap_or_default())
}

/// Adds `shortfall` minor units to `shares`, one unit per slot in order of
/// descending weight, cycling when the shortfall exceeds the slot count.
fn distribute_shortfall(shares: &mut [Money], weights: &[Weight], shortfall: Money) {
    debug_assert!(!shortfall.is_negative());
    debug_assert_eq!(shares.len(), weights.len());
    if shortfall.is_zero() || shares.is_empty() {
        return;
    }

    let mut order: Vec<usize> = (0..shares.len()).collect();
    // stable: equal weights keep encounter order
    order.sort_by(|&lhs, &rhs| weights[rhs].cmp(&weights[lhs]));

    let slot_count = order.len() as i64;
    let full_rounds = shortfall.minor_units() / slot_count;
    let partial_round = (shortfall.minor_units() % slot_count) as usize;

    for (rank, &idx) in order.iter().enumerate() {
        let mut extra = full_rounds;
        if rank < partial_round {
            extra += 1;
        }
        shares[idx] += Money::from_minor(extra);
    }
}
