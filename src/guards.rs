//! Precondition checks shared by the quote and bound calculators

use crate::curves::PriceStep;
use crate::error::{CurveError, CurveResult};

/// Checks that a schedule is well formed.
///
/// `range_to` must be strictly increasing starting above zero, and `price`
/// must never decrease. An empty slice is valid.
pub fn validate_steps(steps: &[PriceStep]) -> CurveResult<()> {
    let Some(first) = steps.first() else { return Ok(()) };
    if first.range_to == 0 {
        return Err(CurveError::ZeroWidthStep { index: 0 });
    }
    for (i, pair) in steps.windows(2).enumerate() {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.range_to <= prev.range_to {
            return Err(CurveError::NonMonotonicRange {
                index: i + 1,
                prev: prev.range_to,
                next: next.range_to,
            });
        }
        if next.price < prev.price {
            return Err(CurveError::DecreasingPrice {
                index: i + 1,
                prev: prev.price,
                next: next.price,
            });
        }
    }
    Ok(())
}

/// Fails when `supply` lies past the end of the schedule
pub fn ensure_supply_within(supply: u128, capacity: u128) -> CurveResult<()> {
    if supply > capacity {
        return Err(CurveError::SupplyOutOfRange { supply, capacity });
    }
    Ok(())
}

/// Coerces a boundary string into a ticket count or token amount.
///
/// Only plain decimal digits are accepted (surrounding whitespace is
/// ignored). Signs, fractions, exponents and values above `u128::MAX` are
/// rejected rather than truncated.
pub fn parse_amount(raw: &str) -> CurveResult<u128> {
    let s = raw.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CurveError::InvalidAmount(raw.to_string()));
    }
    s.parse::<u128>()
        .map_err(|_| CurveError::InvalidAmount(raw.to_string()))
}
