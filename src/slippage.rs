//! Slippage bounds submitted with on-chain buy and sell calls
//!
//! A buy carries `maxSofAmount`, the most the buyer will pay; a sell carries
//! `minSofAmount`, the least the seller will accept. Tolerances arrive as
//! loosely formatted percentage strings from the UI and are converted to
//! basis points before any arithmetic, so no floating point is involved.
//!
//! The delta `estimate * bps / 10_000` is always rounded down.

use log::warn;

/// Basis points in one whole (100%)
pub const BPS_DENOMINATOR: u128 = 10_000;

/// A parsed slippage tolerance in basis points (1 bp = 0.01%)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SlippageBps(pub u128);

impl SlippageBps {
    /// Parses a percentage string such as `"10"`, `"0.5"` or `" 2.25 "`
    pub fn parse(percent: &str) -> Option<Self> {
        parse_slippage_bps(percent).map(Self)
    }

    /// `floor(estimate * bps / 10_000)`, `None` if it does not fit
    pub fn delta(self, estimate: u128) -> Option<u128> {
        // e = q*D + r, b = u*D + v  =>  floor(e*b/D) = q*b + r*u + floor(r*v/D)
        let (q, r) = (estimate / BPS_DENOMINATOR, estimate % BPS_DENOMINATOR);
        let (u, v) = (self.0 / BPS_DENOMINATOR, self.0 % BPS_DENOMINATOR);
        q.checked_mul(self.0)?
            .checked_add(r.checked_mul(u)?)?
            .checked_add(r * v / BPS_DENOMINATOR)
    }

    /// Estimate raised by this tolerance, saturating at `u128::MAX`
    pub fn apply_max(self, estimate: u128) -> u128 {
        self.delta(estimate)
            .map_or(u128::MAX, |d| estimate.saturating_add(d))
    }

    /// Estimate lowered by this tolerance, clamped at zero
    pub fn apply_min(self, estimate: u128) -> u128 {
        self.delta(estimate)
            .map_or(0, |d| estimate.saturating_sub(d))
    }
}

/// Converts a non-negative decimal percentage into basis points.
///
/// Fractional digits past the second are truncated. Returns `None` for
/// anything that is not a plain decimal number: signs, exponents, `NaN`,
/// empty input, or more digits than fit in a `u128`.
pub fn parse_slippage_bps(percent: &str) -> Option<u128> {
    let s = percent.trim();
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, f),
        None => (s, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    let digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    if !digits(int_part) || !digits(frac_part) {
        return None;
    }

    let whole: u128 = if int_part.is_empty() { 0 } else { int_part.parse().ok()? };
    let mut hundredths: u128 = 0;
    for (i, b) in frac_part.bytes().take(2).enumerate() {
        let d = u128::from(b - b'0');
        hundredths += if i == 0 { d * 10 } else { d };
    }
    whole.checked_mul(100)?.checked_add(hundredths)
}

fn tolerance(percent: Option<&str>) -> Option<SlippageBps> {
    let raw = percent?;
    let bps = SlippageBps::parse(raw);
    if bps.is_none() {
        warn!("ignoring malformed slippage {:?}; using unmodified estimate", raw);
    }
    bps
}

/// Ceiling for a buy: `estimate` raised by `percent`%.
///
/// A missing or malformed `percent` returns `estimate` unchanged.
pub fn compute_max_with_slippage(estimate: u128, percent: Option<&str>) -> u128 {
    match tolerance(percent) {
        Some(bps) => bps.apply_max(estimate),
        None => estimate,
    }
}

/// Floor for a sell: `estimate` lowered by `percent`%, never below zero.
///
/// A missing or malformed `percent` returns `estimate` unchanged.
pub fn compute_min_after_slippage(estimate: u128, percent: Option<&str>) -> u128 {
    match tolerance(percent) {
        Some(bps) => bps.apply_min(estimate),
        None => estimate,
    }
}
