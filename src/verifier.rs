//! Verification tools for step schedules
//!
//! Compares the walked buy and sell totals across the whole schedule against
//! the per-tier closed form `Σ price_i * tickets_i`.

use crate::curves::{Curve, StepSequence};
use anyhow::{anyhow, Result};

/// Verification report for a schedule
#[derive(Debug)]
pub struct Report {
    /// Number of tiers checked
    pub steps: usize,
    /// Total configured supply
    pub capacity: u128,
    /// Buy cost from 0 to capacity, via the quote walk
    pub buy_total: u128,
    /// Sell proceeds from capacity to 0, via the quote walk
    pub sell_total: u128,
    /// Closed-form sum of every tier
    pub closed_total: u128,
    /// Whether prices are non-decreasing
    pub monotone_ok: bool,
}

impl Report {
    /// True when both walks agree with the closed form and prices are monotone
    pub fn is_consistent(&self) -> bool {
        self.monotone_ok && self.buy_total == self.closed_total && self.sell_total == self.closed_total
    }
}

/// Walk the full schedule both ways and check it against the tier sum
pub fn verify_schedule(seq: &StepSequence) -> Result<Report> {
    let mut closed = 0u128;
    let mut prev_px = 0u128;
    let mut monotone_ok = true;

    for i in 0..seq.step_count() {
        let tickets = seq.tickets_in_step(i);
        if tickets == 0 { return Err(anyhow!("step {} issues no tickets", i)); }
        let p = seq.price_of_step(i);
        closed = tickets
            .checked_mul(p)
            .and_then(|c| closed.checked_add(c))
            .ok_or_else(|| anyhow!("tier sum overflows at step {}", i))?;
        if p < prev_px { monotone_ok = false; }
        prev_px = p;
    }

    let capacity = seq.capacity();
    let buy_total = seq.quote_buy(capacity, 0)?;
    let sell_total = seq.quote_sell(capacity, capacity)?;

    Ok(Report {
        steps: seq.step_count(),
        capacity,
        buy_total,
        sell_total,
        closed_total: closed,
        monotone_ok,
    })
}
