//! Stepped bonding curve: price tiers and exact buy/sell quotes

use crate::error::{CurveError, CurveResult};
use crate::guards::{ensure_supply_within, validate_steps};
use log::debug;
use serde::{Deserialize, Serialize};

/// Generic interface for curves priced in discrete flat tiers
pub trait Curve {
    /// Returns the name/type of this curve implementation
    fn name(&self) -> &'static str;

    /// Number of configured tiers
    fn step_count(&self) -> usize;

    /// Returns the unit price of tier i
    fn price_of_step(&self, i: usize) -> u128;

    /// Returns the number of tickets issued at tier i
    fn tickets_in_step(&self, i: usize) -> u128;

    /// Cumulative supply covered by tiers 0 to n-1
    fn cumulative_supply(&self, n: usize) -> u128 {
        (0..n.min(self.step_count())).map(|i| self.tickets_in_step(i)).sum()
    }
}

/// One tier of the bonding curve.
///
/// Covers tickets `(previous.range_to, range_to]` at a flat `price`; the first
/// tier starts at supply 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "crate::schedule::RawStep")]
pub struct PriceStep {
    /// Unit price in the smallest indivisible token unit
    pub price: u128,
    /// Cumulative supply at which this tier ends
    #[serde(rename = "rangeTo")]
    pub range_to: u128,
}

impl PriceStep {
    /// Creates a tier ending at `range_to`
    pub fn new(price: u128, range_to: u128) -> Self {
        Self { price, range_to }
    }
}

/// Where a given supply sits on the curve
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CurvePosition {
    /// Tier that prices the next ticket bought
    pub step_index: usize,
    /// Price of the next ticket bought
    pub price: u128,
    /// Tickets left at `price` before the next tier starts
    pub remaining_in_step: u128,
    /// Price of the following tier, if any
    pub next_price: Option<u128>,
}

/// Validated, read-only snapshot of a step schedule.
///
/// The snapshot must come from a single chain state; the engine never
/// refreshes or caches it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PriceStep>", into = "Vec<PriceStep>")]
pub struct StepSequence {
    steps: Vec<PriceStep>,
}

impl TryFrom<Vec<PriceStep>> for StepSequence {
    type Error = CurveError;

    fn try_from(steps: Vec<PriceStep>) -> CurveResult<Self> {
        Self::new(steps)
    }
}

impl From<StepSequence> for Vec<PriceStep> {
    fn from(seq: StepSequence) -> Self {
        seq.steps
    }
}

impl StepSequence {
    /// Validates and wraps a schedule ordered by ascending `range_to`
    pub fn new(steps: Vec<PriceStep>) -> CurveResult<Self> {
        validate_steps(&steps)?;
        Ok(Self { steps })
    }

    /// A schedule with no tiers; every quote on it is zero
    pub fn empty() -> Self {
        Self::default()
    }

    /// The underlying tiers
    pub fn steps(&self) -> &[PriceStep] {
        &self.steps
    }

    /// True when no tiers are configured
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Total supply the schedule can issue
    pub fn capacity(&self) -> u128 {
        self.steps.last().map_or(0, |s| s.range_to)
    }

    /// Tickets still buyable from `supply`
    pub fn remaining_capacity(&self, supply: u128) -> u128 {
        self.capacity().saturating_sub(supply)
    }

    /// Index of the tier that prices the next ticket bought at `supply`.
    ///
    /// `None` when the schedule is empty or sold out.
    pub fn step_index_at(&self, supply: u128) -> Option<usize> {
        self.steps.iter().position(|s| s.range_to > supply)
    }

    /// Price of the next ticket bought at `supply`
    pub fn spot_price(&self, supply: u128) -> Option<u128> {
        self.step_index_at(supply).map(|i| self.steps[i].price)
    }

    /// Tier, price and room left in the tier at `supply`
    pub fn position(&self, supply: u128) -> Option<CurvePosition> {
        let i = self.step_index_at(supply)?;
        let step = self.steps[i];
        Some(CurvePosition {
            step_index: i,
            price: step.price,
            remaining_in_step: step.range_to - supply,
            next_price: self.steps.get(i + 1).map(|s| s.price),
        })
    }

    /// Cost of buying `amount` tickets from `current_supply`.
    ///
    /// Returns 0 for a zero amount or an empty schedule. Buying past the last
    /// tier is [`CurveError::InsufficientLiquidity`].
    pub fn quote_buy(&self, amount: u128, current_supply: u128) -> CurveResult<u128> {
        match self.try_quote_buy(amount, current_supply) {
            Err(CurveError::EmptySchedule) => Ok(0),
            other => other,
        }
    }

    /// Proceeds of selling `amount` tickets from `current_supply`.
    ///
    /// Returns 0 for a zero amount, an empty schedule, or when `amount`
    /// exceeds `current_supply`. Callers must read the last case as a
    /// rejection.
    pub fn quote_sell(&self, amount: u128, current_supply: u128) -> CurveResult<u128> {
        match self.try_quote_sell(amount, current_supply) {
            Err(CurveError::EmptySchedule | CurveError::InsufficientSupply { .. }) => Ok(0),
            other => other,
        }
    }

    /// Like [`quote_buy`](Self::quote_buy) but an empty schedule is an error
    pub fn try_quote_buy(&self, amount: u128, current_supply: u128) -> CurveResult<u128> {
        buy_walk(&self.steps, amount, current_supply)
    }

    /// Like [`quote_sell`](Self::quote_sell) but an empty schedule or an
    /// oversell is an error
    pub fn try_quote_sell(&self, amount: u128, current_supply: u128) -> CurveResult<u128> {
        sell_walk(&self.steps, amount, current_supply)
    }

    /// Largest ticket count whose buy cost from `current_supply` fits `budget`
    pub fn max_buyable(&self, budget: u128, current_supply: u128) -> u128 {
        let mut cursor = current_supply;
        let mut left = budget;
        let mut count: u128 = 0;
        for step in self.steps.iter().filter(|s| s.range_to > current_supply) {
            let room = step.range_to - cursor;
            let take = match left.checked_div(step.price) {
                Some(affordable) => affordable.min(room),
                None => room, // free tier
            };
            // take * price <= left, so neither operation can overflow
            left -= take * step.price;
            count += take;
            cursor += take;
            if take < room {
                break;
            }
        }
        count
    }
}

impl Curve for StepSequence {
    fn name(&self) -> &'static str { "Stepped(flat tiers)" }
    fn step_count(&self) -> usize { self.steps.len() }
    fn price_of_step(&self, i: usize) -> u128 { self.steps[i].price }
    fn tickets_in_step(&self, i: usize) -> u128 {
        let lower = if i == 0 { 0 } else { self.steps[i - 1].range_to };
        self.steps[i].range_to - lower
    }
}

/// Cost of buying `amount` tickets from `current_supply` on a raw schedule.
///
/// The schedule is validated first; see [`StepSequence::quote_buy`].
pub fn quote_buy(amount: u128, current_supply: u128, steps: &[PriceStep]) -> CurveResult<u128> {
    validate_steps(steps)?;
    match buy_walk(steps, amount, current_supply) {
        Err(CurveError::EmptySchedule) => Ok(0),
        other => other,
    }
}

/// Proceeds of selling `amount` tickets from `current_supply` on a raw
/// schedule.
///
/// The schedule is validated first; see [`StepSequence::quote_sell`].
pub fn quote_sell(amount: u128, current_supply: u128, steps: &[PriceStep]) -> CurveResult<u128> {
    validate_steps(steps)?;
    match sell_walk(steps, amount, current_supply) {
        Err(CurveError::EmptySchedule | CurveError::InsufficientSupply { .. }) => Ok(0),
        other => other,
    }
}

#[inline]
fn accumulate(total: u128, take: u128, price: u128) -> CurveResult<u128> {
    take.checked_mul(price)
        .and_then(|cost| total.checked_add(cost))
        .ok_or(CurveError::Overflow)
}

fn buy_walk(steps: &[PriceStep], amount: u128, current_supply: u128) -> CurveResult<u128> {
    if amount == 0 {
        return Ok(0);
    }
    let last = steps.last().ok_or(CurveError::EmptySchedule)?;

    let mut cursor = current_supply;
    let mut remaining = amount;
    let mut total: u128 = 0;
    for (i, step) in steps.iter().enumerate() {
        if step.range_to <= cursor {
            continue;
        }
        let take = remaining.min(step.range_to - cursor);
        total = accumulate(total, take, step.price)?;
        debug!("buy: step {} takes {} @ {}", i, take, step.price);
        cursor += take;
        remaining -= take;
        if remaining == 0 {
            return Ok(total);
        }
    }
    Err(CurveError::InsufficientLiquidity {
        requested: amount,
        available: last.range_to.saturating_sub(current_supply),
    })
}

fn sell_walk(steps: &[PriceStep], amount: u128, current_supply: u128) -> CurveResult<u128> {
    if amount == 0 {
        return Ok(0);
    }
    if amount > current_supply {
        return Err(CurveError::InsufficientSupply { requested: amount, supply: current_supply });
    }
    let last = steps.last().ok_or(CurveError::EmptySchedule)?;
    ensure_supply_within(current_supply, last.range_to)?;

    let mut supply = current_supply;
    let mut remaining = amount;
    let mut total: u128 = 0;
    for (i, step) in steps.iter().enumerate().rev() {
        let lower = if i == 0 { 0 } else { steps[i - 1].range_to };
        if lower >= supply {
            continue;
        }
        let take = remaining.min(supply - lower);
        total = accumulate(total, take, step.price)?;
        debug!("sell: step {} takes {} @ {}", i, take, step.price);
        supply -= take;
        remaining -= take;
        if remaining == 0 {
            break;
        }
    }
    // amount <= supply and the first tier starts at 0, so the walk drains
    debug_assert_eq!(remaining, 0);
    Ok(total)
}
