use raffle_curve::curves::Curve;
use raffle_curve::{quote_buy, quote_sell, CurveError, CurvePosition, PriceStep, StepSequence};

fn two_steps() -> Vec<PriceStep> {
    vec![PriceStep::new(10, 1000), PriceStep::new(11, 2000)]
}

fn seq(steps: Vec<PriceStep>) -> StepSequence {
    StepSequence::new(steps).expect("valid schedule")
}

#[test]
fn buy_crossing_a_step_boundary() {
    // 100 tickets left at 10, then 200 at 11
    assert_eq!(quote_buy(300, 900, &two_steps()), Ok(3200));
}

#[test]
fn sell_crossing_a_step_boundary() {
    // 50 tickets back at 11, then 50 at 10
    assert_eq!(quote_sell(100, 1050, &two_steps()), Ok(1050));
}

#[test]
fn single_step_is_linear() {
    let steps = [PriceStep::new(7, 500)];
    assert_eq!(quote_buy(500, 0, &steps), Ok(3500));
    assert_eq!(quote_buy(1, 0, &steps), Ok(7));
}

#[test]
fn zero_amount_is_free_everywhere() {
    assert_eq!(quote_buy(0, 0, &[]), Ok(0));
    assert_eq!(quote_buy(0, 5000, &two_steps()), Ok(0));
    assert_eq!(quote_sell(0, 0, &two_steps()), Ok(0));
    assert_eq!(seq(two_steps()).try_quote_buy(0, 1_000_000), Ok(0));
}

#[test]
fn empty_schedule_quotes_zero() {
    assert_eq!(quote_buy(10, 0, &[]), Ok(0));
    assert_eq!(quote_sell(10, 100, &[]), Ok(0));
    assert_eq!(StepSequence::empty().try_quote_buy(10, 0), Err(CurveError::EmptySchedule));
    assert_eq!(StepSequence::empty().try_quote_sell(10, 100), Err(CurveError::EmptySchedule));
}

#[test]
fn oversell_quotes_zero_and_strict_variant_rejects() {
    let s = seq(two_steps());
    assert_eq!(s.quote_sell(101, 100), Ok(0));
    assert_eq!(
        s.try_quote_sell(101, 100),
        Err(CurveError::InsufficientSupply { requested: 101, supply: 100 })
    );
}

#[test]
fn buying_past_capacity_is_insufficient_liquidity() {
    assert_eq!(
        quote_buy(200, 1900, &two_steps()),
        Err(CurveError::InsufficientLiquidity { requested: 200, available: 100 })
    );
    assert_eq!(
        quote_buy(1, 2000, &two_steps()),
        Err(CurveError::InsufficientLiquidity { requested: 1, available: 0 })
    );
    // exactly filling the curve is fine
    assert_eq!(quote_buy(100, 1900, &two_steps()), Ok(1100));
}

#[test]
fn boundary_supply_uses_the_lower_step_for_sells_and_upper_for_buys() {
    let s = seq(two_steps());
    assert_eq!(s.quote_sell(1, 1000), Ok(10));
    assert_eq!(s.quote_buy(1, 1000), Ok(11));
    assert_eq!(s.quote_sell(1, 1001), Ok(11));
}

#[test]
fn sell_walks_down_through_several_steps() {
    let s = seq(vec![
        PriceStep::new(1, 10),
        PriceStep::new(2, 20),
        PriceStep::new(3, 30),
    ]);
    // 5 @ 3, 10 @ 2, 10 @ 1
    assert_eq!(s.quote_sell(25, 25), Ok(15 + 20 + 10));
    assert_eq!(s.quote_buy(25, 0), Ok(15 + 20 + 10));
}

#[test]
fn supply_beyond_schedule_is_rejected_on_sell() {
    assert_eq!(
        quote_sell(10, 2500, &two_steps()),
        Err(CurveError::SupplyOutOfRange { supply: 2500, capacity: 2000 })
    );
}

#[test]
fn malformed_schedules_fail_fast() {
    let unordered = [PriceStep::new(10, 1000), PriceStep::new(11, 1000)];
    assert_eq!(
        quote_buy(1, 0, &unordered),
        Err(CurveError::NonMonotonicRange { index: 1, prev: 1000, next: 1000 })
    );
    let falling = [PriceStep::new(10, 1000), PriceStep::new(9, 2000)];
    assert_eq!(
        quote_sell(1, 1, &falling),
        Err(CurveError::DecreasingPrice { index: 1, prev: 10, next: 9 })
    );
    assert_eq!(
        StepSequence::new(vec![PriceStep::new(1, 0)]),
        Err(CurveError::ZeroWidthStep { index: 0 })
    );
}

#[test]
fn overflowing_cost_is_an_error() {
    let steps = [PriceStep::new(u128::MAX, u128::MAX)];
    assert_eq!(quote_buy(2, 0, &steps), Err(CurveError::Overflow));
    assert_eq!(quote_buy(1, 0, &steps), Ok(u128::MAX));
}

#[test]
fn free_steps_cost_nothing() {
    let s = seq(vec![PriceStep::new(0, 100), PriceStep::new(5, 200)]);
    assert_eq!(s.quote_buy(150, 0), Ok(250));
    assert_eq!(s.max_buyable(0, 0), 100);
    assert_eq!(s.max_buyable(12, 0), 102);
}

#[test]
fn position_and_spot_price() {
    let s = seq(two_steps());
    assert_eq!(s.capacity(), 2000);
    assert_eq!(s.remaining_capacity(1500), 500);
    assert_eq!(s.remaining_capacity(2500), 0);
    assert_eq!(s.spot_price(0), Some(10));
    assert_eq!(s.spot_price(999), Some(10));
    assert_eq!(s.spot_price(1000), Some(11));
    assert_eq!(s.spot_price(2000), None);
    assert_eq!(
        s.position(900),
        Some(CurvePosition { step_index: 0, price: 10, remaining_in_step: 100, next_price: Some(11) })
    );
    assert_eq!(
        s.position(1999),
        Some(CurvePosition { step_index: 1, price: 11, remaining_in_step: 1, next_price: None })
    );
    assert_eq!(StepSequence::empty().position(0), None);
}

#[test]
fn max_buyable_inverts_the_buy_quote() {
    let s = seq(two_steps());
    assert_eq!(s.max_buyable(3200, 900), 300);
    assert_eq!(s.max_buyable(3210, 900), 300);
    assert_eq!(s.max_buyable(3199, 900), 299);
    assert_eq!(s.max_buyable(u128::MAX, 0), 2000);
    assert_eq!(s.max_buyable(1_000_000, 2000), 0);
}

#[test]
fn tier_view_through_curve_trait() {
    let s = seq(two_steps());
    assert_eq!(s.step_count(), 2);
    assert_eq!(s.tickets_in_step(0), 1000);
    assert_eq!(s.tickets_in_step(1), 1000);
    assert_eq!(s.price_of_step(1), 11);
    assert_eq!(s.cumulative_supply(2), 2000);
    assert_eq!(s.cumulative_supply(10), 2000);
}
