use raffle_curve::guards::parse_amount;
use raffle_curve::schedule::parse_steps;
use raffle_curve::verifier::verify_schedule;
use raffle_curve::{CurveError, PriceStep};

#[test]
fn accepts_numbers_and_decimal_strings() {
    let seq = parse_steps(
        r#"[
            {"price": 10, "rangeTo": 1000},
            {"price": "11000000000000000000000", "range_to": "2000"}
        ]"#,
    )
    .unwrap();
    assert_eq!(
        seq.steps(),
        &[PriceStep::new(10, 1000), PriceStep::new(11_000_000_000_000_000_000_000, 2000)]
    );
}

#[test]
fn rejects_fractions_negatives_and_bad_ordering() {
    for bad in [
        r#"[{"price": 1.5, "rangeTo": 10}]"#,
        r#"[{"price": -1, "rangeTo": 10}]"#,
        r#"[{"price": "1e3", "rangeTo": 10}]"#,
        r#"[{"price": 1}]"#,
        r#"[{"price": 2, "rangeTo": 10}, {"price": 1, "rangeTo": 20}]"#,
        r#"[{"price": 1, "rangeTo": 10}, {"price": 1, "rangeTo": 5}]"#,
    ] {
        assert!(parse_steps(bad).is_err(), "{bad}");
    }
}

#[test]
fn empty_array_is_an_empty_schedule() {
    let seq = parse_steps("[]").unwrap();
    assert!(seq.is_empty());
    assert_eq!(seq.quote_buy(5, 0), Ok(0));
}

#[test]
fn serializes_with_wire_field_names() {
    let seq = parse_steps(r#"[{"price": 3, "rangeTo": 7}]"#).unwrap();
    let json = serde_json::to_string(&seq).unwrap();
    assert_eq!(json, r#"[{"price":3,"rangeTo":7}]"#);
}

#[test]
fn amount_coercion_at_the_boundary() {
    assert_eq!(parse_amount("42"), Ok(42));
    assert_eq!(parse_amount(" 7 "), Ok(7));
    for bad in ["", "-1", "+1", "1.0", "1e3", "abc", "340282366920938463463374607431768211456"] {
        assert_eq!(parse_amount(bad), Err(CurveError::InvalidAmount(bad.to_string())));
    }
}

#[test]
fn verifier_agrees_with_tier_sums() {
    let seq = parse_steps(
        r#"[{"price": 10, "rangeTo": 1000}, {"price": 11, "rangeTo": 2000}, {"price": 15, "rangeTo": 2500}]"#,
    )
    .unwrap();
    let rep = verify_schedule(&seq).unwrap();
    assert_eq!(rep.steps, 3);
    assert_eq!(rep.capacity, 2500);
    assert_eq!(rep.closed_total, 10_000 + 11_000 + 7_500);
    assert_eq!(rep.buy_total, rep.closed_total);
    assert_eq!(rep.sell_total, rep.closed_total);
    assert!(rep.is_consistent());
}
