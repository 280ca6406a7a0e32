//! Property tests for base-relative conversion

use approx::assert_relative_eq;
use proptest::prelude::*;
use rusty_curs::converter::{convert, ConversionRequest};
use rusty_curs::currency::CurrencyCode;
use rusty_curs::error::CursError;
use rusty_curs::rates::RateTable;
use std::collections::BTreeMap;

fn table(rate_a: f64, rate_b: f64) -> RateTable {
    let mut rates = BTreeMap::new();
    rates.insert(CurrencyCode::new("aaa").unwrap(), rate_a);
    rates.insert(CurrencyCode::new("bbb").unwrap(), rate_b);
    rates.insert(CurrencyCode::base(), 1.0);
    RateTable::new(Some("02.02.2026".to_string()), rates)
}

fn request(amount: f64, from: &str, to: &str) -> ConversionRequest {
    ConversionRequest::new(
        amount,
        CurrencyCode::new(from).unwrap(),
        CurrencyCode::new(to).unwrap(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn conversion_is_amount_times_from_over_to(
        amount in 0.0001f64..1.0e9,
        rate_a in 0.0001f64..10_000.0,
        rate_b in 0.0001f64..10_000.0,
    ) {
        let table = table(rate_a, rate_b);
        let result = convert(&request(amount, "aaa", "bbb"), Some(&table)).unwrap();
        prop_assert_eq!(result.value, amount * rate_a / rate_b);
        prop_assert_eq!(result.unit_rate, rate_a / rate_b);
    }

    #[test]
    fn round_trip_recovers_amount(
        amount in 0.0001f64..1.0e9,
        rate_a in 0.0001f64..10_000.0,
        rate_b in 0.0001f64..10_000.0,
    ) {
        let table = table(rate_a, rate_b);
        let there = convert(&request(amount, "aaa", "bbb"), Some(&table)).unwrap();
        let back = convert(&request(there.value, "bbb", "aaa"), Some(&table)).unwrap();
        prop_assert!((back.value - amount).abs() <= amount * 1e-12);
    }

    #[test]
    fn same_currency_is_identity(
        amount in -1.0e9f64..1.0e9,
        rate_a in 0.0001f64..10_000.0,
    ) {
        let table = table(rate_a, 1.0);
        let result = convert(&request(amount, "aaa", "aaa"), Some(&table)).unwrap();
        prop_assert!((result.value - amount).abs() <= amount.abs() * 1e-15);
        prop_assert_eq!(result.unit_rate, 1.0);
    }

    #[test]
    fn codes_are_case_insensitive(amount in 0.0f64..1.0e6) {
        let table = table(19.5, 17.8);
        let lower = convert(&request(amount, "aaa", "bbb"), Some(&table)).unwrap();
        let upper = convert(&request(amount, "AAA", "Bbb"), Some(&table)).unwrap();
        prop_assert_eq!(lower, upper);
    }
}

#[test]
fn bnm_example() {
    let table = RateTable::from_json(r#"{"rates":{"eur":19.50,"usd":17.80,"mdl":1}}"#).unwrap();
    let result = convert(&request(100.0, "eur", "usd"), Some(&table)).unwrap();
    assert_relative_eq!(result.value, 109.550_561_797_752_8, epsilon = 1e-9);
    assert_relative_eq!(result.unit_rate, 1.095_505_617_977_528, epsilon = 1e-12);
}

#[test]
fn non_positive_rate_is_unknown() {
    let table = table(0.0, -5.0);
    assert!(matches!(
        convert(&request(1.0, "aaa", "mdl"), Some(&table)),
        Err(CursError::UnknownCurrency(c)) if c == "AAA"
    ));
    assert!(matches!(
        convert(&request(1.0, "mdl", "bbb"), Some(&table)),
        Err(CursError::UnknownCurrency(c)) if c == "BBB"
    ));
}
