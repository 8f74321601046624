#![allow(dead_code)]

use pricechart_ta::{Bar, Price};
use serde::{Deserialize, de::DeserializeOwned};

/// Reference value with timestamp.
#[derive(Debug, Deserialize)]
pub struct RefValue {
    pub timestamp: u64,
    pub expected: f64,
}

const BARS_PATH: &str = "tests/fixtures/data/synthetic-1h.csv";

/// Load the hourly reference bars.
pub fn load_reference_bars() -> Vec<Bar> {
    load_records(BARS_PATH, "invalid bar record")
}

/// Closing prices of the reference bars.
pub fn reference_closes() -> Vec<Price> {
    load_reference_bars().iter().map(|bar| bar.close).collect()
}

/// Load single-value reference data.
pub fn load_ref_values(path: &str) -> Vec<RefValue> {
    load_records(path, "invalid reference record")
}

/// Assert two f64 values are within tolerance.
pub fn assert_near(actual: f64, expected: f64, tolerance: f64, context: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{context}: expected {expected:.10}, got {actual:.10}, diff {diff:.2e} > tolerance {tolerance:.2e}"
    );
}

/// Checks an aligned output series against sparse reference values.
///
/// Every bar before the first reference timestamp must be `None`, every
/// bar from it on must match.
pub fn assert_series_matches(
    name: &str,
    bars: &[Bar],
    actual: &[Option<Price>],
    reference: &[RefValue],
    tolerance: f64,
) {
    assert_eq!(actual.len(), bars.len(), "{name}: output not aligned");

    let first = bars
        .iter()
        .position(|bar| bar.timestamp == reference[0].timestamp)
        .unwrap_or_else(|| panic!("{name}: first reference timestamp not in bars"));

    assert!(
        actual[..first].iter().all(Option::is_none),
        "{name}: value before first reference bar {first}"
    );
    assert_eq!(
        bars.len() - first,
        reference.len(),
        "{name}: reference does not cover the tail"
    );

    for (i, (value, expected)) in actual[first..].iter().zip(reference).enumerate() {
        let bar = &bars[first + i];
        assert_eq!(bar.timestamp, expected.timestamp, "{name}: timestamps out of step");

        let value = value.unwrap_or_else(|| panic!("{name} returned None at t={}", bar.timestamp));
        assert_near(
            value,
            expected.expected,
            tolerance,
            &format!("{name} at bar {} (t={})", first + i, bar.timestamp),
        );
    }
}

fn load_records<D>(path: &str, expect_msg: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize().map(|r| r.expect(expect_msg)).collect()
}
