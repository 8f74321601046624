mod fixtures;

use fixtures::{assert_series_matches, load_ref_values, load_reference_bars, reference_closes};
use pricechart_ta::{Macd, MacdConfig, series};
use std::num::NonZero;

const REF_PATH: &str = "tests/fixtures/data/macd-12-26-close.csv";

/// Tolerance: 1e-6.
/// Difference of two EMAs, each within the EMA tolerance.
const TOLERANCE: f64 = 1e-6;

fn nz(n: usize) -> NonZero<usize> {
    NonZero::new(n).unwrap()
}

#[test]
fn macd_12_26_close_matches_reference() {
    let bars = load_reference_bars();
    let reference = load_ref_values(REF_PATH);

    let mut macd = Macd::new(MacdConfig::close(nz(12), nz(26)));
    let values: Vec<_> = bars.iter().map(|bar| macd.compute(bar)).collect();

    assert_series_matches("MACD(12, 26)", &bars, &values, &reference, TOLERANCE);
}

#[test]
fn macd_12_26_series_matches_reference() {
    let bars = load_reference_bars();
    let reference = load_ref_values(REF_PATH);

    let values = series::macd(&reference_closes(), nz(12), nz(26));

    assert_series_matches("series::macd(12, 26)", &bars, &values, &reference, TOLERANCE);
}

#[test]
fn macd_is_ema_difference() {
    let closes = reference_closes();
    let fast = series::ema(&closes, nz(12));
    let slow = series::ema(&closes, nz(26));
    let macd = series::macd(&closes, nz(12), nz(26));

    for (i, value) in macd.iter().enumerate() {
        let expected = fast[i].zip(slow[i]).map(|(f, s)| f - s);
        assert_eq!(*value, expected, "MACD at bar {i}");
    }
}
