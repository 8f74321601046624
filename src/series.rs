//! Whole-series indicator functions.
//!
//! Each function maps a slice of prices to a `Vec` of the same length,
//! where index `i` of the output belongs to index `i` of the input and
//! `None` marks an index whose lookback window reaches before the start
//! of the series. They are folds of the streaming indicators, so feeding
//! the same prices one by one through [`Sma`], [`Ema`], [`Rsi`] or
//! [`Macd`] gives identical values.
//!
//! Input is not validated. Non-finite prices propagate into the output.

use std::num::NonZero;

use crate::{Ema, EmaConfig, Macd, MacdConfig, Price, Rsi, RsiConfig, Sma, SmaConfig};

/// Simple moving average over a trailing window of `window` prices.
///
/// Indices `0..window - 1` are `None`.
///
/// ```
/// use pricechart_ta::series;
/// use std::num::NonZero;
///
/// let sma = series::sma(&[1.0, 2.0, 3.0, 4.0], NonZero::new(2).unwrap());
/// assert_eq!(sma, vec![None, Some(1.5), Some(2.5), Some(3.5)]);
/// ```
#[must_use]
pub fn sma(values: &[Price], window: NonZero<usize>) -> Vec<Option<Price>> {
    let mut sma = Sma::new(SmaConfig::close(window));
    values.iter().map(|&price| sma.push(price)).collect()
}

/// Exponential moving average seeded with the mean of the first
/// `period` prices.
///
/// Indices `0..period - 1` are `None`; a series shorter than `period`
/// is `None` throughout.
#[must_use]
pub fn ema(values: &[Price], period: NonZero<usize>) -> Vec<Option<Price>> {
    let mut ema = Ema::new(EmaConfig::close(period));
    values.iter().map(|&price| ema.push(price)).collect()
}

/// Relative strength index with Wilder smoothing.
///
/// Indices `0..=period - 1` are `None`; the first value sits at index
/// `period`. Every defined value lies in `[0, 100]`.
#[must_use]
pub fn rsi(values: &[Price], period: NonZero<usize>) -> Vec<Option<Price>> {
    let mut rsi = Rsi::new(RsiConfig::close(period));
    values.iter().map(|&price| rsi.push(price)).collect()
}

/// MACD line: `ema(values, fast)[i] - ema(values, slow)[i]` where both
/// are defined, i.e. from index `max(fast, slow) - 1` on.
///
/// Any two periods are accepted. Equal periods give a zero line and
/// swapped periods give the negated line.
#[must_use]
pub fn macd(values: &[Price], fast: NonZero<usize>, slow: NonZero<usize>) -> Vec<Option<Price>> {
    let mut macd = Macd::new(MacdConfig::close(fast, slow));
    values.iter().map(|&price| macd.push(price)).collect()
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::test_util::{assert_approx, nz};

    /// 10, 11, ..., 29
    fn rising_closes() -> Vec<Price> {
        (10..30).map(f64::from).collect()
    }

    fn zigzag(n: usize) -> Vec<Price> {
        (0..n)
            .map(|i| {
                let i = i as f64;
                100.0 + (i * 0.7).sin() * 8.0 + i * 0.1
            })
            .collect()
    }

    mod alignment {
        use super::*;

        #[test]
        fn outputs_match_input_length() {
            for n in [0, 1, 5, 14, 15, 25, 26, 27, 60] {
                let values = zigzag(n);
                assert_eq!(sma(&values, nz(20)).len(), n);
                assert_eq!(ema(&values, nz(12)).len(), n);
                assert_eq!(rsi(&values, nz(14)).len(), n);
                assert_eq!(macd(&values, nz(12), nz(26)).len(), n);
            }
        }

        #[test]
        fn empty_input_gives_empty_output() {
            assert!(sma(&[], nz(20)).is_empty());
            assert!(ema(&[], nz(12)).is_empty());
            assert!(rsi(&[], nz(14)).is_empty());
            assert!(macd(&[], nz(12), nz(26)).is_empty());
        }
    }

    mod sma_series {
        use super::*;

        #[test]
        fn spike_outside_window_is_forgotten() {
            let out = sma(&[1e16, 1.0, 1.0, 1.0], nz(2));
            assert_eq!(out, vec![None, Some(5e15), Some(1.0), Some(1.0)]);
        }

        #[test]
        fn tail_long_after_spike_matches_naive_mean() {
            let mut values = vec![1e9];
            values.extend(std::iter::repeat_n(0.1, 20_000));
            let out = sma(&values, nz(20));

            let tail = out.last().copied().flatten().unwrap();
            let naive = values[values.len() - 20..].iter().sum::<f64>() / 20.0;
            assert!((tail - naive).abs() <= naive * 1e-12, "got {tail}, naive {naive}");
        }

        #[test]
        fn boundary_at_window_minus_one() {
            let values = zigzag(40);
            let out = sma(&values, nz(20));

            assert!(out[..19].iter().all(Option::is_none));
            let mean = values[..20].iter().sum::<f64>() / 20.0;
            assert_approx!(out[19].unwrap(), mean);
        }

        #[test]
        fn every_value_matches_naive_resum() {
            let values = zigzag(60);
            let out = sma(&values, nz(7));

            for (i, value) in out.iter().enumerate().skip(6) {
                let naive = values[i - 6..=i].iter().sum::<f64>() / 7.0;
                assert!((value.unwrap() - naive).abs() < 1e-9, "index {i}");
            }
        }

        #[test]
        fn rising_closes_mean() {
            let out = sma(&rising_closes(), nz(20));
            assert_eq!(out[19], Some(19.5));
        }
    }

    mod ema_series {
        use super::*;

        #[test]
        fn seed_is_mean_of_first_period() {
            let values = zigzag(30);
            let out = ema(&values, nz(12));

            assert!(out[..11].iter().all(Option::is_none));
            let mean = values[..12].iter().sum::<f64>() / 12.0;
            assert_approx!(out[11].unwrap(), mean);
        }

        #[test]
        fn follows_recurrence_after_seed() {
            let values = zigzag(30);
            let out = ema(&values, nz(5));
            let k = 2.0 / 6.0;

            for i in 5..values.len() {
                let expected = values[i] * k + out[i - 1].unwrap() * (1.0 - k);
                assert!((out[i].unwrap() - expected).abs() < 1e-9, "index {i}");
            }
        }

        #[test]
        fn shorter_than_period_is_all_none() {
            let out = ema(&zigzag(11), nz(12));
            assert!(out.iter().all(Option::is_none));
        }

        #[test]
        fn period_one_is_identity() {
            let values = zigzag(10);
            let out = ema(&values, nz(1));
            let expected: Vec<_> = values.iter().copied().map(Some).collect();
            assert_eq!(out, expected);
        }
    }

    mod rsi_series {
        use super::*;

        #[test]
        fn first_value_at_period() {
            let out = rsi(&zigzag(30), nz(14));
            assert!(out[..14].iter().all(Option::is_none));
            assert!(out[14..].iter().all(Option::is_some));
        }

        #[test]
        fn exactly_period_values_is_all_none() {
            let out = rsi(&zigzag(14), nz(14));
            assert!(out.iter().all(Option::is_none));
        }

        #[test]
        fn values_stay_in_range() {
            let out = rsi(&zigzag(200), nz(14));
            for value in out.into_iter().flatten() {
                assert!((0.0..=100.0).contains(&value), "RSI out of range: {value}");
            }
        }

        #[test]
        fn strictly_increasing_gives_100() {
            let values: Vec<Price> = (1..=28).map(f64::from).collect();
            let out = rsi(&values, nz(14));
            assert!(out[14..].iter().all(|v| *v == Some(100.0)));
        }

        #[test]
        fn identical_closes_give_100_not_nan() {
            let out = rsi(&[50.0; 20], nz(14));
            assert!(out[14..].iter().all(|v| *v == Some(100.0)));
        }

        #[test]
        fn matches_manual_wilder_computation() {
            let values = zigzag(40);
            let out = rsi(&values, nz(5));

            let deltas: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
            let mut avg_gain = deltas[..5].iter().map(|d| d.max(0.0)).sum::<f64>() / 5.0;
            let mut avg_loss = deltas[..5].iter().map(|d| (-d).max(0.0)).sum::<f64>() / 5.0;
            let to_rsi = |g: f64, l: f64| {
                if l == 0.0 { 100.0 } else { 100.0 - 100.0 / (1.0 + g / l) }
            };

            assert!((out[5].unwrap() - to_rsi(avg_gain, avg_loss)).abs() < 1e-9);
            for i in 6..values.len() {
                let delta = deltas[i - 1];
                avg_gain = (avg_gain * 4.0 + delta.max(0.0)) / 5.0;
                avg_loss = (avg_loss * 4.0 + (-delta).max(0.0)) / 5.0;
                assert!(
                    (out[i].unwrap() - to_rsi(avg_gain, avg_loss)).abs() < 1e-9,
                    "index {i}"
                );
            }
        }
    }

    mod macd_series {
        use super::*;

        #[test]
        fn is_difference_of_emas() {
            let values = zigzag(80);
            let out = macd(&values, nz(12), nz(26));
            let fast = ema(&values, nz(12));
            let slow = ema(&values, nz(26));

            for i in 0..values.len() {
                match (fast[i], slow[i]) {
                    (Some(f), Some(s)) => assert_eq!(out[i], Some(f - s), "index {i}"),
                    _ => assert_eq!(out[i], None, "index {i}"),
                }
            }
        }

        #[test]
        fn equal_periods_are_zero_from_seed() {
            let values = zigzag(40);
            let out = macd(&values, nz(9), nz(9));

            assert!(out[..8].iter().all(Option::is_none));
            assert!(out[8..].iter().all(|v| *v == Some(0.0)));
        }

        #[test]
        fn inverted_periods_negate_the_line() {
            let values = zigzag(60);
            let standard = macd(&values, nz(12), nz(26));
            let inverted = macd(&values, nz(26), nz(12));

            for (i, (a, b)) in standard.iter().zip(&inverted).enumerate() {
                assert_eq!(*b, a.map(|v| -v), "index {i}");
            }
        }

        #[test]
        fn inverted_periods_on_short_input_are_absent() {
            assert_eq!(macd(&[1.0, 2.0, 3.0], nz(26), nz(12)), vec![None; 3]);
        }

        #[test]
        fn absent_for_twenty_rising_closes() {
            let out = macd(&rising_closes(), nz(12), nz(26));
            assert!(out.iter().all(Option::is_none));
        }
    }

    mod determinism {
        use super::*;

        #[test]
        fn repeated_calls_are_bitwise_identical() {
            let values = zigzag(120);
            let bits = |out: Vec<Option<Price>>| -> Vec<Option<u64>> {
                out.into_iter().map(|v| v.map(f64::to_bits)).collect()
            };

            assert_eq!(bits(sma(&values, nz(20))), bits(sma(&values, nz(20))));
            assert_eq!(bits(rsi(&values, nz(14))), bits(rsi(&values, nz(14))));
            assert_eq!(
                bits(macd(&values, nz(12), nz(26))),
                bits(macd(&values, nz(12), nz(26)))
            );
        }
    }
}
