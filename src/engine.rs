use serde::Serialize;

use crate::{EngineConfig, Macd, MacdConfig, Ohlcv, Price, Rsi, RsiConfig, Sma, SmaConfig};

/// Overlay values for one bar. `None` means the indicator's lookback
/// window reaches before the first bar; it is never a stand-in for zero.
///
/// Serializes absent values as `null`, which the chart draws as a gap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DerivedPoint {
    pub sma: Option<Price>,
    pub rsi: Option<Price>,
    pub macd: Option<Price>,
}

/// A bar merged with its [`DerivedPoint`].
///
/// Serializes flat: the bar's own fields followed by `sma`, `rsi` and
/// `macd`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Augmented<B> {
    #[serde(flatten)]
    pub bar: B,
    #[serde(flatten)]
    pub point: DerivedPoint,
}

/// Streaming state of every overlay, fed with closing prices.
#[derive(Clone, Debug)]
pub(crate) struct OverlayState {
    sma: Sma,
    rsi: Rsi,
    macd: Macd,
}

impl OverlayState {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            sma: Sma::new(SmaConfig::close(config.sma_window())),
            rsi: Rsi::new(RsiConfig::close(config.rsi_period())),
            macd: Macd::new(MacdConfig::close(
                config.macd_fast_period(),
                config.macd_slow_period(),
            )),
        }
    }

    #[inline]
    pub fn push(&mut self, close: Price) -> DerivedPoint {
        DerivedPoint {
            sma: self.sma.push(close),
            rsi: self.rsi.push(close),
            macd: self.macd.push(close),
        }
    }
}

/// Computes the overlay values for every bar in one pass over the
/// closing prices.
///
/// The output has the same length and order as `bars`. Bars must be in
/// ascending time order; this is not checked.
///
/// # Example
///
/// ```
/// use pricechart_ta::{Bar, EngineConfig, derive_points};
///
/// let bars: Vec<Bar> = (0..30)
///     .map(|i| {
///         let close = 100.0 + f64::from(i);
///         Bar { timestamp: i as u64, open: close, high: close, low: close, close, volume: 0.0 }
///     })
///     .collect();
///
/// let points = derive_points(&bars, &EngineConfig::default());
///
/// assert_eq!(points.len(), 30);
/// assert_eq!(points[18].sma, None);
/// assert!(points[19].sma.is_some());
/// assert_eq!(points[14].rsi, Some(100.0));
/// assert!(points[25].macd.is_some());
/// ```
#[must_use]
pub fn derive_points<B: Ohlcv>(bars: &[B], config: &EngineConfig) -> Vec<DerivedPoint> {
    let mut state = OverlayState::new(config);
    bars.iter().map(|bar| state.push(bar.close())).collect()
}

/// Merges every bar with its overlay values. See [`derive_points`].
#[must_use]
pub fn augment<B: Ohlcv + Clone>(bars: &[B], config: &EngineConfig) -> Vec<Augmented<B>> {
    let mut state = OverlayState::new(config);
    bars.iter()
        .map(|bar| Augmented {
            bar: bar.clone(),
            point: state.push(bar.close()),
        })
        .collect()
}
