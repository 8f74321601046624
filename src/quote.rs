use serde::Serialize;

use crate::{Ohlcv, Price};

/// Latest close and its move against the previous bar, as shown next to
/// the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummary {
    pub last_close: Price,
    pub change: Price,
    /// `change` relative to the previous close, in percent. Not finite
    /// when the previous close is zero.
    pub change_percent: f64,
}

impl QuoteSummary {
    /// Summarizes the last two bars of `bars`.
    ///
    /// Returns `None` for an empty series. A single bar has no previous
    /// close, so its change is zero.
    ///
    /// ```
    /// use pricechart_ta::{Bar, QuoteSummary};
    ///
    /// let bar = |t, close| Bar { timestamp: t, open: close, high: close, low: close, close, volume: 0.0 };
    /// let quote = QuoteSummary::from_bars(&[bar(1, 200.0), bar(2, 210.0)]).unwrap();
    ///
    /// assert_eq!(quote.last_close, 210.0);
    /// assert_eq!(quote.change, 10.0);
    /// assert_eq!(quote.change_percent, 5.0);
    /// ```
    #[must_use]
    pub fn from_bars<B: Ohlcv>(bars: &[B]) -> Option<Self> {
        match bars {
            [] => None,
            [only] => Some(Self {
                last_close: only.close(),
                change: 0.0,
                change_percent: 0.0,
            }),
            [.., previous, last] => {
                let change = last.close() - previous.close();

                Some(Self {
                    last_close: last.close(),
                    change,
                    change_percent: change / previous.close() * 100.0,
                })
            }
        }
    }
}
