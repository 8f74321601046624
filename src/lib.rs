//! Technical indicator engine for price charts.
//!
//! Turns an ordered series of OHLCV bars into the overlay series a chart
//! draws next to the price: simple moving average, relative strength
//! index and the MACD line (exponential moving averages are computed
//! along the way). Every output series is aligned 1:1 with the input;
//! `None` marks a bar whose lookback window reaches before the first bar.
//!
//! Three layers, from low to high:
//!
//! - streaming indicators ([`Sma`], [`Ema`], [`Rsi`], [`Macd`]) that advance
//!   one bar per [`compute`](Sma::compute) call,
//! - whole-series functions in [`series`] over a slice of prices,
//! - [`augment`] / [`derive_points`], which compute all overlays for a bar
//!   series with [`EngineConfig`] parameters, and [`SeriesCache`], which
//!   memoizes that result and extends it when bars are appended.
//!
//! Each indicator type exposes [`new`](Sma::new), [`compute`](Sma::compute),
//! and [`value`](Sma::value) as inherent methods, so no trait import is
//! needed. Import [`Indicator`] only for generic code.

mod cache;
mod config;
mod ema;
mod engine;
mod error;
mod indicator;
mod macd;
mod ohlcv;
mod price_source;
mod price_window;
mod quote;
mod ring_buffer;
mod rsi;
pub mod series;
mod sma;

pub use crate::indicator::{Indicator, IndicatorConfig, IndicatorConfigBuilder};
pub use crate::ohlcv::{Bar, Ohlcv, Price, Timestamp};
pub use crate::price_source::PriceSource;

pub use crate::ema::{Ema, EmaConfig, EmaConfigBuilder};
pub use crate::macd::{Macd, MacdConfig, MacdConfigBuilder};
pub use crate::rsi::{Rsi, RsiConfig, RsiConfigBuilder};
pub use crate::sma::{Sma, SmaConfig, SmaConfigBuilder};

pub use crate::cache::{CacheStats, SeriesCache, SharedSeries};
pub use crate::config::{EngineConfig, EngineConfigBuilder};
pub use crate::engine::{Augmented, DerivedPoint, augment, derive_points};
pub use crate::error::ConfigError;
pub use crate::quote::QuoteSummary;

macro_rules! impl_indicator_methods {
    ($type:ty, $config:ty, $output:ty) => {
        impl $type {
            /// See [`Indicator::new`].
            #[must_use]
            pub fn new(config: $config) -> Self {
                <Self as Indicator>::new(config)
            }

            /// See [`Indicator::compute`].
            #[inline]
            pub fn compute(&mut self, kline: &impl Ohlcv) -> Option<$output> {
                <Self as Indicator>::compute(self, kline)
            }

            /// See [`Indicator::value`].
            #[must_use]
            #[inline]
            pub fn value(&self) -> Option<$output> {
                <Self as Indicator>::value(self)
            }
        }
    };
}

impl_indicator_methods!(Sma, SmaConfig, Price);
impl_indicator_methods!(Ema, EmaConfig, Price);
impl_indicator_methods!(Rsi, RsiConfig, Price);
impl_indicator_methods!(Macd, MacdConfig, Price);

#[cfg(test)]
mod test_util;
