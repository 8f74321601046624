use std::{fmt::Display, num::NonZero};

use crate::{
    Ema, EmaConfig, Indicator, IndicatorConfig, IndicatorConfigBuilder, Ohlcv, Price, PriceSource,
    Timestamp,
};

const DEFAULT_FAST: usize = 12;
const DEFAULT_SLOW: usize = 26;

/// Configuration for the Moving Average Convergence/Divergence
/// ([`Macd`]) indicator.
///
/// # Example
///
/// ```
/// use pricechart_ta::{IndicatorConfig, MacdConfig};
/// use std::num::NonZero;
///
/// let config = MacdConfig::close(NonZero::new(12).unwrap(), NonZero::new(26).unwrap());
/// assert_eq!(config.fast_length(), 12);
/// assert_eq!(config.slow_length(), 26);
/// assert_eq!(config.warmup(), 26);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct MacdConfig {
    fast_length: usize,
    slow_length: usize,
    source: PriceSource,
}

impl IndicatorConfig for MacdConfig {
    type Builder = MacdConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        MacdConfigBuilder::new()
    }

    #[inline]
    fn source(&self) -> &PriceSource {
        &self.source
    }

    #[inline]
    fn warmup(&self) -> usize {
        self.fast_length.max(self.slow_length)
    }
}

impl MacdConfig {
    /// Period of the fast EMA.
    #[inline]
    #[must_use]
    pub fn fast_length(&self) -> usize {
        self.fast_length
    }

    /// Period of the slow EMA.
    #[inline]
    #[must_use]
    pub fn slow_length(&self) -> usize {
        self.slow_length
    }

    /// MACD on closing price.
    #[must_use]
    pub fn close(fast: NonZero<usize>, slow: NonZero<usize>) -> Self {
        Self::builder().fast_length(fast).slow_length(slow).build()
    }
}

impl Display for MacdConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MacdConfig({}, {}, {})",
            self.fast_length, self.slow_length, self.source
        )
    }
}

/// Builder for [`MacdConfig`].
///
/// Defaults: fast = 12, slow = 26, source = [`PriceSource::Close`].
/// The periods are not required to be ordered: swapping them negates
/// the line.
pub struct MacdConfigBuilder {
    fast_length: usize,
    slow_length: usize,
    source: PriceSource,
}

impl MacdConfigBuilder {
    fn new() -> Self {
        Self {
            fast_length: DEFAULT_FAST,
            slow_length: DEFAULT_SLOW,
            source: PriceSource::Close,
        }
    }

    /// Sets the fast EMA period.
    #[inline]
    #[must_use]
    pub fn fast_length(mut self, length: NonZero<usize>) -> Self {
        self.fast_length = length.get();
        self
    }

    /// Sets the slow EMA period.
    #[inline]
    #[must_use]
    pub fn slow_length(mut self, length: NonZero<usize>) -> Self {
        self.slow_length = length.get();
        self
    }
}

impl IndicatorConfigBuilder<MacdConfig> for MacdConfigBuilder {
    #[inline]
    fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }

    #[inline]
    fn build(self) -> MacdConfig {
        MacdConfig {
            fast_length: self.fast_length,
            slow_length: self.slow_length,
            source: self.source,
        }
    }
}

/// Moving Average Convergence/Divergence (MACD) line.
///
/// The difference between a fast and a slow [`Ema`] of the same
/// price:
///
/// ```text
/// MACD = EMA(fast) − EMA(slow)
/// ```
///
/// Defined only once both EMAs are seeded, i.e. from bar
/// `max(fast, slow)` onward. Signal line and histogram are not
/// computed.
///
/// # Example
///
/// ```
/// use pricechart_ta::{Macd, MacdConfig};
/// use std::num::NonZero;
/// # use pricechart_ta::{Ohlcv, Price, Timestamp};
/// #
/// # struct Bar(f64, u64);
/// # impl Ohlcv for Bar {
/// #     fn open(&self) -> Price { self.0 }
/// #     fn high(&self) -> Price { self.0 }
/// #     fn low(&self) -> Price { self.0 }
/// #     fn close(&self) -> Price { self.0 }
/// #     fn open_time(&self) -> Timestamp { self.1 }
/// # }
///
/// let mut macd = Macd::new(MacdConfig::close(
///     NonZero::new(1).unwrap(),
///     NonZero::new(3).unwrap(),
/// ));
///
/// assert_eq!(macd.compute(&Bar(2.0, 1)), None);
/// assert_eq!(macd.compute(&Bar(4.0, 2)), None);
///
/// // EMA(1) = 6, EMA(3) seed = (2 + 4 + 6) / 3 = 4
/// assert_eq!(macd.compute(&Bar(6.0, 3)), Some(2.0));
/// ```
#[derive(Clone, Debug)]
pub struct Macd {
    config: MacdConfig,
    fast: Ema,
    slow: Ema,
    current: Option<Price>,
    last_open_time: Option<Timestamp>,
}

impl Indicator for Macd {
    type Config = MacdConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        let ema = |length: usize| {
            Ema::new(
                EmaConfig::builder()
                    .length(NonZero::new(length).expect("length is non-zero"))
                    .build(),
            )
        };

        Self {
            config,
            fast: ema(config.fast_length),
            slow: ema(config.slow_length),
            current: None,
            last_open_time: None,
        }
    }

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Price> {
        debug_assert!(
            self.last_open_time.is_none_or(|t| t < ohlcv.open_time()),
            "open_time must be strictly increasing: last={}, got={}",
            self.last_open_time.unwrap_or(0),
            ohlcv.open_time(),
        );
        self.last_open_time = Some(ohlcv.open_time());

        self.push(self.config.source.extract(ohlcv))
    }

    #[inline]
    fn value(&self) -> Option<Price> {
        self.current
    }
}

impl Macd {
    #[inline]
    pub(crate) fn push(&mut self, price: Price) -> Option<Price> {
        let fast = self.fast.push(price);
        let slow = self.slow.push(price);

        self.current = fast.zip(slow).map(|(fast, slow)| fast - slow);

        self.current
    }
}

impl Display for Macd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MACD({}, {}, {})",
            self.config.fast_length, self.config.slow_length, self.config.source
        )
    }
}
