use std::{fmt::Display, num::NonZero};

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn nz(n: usize) -> NonZero<usize> {
    match NonZero::new(n) {
        Some(n) => n,
        None => panic!("period must be non-zero"),
    }
}

const DEFAULT_SMA_WINDOW: NonZero<usize> = nz(20);
const DEFAULT_RSI_PERIOD: NonZero<usize> = nz(14);
const DEFAULT_MACD_FAST: NonZero<usize> = nz(12);
const DEFAULT_MACD_SLOW: NonZero<usize> = nz(26);

/// Parameters of the chart overlays computed by
/// [`augment`](crate::augment) and [`SeriesCache`](crate::SeriesCache).
///
/// | Field | Default |
/// |---|---|
/// | `smaWindow` | 20 |
/// | `rsiPeriod` | 14 |
/// | `macdFastPeriod` | 12 |
/// | `macdSlowPeriod` | 26 |
///
/// Deserializes from camelCase keys; missing keys take their default.
/// The MACD periods are independent: any two non-zero periods are valid.
///
/// # Example
///
/// ```
/// use pricechart_ta::EngineConfig;
///
/// let config = EngineConfig::from_json(r#"{ "smaWindow": 50 }"#).unwrap();
/// assert_eq!(config.sma_window().get(), 50);
/// assert_eq!(config.rsi_period().get(), 14);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct EngineConfig {
    sma_window: NonZero<usize>,
    rsi_period: NonZero<usize>,
    macd_fast_period: NonZero<usize>,
    macd_slow_period: NonZero<usize>,
}

impl EngineConfig {
    /// Returns a builder starting from the defaults.
    #[must_use]
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder {
            config: Self::default(),
        }
    }

    /// Parses a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, unknown keys or
    /// zero periods.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    #[inline]
    #[must_use]
    pub fn sma_window(&self) -> NonZero<usize> {
        self.sma_window
    }

    #[inline]
    #[must_use]
    pub fn rsi_period(&self) -> NonZero<usize> {
        self.rsi_period
    }

    #[inline]
    #[must_use]
    pub fn macd_fast_period(&self) -> NonZero<usize> {
        self.macd_fast_period
    }

    #[inline]
    #[must_use]
    pub fn macd_slow_period(&self) -> NonZero<usize> {
        self.macd_slow_period
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sma_window: DEFAULT_SMA_WINDOW,
            rsi_period: DEFAULT_RSI_PERIOD,
            macd_fast_period: DEFAULT_MACD_FAST,
            macd_slow_period: DEFAULT_MACD_SLOW,
        }
    }
}

impl Display for EngineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "EngineConfig(sma={}, rsi={}, macd={}/{})",
            self.sma_window, self.rsi_period, self.macd_fast_period, self.macd_slow_period
        )
    }
}

/// Builder for [`EngineConfig`]. Unset fields keep their defaults.
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    #[must_use]
    pub fn sma_window(mut self, window: NonZero<usize>) -> Self {
        self.config.sma_window = window;
        self
    }

    #[must_use]
    pub fn rsi_period(mut self, period: NonZero<usize>) -> Self {
        self.config.rsi_period = period;
        self
    }

    #[must_use]
    pub fn macd_periods(mut self, fast: NonZero<usize>, slow: NonZero<usize>) -> Self {
        self.config.macd_fast_period = fast;
        self.config.macd_slow_period = slow;
        self
    }

    #[must_use]
    pub fn build(self) -> EngineConfig {
        self.config
    }
}
