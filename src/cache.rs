use std::{
    hash::{DefaultHasher, Hasher},
    sync::Arc,
};

use tracing::{debug, trace};

use crate::{Augmented, EngineConfig, Ohlcv, engine::OverlayState};

/// Shared handle to an augmented series held by a [`SeriesCache`].
pub type SharedSeries<B> = Arc<Vec<Augmented<B>>>;

/// Counters of how [`SeriesCache::get_or_compute`] answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Same bars as the cached entry, nothing computed.
    pub hits: u64,
    /// Cached bars were a prefix; only the new bars were computed.
    pub extensions: u64,
    /// Full recomputation.
    pub recomputes: u64,
}

struct Entry<B> {
    len: usize,
    fingerprint: u64,
    /// Fingerprint of the last cached bar alone.
    last_bar: Option<u64>,
    state: OverlayState,
    series: SharedSeries<B>,
}

/// Memoizes the augmented series for the most recent bar sequence.
///
/// Entries are keyed by a fingerprint of the bars' content (timestamp and
/// the bit pattern of every OHLCV field), so a caller may rebuild its bar
/// vector freely: equal content is a hit. When the new sequence extends
/// the cached one, the saved indicator state is resumed and only the
/// appended bars are computed, which gives the same values as a full
/// recomputation.
///
/// Toggling which overlays are drawn does not involve the cache at all;
/// only new bars or new parameters cause work.
///
/// # Example
///
/// ```
/// use pricechart_ta::{Bar, EngineConfig, SeriesCache};
/// use std::sync::Arc;
///
/// let bar = |t: u64, close: f64| Bar { timestamp: t, open: close, high: close, low: close, close, volume: 0.0 };
/// let mut bars: Vec<Bar> = (1..=30).map(|t| bar(t, 100.0 + t as f64)).collect();
///
/// let mut cache = SeriesCache::new(EngineConfig::default());
/// let first = cache.get_or_compute(&bars);
/// let again = cache.get_or_compute(&bars);
/// assert!(Arc::ptr_eq(&first, &again));
///
/// bars.push(bar(31, 131.0));
/// let extended = cache.get_or_compute(&bars);
/// assert_eq!(extended.len(), 31);
/// assert_eq!(cache.stats().extensions, 1);
/// ```
pub struct SeriesCache<B> {
    config: EngineConfig,
    entry: Option<Entry<B>>,
    stats: CacheStats,
}

impl<B: Ohlcv + Clone> SeriesCache<B> {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            entry: None,
            stats: CacheStats::default(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Replaces the parameters. Drops the cached series if they changed.
    pub fn set_config(&mut self, config: EngineConfig) {
        if config != self.config {
            debug!(%config, "indicator parameters changed");
            self.config = config;
            self.invalidate();
        }
    }

    /// Drops the cached series.
    pub fn invalidate(&mut self) {
        if self.entry.take().is_some() {
            trace!("series cache invalidated");
        }
    }

    /// Returns the augmented series for `bars`, computing only what the
    /// cached entry does not already cover.
    ///
    /// Recognizing a hit or an extension hashes the whole cached prefix,
    /// so every call is O(n) in the number of bars even when nothing is
    /// computed. A changed last cached bar is detected in O(1) and goes
    /// straight to recomputation.
    pub fn get_or_compute(&mut self, bars: &[B]) -> SharedSeries<B> {
        if let Some(entry) = self.entry.as_mut() {
            let last_bar_unchanged = bars.len() >= entry.len
                && entry.last_bar
                    == entry.len.checked_sub(1).map(|i| bar_fingerprint(&bars[i]));

            if last_bar_unchanged {
                let mut hasher = DefaultHasher::new();
                hash_bars(&mut hasher, &bars[..entry.len]);

                if hasher.finish() == entry.fingerprint {
                    let appended = &bars[entry.len..];

                    if appended.is_empty() {
                        trace!(bars = bars.len(), "series cache hit");
                        self.stats.hits += 1;
                        return Arc::clone(&entry.series);
                    }

                    debug!(
                        cached = entry.len,
                        appended = appended.len(),
                        "extending cached series"
                    );
                    let series = Arc::make_mut(&mut entry.series);
                    series.reserve(appended.len());
                    for bar in appended {
                        hash_bar(&mut hasher, bar);
                        series.push(Augmented {
                            bar: bar.clone(),
                            point: entry.state.push(bar.close()),
                        });
                    }

                    entry.len = bars.len();
                    entry.fingerprint = hasher.finish();
                    entry.last_bar = bars.last().map(bar_fingerprint);
                    self.stats.extensions += 1;
                    return Arc::clone(&entry.series);
                }
            }
        }

        self.recompute(bars)
    }

    fn recompute(&mut self, bars: &[B]) -> SharedSeries<B> {
        debug!(bars = bars.len(), config = %self.config, "computing indicator series");

        let mut hasher = DefaultHasher::new();
        let mut state = OverlayState::new(&self.config);
        let series: Vec<_> = bars
            .iter()
            .map(|bar| {
                hash_bar(&mut hasher, bar);
                Augmented {
                    bar: bar.clone(),
                    point: state.push(bar.close()),
                }
            })
            .collect();

        let series = Arc::new(series);
        self.entry = Some(Entry {
            len: bars.len(),
            fingerprint: hasher.finish(),
            last_bar: bars.last().map(bar_fingerprint),
            state,
            series: Arc::clone(&series),
        });
        self.stats.recomputes += 1;

        series
    }
}

fn hash_bars(hasher: &mut impl Hasher, bars: &[impl Ohlcv]) {
    for bar in bars {
        hash_bar(hasher, bar);
    }
}

fn bar_fingerprint(bar: &impl Ohlcv) -> u64 {
    let mut hasher = DefaultHasher::new();
    hash_bar(&mut hasher, bar);
    hasher.finish()
}

#[inline]
fn hash_bar(hasher: &mut impl Hasher, bar: &impl Ohlcv) {
    hasher.write_u64(bar.open_time());
    for value in [bar.open(), bar.high(), bar.low(), bar.close(), bar.volume()] {
        hasher.write_u64(value.to_bits());
    }
}
