//! In-memory quote memoization.
//!
//! Replaces an implicit whole-process memo with an explicit LRU keyed by
//! (lookback days, ticker-map fingerprint). Capacity is small and fixed;
//! entries live for the process lifetime at most. Errors are never cached.

use super::fetch::fetch_all;
use super::provider::{CompanySeries, DataError, FetchProgress, QuoteProvider};
use crate::config::TickerMap;
use std::collections::VecDeque;
use std::sync::Arc;

/// Cache key: lookback window plus the identity of the ticker map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    pub days: u32,
    pub tickers_fingerprint: String,
}

impl CacheKey {
    pub fn new(days: u32, tickers: &TickerMap) -> Self {
        Self {
            days,
            tickers_fingerprint: tickers.fingerprint(),
        }
    }
}

/// LRU cache of fetched company series.
///
/// Front of the deque is most recently used.
pub struct QuoteCache {
    entries: VecDeque<(CacheKey, Arc<Vec<CompanySeries>>)>,
    capacity: usize,
}

impl QuoteCache {
    pub const DEFAULT_CAPACITY: usize = 8;

    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a key, promoting it to most-recently-used on a hit.
    pub fn get(&mut self, key: &CacheKey) -> Option<Arc<Vec<CompanySeries>>> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        let entry = self.entries.remove(pos)?;
        let value = entry.1.clone();
        self.entries.push_front(entry);
        Some(value)
    }

    /// Insert a value, evicting the least-recently-used entry when full.
    pub fn insert(&mut self, key: CacheKey, value: Arc<Vec<CompanySeries>>) {
        if let Some(pos) = self.entries.iter().position(|(k, _)| *k == key) {
            self.entries.remove(pos);
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front((key, value));
    }

    /// Fetch through the cache: return the memoized series for
    /// (days, tickers) or run `fetch_all` and remember the result.
    pub fn get_or_fetch(
        &mut self,
        provider: &dyn QuoteProvider,
        tickers: &TickerMap,
        days: u32,
        progress: &dyn FetchProgress,
    ) -> Result<Arc<Vec<CompanySeries>>, DataError> {
        let key = CacheKey::new(days, tickers);
        if let Some(hit) = self.get(&key) {
            return Ok(hit);
        }

        let series = Arc::new(fetch_all(provider, tickers, days, progress)?);
        self.insert(key, series.clone());
        Ok(series)
    }
}

impl Default for QuoteCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::provider::{PricePoint, SilentProgress};
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        calls: AtomicUsize,
    }

    impl QuoteProvider for CountingProvider {
        fn name(&self) -> &str {
            "counting"
        }

        fn fetch_closes(&self, _symbol: &str, _days: u32) -> Result<Vec<PricePoint>, DataError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Ok(vec![PricePoint {
                date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
                close: 100.0,
            }])
        }
    }

    fn key(days: u32) -> CacheKey {
        CacheKey::new(days, &TickerMap::default_us())
    }

    #[test]
    fn hit_avoids_refetch() {
        let provider = CountingProvider {
            calls: AtomicUsize::new(0),
        };
        let tickers = TickerMap::default_us();
        let mut cache = QuoteCache::default();

        let a = cache
            .get_or_fetch(&provider, &tickers, 90, &SilentProgress)
            .unwrap();
        let b = cache
            .get_or_fetch(&provider, &tickers, 90, &SilentProgress)
            .unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(provider.calls.load(Ordering::Relaxed), tickers.len());
    }

    #[test]
    fn distinct_days_are_distinct_entries() {
        let provider = CountingProvider {
            calls: AtomicUsize::new(0),
        };
        let tickers = TickerMap::default_us();
        let mut cache = QuoteCache::default();

        cache
            .get_or_fetch(&provider, &tickers, 30, &SilentProgress)
            .unwrap();
        cache
            .get_or_fetch(&provider, &tickers, 90, &SilentProgress)
            .unwrap();

        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn evicts_least_recently_used() {
        let mut cache = QuoteCache::new(2);
        let empty = Arc::new(Vec::new());

        cache.insert(key(1), empty.clone());
        cache.insert(key(2), empty.clone());
        // Touch key(1) so key(2) becomes the LRU victim.
        assert!(cache.get(&key(1)).is_some());
        cache.insert(key(3), empty);

        assert!(cache.get(&key(1)).is_some());
        assert!(cache.get(&key(2)).is_none());
        assert!(cache.get(&key(3)).is_some());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn errors_are_not_cached() {
        struct FailingProvider;
        impl QuoteProvider for FailingProvider {
            fn name(&self) -> &str {
                "failing"
            }
            fn fetch_closes(
                &self,
                symbol: &str,
                _days: u32,
            ) -> Result<Vec<PricePoint>, DataError> {
                Err(DataError::SymbolNotFound {
                    symbol: symbol.to_string(),
                })
            }
        }

        let tickers = TickerMap::default_us();
        let mut cache = QuoteCache::default();
        let result = cache.get_or_fetch(&FailingProvider, &tickers, 90, &SilentProgress);

        assert!(result.is_err());
        assert!(cache.is_empty());
    }
}
