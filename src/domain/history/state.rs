//! History cache: per-asset memo of raw point lists, keyed by range.

use super::{HistoryPoint, HistorySource};
use crate::error::SdkError;
use crate::shared::{AssetId, Range};
use async_lock::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Memoized raw point lists for one asset.
///
/// Entries are never evicted individually and have no TTL; the owning session
/// is discarded (or [`HistoryCache::clear`] is called) when the asset changes.
/// Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct HistoryCache {
    entries: Arc<RwLock<HashMap<Range, Arc<Vec<HistoryPoint>>>>>,
}

impl HistoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached list for `range`, fetching it once on a miss.
    ///
    /// Concurrent misses for the same key may both fetch. The cache is
    /// re-checked before storing and an existing entry wins, so every caller
    /// observes the same list for a key once one has been stored.
    pub async fn get_or_fetch<S: HistorySource>(
        &self,
        source: &S,
        asset_id: &AssetId,
        range: Range,
    ) -> Result<Arc<Vec<HistoryPoint>>, SdkError> {
        if let Some(points) = self.get(range).await {
            tracing::debug!(asset = %asset_id, range = %range, "history cache hit");
            return Ok(points);
        }

        tracing::debug!(asset = %asset_id, range = %range, "history cache miss, fetching");
        let fetched = Arc::new(source.fetch_history(asset_id, range).await?);

        let mut entries = self.entries.write().await;
        let stored = entries.entry(range).or_insert(fetched);
        Ok(stored.clone())
    }

    pub async fn get(&self, range: Range) -> Option<Arc<Vec<HistoryPoint>>> {
        self.entries.read().await.get(&range).cloned()
    }

    /// Store a list directly (e.g. a payload already fetched elsewhere).
    pub async fn insert(&self, range: Range, points: Vec<HistoryPoint>) {
        self.entries.write().await.insert(range, Arc::new(points));
    }

    pub async fn contains(&self, range: Range) -> bool {
        self.entries.read().await.contains_key(&range)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
    }

    impl HistorySource for CountingSource {
        async fn fetch_history(
            &self,
            _asset_id: &AssetId,
            range: Range,
        ) -> Result<Vec<HistoryPoint>, SdkError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if range == Range::Year5 {
                return Err(SdkError::Other("boom".into()));
            }
            Ok(vec![HistoryPoint {
                timestamp: "2024-01-01".into(),
                price: Some(n as f64),
                ..Default::default()
            }])
        }
    }

    #[tokio::test]
    async fn test_fetches_once_per_key() {
        let source = CountingSource::default();
        let cache = HistoryCache::new();
        let asset = AssetId::from("bitcoin");

        let first = cache.get_or_fetch(&source, &asset, Range::Day7).await.unwrap();
        let second = cache.get_or_fetch(&source, &asset, Range::Day7).await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));

        cache.get_or_fetch(&source, &asset, Range::Max).await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len().await, 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let source = CountingSource::default();
        let cache = HistoryCache::new();
        let asset = AssetId::from("bitcoin");

        assert!(cache.get_or_fetch(&source, &asset, Range::Year5).await.is_err());
        assert!(!cache.contains(Range::Year5).await);
        assert!(cache.get_or_fetch(&source, &asset, Range::Year5).await.is_err());
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_cached_empty_list_is_a_hit() {
        let source = CountingSource::default();
        let cache = HistoryCache::new();
        let asset = AssetId::from("bitcoin");

        tokio_test::block_on(async {
            cache.insert(Range::Day1, Vec::new()).await;
            let points = cache.get_or_fetch(&source, &asset, Range::Day1).await.unwrap();
            assert!(points.is_empty());
        });
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_clear_drops_everything() {
        let source = CountingSource::default();
        let cache = HistoryCache::new();
        let asset = AssetId::from("bitcoin");

        cache.get_or_fetch(&source, &asset, Range::Day1).await.unwrap();
        cache.clear().await;
        assert!(cache.is_empty().await);
        cache.get_or_fetch(&source, &asset, Range::Day1).await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }
}
