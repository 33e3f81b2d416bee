//! Per-asset session: availability, cache, and range fallback for one asset.
//!
//! A session is created when an asset is selected and dropped when the user
//! navigates to another one; nothing is shared between assets. All methods take
//! `&self`, so several range requests can be in flight at once. Each request
//! takes a monotonically increasing token and only the latest one may commit.

pub mod state;

use crate::domain::asset::{AssetSnapshot, SnapshotSource};
use crate::domain::history::{build_historical_dataset, HistoryCache, HistoryPoint, HistorySource};
use crate::domain::range::selector::nearest_available;
use crate::domain::range::{compute_available_ranges_from_points, AvailableRanges};
use crate::error::SdkError;
use crate::shared::{AssetId, Range};

use async_lock::RwLock;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};

pub use state::{
    InitOutcome, LoadOutcome, LoadState, HISTORY_UNAVAILABLE, NO_HISTORY, SNAPSHOT_UNAVAILABLE,
};

#[derive(Debug, Default)]
struct RangeState {
    available: AvailableRanges,
    active: Option<Range>,
    load: LoadState,
    status: Option<String>,
    snapshot: Option<AssetSnapshot>,
}

/// History range coordinator for a single asset.
pub struct AssetSession<S> {
    asset_id: AssetId,
    source: S,
    cache: HistoryCache,
    state: RwLock<RangeState>,
    latest_token: AtomicU64,
    preferred_range: Range,
    clock: Option<DateTime<Utc>>,
}

impl<S> AssetSession<S> {
    pub fn new(asset_id: AssetId, source: S) -> Self {
        Self {
            asset_id,
            source,
            cache: HistoryCache::new(),
            state: RwLock::new(RangeState::default()),
            latest_token: AtomicU64::new(0),
            preferred_range: Range::Day7,
            clock: None,
        }
    }

    /// Range `init` tries to open on.
    pub fn with_preferred_range(mut self, range: Range) -> Self {
        self.preferred_range = range;
        self
    }

    /// Pin "now" for availability computation instead of using the wall clock.
    pub fn with_clock(mut self, now: DateTime<Utc>) -> Self {
        self.clock = Some(now);
        self
    }

    pub fn asset_id(&self) -> &AssetId {
        &self.asset_id
    }

    pub fn preferred_range(&self) -> Range {
        self.preferred_range
    }

    pub fn cache(&self) -> &HistoryCache {
        &self.cache
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    // ── Presentation accessors ───────────────────────────────────────────

    /// Ranges whose buttons should be enabled.
    pub async fn availability(&self) -> AvailableRanges {
        self.state.read().await.available.clone()
    }

    /// Range to highlight.
    pub async fn active_range(&self) -> Option<Range> {
        self.state.read().await.active
    }

    pub async fn load_state(&self) -> LoadState {
        self.state.read().await.load.clone()
    }

    /// User-visible status text, if the last history operation failed or found nothing.
    pub async fn status(&self) -> Option<String> {
        self.state.read().await.status.clone()
    }

    pub async fn snapshot(&self) -> Option<AssetSnapshot> {
        self.state.read().await.snapshot.clone()
    }

    fn is_current(&self, token: u64) -> bool {
        self.latest_token.load(Ordering::SeqCst) == token
    }
}

impl<S: HistorySource + SnapshotSource> AssetSession<S> {
    /// Open the session: detail snapshot, availability seed from the `max`
    /// history, then a forced load of the best range near the preferred one.
    ///
    /// Never fails; problems surface as status text and in the returned outcome.
    pub async fn init(&self) -> InitOutcome {
        let (snapshot, snapshot_error) = match self.source.fetch_snapshot(&self.asset_id).await {
            Ok(snapshot) => {
                self.state.write().await.snapshot = Some(snapshot.clone());
                (Some(snapshot), None)
            }
            Err(e) => {
                tracing::warn!(asset = %self.asset_id, error = %e, "snapshot fetch failed");
                (None, Some(SNAPSHOT_UNAVAILABLE.to_string()))
            }
        };

        let load = self.seed_and_load().await;
        InitOutcome {
            snapshot,
            snapshot_error,
            load,
        }
    }
}

impl<S: HistorySource> AssetSession<S> {
    /// Seed availability from the `max` history and load the initial range.
    pub async fn seed_and_load(&self) -> LoadOutcome {
        let points = match self.cache.get_or_fetch(&self.source, &self.asset_id, Range::Max).await {
            Ok(points) => points,
            Err(e) => return self.commit_failure(None, Range::Max, e).await,
        };

        let available = compute_available_ranges_from_points(&points, self.clock);
        tracing::debug!(
            asset = %self.asset_id,
            available = ?available.keys(),
            "seeded range availability"
        );

        let initial = nearest_available(&available, self.preferred_range);
        self.state.write().await.available = available;

        match initial {
            Some(range) => self.load(range, true).await,
            None => self.commit_empty(None).await,
        }
    }

    /// Handle a range request from the UI.
    ///
    /// A blank key means `max`. An unknown key resolves to the first available
    /// range. Unless `force` is set, requesting the active range is a no-op.
    pub async fn request_range(&self, key: &str, force: bool) -> LoadOutcome {
        let range = match Range::normalize(key) {
            Some(range) => range,
            None => {
                let first = self.state.read().await.available.first();
                match first {
                    Some(range) => {
                        tracing::debug!(key, substitute = %range, "unknown range key");
                        range
                    }
                    None => return self.commit_empty(None).await,
                }
            }
        };
        self.load(range, force).await
    }

    /// Load `requested`, falling back through available ranges while results
    /// come back empty. Bounded by the catalog size since every empty result
    /// prunes one range.
    pub async fn load(&self, requested: Range, force: bool) -> LoadOutcome {
        {
            let state = self.state.read().await;
            if !force && state.active == Some(requested) && state.load == LoadState::Loaded(requested) {
                return LoadOutcome::Unchanged(requested);
            }
        }

        let token = self.latest_token.fetch_add(1, Ordering::SeqCst) + 1;
        let mut candidate = requested;
        let mut excluded = Vec::new();

        for _ in 0..Range::ALL.len() {
            {
                let mut state = self.state.write().await;
                if !self.is_current(token) {
                    return LoadOutcome::Superseded { range: candidate };
                }
                state.load = LoadState::Loading(candidate);
            }

            let result = self.cache.get_or_fetch(&self.source, &self.asset_id, candidate).await;
            let points = match result {
                Ok(points) => points,
                Err(e) => return self.commit_failure(Some(token), candidate, e).await,
            };

            if !points.is_empty() || candidate.is_max() {
                return self.commit_loaded(token, requested, candidate, &points).await;
            }

            let mut state = self.state.write().await;
            if !self.is_current(token) {
                return LoadOutcome::Superseded { range: candidate };
            }
            state.available.remove(candidate);
            excluded.push(candidate);
            let next = nearest_available(&state.available, candidate);
            state.load = LoadState::FallingBack {
                from: candidate,
                excluded: excluded.clone(),
            };

            match next {
                Some(next) if next != candidate => {
                    tracing::info!(
                        asset = %self.asset_id,
                        from = %candidate,
                        to = %next,
                        "range empty, falling back"
                    );
                    candidate = next;
                }
                _ => {
                    drop(state);
                    return self.commit_empty(Some(token)).await;
                }
            }
        }

        self.commit_empty(Some(token)).await
    }

    async fn commit_loaded(
        &self,
        token: u64,
        requested: Range,
        range: Range,
        points: &[HistoryPoint],
    ) -> LoadOutcome {
        let mut state = self.state.write().await;
        if !self.is_current(token) {
            tracing::debug!(asset = %self.asset_id, range = %range, token, "discarding stale load");
            return LoadOutcome::Superseded { range };
        }
        state.active = Some(range);
        state.load = LoadState::Loaded(range);
        state.status = None;
        tracing::info!(asset = %self.asset_id, range = %range, points = points.len(), "range loaded");

        LoadOutcome::Loaded {
            range,
            requested,
            dataset: build_historical_dataset(points),
        }
    }

    async fn commit_failure(&self, token: Option<u64>, range: Range, error: SdkError) -> LoadOutcome {
        tracing::warn!(asset = %self.asset_id, range = %range, error = %error, "history fetch failed");
        let mut state = self.state.write().await;
        if token.is_some_and(|t| !self.is_current(t)) {
            return LoadOutcome::Superseded { range };
        }
        state.status = Some(HISTORY_UNAVAILABLE.to_string());
        state.load = match state.active {
            Some(active) => LoadState::Loaded(active),
            None => LoadState::Idle,
        };
        LoadOutcome::Failed {
            range,
            message: HISTORY_UNAVAILABLE.to_string(),
        }
    }

    async fn commit_empty(&self, token: Option<u64>) -> LoadOutcome {
        let mut state = self.state.write().await;
        if let Some(t) = token {
            if !self.is_current(t) {
                return LoadOutcome::Superseded {
                    range: state.active.unwrap_or(Range::Max),
                };
            }
        }
        tracing::info!(asset = %self.asset_id, "no history for any range");
        state.active = None;
        state.load = LoadState::Idle;
        state.status = Some(NO_HISTORY.to_string());
        LoadOutcome::Empty
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{points, FakeSource};
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap()
    }

    fn session(source: FakeSource) -> AssetSession<FakeSource> {
        AssetSession::new(AssetId::from("bitcoin"), source).with_clock(now())
    }

    fn snapshot() -> AssetSnapshot {
        AssetSnapshot {
            id: AssetId::from("bitcoin"),
            symbol: Some("btc".into()),
            name: Some("Bitcoin".into()),
            price: Some(45_000.0),
            market_cap: None,
            volume_24h: None,
            change_24h_pct: None,
            last_updated: None,
        }
    }

    /// Max history spanning one week; 7d has data, 1m does not.
    fn week_source() -> FakeSource {
        FakeSource {
            snapshot: Some(snapshot()),
            ..Default::default()
        }
        .with(Range::Max, &["2024-01-01", "2024-01-08"])
        .with(Range::Day7, &["2024-01-01", "2024-01-04", "2024-01-08"])
        .with(Range::Day1, &["2024-01-07T00:00:00Z", "2024-01-08T00:00:00Z"])
    }

    #[tokio::test]
    async fn test_init_end_to_end_falls_back_to_week() {
        let session = session(week_source()).with_preferred_range(Range::Month1);
        let outcome = session.init().await;

        assert_eq!(outcome.snapshot, Some(snapshot()));
        assert_eq!(outcome.snapshot_error, None);
        assert_eq!(
            session.availability().await,
            AvailableRanges::from([Range::Day1, Range::Day7, Range::Max])
        );
        assert_eq!(outcome.load.loaded_range(), Some(Range::Day7));
        assert_eq!(outcome.load.dataset().map(|d| d.len()), Some(3));
        assert_eq!(session.active_range().await, Some(Range::Day7));
        assert_eq!(session.load_state().await, LoadState::Loaded(Range::Day7));
        assert_eq!(session.source().calls(), vec![Range::Max, Range::Day7]);
    }

    #[tokio::test]
    async fn test_request_month_falls_back_to_week() {
        let session = session(week_source());
        session.init().await;

        let outcome = session.request_range("1m", false).await;
        match outcome {
            LoadOutcome::Loaded { range, requested, .. } => {
                assert_eq!(range, Range::Day7);
                assert_eq!(requested, Range::Month1);
            }
            other => panic!("expected Loaded, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_range_is_pruned_then_substituted() {
        // 40 days of max history, so 1m is advertised but its fetch is empty.
        let source = FakeSource::default()
            .with(Range::Max, &["2023-11-29", "2024-01-08"])
            .with(Range::Day7, &["2024-01-01", "2024-01-08"]);
        let session = session(source).with_preferred_range(Range::Day1);
        session.init().await;
        assert!(session.availability().await.contains(Range::Month1));

        let outcome = session.request_range("1m", false).await;
        assert!(outcome.is_fallback());
        assert_eq!(outcome.loaded_range(), Some(Range::Day7));
        assert!(!session.availability().await.contains(Range::Month1));
        assert_eq!(session.active_range().await, Some(Range::Day7));
    }

    #[tokio::test]
    async fn test_only_max_resolves_in_one_hop() {
        let source = FakeSource::default().with(Range::Max, &["2024-01-08"]);
        let session = session(source).with_preferred_range(Range::Max);
        session.init().await;
        assert_eq!(session.availability().await, AvailableRanges::from([Range::Max]));

        let outcome = session.request_range("3m", false).await;
        assert_eq!(outcome.loaded_range(), Some(Range::Max));
        // Max is already cached, so only the 3m fetch hits the source.
        assert_eq!(session.source().calls(), vec![Range::Max, Range::Month3]);
    }

    #[tokio::test]
    async fn test_multi_hop_fallback_terminates_at_max() {
        let source = FakeSource::default().with(Range::Max, &["2024-01-01", "2024-01-08"]);
        let session = session(source).with_preferred_range(Range::Max);
        session.init().await;

        let outcome = session.request_range("24h", false).await;
        assert_eq!(outcome.loaded_range(), Some(Range::Max));
        assert_eq!(
            session.source().calls(),
            vec![Range::Max, Range::Day1, Range::Day7]
        );
        assert_eq!(session.availability().await, AvailableRanges::from([Range::Max]));
    }

    #[tokio::test]
    async fn test_empty_max_still_loads_max() {
        let source = FakeSource::default();
        let session = session(source).with_preferred_range(Range::Max);
        let outcome = session.request_range("max", false).await;
        assert_eq!(outcome.loaded_range(), Some(Range::Max));
        assert!(outcome.dataset().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_no_availability_renders_empty_state() {
        let session = session(FakeSource::default());
        let outcome = session.init().await;
        assert_eq!(outcome.load, LoadOutcome::Empty);
        assert_eq!(outcome.snapshot_error.as_deref(), Some(SNAPSHOT_UNAVAILABLE));
        assert_eq!(session.status().await.as_deref(), Some(NO_HISTORY));
        assert_eq!(session.active_range().await, None);

        // Without any availability an empty 7d has nowhere to go.
        let outcome = session.request_range("7d", false).await;
        assert_eq!(outcome, LoadOutcome::Empty);
    }

    #[tokio::test]
    async fn test_same_range_is_noop_unless_forced() {
        let session = session(week_source());
        session.init().await;

        assert_eq!(
            session.request_range("7d", false).await,
            LoadOutcome::Unchanged(Range::Day7)
        );
        let forced = session.request_range("7d", true).await;
        assert_eq!(forced.loaded_range(), Some(Range::Day7));
        // Forced reload is served from cache.
        assert_eq!(session.source().calls(), vec![Range::Max, Range::Day7]);
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_previous_state() {
        let mut source = week_source();
        source.failing.push(Range::Day1);
        let session = session(source);
        session.init().await;

        let outcome = session.request_range("24h", false).await;
        assert!(matches!(outcome, LoadOutcome::Failed { range: Range::Day1, .. }));
        assert_eq!(session.status().await.as_deref(), Some(HISTORY_UNAVAILABLE));
        assert_eq!(session.active_range().await, Some(Range::Day7));
        assert_eq!(session.load_state().await, LoadState::Loaded(Range::Day7));
        // A failed range is not pruned; it may work on retry.
        assert!(session.availability().await.contains(Range::Day1));
    }

    #[tokio::test]
    async fn test_seed_failure_is_reported_not_raised() {
        let source = FakeSource {
            failing: vec![Range::Max],
            snapshot: Some(snapshot()),
            ..Default::default()
        };
        let session = session(source);
        let outcome = session.init().await;
        assert!(matches!(outcome.load, LoadOutcome::Failed { range: Range::Max, .. }));
        assert!(outcome.snapshot.is_some());
        assert_eq!(session.status().await.as_deref(), Some(HISTORY_UNAVAILABLE));
        assert!(session.availability().await.is_empty());
    }

    #[tokio::test]
    async fn test_blank_and_unknown_keys() {
        let session = session(week_source());
        session.init().await;

        assert_eq!(session.request_range("", false).await.loaded_range(), Some(Range::Max));
        assert_eq!(
            session.request_range("decade", false).await.loaded_range(),
            Some(Range::Day1)
        );
    }

    #[tokio::test]
    async fn test_stale_completion_is_discarded() {
        let mut source = week_source();
        source.history.insert(Range::Year1, points(&["2023-01-08", "2024-01-08"]));
        source.delays_ms.insert(Range::Year1, 50);
        source.delays_ms.insert(Range::Day1, 5);
        let session = session(source);
        session.init().await;

        let (slow, fast) = tokio::join!(
            session.request_range("1y", false),
            session.request_range("24h", false)
        );

        assert_eq!(slow, LoadOutcome::Superseded { range: Range::Year1 });
        assert_eq!(fast.loaded_range(), Some(Range::Day1));
        assert_eq!(session.active_range().await, Some(Range::Day1));
        assert_eq!(session.load_state().await, LoadState::Loaded(Range::Day1));
        // The slow payload is still cached for a later click.
        assert!(session.cache().contains(Range::Year1).await);
    }
}
