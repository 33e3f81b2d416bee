//! Asset-detail view: one session plus its chart panel.
//!
//! Selecting an asset throws away the previous session (cache, availability,
//! pending loads) and chart instances, then opens a fresh session.

use crate::domain::asset::SnapshotSource;
use crate::domain::chart::selection::SelectionEvent;
use crate::domain::chart::{ChartBackend, ChartPanel, SeriesId};
use crate::domain::history::HistorySource;
use crate::domain::range::AvailableRanges;
use crate::session::{AssetSession, InitOutcome, LoadOutcome};
use crate::shared::{AssetId, Range};

use chrono::{DateTime, Utc};

pub struct AssetDetailView<S, B: ChartBackend> {
    source: S,
    preferred_range: Range,
    clock: Option<DateTime<Utc>>,
    panel: ChartPanel<B>,
    session: Option<AssetSession<S>>,
    empty_history: bool,
}

impl<S, B> AssetDetailView<S, B>
where
    S: HistorySource + SnapshotSource + Clone,
    B: ChartBackend,
{
    pub fn new(source: S, backend: B) -> Self {
        Self {
            source,
            preferred_range: Range::Day7,
            clock: None,
            panel: ChartPanel::new(backend),
            session: None,
            empty_history: false,
        }
    }

    pub fn with_preferred_range(mut self, range: Range) -> Self {
        self.preferred_range = range;
        self
    }

    pub fn with_clock(mut self, now: DateTime<Utc>) -> Self {
        self.clock = Some(now);
        self
    }

    /// Switch to `asset_id` and render its initial range.
    pub async fn select_asset(&mut self, asset_id: impl Into<AssetId>) -> InitOutcome {
        let mut session = AssetSession::new(asset_id.into(), self.source.clone())
            .with_preferred_range(self.preferred_range);
        if let Some(now) = self.clock {
            session = session.with_clock(now);
        }

        self.panel.reset();
        self.empty_history = false;
        let session = self.session.insert(session);
        tracing::debug!(asset = %session.asset_id(), "asset selected");

        let outcome = session.init().await;
        self.apply(&outcome.load);
        outcome
    }

    /// Range button click. No-op before an asset is selected.
    pub async fn request_range(&mut self, key: &str) -> Option<LoadOutcome> {
        let session = self.session.as_ref()?;
        let outcome = session.request_range(key, false).await;
        self.apply(&outcome);
        Some(outcome)
    }

    /// Reload the active range even though it is already shown.
    pub async fn refresh(&mut self) -> Option<LoadOutcome> {
        let session = self.session.as_ref()?;
        let key = session.active_range().await.unwrap_or(self.preferred_range).key();
        let outcome = session.request_range(key, true).await;
        self.apply(&outcome);
        Some(outcome)
    }

    pub fn on_selection(&mut self, series: SeriesId, event: &SelectionEvent) -> Option<usize> {
        self.panel.on_selection(series, event)
    }

    fn apply(&mut self, outcome: &LoadOutcome) {
        match outcome {
            LoadOutcome::Loaded { dataset, .. } => {
                self.empty_history = false;
                self.panel.render(dataset);
            }
            LoadOutcome::Empty => self.empty_history = true,
            _ => {}
        }
    }

    pub fn session(&self) -> Option<&AssetSession<S>> {
        self.session.as_ref()
    }

    pub fn panel(&self) -> &ChartPanel<B> {
        &self.panel
    }

    /// Whether the empty-history indicator should be shown.
    pub fn shows_empty_history(&self) -> bool {
        self.empty_history
    }

    pub async fn availability(&self) -> AvailableRanges {
        match &self.session {
            Some(session) => session.availability().await,
            None => AvailableRanges::new(),
        }
    }

    pub async fn active_range(&self) -> Option<Range> {
        match &self.session {
            Some(session) => session.active_range().await,
            None => None,
        }
    }

    pub async fn status(&self) -> Option<String> {
        match &self.session {
            Some(session) => session.status().await,
            None => None,
        }
    }
}
