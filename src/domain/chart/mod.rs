//! Chart domain: per-series payloads, the charting collaborator contract,
//! and cursor synchronization across the price / market cap / volume charts.

pub mod selection;
pub mod sync;

use crate::domain::history::Dataset;
use crate::shared::fmt::num;
use serde::{Deserialize, Serialize};

pub use selection::{resolve_point_index, SelectionEvent};
pub use sync::{ChartHandle, ChartSyncCoordinator};

// ─── SeriesId ────────────────────────────────────────────────────────────────

/// One of the three parallel metrics, each rendered as its own chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesId {
    Price,
    Market,
    Volume,
}

impl SeriesId {
    pub const ALL: [SeriesId; 3] = [SeriesId::Price, SeriesId::Market, SeriesId::Volume];

    /// Stable identifier used for chart containers.
    pub fn as_str(&self) -> &'static str {
        match self {
            SeriesId::Price => "price",
            SeriesId::Market => "market",
            SeriesId::Volume => "volume",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.as_str() == id)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SeriesId::Price => "Price",
            SeriesId::Market => "Market Cap",
            SeriesId::Volume => "Volume",
        }
    }

    /// Tooltip text for a value of this series. Missing values render as a dash.
    pub fn format_value(&self, value: Option<f64>) -> String {
        match (self, value) {
            (_, None) => "—".to_string(),
            (SeriesId::Price, Some(v)) => num::usd(v),
            (_, Some(v)) if v < 0.0 => format!("-${}", num::compact(-v)),
            (_, Some(v)) => format!("${}", num::compact(v)),
        }
    }

    pub(crate) fn slot(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for SeriesId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── SeriesPayload ───────────────────────────────────────────────────────────

/// Declarative description of one chart: `{ name, categories, data }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPayload {
    pub series: SeriesId,
    pub name: String,
    pub categories: Vec<String>,
    pub data: Vec<Option<f64>>,
}

impl SeriesPayload {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// `(category, formatted value)` at `index`, for a tooltip.
    pub fn label_at(&self, index: usize) -> Option<(String, String)> {
        let category = self.categories.get(index)?;
        let value = self.data.get(index).copied().flatten();
        Some((category.clone(), self.series.format_value(value)))
    }
}

// ─── Collaborator contract ───────────────────────────────────────────────────

/// A live chart object owned by the charting library.
pub trait ChartInstance {
    /// Replace the rendered series in place.
    fn update(&mut self, payload: &SeriesPayload);
    /// Show this chart's own tooltip at `index`.
    fn show_tooltip(&mut self, index: usize);
    fn hide_tooltip(&mut self);
}

/// Factory for chart instances.
pub trait ChartBackend {
    type Instance: ChartInstance;

    /// Create a chart for `payload`. Returns `None` when the container for
    /// the series is not mounted; callers treat that as a no-op.
    fn create(&mut self, payload: &SeriesPayload) -> Option<Self::Instance>;
}

// ─── ChartPanel ──────────────────────────────────────────────────────────────

/// The three charts of the asset-detail view.
///
/// Instances are created on first render and updated in place afterwards.
pub struct ChartPanel<B: ChartBackend> {
    backend: B,
    sync: ChartSyncCoordinator<B::Instance>,
}

impl<B: ChartBackend> ChartPanel<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            sync: ChartSyncCoordinator::new(),
        }
    }

    /// Hand each series of `dataset` to its chart.
    pub fn render(&mut self, dataset: &Dataset) {
        for series in SeriesId::ALL {
            let payload = dataset.series(series);
            if let Some(instance) = self.sync.instance_mut(series) {
                instance.update(&payload);
                continue;
            }
            match self.backend.create(&payload) {
                Some(instance) => self.sync.register_instance(series, instance),
                None => tracing::debug!(series = %series, "chart container missing, skipping"),
            }
        }
    }

    /// Route a hover/selection event from one chart to all of them.
    pub fn on_selection(&mut self, series: SeriesId, event: &SelectionEvent) -> Option<usize> {
        self.sync.on_selection(series, event)
    }

    /// Drop every instance (asset change); the next render recreates them.
    pub fn reset(&mut self) {
        self.sync.reset();
    }

    pub fn sync(&self) -> &ChartSyncCoordinator<B::Instance> {
        &self.sync
    }

    pub fn sync_mut(&mut self) -> &mut ChartSyncCoordinator<B::Instance> {
        &mut self.sync
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording fakes for the charting collaborator.

    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Update(usize),
        Show(usize),
        Hide,
    }

    pub type Log = Rc<RefCell<Vec<(SeriesId, Call)>>>;

    pub struct FakeChart {
        pub series: SeriesId,
        pub log: Log,
    }

    impl ChartInstance for FakeChart {
        fn update(&mut self, payload: &SeriesPayload) {
            self.log.borrow_mut().push((self.series, Call::Update(payload.len())));
        }

        fn show_tooltip(&mut self, index: usize) {
            self.log.borrow_mut().push((self.series, Call::Show(index)));
        }

        fn hide_tooltip(&mut self) {
            self.log.borrow_mut().push((self.series, Call::Hide));
        }
    }

    /// Creates charts for every series except those listed as unmounted.
    #[derive(Default)]
    pub struct FakeBackend {
        pub log: Log,
        pub created: Vec<SeriesId>,
        pub unmounted: Vec<SeriesId>,
    }

    impl ChartBackend for FakeBackend {
        type Instance = FakeChart;

        fn create(&mut self, payload: &SeriesPayload) -> Option<FakeChart> {
            if self.unmounted.contains(&payload.series) {
                return None;
            }
            self.created.push(payload.series);
            Some(FakeChart {
                series: payload.series,
                log: self.log.clone(),
            })
        }
    }

    pub fn chart(series: SeriesId, log: &Log) -> FakeChart {
        FakeChart {
            series,
            log: log.clone(),
        }
    }
}
