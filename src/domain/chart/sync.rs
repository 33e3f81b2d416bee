//! Cursor synchronization across independently scaled charts.

use super::selection::{resolve_point_index, SelectionEvent};
use super::{ChartInstance, SeriesId};

/// A chart slot for one series. `instance` is `None` until first render.
#[derive(Debug)]
pub struct ChartHandle<I> {
    pub series: SeriesId,
    pub instance: Option<I>,
}

/// Keeps the price, market cap and volume charts showing the same cursor.
///
/// Exactly one handle exists per series. Handles are only ever cleared all
/// at once, via [`ChartSyncCoordinator::reset`].
#[derive(Debug)]
pub struct ChartSyncCoordinator<I> {
    handles: [ChartHandle<I>; 3],
}

impl<I> Default for ChartSyncCoordinator<I> {
    fn default() -> Self {
        Self {
            handles: SeriesId::ALL.map(|series| ChartHandle {
                series,
                instance: None,
            }),
        }
    }
}

impl<I: ChartInstance> ChartSyncCoordinator<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate a live chart with its series, replacing any previous one.
    pub fn register_instance(&mut self, series: SeriesId, instance: I) {
        self.handles[series.slot()].instance = Some(instance);
    }

    pub fn instance(&self, series: SeriesId) -> Option<&I> {
        self.handles[series.slot()].instance.as_ref()
    }

    pub fn instance_mut(&mut self, series: SeriesId) -> Option<&mut I> {
        self.handles[series.slot()].instance.as_mut()
    }

    pub fn is_registered(&self, series: SeriesId) -> bool {
        self.instance(series).is_some()
    }

    pub fn registered_count(&self) -> usize {
        self.handles.iter().filter(|h| h.instance.is_some()).count()
    }

    pub fn handles(&self) -> &[ChartHandle<I>] {
        &self.handles
    }

    /// Translate an event on `source` into a cursor broadcast.
    ///
    /// Returns the index that was broadcast. With no resolvable index every
    /// chart's tooltip is cleared instead.
    pub fn on_selection(&mut self, source: SeriesId, event: &SelectionEvent) -> Option<usize> {
        match resolve_point_index(event) {
            Some(index) => {
                tracing::trace!(source = %source, index, "syncing chart cursors");
                self.sync_tooltips(index);
                Some(index)
            }
            None => {
                tracing::trace!(source = %source, "no cursor index, clearing tooltips");
                self.clear_tooltips();
                None
            }
        }
    }

    /// Show every chart's tooltip at `index`. Charts not yet created are skipped.
    pub fn sync_tooltips(&mut self, index: usize) {
        for instance in self.instances_mut() {
            instance.show_tooltip(index);
        }
    }

    pub fn clear_tooltips(&mut self) {
        for instance in self.instances_mut() {
            instance.hide_tooltip();
        }
    }

    /// Drop all chart instances (containers are about to be recreated).
    pub fn reset(&mut self) {
        for handle in &mut self.handles {
            handle.instance = None;
        }
    }

    fn instances_mut(&mut self) -> impl Iterator<Item = &mut I> {
        self.handles.iter_mut().filter_map(|h| h.instance.as_mut())
    }
}
