//! Range domain: which history windows are backed by data, and which to show.

pub mod availability;
pub mod selector;

use crate::shared::Range;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub use availability::{compute_available_ranges, compute_available_ranges_from_points};
pub use selector::{nearest_available, pick_initial_range};

/// The set of ranges that can be rendered for the current asset.
///
/// Iterates in catalog order. Contains `max` whenever at least one valid
/// timestamp was seen, and is empty otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableRanges(BTreeSet<Range>);

impl AvailableRanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, range: Range) -> bool {
        self.0.contains(&range)
    }

    pub fn insert(&mut self, range: Range) -> bool {
        self.0.insert(range)
    }

    /// Prune a range that turned out to have no data.
    pub fn remove(&mut self, range: Range) -> bool {
        self.0.remove(&range)
    }

    /// First available range in catalog order.
    pub fn first(&self) -> Option<Range> {
        self.0.iter().next().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Range> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Wire keys in catalog order, for enabling range buttons.
    pub fn keys(&self) -> Vec<&'static str> {
        self.iter().map(|r| r.key()).collect()
    }
}

impl FromIterator<Range> for AvailableRanges {
    fn from_iter<I: IntoIterator<Item = Range>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Range; N]> for AvailableRanges {
    fn from(ranges: [Range; N]) -> Self {
        ranges.into_iter().collect()
    }
}
