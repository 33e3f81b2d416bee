//! Session state types: load lifecycle and per-request outcomes.

use crate::domain::asset::AssetSnapshot;
use crate::domain::history::Dataset;
use crate::shared::Range;

/// Status text shown when a history fetch fails.
pub const HISTORY_UNAVAILABLE: &str = "history unavailable";
/// Status text shown when no range has any data.
pub const NO_HISTORY: &str = "no history available";
/// Status text shown when the detail snapshot fails.
pub const SNAPSHOT_UNAVAILABLE: &str = "price unavailable";

/// Where the session is in loading a range.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading(Range),
    Loaded(Range),
    /// `from` came back empty; `excluded` lists every range pruned so far
    /// during this request.
    FallingBack { from: Range, excluded: Vec<Range> },
}

/// Result of one range request.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// `range` is now active and `dataset` should be rendered.
    /// `requested` differs from `range` when a fallback happened.
    Loaded {
        range: Range,
        requested: Range,
        dataset: Dataset,
    },
    /// `range` was already active and the request was not forced.
    Unchanged(Range),
    /// No range has data; show the empty-history indicator.
    Empty,
    /// The fetch for `range` failed; the previous chart state stands.
    Failed { range: Range, message: String },
    /// A newer request started before this one finished; its result was dropped.
    Superseded { range: Range },
}

impl LoadOutcome {
    /// The range to render, if this outcome carries data.
    pub fn loaded_range(&self) -> Option<Range> {
        match self {
            LoadOutcome::Loaded { range, .. } => Some(*range),
            _ => None,
        }
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        match self {
            LoadOutcome::Loaded { dataset, .. } => Some(dataset),
            _ => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { range, requested, .. } if range != requested)
    }
}

/// Result of opening a session.
#[derive(Debug, Clone, PartialEq)]
pub struct InitOutcome {
    pub snapshot: Option<AssetSnapshot>,
    /// Set when the snapshot fetch failed.
    pub snapshot_error: Option<String>,
    pub load: LoadOutcome,
}
