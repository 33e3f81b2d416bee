//! # Cointrack History
//!
//! Historical price charts for a crypto asset-detail view: which time ranges
//! are worth offering, which one to open on, and how to fall back when a
//! range turns out to have no data.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core**: Range catalog, availability, selection, datasets, chart sync (no I/O)
//! 2. **Session**: `AssetSession` per asset: history cache, request tokens, fallback
//! 3. **HTTP API**: `CointrackHttp` with retry policies
//! 4. **High-Level Client**: `CointrackClient` with sub-clients, and `AssetDetailView`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cointrack_history::prelude::*;
//!
//! let client = CointrackClient::builder()
//!     .base_url("http://localhost:8000")
//!     .preferred_range(Range::Month1)
//!     .build()?;
//!
//! let session = client.session("bitcoin");
//! let opened = session.init().await;
//! println!("{:?}", session.availability().await.keys());
//!
//! let outcome = session.request_range("1y", false).await;
//! if let Some(dataset) = outcome.dataset() {
//!     println!("{} points", dataset.len());
//! }
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and the range catalog.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Default endpoint constants.
pub mod network;

// ── Layer 2: Session ─────────────────────────────────────────────────────────

/// Per-asset range coordination.
pub mod session;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `CointrackClient`: the primary entry point.
#[cfg(feature = "http")]
pub mod client;

/// `AssetDetailView`: a session wired to its chart panel.
pub mod view;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{AssetId, Range};

    // Domain types: asset, history, range, chart
    pub use crate::domain::asset::{AssetSnapshot, SnapshotSource};
    pub use crate::domain::chart::selection::SelectionEvent;
    pub use crate::domain::chart::{
        ChartBackend, ChartInstance, ChartPanel, ChartSyncCoordinator, SeriesId, SeriesPayload,
    };
    pub use crate::domain::history::{
        build_historical_dataset, Dataset, HistoryCache, HistoryPoint, HistorySource, RawTimestamp,
    };
    pub use crate::domain::range::{
        compute_available_ranges, nearest_available, pick_initial_range, AvailableRanges,
    };

    // Session
    pub use crate::session::{AssetSession, InitOutcome, LoadOutcome, LoadState};
    pub use crate::view::AssetDetailView;

    // Errors
    pub use crate::error::{HttpError, SdkError};

    // Network
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_VS_CURRENCY};

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{CointrackClient, CointrackClientBuilder, HistoryClient, PricesClient};
    #[cfg(feature = "http")]
    pub use crate::http::{RetryConfig, RetryPolicy};
}
