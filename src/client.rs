//! High-level client: `CointrackClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, configuration, and accessor methods.

use crate::domain::asset::client::Prices;
use crate::domain::asset::{AssetSnapshot, SnapshotSource};
use crate::domain::history::client::History;
use crate::domain::history::{HistoryPoint, HistorySource};
use crate::error::SdkError;
use crate::http::{CointrackHttp, RetryPolicy};
use crate::session::AssetSession;
use crate::shared::{AssetId, Range};

use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::asset::client::Prices as PricesClient;
pub use crate::domain::history::client::History as HistoryClient;

/// The primary entry point for the SDK.
///
/// Provides sub-client accessors (`client.prices()`, `client.history()`) and
/// creates per-asset [`AssetSession`]s. Cheap to clone.
#[derive(Clone)]
pub struct CointrackClient {
    pub(crate) http: CointrackHttp,
    pub(crate) vs_currency: String,
    pub(crate) preferred_range: Range,
}

impl CointrackClient {
    pub fn builder() -> CointrackClientBuilder {
        CointrackClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn prices(&self) -> Prices<'_> {
        Prices { client: self }
    }

    pub fn history(&self) -> History<'_> {
        History { client: self }
    }

    // ── Sessions ─────────────────────────────────────────────────────────

    /// Start a fresh session for `asset_id` backed by this client.
    pub fn session(&self, asset_id: impl Into<AssetId>) -> AssetSession<CointrackClient> {
        AssetSession::new(asset_id.into(), self.clone()).with_preferred_range(self.preferred_range)
    }

    pub fn vs_currency(&self) -> &str {
        &self.vs_currency
    }

    pub fn preferred_range(&self) -> Range {
        self.preferred_range
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }
}

impl HistorySource for CointrackClient {
    async fn fetch_history(
        &self,
        asset_id: &AssetId,
        range: Range,
    ) -> Result<Vec<HistoryPoint>, SdkError> {
        self.history().get(asset_id, range).await
    }
}

impl SnapshotSource for CointrackClient {
    async fn fetch_snapshot(&self, asset_id: &AssetId) -> Result<AssetSnapshot, SdkError> {
        self.prices().snapshot(asset_id).await
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct CointrackClientBuilder {
    base_url: String,
    vs_currency: String,
    preferred_range: Range,
    request_timeout: Duration,
    retry_policy: RetryPolicy,
}

impl Default for CointrackClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            vs_currency: crate::network::DEFAULT_VS_CURRENCY.to_string(),
            preferred_range: Range::Day7,
            request_timeout: Duration::from_secs(crate::network::DEFAULT_TIMEOUT_SECS),
            retry_policy: RetryPolicy::default(),
        }
    }
}

impl CointrackClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Quote currency for snapshots and history (`vs=` query parameter).
    pub fn vs_currency(mut self, currency: &str) -> Self {
        self.vs_currency = currency.trim().to_lowercase();
        self
    }

    /// Range a new session tries to open on.
    pub fn preferred_range(mut self, range: Range) -> Self {
        self.preferred_range = range;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    pub fn build(self) -> Result<CointrackClient, SdkError> {
        if self.base_url.trim().is_empty() {
            return Err(SdkError::Validation("base_url must not be empty".to_string()));
        }
        if self.vs_currency.is_empty() {
            return Err(SdkError::Validation("vs_currency must not be empty".to_string()));
        }
        Ok(CointrackClient {
            http: CointrackHttp::new(&self.base_url, self.request_timeout, self.retry_policy)?,
            vs_currency: self.vs_currency,
            preferred_range: self.preferred_range,
        })
    }
}
