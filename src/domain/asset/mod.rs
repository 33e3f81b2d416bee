//! Asset domain: the current price/market snapshot shown above the charts.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::error::SdkError;
use crate::shared::AssetId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time market data for one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSnapshot {
    pub id: AssetId,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub market_cap: Option<f64>,
    pub volume_24h: Option<f64>,
    pub change_24h_pct: Option<f64>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl AssetSnapshot {
    /// Label for the detail header: symbol, then name, then the raw id.
    pub fn display_label(&self) -> String {
        self.symbol
            .as_deref()
            .map(str::to_uppercase)
            .or_else(|| self.name.clone())
            .unwrap_or_else(|| self.id.to_string())
    }
}

/// Source of detail snapshots. `CointrackClient` implements this over HTTP.
#[allow(async_fn_in_trait)]
pub trait SnapshotSource {
    async fn fetch_snapshot(&self, asset_id: &AssetId) -> Result<AssetSnapshot, SdkError>;
}

impl<S: SnapshotSource> SnapshotSource for std::sync::Arc<S> {
    async fn fetch_snapshot(&self, asset_id: &AssetId) -> Result<AssetSnapshot, SdkError> {
        (**self).fetch_snapshot(asset_id).await
    }
}
