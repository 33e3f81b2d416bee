//! Conversions from wire types to domain types for asset snapshots.

use super::wire::SnapshotResponse;
use super::AssetSnapshot;
use crate::domain::history::parse_timestamp_ms;
use crate::shared::AssetId;
use chrono::{DateTime, Utc};

impl AssetSnapshot {
    /// Build a snapshot, filling the id from the request path when the body omits it.
    pub(crate) fn from_wire(resp: SnapshotResponse, requested: &AssetId) -> Self {
        let id = if resp.id.as_str().is_empty() {
            requested.clone()
        } else {
            resp.id
        };
        Self {
            id,
            symbol: resp.symbol.filter(|s| !s.trim().is_empty()),
            name: resp.name.filter(|s| !s.trim().is_empty()),
            price: resp.price,
            market_cap: resp.market_cap,
            volume_24h: resp.volume_24h,
            change_24h_pct: resp.change_24h,
            last_updated: resp
                .last_updated
                .as_deref()
                .and_then(parse_timestamp_ms)
                .and_then(DateTime::<Utc>::from_timestamp_millis),
        }
    }
}
