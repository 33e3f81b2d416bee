//! Conversions from wire types to domain types for history points.

use super::wire::{HistoryResponse, WireHistoryPoint};
use super::HistoryPoint;

impl From<WireHistoryPoint> for HistoryPoint {
    fn from(p: WireHistoryPoint) -> Self {
        Self {
            timestamp: p.timestamp,
            price: p.price,
            market_cap: p.market_cap,
            volume: p.volume,
        }
    }
}

impl From<HistoryResponse> for Vec<HistoryPoint> {
    fn from(resp: HistoryResponse) -> Self {
        resp.points.into_iter().map(HistoryPoint::from).collect()
    }
}
