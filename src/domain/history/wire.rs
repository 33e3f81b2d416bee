//! Wire types for the history endpoint.

use super::RawTimestamp;
use crate::shared::serde_util::lenient_f64;
use serde::{Deserialize, Serialize};

/// `GET /price/{asset}/history` response body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub points: Vec<WireHistoryPoint>,
}

/// A single sample as the backend sends it.
///
/// Field names vary between `market_cap` and `marketCap` depending on the
/// upstream provider, so both are accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireHistoryPoint {
    #[serde(default)]
    pub timestamp: RawTimestamp,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub price: Option<f64>,
    #[serde(default, alias = "marketCap", deserialize_with = "lenient_f64::deserialize")]
    pub market_cap: Option<f64>,
    #[serde(default, alias = "total_volume", deserialize_with = "lenient_f64::deserialize")]
    pub volume: Option<f64>,
}
