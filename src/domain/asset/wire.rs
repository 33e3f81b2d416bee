//! Wire types for the asset detail endpoint.

use crate::shared::serde_util::lenient_f64;
use crate::shared::AssetId;
use serde::{Deserialize, Serialize};

/// `GET /price/{asset}` response body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotResponse {
    #[serde(default, alias = "coin_id")]
    pub id: AssetId,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "price_usd", deserialize_with = "lenient_f64::deserialize")]
    pub price: Option<f64>,
    #[serde(default, alias = "marketCap", deserialize_with = "lenient_f64::deserialize")]
    pub market_cap: Option<f64>,
    #[serde(default, alias = "volume", deserialize_with = "lenient_f64::deserialize")]
    pub volume_24h: Option<f64>,
    #[serde(
        default,
        alias = "price_change_percentage_24h",
        deserialize_with = "lenient_f64::deserialize"
    )]
    pub change_24h: Option<f64>,
    #[serde(default, alias = "timestamp")]
    pub last_updated: Option<String>,
}
