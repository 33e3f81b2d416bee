//! History sub-client: per-range point queries.

use super::{build_historical_dataset, Dataset, HistoryPoint};
use crate::client::CointrackClient;
use crate::error::SdkError;
use crate::shared::{AssetId, Range};

/// Sub-client for history operations.
pub struct History<'a> {
    pub(crate) client: &'a CointrackClient,
}

impl<'a> History<'a> {
    /// Raw points for `asset_id` over `range`, quoted in the client's currency.
    pub async fn get(&self, asset_id: &AssetId, range: Range) -> Result<Vec<HistoryPoint>, SdkError> {
        let resp = self
            .client
            .http
            .get_price_history(asset_id.as_str(), range, &self.client.vs_currency)
            .await?;
        Ok(resp.into())
    }

    /// Like [`History::get`], shaped into per-series arrays.
    pub async fn dataset(&self, asset_id: &AssetId, range: Range) -> Result<Dataset, SdkError> {
        let points = self.get(asset_id, range).await?;
        Ok(build_historical_dataset(&points))
    }
}
