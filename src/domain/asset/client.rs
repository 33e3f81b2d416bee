//! Prices sub-client: current snapshot for an asset.

use super::AssetSnapshot;
use crate::client::CointrackClient;
use crate::error::SdkError;
use crate::shared::AssetId;

/// Sub-client for snapshot operations.
pub struct Prices<'a> {
    pub(crate) client: &'a CointrackClient,
}

impl<'a> Prices<'a> {
    pub async fn snapshot(&self, asset_id: &AssetId) -> Result<AssetSnapshot, SdkError> {
        let resp = self.client.http.get_asset_snapshot(asset_id.as_str()).await?;
        Ok(AssetSnapshot::from_wire(resp, asset_id))
    }
}
