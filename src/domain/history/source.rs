//! The data-source seam between sessions and the network.

use super::HistoryPoint;
use crate::error::SdkError;
use crate::shared::{AssetId, Range};
use std::sync::Arc;

/// Anything that can produce raw history points for an asset and range.
///
/// `CointrackClient` implements this over HTTP; tests use in-memory fakes.
/// An empty `Ok` vector means "valid but empty" and is not an error.
#[allow(async_fn_in_trait)]
pub trait HistorySource {
    async fn fetch_history(
        &self,
        asset_id: &AssetId,
        range: Range,
    ) -> Result<Vec<HistoryPoint>, SdkError>;
}

impl<S: HistorySource> HistorySource for Arc<S> {
    async fn fetch_history(
        &self,
        asset_id: &AssetId,
        range: Range,
    ) -> Result<Vec<HistoryPoint>, SdkError> {
        (**self).fetch_history(asset_id, range).await
    }
}
