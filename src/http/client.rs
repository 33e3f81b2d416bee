//! Low-level HTTP client: `CointrackHttp`.
//!
//! One method per API endpoint. Returns wire types (conversion to domain types
//! happens in the sub-clients). Internal to the SDK: `CointrackClient` wraps this.

use crate::domain::asset::wire::SnapshotResponse;
use crate::domain::history::wire::HistoryResponse;
use crate::error::HttpError;
use crate::http::retry::RetryPolicy;
use crate::shared::Range;

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Low-level HTTP client for the Cointrack REST API.
#[derive(Clone)]
pub struct CointrackHttp {
    base_url: String,
    client: Client,
    retry: RetryPolicy,
}

impl CointrackHttp {
    pub fn new(base_url: &str, timeout: Duration, retry: RetryPolicy) -> Result<Self, HttpError> {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.timeout(timeout).pool_max_idle_per_host(10);
        }
        #[cfg(target_arch = "wasm32")]
        let _ = timeout;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
            retry,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Prices ───────────────────────────────────────────────────────────

    pub async fn get_asset_snapshot(&self, asset_id: &str) -> Result<SnapshotResponse, HttpError> {
        let url = format!("{}/price/{}", self.base_url, urlencoding::encode(asset_id));
        self.get(&url).await
    }

    pub async fn get_price_history(
        &self,
        asset_id: &str,
        range: Range,
        vs_currency: &str,
    ) -> Result<HistoryResponse, HttpError> {
        let url = history_url(&self.base_url, asset_id, range, vs_currency);
        self.get(&url).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let Some(config) = self.retry.config() else {
            return self.do_get(url).await;
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match self.do_get::<T>(url).await {
                Ok(resp) => return Ok(resp),
                Err(e) if config.is_retryable(&e) && attempt < config.max_retries => {
                    let delay = config.delay_for(attempt, &e);
                    tracing::debug!(
                        attempt = attempt + 1,
                        max = config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Retrying request to {}",
                        url
                    );
                    futures_timer::Delay::new(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();

        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }

        let retry_after_ms = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(|secs| secs * 1000);
        let body = resp.text().await.unwrap_or_default();

        Err(HttpError::from_status(status.as_u16(), body, retry_after_ms))
    }
}

fn history_url(base_url: &str, asset_id: &str, range: Range, vs_currency: &str) -> String {
    format!(
        "{}/price/{}/history?range={}&vs={}",
        base_url,
        urlencoding::encode(asset_id),
        range.key(),
        urlencoding::encode(vs_currency)
    )
}
