//! HTTP client layer: `CointrackHttp` with per-endpoint retry policies.

pub mod client;
pub mod retry;

pub use client::CointrackHttp;
pub use retry::{RetryConfig, RetryPolicy};
