//! Network URL constants and request defaults.

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default quote currency for history and snapshot requests.
pub const DEFAULT_VS_CURRENCY: &str = "usd";

/// Default per-request timeout in seconds (native only).
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
