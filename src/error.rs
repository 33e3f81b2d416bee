//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

impl HttpError {
    /// Maps a non-2xx status code and response body to a typed error.
    pub fn from_status(status: u16, body: String, retry_after_ms: Option<u64>) -> Self {
        match status {
            401 => HttpError::Unauthorized,
            404 => HttpError::NotFound(body),
            408 => HttpError::Timeout,
            429 => HttpError::RateLimited { retry_after_ms },
            400..=499 => HttpError::BadRequest(body),
            _ => HttpError::ServerError { status, body },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_mapping() {
        assert!(matches!(
            HttpError::from_status(401, String::new(), None),
            HttpError::Unauthorized
        ));
        assert!(matches!(
            HttpError::from_status(404, "no such asset".into(), None),
            HttpError::NotFound(body) if body == "no such asset"
        ));
        assert!(matches!(
            HttpError::from_status(429, String::new(), Some(1500)),
            HttpError::RateLimited { retry_after_ms: Some(1500) }
        ));
        assert!(matches!(
            HttpError::from_status(422, String::new(), None),
            HttpError::BadRequest(_)
        ));
        assert!(matches!(
            HttpError::from_status(503, "down".into(), None),
            HttpError::ServerError { status: 503, .. }
        ));
    }

    #[test]
    fn test_error_display_wraps_http() {
        let err: SdkError = HttpError::ServerError {
            status: 502,
            body: "bad gateway".into(),
        }
        .into();
        assert_eq!(err.to_string(), "HTTP error: Server error 502: bad gateway");
    }
}
