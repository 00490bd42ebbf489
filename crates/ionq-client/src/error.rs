//! Error types for the IonQ client.
//!
//! Only local failures live here. A non-2xx answer from the service is not an
//! error: it comes back as an [`ApiResponse`](crate::ApiResponse) carrying the
//! status code and the decoded body.

use thiserror::Error;

/// Result type for IonQ operations.
pub type IonqResult<T> = Result<T, IonqError>;

/// Errors that can occur before, during or after an HTTP exchange.
#[derive(Debug, Error)]
pub enum IonqError {
    /// HTTP request failed (connection, TLS, timeout, query encoding).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not valid JSON, or a 2xx body had the wrong shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The caller's deadline elapsed before the response arrived.
    #[error("Deadline exceeded")]
    DeadlineExceeded,

    /// The caller cancelled the request.
    #[error("Request cancelled")]
    Cancelled,

    /// The API key cannot be sent as an HTTP header value.
    #[error("Invalid API key: not a valid header value")]
    InvalidApiKey,

    /// No API key in the environment.
    #[error("Missing IonQ API key: set IONQ_API_KEY environment variable")]
    MissingApiKey,
}

impl IonqError {
    /// Whether the error came from the caller's context rather than the wire.
    pub fn is_context_error(&self) -> bool {
        matches!(self, IonqError::DeadlineExceeded | IonqError::Cancelled)
    }
}
