//! Status-paired response envelope.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::IonqResult;

/// A decoded response body paired with the HTTP status code.
///
/// Interpreting the status is left to the caller. A non-2xx response is
/// still returned here, with whatever the service sent decoded into `T`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    /// Decoded body.
    pub response: T,
    /// Numeric HTTP status code.
    pub status: u16,
    remote_error: Option<RemoteError>,
}

/// Diagnostic payload of a non-2xx response.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteError {
    /// Human-readable message, if the body carried one.
    pub message: Option<String>,
    /// Machine-readable error code or type, if the body carried one.
    pub code: Option<String>,
    /// The full JSON body.
    pub body: Value,
}

impl<T> ApiResponse<T> {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Error details sent by the service with a non-2xx status.
    pub fn remote_error(&self) -> Option<&RemoteError> {
        self.remote_error.as_ref()
    }

    /// Split into body and status.
    pub fn into_parts(self) -> (T, u16) {
        (self.response, self.status)
    }
}

impl<T: DeserializeOwned + Default> ApiResponse<T> {
    /// Decode a raw body.
    ///
    /// The body must be JSON whatever the status; an empty body is an error.
    /// On 2xx it must also match `T`; on other statuses a shape mismatch
    /// yields `T::default()` and the payload is kept in
    /// [`remote_error`](Self::remote_error).
    pub(crate) fn decode(status: u16, body: &[u8]) -> IonqResult<Self> {
        let value: Value = serde_json::from_slice(body)?;

        if (200..300).contains(&status) {
            return Ok(Self {
                response: serde_json::from_value(value)?,
                status,
                remote_error: None,
            });
        }

        let remote_error = RemoteError::from_body(value.clone());
        Ok(Self {
            response: serde_json::from_value(value).unwrap_or_default(),
            status,
            remote_error: Some(remote_error),
        })
    }
}

impl RemoteError {
    /// Pull message and code out of the known error body layouts:
    /// `{"error": "...", "message": "..."}` or
    /// `{"error": {"type": "...", "message": "..."}}`.
    pub fn from_body(body: Value) -> Self {
        let nested = body.get("error").filter(|e| e.is_object());

        let message = nested
            .and_then(|e| e.get("message"))
            .or_else(|| body.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string);

        let code = nested
            .and_then(|e| e.get("type").or_else(|| e.get("code")))
            .or_else(|| body.get("code"))
            .or_else(|| body.get("error").filter(|e| e.is_string()))
            .and_then(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            });

        Self {
            message,
            code,
            body,
        }
    }
}
