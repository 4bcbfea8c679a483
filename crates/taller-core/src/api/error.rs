//! Request client error type.

use std::fmt;

use serde_json::Value;

use crate::messages;

/// Error categories for remote service calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The service answered with a non-success status (or an unusable body).
    RequestFailed,
    /// The service could not be reached (connect, DNS, TLS, timeout).
    ConnectivityFailed,
}

/// Normalized failure of a request to the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Error category
    pub kind: ApiErrorKind,
    /// Human-readable message, safe to show to the user
    pub message: String,
    /// HTTP status, when the service answered
    pub status: Option<u16>,
    /// Raw diagnostic text (error body, transport error); logged, never shown
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a request failure with an explicit message.
    pub fn request_failed(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::RequestFailed,
            message: message.into(),
            status,
            details: None,
        }
    }

    /// Creates a request failure from a non-success status and its raw body.
    ///
    /// The body is expected to look like `{"message": "..."}`. When it cannot
    /// be parsed the generic `Error` message is used; when it parses but has
    /// no usable message, `Request failed`.
    pub fn http_status(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<Value>(body) {
            Ok(json) => json
                .get("message")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .unwrap_or(messages::REQUEST_FAILED)
                .to_string(),
            Err(_) => messages::GENERIC_ERROR.to_string(),
        };
        Self {
            kind: ApiErrorKind::RequestFailed,
            message,
            status: Some(status),
            details: (!body.is_empty()).then(|| body.to_string()),
        }
    }

    /// Creates a connectivity failure; the transport text is kept as details only.
    pub fn connectivity(details: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::ConnectivityFailed,
            message: messages::CONNECTIVITY_FAILED.to_string(),
            status: None,
            details: Some(details.into()),
        }
    }

    pub fn is_connectivity(&self) -> bool {
        self.kind == ApiErrorKind::ConnectivityFailed
    }

    /// The message to show, or `fallback` when the message is blank.
    pub fn user_message<'a>(&'a self, fallback: &'a str) -> &'a str {
        let trimmed = self.message.trim();
        if trimmed.is_empty() { fallback } else { trimmed }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for request client operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Classifies a reqwest error raised before a response was available.
///
/// Builder errors are ours (bad URL, unserializable body); everything else
/// means the service was not reached.
pub fn classify_reqwest_error(e: &reqwest::Error) -> ApiError {
    if e.is_builder() {
        let mut err = ApiError::request_failed(None, messages::GENERIC_ERROR);
        err.details = Some(format!("Request error: {e}"));
        err
    } else if e.is_timeout() {
        ApiError::connectivity(format!("Request timed out: {e}"))
    } else if e.is_connect() {
        ApiError::connectivity(format!("Connection failed: {e}"))
    } else {
        ApiError::connectivity(format!("Network error: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_uses_body_message() {
        let err = ApiError::http_status(400, r#"{"message":"username taken"}"#);
        assert_eq!(err.kind, ApiErrorKind::RequestFailed);
        assert_eq!(err.message, "username taken");
        assert_eq!(err.status, Some(400));
        assert_eq!(err.to_string(), "username taken");
    }

    #[test]
    fn test_http_status_unparsable_body_is_generic() {
        let err = ApiError::http_status(502, "<html>Bad gateway</html>");
        assert_eq!(err.message, "Error");
        assert_eq!(err.details.as_deref(), Some("<html>Bad gateway</html>"));
    }

    #[test]
    fn test_http_status_without_message_field() {
        let err = ApiError::http_status(500, r#"{"error":"boom"}"#);
        assert_eq!(err.message, "Request failed");

        let err = ApiError::http_status(500, "");
        assert_eq!(err.message, "Error");
        assert_eq!(err.details, None);
    }

    #[test]
    fn test_connectivity_hides_transport_text() {
        let err = ApiError::connectivity("dns error: failed to lookup address");
        assert!(err.is_connectivity());
        assert_eq!(err.to_string(), "No se puede conectar al servidor");
        assert!(!err.to_string().contains("dns"));
    }

    #[test]
    fn test_user_message_fallback() {
        let err = ApiError::request_failed(Some(500), "  ");
        assert_eq!(err.user_message("fallback"), "fallback");
    }
}
