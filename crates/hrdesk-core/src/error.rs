//! Error types for the hrdesk client.
//!
//! Errors are split by origin so callers can tell a network failure from a
//! status returned by the backend, and both from a failed token refresh.

use std::fmt;
use thiserror::Error;

/// The unified error type for hrdesk operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The backend could not be reached (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The backend answered with a non-success status.
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// The refresh exchange failed; the session has been discarded.
    #[error("session refresh failed: {0}")]
    Refresh(#[from] RefreshError),

    /// A successful response body did not have the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Invalid caller input (URL, method, header).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns the HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(e) => Some(e.status),
            Error::Refresh(RefreshError::Rejected(e)) => Some(e.status),
            _ => None,
        }
    }

    /// True for a plain 401 returned by the backend.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Api(e) if e.is_unauthorized())
    }
}

/// Transport-level errors.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// A non-success response from the backend.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Error code from the response body, if present.
    pub error: Option<String>,
    /// Human-readable message from the response body, if present.
    pub message: Option<String>,
    /// Raw response body.
    pub body: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref error) = self.error {
            write!(f, " [{}]", error)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, error: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            error,
            message,
            body: String::new(),
        }
    }

    /// Build an error from a status and raw body, lifting `error` and
    /// `message` out of a JSON body when there is one.
    pub fn from_body(status: u16, body: &[u8]) -> Self {
        let parsed = serde_json::from_slice::<ErrorBody>(body).ok();
        let (error, message) = match parsed {
            Some(b) => (b.error, b.message),
            None => (None, None),
        };
        Self {
            status,
            error,
            message,
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }

    /// Check if this is an authorization failure.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

/// Failures of the refresh exchange.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// The refresh endpoint answered with a non-success status.
    #[error("rejected: {0}")]
    Rejected(ApiError),

    /// The refresh endpoint could not be reached.
    #[error("unreachable: {0}")]
    Transport(TransportError),

    /// The refresh endpoint answered 2xx without a usable token pair.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Any other failure while performing the exchange.
    #[error(transparent)]
    Other(Box<Error>),
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Unknown HTTP method.
    #[error("unsupported method '{value}'")]
    Method { value: String },

    /// Unknown resource name.
    #[error("unknown resource '{value}'")]
    Resource { value: String },

    /// Record id that cannot be used as a path segment.
    #[error("invalid record id '{value}'")]
    RecordId { value: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_lifts_json_fields() {
        let err = ApiError::from_body(422, br#"{"error":"Validation","message":"name is required"}"#);
        assert_eq!(err.error.as_deref(), Some("Validation"));
        assert_eq!(err.message.as_deref(), Some("name is required"));
        assert_eq!(err.to_string(), "HTTP 422 [Validation]: name is required");
    }

    #[test]
    fn api_error_keeps_plain_body() {
        let err = ApiError::from_body(502, b"Bad Gateway");
        assert!(err.error.is_none());
        assert_eq!(err.body, "Bad Gateway");
        assert_eq!(err.to_string(), "HTTP 502");
    }

    #[test]
    fn status_is_exposed_for_refresh_rejection() {
        let err = Error::from(RefreshError::Rejected(ApiError::new(401, None, None)));
        assert_eq!(err.status(), Some(401));
        assert!(!err.is_unauthorized());
    }
}
