//! OAuth2 Error Types
//!
//! Failure taxonomy for the authorization code client. Every operation
//! reports through its single `Result` channel: configuration problems
//! caught before any I/O, transport failures, non-success answers from the
//! authorization server, and success-status responses that violate the
//! token wire contract.

use std::time::Duration;
use thiserror::Error;

/// Root error type for OAuth2 operations.
#[derive(Error, Debug)]
pub enum OAuth2Error {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Authorization server error: {0}")]
    AuthServer(#[from] AuthServerError),

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

impl OAuth2Error {
    /// Get error code for log fields.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "OAUTH2_CONFIG",
            Self::Network(_) => "OAUTH2_NETWORK",
            Self::AuthServer(_) => "OAUTH2_AUTH_SERVER",
            Self::Protocol(_) => "OAUTH2_PROTOCOL",
        }
    }

    /// Check if error is retryable.
    ///
    /// Configuration and protocol violations are deterministic, and a
    /// rejected code or credential stays rejected. Only transport failures
    /// qualify.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_retryable(),
            _ => false,
        }
    }
}

/// Invalid or missing caller-supplied fields, detected before any I/O.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid site URL {url}: {message}")]
    InvalidSite { url: String, message: String },
}

/// Network/transport error wrapping the underlying cause.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("Request timeout after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("TLS error: {message}")]
    TlsError { message: String },
}

impl NetworkError {
    /// Check if error is retryable.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::TlsError { .. })
    }
}

/// Non-success status from the token endpoint.
///
/// Carries the HTTP status, the standard OAuth2 `error` and
/// `error_description` fields when the body parses as the RFC 6749 error
/// shape, and the raw body either way. A malformed error body never masks
/// the status-derived failure.
#[derive(Error, Debug, Clone)]
#[error("authorization server returned HTTP {status}: {}", .error.as_deref().unwrap_or("no error detail"))]
pub struct AuthServerError {
    /// HTTP status code.
    pub status: u16,
    /// OAuth2 `error` code, when the body carried one.
    pub error: Option<String>,
    /// OAuth2 `error_description`, when the body carried one.
    pub error_description: Option<String>,
    /// Raw response body, when non-empty.
    pub body: Option<String>,
}

impl AuthServerError {
    /// Build from an HTTP status and raw body, extracting the standard
    /// OAuth2 error fields when present.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed = parse_error_response(body);
        Self {
            status,
            error: parsed.as_ref().map(|e| e.error.clone()),
            error_description: parsed.and_then(|e| e.error_description),
            body: (!body.is_empty()).then(|| body.to_string()),
        }
    }
}

/// Success status with a body violating the minimum token shape.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    #[error("Response too large: {size} bytes")]
    ResponseTooLarge { size: usize },
}

/// Result type for OAuth2 operations.
pub type OAuth2Result<T> = Result<T, OAuth2Error>;

/// OAuth2 error response from the authorization server (RFC 6749 §5.2).
#[derive(Debug, Clone, serde::Deserialize)]
pub struct OAuth2ErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub error_uri: Option<String>,
}

/// Parse the standard error shape from an HTTP body.
pub fn parse_error_response(body: &str) -> Option<OAuth2ErrorResponse> {
    serde_json::from_str(body).ok()
}
