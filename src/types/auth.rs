//! Authorization Types
//!
//! Transient request values for the Authorization Code grant. Each exists
//! only for the duration of one call and is never persisted.

/// Parameters for authorization URL generation.
#[derive(Clone, Debug, Default)]
pub struct AuthorizeParams {
    /// Redirect URI the authorization server sends the resource owner back
    /// to. Must match what the token endpoint later validates.
    pub redirect_uri: String,
    /// Requested scopes, joined space-delimited into the `scope` parameter.
    pub scopes: Option<Vec<String>>,
    /// Caller-chosen opaque anti-CSRF value. Never generated here.
    pub state: Option<String>,
}

/// Code exchange request.
#[derive(Clone, Debug)]
pub struct CodeExchangeRequest {
    /// Single-use authorization code from the redirect.
    pub code: String,
    /// Redirect URI. Must equal the one used in the authorization request.
    pub redirect_uri: String,
}
