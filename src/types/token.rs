//! Token Types
//!
//! The token endpoint wire shape and the issued access token model.

use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Token response from the authorization server.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
    /// Access token.
    pub access_token: String,
    /// Token type (usually "bearer").
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Lifetime in seconds. Absent means non-expiring or unknown.
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Refresh token.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Granted scopes.
    #[serde(default)]
    pub scope: Option<String>,
    /// Additional fields.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// An issued token set.
///
/// Frozen value: refreshing produces a new `AccessToken`, never a mutation,
/// and expiry is a computed property of the locally captured receipt
/// instant, not a trusted server clock.
#[derive(Clone)]
pub struct AccessToken {
    /// Token value (secret).
    value: SecretString,
    token_type: String,
    refresh_token: Option<String>,
    issued_at: DateTime<Utc>,
    expires_in: Option<u64>,
    claims: Map<String, Value>,
}

impl AccessToken {
    /// Build from a token endpoint response, capturing the local receipt
    /// instant as issued-at.
    pub fn from_response(response: TokenResponse) -> Self {
        Self::with_issued_at(response, Utc::now())
    }

    pub(crate) fn with_issued_at(response: TokenResponse, issued_at: DateTime<Utc>) -> Self {
        let claims = build_principal(&response);
        Self {
            value: SecretString::new(response.access_token),
            token_type: response.token_type,
            refresh_token: response.refresh_token,
            issued_at,
            expires_in: response.expires_in,
            claims,
        }
    }

    /// Raw access token value (for Authorization headers).
    pub fn secret(&self) -> &str {
        self.value.expose_secret()
    }

    /// Token type as reported by the server.
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Refresh token, when the endpoint returned one.
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Instant the token was received.
    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Reported lifetime in seconds.
    pub fn expires_in(&self) -> Option<u64> {
        self.expires_in
    }

    /// Expiry instant, when the endpoint reported a lifetime.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_in
            .map(|secs| self.issued_at + Duration::seconds(secs as i64))
    }

    /// Check if the token is past its expiry.
    ///
    /// Tokens without a reported lifetime never expire from the client's
    /// point of view.
    pub fn is_expired(&self) -> bool {
        self.expires_at().map(|exp| exp <= Utc::now()).unwrap_or(false)
    }

    /// Claims derivable from the token.
    ///
    /// Always contains the raw token endpoint response fields (at minimum
    /// `access_token`), merged with the decoded JWT payload when the token
    /// value parses as one. Never empty for a constructed token.
    pub fn principal(&self) -> &Map<String, Value> {
        &self.claims
    }

    /// Format as an `Authorization` header value.
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.value.expose_secret())
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("issued_at", &self.issued_at)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Assemble the principal claims for a token response.
///
/// Raw response fields win over same-named JWT claims.
fn build_principal(response: &TokenResponse) -> Map<String, Value> {
    let mut claims = decode_jwt_claims(&response.access_token).unwrap_or_default();

    claims.insert(
        "access_token".to_string(),
        Value::String(response.access_token.clone()),
    );
    claims.insert(
        "token_type".to_string(),
        Value::String(response.token_type.clone()),
    );
    if let Some(secs) = response.expires_in {
        claims.insert("expires_in".to_string(), Value::from(secs));
    }
    if let Some(refresh) = &response.refresh_token {
        claims.insert("refresh_token".to_string(), Value::String(refresh.clone()));
    }
    if let Some(scope) = &response.scope {
        claims.insert("scope".to_string(), Value::String(scope.clone()));
    }
    for (key, value) in &response.extra {
        claims.entry(key.clone()).or_insert_with(|| value.clone());
    }

    claims
}

/// Decode the payload segment of a JWT-shaped token into its claims.
///
/// Claims extraction only. No signature verification happens here; resource
/// servers must validate tokens themselves.
fn decode_jwt_claims(token: &str) -> Option<Map<String, Value>> {
    let mut segments = token.split('.');
    let (_header, payload) = (segments.next()?, segments.next()?);
    let _signature = segments.next()?;
    if segments.next().is_some() {
        return None;
    }

    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload)
        .ok()?;
    match serde_json::from_slice(&bytes).ok()? {
        Value::Object(claims) => Some(claims),
        _ => None,
    }
}
