//! Configuration Types
//!
//! OAuth2 client configuration types.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OAuth2 client configuration.
///
/// Validated once by [`crate::builders::OAuth2ConfigBuilder::build`];
/// immutable afterward and safely shared read-only across concurrent
/// operations.
#[derive(Clone)]
pub struct OAuth2Config {
    /// Authorization server base URL. Absolute, no trailing slash.
    pub site: String,
    /// Path of the authorization endpoint under `site`.
    pub authorization_path: String,
    /// Path of the token endpoint under `site`.
    pub token_path: String,
    /// Client credentials.
    pub credentials: ClientCredentials,
    /// HTTP timeout forwarded to the transport.
    pub timeout: Duration,
}

impl OAuth2Config {
    /// Full authorization endpoint URL.
    pub fn authorization_endpoint(&self) -> String {
        format!("{}{}", self.site, self.authorization_path)
    }

    /// Full token endpoint URL.
    pub fn token_endpoint(&self) -> String {
        format!("{}{}", self.site, self.token_path)
    }
}

impl std::fmt::Debug for OAuth2Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuth2Config")
            .field("site", &self.site)
            .field("authorization_path", &self.authorization_path)
            .field("token_path", &self.token_path)
            .field("credentials", &self.credentials)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Default endpoint paths.
pub const DEFAULT_AUTHORIZATION_PATH: &str = "/oauth/authorize";
pub const DEFAULT_TOKEN_PATH: &str = "/oauth/token";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client credentials for token endpoint authentication.
#[derive(Clone)]
pub struct ClientCredentials {
    /// Client identifier.
    pub client_id: String,
    /// Client secret (for confidential clients).
    pub client_secret: Option<SecretString>,
    /// Client authentication method.
    pub auth_method: ClientAuthMethod,
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("auth_method", &self.auth_method)
            .finish()
    }
}

/// Client authentication method.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientAuthMethod {
    /// client_id and client_secret in the request body.
    #[default]
    ClientSecretPost,
    /// HTTP Basic Authentication header.
    ClientSecretBasic,
    /// No client authentication (public client).
    None,
}

/// Grant type wire strings sent by this client.
///
/// The flow itself is fixed to Authorization Code; `RefreshToken` exists
/// only for the follow-up refresh of an issued token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrantType {
    AuthorizationCode,
    RefreshToken,
}

impl GrantType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthorizationCode => "authorization_code",
            Self::RefreshToken => "refresh_token",
        }
    }
}
