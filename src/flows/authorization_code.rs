//! Authorization Code Flow
//!
//! RFC 6749 Section 4.1 - Authorization Code Grant.
//!
//! Builds the authorization redirect URL, exchanges the returned code for
//! tokens, and refreshes issued tokens. Both network operations perform
//! exactly one POST per call; there is no retry, cache, or queue here.

use base64::Engine;
use secrecy::ExposeSecret;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::core::{codec, FormRequest, HttpTransport};
use crate::error::{AuthServerError, ConfigurationError, OAuth2Error, ProtocolError};
use crate::types::{
    AccessToken, AuthorizeParams, ClientAuthMethod, CodeExchangeRequest, GrantType, OAuth2Config,
    TokenResponse,
};

/// Authorization Code grant operations over a shared configuration and
/// transport.
///
/// Holds no mutable state: concurrent calls each own their request and
/// response lifecycle, and dropping an in-flight future abandons that
/// exchange without delivering any completion.
pub struct AuthorizationCodeFlow<T: HttpTransport> {
    config: OAuth2Config,
    transport: Arc<T>,
}

impl<T: HttpTransport> AuthorizationCodeFlow<T> {
    /// Create a new Authorization Code flow.
    pub fn new(config: OAuth2Config, transport: Arc<T>) -> Self {
        Self { config, transport }
    }

    /// Build the authorization redirect URL. No network I/O.
    ///
    /// Query parameters appear in a fixed order (`response_type`,
    /// `redirect_uri`, `state`, `client_id`, `scope`), with absent optional
    /// pairs omitted entirely. Callers show, log, and test the produced URL
    /// verbatim, so the order is part of the contract.
    pub fn authorize_url(&self, params: &AuthorizeParams) -> Result<String, OAuth2Error> {
        if params.redirect_uri.is_empty() {
            return Err(missing("redirect_uri"));
        }

        let scope = params
            .scopes
            .as_ref()
            .filter(|scopes| !scopes.is_empty())
            .map(|scopes| scopes.join(" "));

        let mut pairs = vec![
            ("response_type", "code"),
            ("redirect_uri", params.redirect_uri.as_str()),
        ];
        if let Some(state) = &params.state {
            pairs.push(("state", state.as_str()));
        }
        pairs.push(("client_id", self.config.credentials.client_id.as_str()));
        if let Some(scope) = &scope {
            pairs.push(("scope", scope.as_str()));
        }

        Ok(format!(
            "{}?{}",
            self.config.authorization_endpoint(),
            codec::query_string(pairs)
        ))
    }

    /// Exchange an authorization code for an access token.
    ///
    /// Request validation happens before any network call; the body follows
    /// the documented key order `code`, `redirect_uri`, `client_secret`,
    /// `grant_type`, `client_id`.
    #[instrument(skip(self, request), fields(endpoint = %self.config.token_endpoint()))]
    pub async fn exchange_code(
        &self,
        request: CodeExchangeRequest,
    ) -> Result<AccessToken, OAuth2Error> {
        if request.code.is_empty() {
            return Err(missing("code"));
        }
        if request.redirect_uri.is_empty() {
            return Err(missing("redirect_uri"));
        }

        let secret = self.body_secret();
        let mut pairs = vec![
            ("code", request.code.as_str()),
            ("redirect_uri", request.redirect_uri.as_str()),
        ];
        if let Some(secret) = &secret {
            pairs.push(("client_secret", secret.as_str()));
        }
        pairs.push(("grant_type", GrantType::AuthorizationCode.as_str()));
        pairs.push(("client_id", self.config.credentials.client_id.as_str()));

        self.request_token(codec::form_encode(pairs)).await
    }

    /// Obtain a fresh access token from a refresh token.
    ///
    /// Produces a new [`AccessToken`]; the one the refresh token came from
    /// is untouched. Body key order: `grant_type`, `refresh_token`,
    /// `client_secret`, `client_id`.
    #[instrument(skip(self, refresh_token), fields(endpoint = %self.config.token_endpoint()))]
    pub async fn refresh(&self, refresh_token: &str) -> Result<AccessToken, OAuth2Error> {
        if refresh_token.is_empty() {
            return Err(missing("refresh_token"));
        }

        let secret = self.body_secret();
        let mut pairs = vec![
            ("grant_type", GrantType::RefreshToken.as_str()),
            ("refresh_token", refresh_token),
        ];
        if let Some(secret) = &secret {
            pairs.push(("client_secret", secret.as_str()));
        }
        pairs.push(("client_id", self.config.credentials.client_id.as_str()));

        self.request_token(codec::form_encode(pairs)).await
    }

    /// Client secret for the request body, when the auth method puts it
    /// there.
    fn body_secret(&self) -> Option<String> {
        if self.config.credentials.auth_method != ClientAuthMethod::ClientSecretPost {
            return None;
        }
        self.config
            .credentials
            .client_secret
            .as_ref()
            .map(|secret| secret.expose_secret().to_string())
    }

    fn request_headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert(
            "content-type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        );
        headers.insert("accept".to_string(), "application/json".to_string());

        if self.config.credentials.auth_method == ClientAuthMethod::ClientSecretBasic {
            if let Some(secret) = &self.config.credentials.client_secret {
                let credentials = format!(
                    "{}:{}",
                    self.config.credentials.client_id,
                    secret.expose_secret()
                );
                let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
                headers.insert("authorization".to_string(), format!("Basic {}", encoded));
            }
        }

        headers
    }

    /// POST a prepared body to the token endpoint and build the token.
    async fn request_token(&self, body: String) -> Result<AccessToken, OAuth2Error> {
        let request = FormRequest {
            url: self.config.token_endpoint(),
            headers: self.request_headers(),
            body,
            timeout: Some(self.config.timeout),
        };

        debug!("requesting token");
        let response = self.transport.post_form(request).await?;

        if !response.is_success() {
            warn!(status = response.status, "token endpoint returned non-success status");
            return Err(AuthServerError::from_response(response.status, &response.body).into());
        }

        let token_response = parse_token_response(&response.body)?;

        // issued-at is the local receipt instant, not a server claim
        Ok(AccessToken::from_response(token_response))
    }
}

fn missing(field: &str) -> OAuth2Error {
    ConfigurationError::MissingField {
        field: field.to_string(),
    }
    .into()
}

/// Parse a success-status body into the minimum token shape.
fn parse_token_response(body: &str) -> Result<TokenResponse, OAuth2Error> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        ProtocolError::InvalidJson {
            message: e.to_string(),
        }
    })?;

    if value.get("access_token").is_none() {
        return Err(ProtocolError::MissingField {
            field: "access_token".to_string(),
        }
        .into());
    }

    serde_json::from_value(value).map_err(|e| {
        ProtocolError::InvalidResponse {
            message: e.to_string(),
        }
        .into()
    })
}
