//! OAuth2 Client
//!
//! High-level client combining configuration, transport, and the
//! Authorization Code flow.

use std::sync::Arc;

use crate::core::{HttpTransport, ReqwestHttpTransport};
use crate::error::OAuth2Error;
use crate::flows::AuthorizationCodeFlow;
use crate::types::{AccessToken, AuthorizeParams, CodeExchangeRequest, OAuth2Config};

/// OAuth2 Authorization Code grant client.
///
/// Owns an immutable configuration and a shared transport. Cheap to share
/// across concurrent exchanges; concurrent calls never share mutable state.
pub struct OAuth2Client<T: HttpTransport = ReqwestHttpTransport> {
    config: OAuth2Config,
    transport: Arc<T>,
}

impl OAuth2Client<ReqwestHttpTransport> {
    /// Create a client with the default reqwest transport.
    pub fn new(config: OAuth2Config) -> Result<Self, OAuth2Error> {
        let transport = Arc::new(ReqwestHttpTransport::new()?);
        Ok(Self { config, transport })
    }
}

impl<T: HttpTransport> OAuth2Client<T> {
    /// Create a client with a custom transport.
    pub fn with_transport(config: OAuth2Config, transport: T) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
        }
    }

    /// Get the client configuration.
    pub fn config(&self) -> &OAuth2Config {
        &self.config
    }

    fn flow(&self) -> AuthorizationCodeFlow<T> {
        AuthorizationCodeFlow::new(self.config.clone(), self.transport.clone())
    }

    /// Build the authorization redirect URL. No network I/O.
    pub fn authorize_url(&self, params: &AuthorizeParams) -> Result<String, OAuth2Error> {
        self.flow().authorize_url(params)
    }

    /// Exchange an authorization code for an access token.
    pub async fn exchange_code(
        &self,
        request: CodeExchangeRequest,
    ) -> Result<AccessToken, OAuth2Error> {
        self.flow().exchange_code(request).await
    }

    /// Obtain a new access token from a refresh token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AccessToken, OAuth2Error> {
        self.flow().refresh(refresh_token).await
    }
}

/// Create a client with the default transport.
pub fn oauth2_client(config: OAuth2Config) -> Result<OAuth2Client, OAuth2Error> {
    OAuth2Client::new(config)
}
