//! OAuth2 Authorization Code grant client.
//!
//! Client side of RFC 6749 Section 4.1: build the authorization redirect
//! URL a resource owner visits, exchange the returned code for tokens at
//! the token endpoint, and model the issued access token (expiry, refresh
//! token, derived identity claims).
//!
//! # Features
//!
//! - Authorization URL construction with a fixed, documented parameter order
//! - Code-for-token exchange over a mockable transport
//! - Token refresh (RFC 6749 Section 6)
//! - Access token model with computed expiry and principal claims
//!   (including decoded JWT payloads, without signature verification)
//!
//! # Example
//!
//! ```rust,ignore
//! use oauth2_authcode::{oauth2_config, AuthorizeParams, CodeExchangeRequest, OAuth2Client};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = oauth2_config()
//!         .site("http://localhost:8080")
//!         .client_id("client-id")
//!         .client_secret("client-secret")
//!         .build()?;
//!
//!     let client = OAuth2Client::new(config)?;
//!
//!     // Redirect the resource owner here; no network I/O happens yet.
//!     let url = client.authorize_url(&AuthorizeParams {
//!         redirect_uri: "http://localhost:3000/callback".to_string(),
//!         scopes: Some(vec!["user".to_string()]),
//!         state: Some("02afe928b".to_string()),
//!     })?;
//!     println!("visit: {}", url);
//!
//!     // After the redirect back, exchange the code for a token.
//!     let token = client
//!         .exchange_code(CodeExchangeRequest {
//!             code: "code-from-redirect".to_string(),
//!             redirect_uri: "http://localhost:3000/callback".to_string(),
//!         })
//!         .await?;
//!     println!("access token: {}", token.secret());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `types`: configuration, request, and token data structures
//! - `error`: error hierarchy reported through each operation's `Result`
//! - `core`: parameter codec and the HTTP transport seam
//! - `flows`: the Authorization Code grant implementation
//! - `builders`: fluent configuration builder
//! - `client`: high-level client combining configuration and transport

pub mod builders;
pub mod client;
pub mod core;
pub mod error;
pub mod flows;
pub mod types;

// Re-export main client
pub use client::{oauth2_client, OAuth2Client};

// Re-export builders
pub use builders::{oauth2_config, OAuth2ConfigBuilder};

// Re-export errors
pub use error::{
    parse_error_response, AuthServerError, ConfigurationError, NetworkError, OAuth2Error,
    OAuth2ErrorResponse, OAuth2Result, ProtocolError,
};

// Re-export types
pub use types::{
    AccessToken, AuthorizeParams, ClientAuthMethod, ClientCredentials, CodeExchangeRequest,
    GrantType, OAuth2Config, TokenResponse,
};

// Re-export core components
pub use crate::core::{
    form_encode, query_string, FormRequest, HttpResponse, HttpTransport, MockHttpTransport,
    ReqwestHttpTransport,
};

// Re-export flows
pub use flows::AuthorizationCodeFlow;
