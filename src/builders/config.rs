//! Configuration Builder
//!
//! Fluent builder for client configuration. Validation happens once in
//! [`OAuth2ConfigBuilder::build`]; the resulting configuration is immutable.

use secrecy::SecretString;
use std::time::Duration;
use url::Url;

use crate::error::{ConfigurationError, OAuth2Error};
use crate::types::{
    ClientAuthMethod, ClientCredentials, OAuth2Config, DEFAULT_AUTHORIZATION_PATH,
    DEFAULT_TIMEOUT, DEFAULT_TOKEN_PATH,
};

/// OAuth2 configuration builder.
#[derive(Default)]
pub struct OAuth2ConfigBuilder {
    site: Option<String>,
    authorization_path: Option<String>,
    token_path: Option<String>,
    client_id: Option<String>,
    client_secret: Option<SecretString>,
    auth_method: ClientAuthMethod,
    timeout: Option<Duration>,
}

impl OAuth2ConfigBuilder {
    /// Create a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the authorization server base URL (absolute).
    pub fn site(mut self, site: impl Into<String>) -> Self {
        self.site = Some(site.into());
        self
    }

    /// Override the authorization endpoint path (default `/oauth/authorize`).
    pub fn authorization_path(mut self, path: impl Into<String>) -> Self {
        self.authorization_path = Some(path.into());
        self
    }

    /// Override the token endpoint path (default `/oauth/token`).
    pub fn token_path(mut self, path: impl Into<String>) -> Self {
        self.token_path = Some(path.into());
        self
    }

    /// Set the client ID.
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set the client secret.
    pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(SecretString::new(client_secret.into()));
        self
    }

    /// Set the client authentication method.
    pub fn auth_method(mut self, method: ClientAuthMethod) -> Self {
        self.auth_method = method;
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<OAuth2Config, OAuth2Error> {
        let site = self.site.filter(|s| !s.is_empty()).ok_or_else(|| missing("site"))?;

        let parsed = Url::parse(&site).map_err(|e| {
            OAuth2Error::Configuration(ConfigurationError::InvalidSite {
                url: site.clone(),
                message: e.to_string(),
            })
        })?;
        if parsed.cannot_be_a_base() {
            return Err(OAuth2Error::Configuration(ConfigurationError::InvalidSite {
                url: site,
                message: "not an absolute base URL".to_string(),
            }));
        }
        let site = site.trim_end_matches('/').to_string();

        let client_id = self
            .client_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| missing("client_id"))?;

        // Confidential auth methods need the secret at build time, not at
        // exchange time.
        if matches!(
            self.auth_method,
            ClientAuthMethod::ClientSecretPost | ClientAuthMethod::ClientSecretBasic
        ) && self.client_secret.is_none()
        {
            return Err(missing("client_secret"));
        }

        Ok(OAuth2Config {
            site,
            authorization_path: self
                .authorization_path
                .unwrap_or_else(|| DEFAULT_AUTHORIZATION_PATH.to_string()),
            token_path: self
                .token_path
                .unwrap_or_else(|| DEFAULT_TOKEN_PATH.to_string()),
            credentials: ClientCredentials {
                client_id,
                client_secret: self.client_secret,
                auth_method: self.auth_method,
            },
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        })
    }
}

fn missing(field: &str) -> OAuth2Error {
    OAuth2Error::Configuration(ConfigurationError::MissingField {
        field: field.to_string(),
    })
}

/// Create a new OAuth2 configuration builder.
pub fn oauth2_config() -> OAuth2ConfigBuilder {
    OAuth2ConfigBuilder::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_success_with_defaults() {
        let config = OAuth2ConfigBuilder::new()
            .site("http://localhost:8080")
            .client_id("client-id")
            .client_secret("client-secret")
            .build()
            .unwrap();

        assert_eq!(config.site, "http://localhost:8080");
        assert_eq!(config.authorization_path, "/oauth/authorize");
        assert_eq!(config.token_path, "/oauth/token");
        assert_eq!(config.credentials.client_id, "client-id");
        assert_eq!(
            config.credentials.auth_method,
            ClientAuthMethod::ClientSecretPost
        );
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let config = OAuth2ConfigBuilder::new()
            .site("https://provider.example.com/")
            .client_id("client-id")
            .client_secret("client-secret")
            .build()
            .unwrap();
        assert_eq!(config.site, "https://provider.example.com");
        assert_eq!(
            config.token_endpoint(),
            "https://provider.example.com/oauth/token"
        );
    }

    #[test]
    fn test_builder_path_overrides() {
        let config = OAuth2ConfigBuilder::new()
            .site("https://provider.example.com")
            .authorization_path("/authorize")
            .token_path("/access_token")
            .client_id("client-id")
            .client_secret("client-secret")
            .build()
            .unwrap();
        assert_eq!(
            config.authorization_endpoint(),
            "https://provider.example.com/authorize"
        );
        assert_eq!(
            config.token_endpoint(),
            "https://provider.example.com/access_token"
        );
    }

    #[test]
    fn test_builder_missing_site() {
        let result = OAuth2ConfigBuilder::new()
            .client_id("client-id")
            .client_secret("client-secret")
            .build();
        assert!(matches!(
            result,
            Err(OAuth2Error::Configuration(
                ConfigurationError::MissingField { ref field }
            )) if field == "site"
        ));
    }

    #[test]
    fn test_builder_relative_site_rejected() {
        let result = OAuth2ConfigBuilder::new()
            .site("/oauth")
            .client_id("client-id")
            .client_secret("client-secret")
            .build();
        assert!(matches!(
            result,
            Err(OAuth2Error::Configuration(
                ConfigurationError::InvalidSite { .. }
            ))
        ));
    }

    #[test]
    fn test_builder_missing_client_id() {
        let result = OAuth2ConfigBuilder::new()
            .site("http://localhost:8080")
            .client_secret("client-secret")
            .build();
        assert!(matches!(
            result,
            Err(OAuth2Error::Configuration(
                ConfigurationError::MissingField { ref field }
            )) if field == "client_id"
        ));
    }

    #[test]
    fn test_builder_missing_secret_for_confidential_client() {
        let result = OAuth2ConfigBuilder::new()
            .site("http://localhost:8080")
            .client_id("client-id")
            .build();
        assert!(matches!(
            result,
            Err(OAuth2Error::Configuration(
                ConfigurationError::MissingField { ref field }
            )) if field == "client_secret"
        ));
    }

    #[test]
    fn test_builder_no_secret_required_for_public_client() {
        let config = OAuth2ConfigBuilder::new()
            .site("http://localhost:8080")
            .client_id("client-id")
            .auth_method(ClientAuthMethod::None)
            .build()
            .unwrap();
        assert!(config.credentials.client_secret.is_none());
    }
}
