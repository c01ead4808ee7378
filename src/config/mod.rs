//! Client configuration
//!
//! A [`ClientConfig`] can be built in code with the `with_*` setters or loaded
//! from a TOML file layered with `GOOGLE_PLUS_*` environment variables.

use crate::auth::token::deserialize_optional_secret;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::Deserialize;
use std::path::Path;

/// Base URL of the Google+ REST API (the version segment is appended per request)
pub const DEFAULT_API_ENDPOINT: &str = "https://www.googleapis.com/plus";

/// API version used when none is configured
pub const DEFAULT_API_VERSION: &str = "v1";

/// Google OAuth 2.0 authorization endpoint
pub const DEFAULT_AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/auth";

/// Google OAuth 2.0 token endpoint
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.google.com/o/oauth2/token";

/// Prefix for environment overrides, e.g. `GOOGLE_PLUS_API_KEY`
pub const ENV_PREFIX: &str = "GOOGLE_PLUS";

fn default_api_endpoint() -> String {
    DEFAULT_API_ENDPOINT.to_string()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_authorize_url() -> String {
    DEFAULT_AUTHORIZE_URL.to_string()
}

fn default_token_url() -> String {
    DEFAULT_TOKEN_URL.to_string()
}

/// Connection settings and credentials for a [`Client`](crate::Client)
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_api_endpoint")]
    pub api_endpoint: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// API key used for requests made without an access token
    #[serde(default, deserialize_with = "deserialize_optional_secret")]
    pub api_key: Option<SecretString>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_secret")]
    pub client_secret: Option<SecretString>,
    #[serde(default)]
    pub redirect_uri: Option<String>,
    /// Previously obtained access token
    #[serde(default, deserialize_with = "deserialize_optional_secret")]
    pub token: Option<SecretString>,
    #[serde(default, deserialize_with = "deserialize_optional_secret")]
    pub refresh_token: Option<SecretString>,
    #[serde(default)]
    pub token_expires_at: Option<DateTime<Utc>>,
    #[serde(default = "default_authorize_url")]
    pub authorize_url: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_endpoint: default_api_endpoint(),
            api_version: default_api_version(),
            api_key: None,
            client_id: None,
            client_secret: None,
            redirect_uri: None,
            token: None,
            refresh_token: None,
            token_expires_at: None,
            authorize_url: default_authorize_url(),
            token_url: default_token_url(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file, with `GOOGLE_PLUS_*` environment variables taking precedence
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .map_err(|e| Error::Config(format!("Failed to load {}: {}", path.display(), e)))?;

        settings
            .try_deserialize()
            .map_err(|e| Error::Config(format!("Invalid configuration in {}: {}", path.display(), e)))
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(|e| Error::Config(format!("Invalid configuration: {}", e)))
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(api_key.into()));
        self
    }

    pub fn with_client_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.client_id = Some(client_id.into());
        self.client_secret = Some(SecretString::new(client_secret.into()));
        self
    }

    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    /// Seed the client with a token obtained in an earlier session
    pub fn with_token(
        mut self,
        token: impl Into<String>,
        refresh_token: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        self.token = Some(SecretString::new(token.into()));
        self.refresh_token = refresh_token.map(SecretString::new);
        self.token_expires_at = expires_at;
        self
    }

    pub fn with_api_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoint = endpoint.into();
        self
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Point the OAuth flow at different authorization and token endpoints
    pub fn with_oauth_urls(mut self, authorize_url: impl Into<String>, token_url: impl Into<String>) -> Self {
        self.authorize_url = authorize_url.into();
        self.token_url = token_url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_endpoint, "https://www.googleapis.com/plus");
        assert_eq!(config.api_version, "v1");
        assert_eq!(config.authorize_url, DEFAULT_AUTHORIZE_URL);
        assert_eq!(config.token_url, DEFAULT_TOKEN_URL);
        assert!(config.api_key.is_none());
        assert!(config.token.is_none());
    }

    #[test]
    fn test_from_toml_str() {
        let config = ClientConfig::from_toml_str(
            r#"
            api_key = "key-123"
            client_id = "client.apps.googleusercontent.com"
            client_secret = "shh"
            redirect_uri = "http://localhost:8080/callback"
            token = "ya29.token"
            refresh_token = "1/refresh"
            token_expires_at = "2030-01-01T00:00:00Z"
            "#,
        )
        .unwrap();

        assert_eq!(config.api_key.as_ref().unwrap().expose_secret(), "key-123");
        assert_eq!(config.client_id.as_deref(), Some("client.apps.googleusercontent.com"));
        assert_eq!(config.client_secret.as_ref().unwrap().expose_secret(), "shh");
        assert_eq!(config.redirect_uri.as_deref(), Some("http://localhost:8080/callback"));
        assert_eq!(config.token.as_ref().unwrap().expose_secret(), "ya29.token");
        assert_eq!(config.refresh_token.as_ref().unwrap().expose_secret(), "1/refresh");
        assert_eq!(
            config.token_expires_at.unwrap().to_rfc3339(),
            "2030-01-01T00:00:00+00:00"
        );
        // Unset fields fall back to defaults
        assert_eq!(config.api_version, "v1");
        assert_eq!(config.api_endpoint, DEFAULT_API_ENDPOINT);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "api_key = \"file-key\"").unwrap();
        writeln!(file, "api_version = \"v2\"").unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.api_key.as_ref().unwrap().expose_secret(), "file-key");
        assert_eq!(config.api_version, "v2");
    }

    #[test]
    fn test_from_missing_file() {
        let err = ClientConfig::from_file("/nonexistent/google-plus.toml").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::new()
            .with_api_key("abc")
            .with_client_credentials("id", "secret")
            .with_redirect_uri("urn:ietf:wg:oauth:2.0:oob")
            .with_token("tok", Some("ref".to_string()), None)
            .with_api_version("v1.1");

        assert_eq!(config.client_id.as_deref(), Some("id"));
        assert_eq!(config.refresh_token.as_ref().unwrap().expose_secret(), "ref");
        assert_eq!(config.api_version, "v1.1");
        assert!(config.token_expires_at.is_none());
    }
}
