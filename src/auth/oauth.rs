//! OAuth 2.0 authorization-code flow against Google's endpoints

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use oauth2::basic::{BasicClient, BasicErrorResponse, BasicTokenResponse};
use oauth2::reqwest::async_http_client;
use oauth2::{
    AuthType, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, RedirectUrl,
    RefreshToken, RequestTokenError, Scope, TokenUrl,
};
use secrecy::{ExposeSecret, SecretString};
use std::borrow::Cow;
use std::collections::BTreeMap;
use url::Url;

/// Scope requested when the caller does not name one
pub const DEFAULT_SCOPE: &str = "https://www.googleapis.com/auth/plus.me";

/// Caller overrides for [`OAuthClient::authorize_url`]
#[derive(Debug, Clone, Default)]
pub struct AuthorizeUrlOptions {
    /// Space-separated scopes, defaults to [`DEFAULT_SCOPE`]
    pub scope: Option<String>,
    /// Defaults to the configured redirect URI
    pub redirect_uri: Option<String>,
    /// CSRF state, a random token is generated when absent
    pub state: Option<String>,
    /// `online` or `offline` (offline is needed to receive a refresh token)
    pub access_type: Option<String>,
    /// `auto` or `force`
    pub approval_prompt: Option<String>,
    pub extra_params: BTreeMap<String, String>,
}

impl AuthorizeUrlOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn access_type(mut self, access_type: impl Into<String>) -> Self {
        self.access_type = Some(access_type.into());
        self
    }

    pub fn approval_prompt(mut self, approval_prompt: impl Into<String>) -> Self {
        self.approval_prompt = Some(approval_prompt.into());
        self
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_params.insert(name.into(), value.into());
        self
    }
}

/// Thin wrapper over an `oauth2` client configured for one application
#[derive(Debug, Clone)]
pub struct OAuthClient {
    inner: BasicClient,
}

impl OAuthClient {
    pub fn new(
        client_id: &str,
        client_secret: Option<&SecretString>,
        authorize_url: &str,
        token_url: &str,
        redirect_uri: Option<&str>,
    ) -> Result<Self> {
        let auth_url = AuthUrl::new(authorize_url.to_string())
            .map_err(|e| Error::Config(format!("Invalid authorization URL '{}': {}", authorize_url, e)))?;
        let token_url = TokenUrl::new(token_url.to_string())
            .map_err(|e| Error::Config(format!("Invalid token URL '{}': {}", token_url, e)))?;

        let mut inner = BasicClient::new(
            ClientId::new(client_id.to_string()),
            client_secret.map(|s| ClientSecret::new(s.expose_secret().clone())),
            auth_url,
            Some(token_url),
        )
        .set_auth_type(AuthType::RequestBody);

        if let Some(uri) = redirect_uri {
            inner = inner.set_redirect_uri(parse_redirect_uri(uri)?);
        }

        Ok(Self { inner })
    }

    /// Build the OAuth client described by `config`, or `None` when no client id is configured
    pub fn from_config(config: &ClientConfig) -> Result<Option<Self>> {
        match config.client_id.as_deref() {
            Some(client_id) => Self::new(
                client_id,
                config.client_secret.as_ref(),
                &config.authorize_url,
                &config.token_url,
                config.redirect_uri.as_deref(),
            )
            .map(Some),
            None => Ok(None),
        }
    }

    /// Authorization URL to redirect the user to, and the CSRF state it carries
    pub fn authorize_url(&self, options: &AuthorizeUrlOptions) -> Result<(Url, CsrfToken)> {
        let state = options
            .state
            .clone()
            .map(CsrfToken::new)
            .unwrap_or_else(CsrfToken::new_random);

        let scope = options.scope.as_deref().unwrap_or(DEFAULT_SCOPE);
        let mut request = self
            .inner
            .authorize_url(move || state)
            .add_scopes(scope.split_whitespace().map(|s| Scope::new(s.to_string())));

        if let Some(ref uri) = options.redirect_uri {
            request = request.set_redirect_uri(Cow::Owned(parse_redirect_uri(uri)?));
        }
        if let Some(ref access_type) = options.access_type {
            request = request.add_extra_param("access_type", access_type.clone());
        }
        if let Some(ref approval_prompt) = options.approval_prompt {
            request = request.add_extra_param("approval_prompt", approval_prompt.clone());
        }
        for (name, value) in &options.extra_params {
            request = request.add_extra_param(name.clone(), value.clone());
        }

        Ok(request.url())
    }

    /// Exchange an authorization code at the token endpoint
    pub async fn exchange_code(
        &self,
        code: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<BasicTokenResponse> {
        let mut request = self.inner.exchange_code(AuthorizationCode::new(code.to_string()));
        for (name, value) in params {
            request = request.add_extra_param(name.clone(), value.clone());
        }

        request
            .request_async(async_http_client)
            .await
            .map_err(|e| token_error("Authorization code exchange failed", e))
    }

    /// Obtain a fresh access token with a refresh token
    pub async fn refresh(&self, refresh_token: &SecretString) -> Result<BasicTokenResponse> {
        self.inner
            .exchange_refresh_token(&RefreshToken::new(refresh_token.expose_secret().clone()))
            .request_async(async_http_client)
            .await
            .map_err(|e| token_error("Token refresh failed", e))
    }
}

fn parse_redirect_uri(uri: &str) -> Result<RedirectUrl> {
    RedirectUrl::new(uri.to_string())
        .map_err(|e| Error::Config(format!("Invalid redirect URI '{}': {}", uri, e)))
}

fn token_error<RE>(context: &str, err: RequestTokenError<RE, BasicErrorResponse>) -> Error
where
    RE: std::error::Error + 'static,
{
    let detail = match err {
        RequestTokenError::ServerResponse(response) => response.to_string(),
        other => other.to_string(),
    };
    Error::Authorization(format!("{}: {}", context, detail))
}
