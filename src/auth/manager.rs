use super::oauth::OAuthClient;
use super::token::AccessToken;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use secrecy::SecretString;
use tokio::sync::Mutex;

/// Raw token values plus the access token built from them on first use
#[derive(Debug, Default)]
struct TokenState {
    token: Option<SecretString>,
    refresh_token: Option<SecretString>,
    expires_at: Option<DateTime<Utc>>,
    access_token: Option<AccessToken>,
    refreshed: bool,
}

impl TokenState {
    fn set(
        &mut self,
        token: SecretString,
        refresh_token: Option<SecretString>,
        expires_at: Option<DateTime<Utc>>,
    ) {
        self.token = Some(token);
        self.refresh_token = refresh_token;
        self.expires_at = expires_at;
        self.access_token = None;
    }

    fn replace(&mut self, access_token: AccessToken) {
        self.token = Some(access_token.token.clone());
        self.refresh_token = access_token.refresh_token.clone();
        self.expires_at = access_token.expires_at;
        self.access_token = Some(access_token);
    }

    /// Build the access token from the raw values if that hasn't happened yet
    fn access_token(&mut self) -> Option<AccessToken> {
        if self.access_token.is_none() {
            let token = self.token.clone()?;
            self.access_token = Some(AccessToken::new(
                token,
                self.refresh_token.clone(),
                self.expires_at,
            ));
        }
        self.access_token.clone()
    }
}

/// Holds the current OAuth token and refreshes it when it has expired.
///
/// The state lock is held across a refresh, so concurrent callers sharing one
/// manager wait for a single refresh instead of each starting their own.
#[derive(Debug)]
pub struct TokenManager {
    oauth: Option<OAuthClient>,
    state: Mutex<TokenState>,
}

impl TokenManager {
    pub fn new(oauth: Option<OAuthClient>) -> Self {
        Self {
            oauth,
            state: Mutex::new(TokenState::default()),
        }
    }

    /// Build the OAuth client from `config` and seed any token it carries
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut state = TokenState::default();
        if let Some(ref token) = config.token {
            state.set(
                token.clone(),
                config.refresh_token.clone(),
                config.token_expires_at,
            );
        }

        Ok(Self {
            oauth: OAuthClient::from_config(config)?,
            state: Mutex::new(state),
        })
    }

    pub fn oauth(&self) -> Option<&OAuthClient> {
        self.oauth.as_ref()
    }

    /// Replace the stored token values and return the resulting access token,
    /// refreshed first if the supplied expiry has already passed
    pub async fn authorize(
        &self,
        token: impl Into<String>,
        refresh_token: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<AccessToken> {
        let access_token = AccessToken::new(
            SecretString::new(token.into()),
            refresh_token.map(SecretString::new),
            expires_at,
        );

        let mut state = self.state.lock().await;
        state.replace(access_token.clone());
        self.refresh_if_expired(&mut state, access_token).await
    }

    /// Store a token obtained from the token endpoint
    pub async fn store(&self, access_token: AccessToken) {
        self.state.lock().await.replace(access_token);
    }

    /// Current access token, refreshed first if it has expired.
    ///
    /// Returns `None` when no token has been configured (API key mode).
    pub async fn access_token(&self) -> Result<Option<AccessToken>> {
        let mut state = self.state.lock().await;
        let Some(current) = state.access_token() else {
            return Ok(None);
        };

        self.refresh_if_expired(&mut state, current).await.map(Some)
    }

    /// Whether a refresh has replaced the token since construction.
    ///
    /// When true, the caller should persist the current token.
    pub async fn was_refreshed(&self) -> bool {
        self.state.lock().await.refreshed
    }

    async fn refresh_if_expired(&self, state: &mut TokenState, current: AccessToken) -> Result<AccessToken> {
        if !current.is_expired() {
            return Ok(current);
        }

        let refreshed = self.refresh(&current).await?;
        state.replace(refreshed.clone());
        state.refreshed = true;
        Ok(refreshed)
    }

    async fn refresh(&self, current: &AccessToken) -> Result<AccessToken> {
        let oauth = self.oauth.as_ref().ok_or_else(|| {
            Error::Config("Access token expired but no OAuth client id is configured to refresh it".to_string())
        })?;
        let refresh_token = current.refresh_token.as_ref().ok_or_else(|| {
            Error::Authorization("Access token expired and no refresh token is available".to_string())
        })?;

        tracing::info!("🔄 Access token expired at {:?}, refreshing...", current.expires_at);

        match oauth.refresh(refresh_token).await {
            Ok(response) => {
                let token = AccessToken::from_response(&response, Some(refresh_token));
                tracing::info!("✅ Token refreshed successfully, expires at {:?}", token.expires_at);
                Ok(token)
            }
            Err(e) => {
                tracing::error!("❌ Failed to refresh token: {}", e);
                Err(e)
            }
        }
    }
}
