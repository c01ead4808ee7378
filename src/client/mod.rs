pub mod request;

pub use request::RequestExecutor;

use crate::auth::{AccessToken, AuthorizeUrlOptions, OAuthClient, TokenManager};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::resources::{Activities, Comments, ListOptions, Params, People, PeopleCollection};
use chrono::{DateTime, Utc};
use oauth2::CsrfToken;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// Google+ API client.
///
/// Without a token every request is made with the configured API key and can
/// only read public data. Once a token is present (from the config,
/// [`authorize`](Client::authorize) or [`get_token`](Client::get_token)) requests
/// are made on behalf of that user and the token is refreshed when it expires.
///
/// ```rust,ignore
/// let client = Client::new(ClientConfig::new().with_api_key("AIza..."))?;
/// let person = client.get_person("109813896768294978296").await?;
/// ```
#[derive(Debug)]
pub struct Client {
    config: ClientConfig,
    tokens: Arc<TokenManager>,
    executor: RequestExecutor,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Create a client that sends API requests through `http_client`
    pub fn with_http_client(config: ClientConfig, http_client: reqwest::Client) -> Result<Self> {
        let tokens = Arc::new(TokenManager::from_config(&config)?);
        let executor = RequestExecutor::with_http_client(http_client, &config, tokens.clone());

        Ok(Self {
            config,
            tokens,
            executor,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn executor(&self) -> &RequestExecutor {
        &self.executor
    }

    fn oauth(&self) -> Result<&OAuthClient> {
        self.tokens.oauth().ok_or_else(|| {
            Error::Config("client_id is required for the OAuth authorization flow".to_string())
        })
    }

    /// URL to send the user to for consent, along with the CSRF state embedded in it
    pub fn authorize_url(&self, options: &AuthorizeUrlOptions) -> Result<(Url, CsrfToken)> {
        self.oauth()?.authorize_url(options)
    }

    /// Exchange the authorization code from the redirect for an access token and keep it
    pub async fn get_token(&self, code: &str, params: &Params) -> Result<AccessToken> {
        let response = self.oauth()?.exchange_code(code, params).await?;
        let token = AccessToken::from_response(&response, None);
        tracing::info!("Obtained access token, expires at {:?}", token.expires_at);
        self.tokens.store(token.clone()).await;
        Ok(token)
    }

    /// Use a token obtained earlier, e.g. one the host application persisted.
    ///
    /// An already expired token is refreshed before it is returned.
    pub async fn authorize(
        &self,
        token: impl Into<String>,
        refresh_token: Option<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<AccessToken> {
        self.tokens.authorize(token, refresh_token, expires_at).await
    }

    /// Current access token, refreshed if it had expired; `None` in API key mode
    pub async fn access_token(&self) -> Result<Option<AccessToken>> {
        self.tokens.access_token().await
    }

    /// True once the token has been refreshed; persist [`access_token`](Client::access_token) when it is
    pub async fn was_refreshed(&self) -> bool {
        self.tokens.was_refreshed().await
    }

    /// GET an arbitrary path under the versioned API root
    pub async fn get(&self, path: &str, params: &Params) -> Result<Value> {
        self.executor.get(path, params).await
    }

    pub fn people(&self) -> People<'_> {
        People::new(&self.executor)
    }

    pub fn activities(&self) -> Activities<'_> {
        Activities::new(&self.executor)
    }

    pub fn comments(&self) -> Comments<'_> {
        Comments::new(&self.executor)
    }

    pub async fn get_person(&self, user_id: &str) -> Result<Value> {
        self.people().get(user_id).await
    }

    pub async fn search_people(&self, query: &str, options: &ListOptions) -> Result<Value> {
        self.people().search(query, options).await
    }

    pub async fn list_people_by_activity(
        &self,
        activity_id: &str,
        collection: PeopleCollection,
        options: &ListOptions,
    ) -> Result<Value> {
        self.people().list_by_activity(activity_id, collection, options).await
    }

    pub async fn get_activity(&self, activity_id: &str) -> Result<Value> {
        self.activities().get(activity_id).await
    }

    pub async fn list_activities(&self, user_id: &str, options: &ListOptions) -> Result<Value> {
        self.activities().list(user_id, options).await
    }

    pub async fn search_activities(&self, query: &str, options: &ListOptions) -> Result<Value> {
        self.activities().search(query, options).await
    }

    pub async fn get_comment(&self, comment_id: &str) -> Result<Value> {
        self.comments().get(comment_id).await
    }

    pub async fn list_comments(&self, activity_id: &str, options: &ListOptions) -> Result<Value> {
        self.comments().list(activity_id, options).await
    }
}
