use crate::auth::TokenManager;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::resources::{ApiRequest, Params};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// Sends GET requests to the versioned API root and decodes the JSON bodies.
///
/// Requests carry the OAuth bearer token when one is available, otherwise the API key.
#[derive(Debug)]
pub struct RequestExecutor {
    client: Client,
    api_endpoint: String,
    api_version: String,
    api_key: Option<SecretString>,
    tokens: Arc<TokenManager>,
}

impl RequestExecutor {
    pub fn new(config: &ClientConfig, tokens: Arc<TokenManager>) -> Self {
        Self::with_http_client(Client::new(), config, tokens)
    }

    /// Use a preconfigured `reqwest` client (timeouts, proxies, user agent)
    pub fn with_http_client(client: Client, config: &ClientConfig, tokens: Arc<TokenManager>) -> Self {
        Self {
            client,
            api_endpoint: config.api_endpoint.clone(),
            api_version: config.api_version.clone(),
            api_key: config.api_key.clone(),
            tokens,
        }
    }

    pub fn tokens(&self) -> &Arc<TokenManager> {
        &self.tokens
    }

    /// Absolute URL for `path` under `{endpoint}/{version}`; `path` is split on `/`
    pub fn url(&self, path: &str) -> Result<Url> {
        self.segments_url(path.trim_matches('/').split('/'))
    }

    /// Absolute URL with each of `segments` pushed as one percent-encoded path segment
    pub fn segments_url<I>(&self, segments: I) -> Result<Url>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = Url::parse(&self.api_endpoint)
            .map_err(|e| Error::Config(format!("Invalid API endpoint '{}': {}", self.api_endpoint, e)))?;

        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("API endpoint '{}' cannot be a base URL", self.api_endpoint)))?
            .pop_if_empty()
            .push(&self.api_version)
            .extend(segments);

        Ok(url)
    }

    pub async fn execute(&self, request: &ApiRequest) -> Result<Value> {
        let url = self.segments_url(&request.segments)?;
        self.send(url, &request.path(), &request.params).await
    }

    /// GET `path` with `params` and return the decoded JSON body unchanged
    pub async fn get(&self, path: &str, params: &Params) -> Result<Value> {
        let url = self.url(path)?;
        self.send(url, path, params).await
    }

    async fn send(&self, url: Url, path: &str, params: &Params) -> Result<Value> {
        let req_builder = match self.tokens.access_token().await? {
            Some(token) => {
                tracing::debug!("GET {} using OAuth bearer token", path);
                self.client.get(url).query(params).bearer_auth(token.secret())
            }
            None => {
                let api_key = self.api_key.as_ref().ok_or_else(|| {
                    Error::Config("No access token or API key configured".to_string())
                })?;
                tracing::debug!("GET {} using API key", path);
                self.client
                    .get(url)
                    .query(params)
                    .query(&[("key", api_key.expose_secret())])
            }
        };

        let response = req_builder.send().await?;

        // Check for errors
        let status = response.status();
        tracing::debug!("GET {} returned {}", path, status);
        if !status.is_success() {
            let error_text = error_body(response.text().await, path);
            return Err(Error::Api {
                status: status.as_u16(),
                message: error_message(&error_text),
            });
        }

        let response_text = response.text().await?;
        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!("Failed to parse response for {}: {}", path, e);
            Error::Decode(e)
        })
    }
}

/// Body of an error response; the status still gets reported when it can't be read
fn error_body<E: std::fmt::Display>(body: std::result::Result<String, E>, path: &str) -> String {
    body.unwrap_or_else(|e| {
        tracing::debug!("Failed to read error body for {}: {}", path, e);
        "Unknown error".to_string()
    })
}

/// Pull the message out of Google's error envelope, falling back to the raw body
fn error_message(body: &str) -> String {
    let message = serde_json::from_str::<Value>(body).ok().and_then(|json| {
        let error = json.get("error")?;
        error
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| error.as_str())
            .map(str::to_string)
    });

    message.unwrap_or_else(|| body.to_string())
}
