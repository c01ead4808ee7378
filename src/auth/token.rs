use chrono::{DateTime, Utc};
use oauth2::basic::BasicTokenResponse;
use oauth2::TokenResponse;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serialize SecretString for storage
fn serialize_secret<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(secret.expose_secret())
}

/// Deserialize SecretString from storage
fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(SecretString::new(s))
}

fn serialize_optional_secret<S>(secret: &Option<SecretString>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match secret {
        Some(secret) => serializer.serialize_some(secret.expose_secret()),
        None => serializer.serialize_none(),
    }
}

pub(crate) fn deserialize_optional_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = Option::<String>::deserialize(deserializer)?;
    Ok(s.map(SecretString::new))
}

/// OAuth access token together with what is needed to renew it.
///
/// Serializable so the host application can persist it after
/// [`Client::was_refreshed`](crate::Client::was_refreshed) reports a refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    /// OAuth access token (stored securely)
    #[serde(serialize_with = "serialize_secret", deserialize_with = "deserialize_secret")]
    pub token: SecretString,
    /// OAuth refresh token (stored securely)
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_optional_secret",
        deserialize_with = "deserialize_optional_secret"
    )]
    pub refresh_token: Option<SecretString>,
    /// Token expiration time (UTC); `None` means the token does not expire
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    pub fn new(
        token: SecretString,
        refresh_token: Option<SecretString>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            token,
            refresh_token,
            expires_at,
        }
    }

    /// Build from a token endpoint response.
    ///
    /// Google only returns a refresh token on the first exchange, so
    /// `previous_refresh_token` is carried over when the response has none.
    pub(crate) fn from_response(
        response: &BasicTokenResponse,
        previous_refresh_token: Option<&SecretString>,
    ) -> Self {
        let refresh_token = response
            .refresh_token()
            .map(|t| SecretString::new(t.secret().clone()))
            .or_else(|| previous_refresh_token.cloned());

        let expires_at = response
            .expires_in()
            .and_then(|d| chrono::Duration::from_std(d).ok())
            .map(|d| Utc::now() + d);

        Self {
            token: SecretString::new(response.access_token().secret().clone()),
            refresh_token,
            expires_at,
        }
    }

    /// The bearer token value
    pub fn secret(&self) -> &str {
        self.token.expose_secret()
    }

    /// Check if token is expired
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Utc::now() >= expires_at,
            None => false,
        }
    }
}
