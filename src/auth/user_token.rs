//! User token flows: authorization-code grant, refresh, cache-through
//! retrieval, and the server-token exchange.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use crate::auth::developer_token::DeveloperToken;
use crate::auth::token_cache::{TokenCache, UserToken};
use crate::client::decode_body;
use crate::errors::{AppleMusicError, AppleMusicResult};

/// Authorization endpoint users are redirected to.
pub const DEFAULT_AUTH_ENDPOINT: &str = "https://appleid.apple.com/auth/authorize";
/// Token endpoint for code exchange and refresh grants.
pub const DEFAULT_TOKEN_ENDPOINT: &str = "https://appleid.apple.com/auth/token";
/// Endpoint that trades an opaque device token for a Music-User-Token.
pub const DEFAULT_SERVER_TOKEN_ENDPOINT: &str = "https://api.music.apple.com/v1/me/tokens";
/// OAuth scope requested during authorization.
pub const SCOPE_MUSICKIT: &str = "musickit";

const EXCHANGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Reply from the server-token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UserTokenResponse {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: i64,
}

/// Wire shape of a token-endpoint grant reply.
#[derive(Debug, Deserialize)]
struct TokenGrantResponse {
    access_token: String,
    #[serde(default)]
    token_type: String,
    #[serde(default)]
    expires_in: i64,
    #[serde(default)]
    refresh_token: Option<String>,
}

impl TokenGrantResponse {
    /// Converts the relative grant into an absolute [`UserToken`].
    ///
    /// A reply that omits `refresh_token` carries over `previous_refresh`, an
    /// empty `token_type` normalizes to `Bearer`, and `expires_in <= 0` means
    /// the token never expires.
    fn into_user_token(self, previous_refresh: Option<&str>) -> UserToken {
        let token_type = if self.token_type.is_empty() {
            "Bearer".to_string()
        } else {
            self.token_type
        };
        let refresh_token = self
            .refresh_token
            .or_else(|| previous_refresh.map(str::to_string));
        let expires_at =
            (self.expires_in > 0).then(|| Utc::now() + ChronoDuration::seconds(self.expires_in));
        UserToken {
            access_token: self.access_token,
            token_type,
            refresh_token,
            expires_at,
        }
    }
}

/// Runs the user-facing token flows against the provider's OAuth endpoints.
///
/// Holds its own short-timeout HTTP client, separate from the catalog
/// transport. Tokens are cached per user in the injected [`TokenCache`];
/// retrieval via [`user_token`](Self::user_token) refreshes expired records
/// transparently.
pub struct UserTokenManager {
    http: reqwest::Client,
    developer_token: DeveloperToken,
    client_id: String,
    redirect_uri: String,
    auth_endpoint: Url,
    token_endpoint: Url,
    server_token_endpoint: Url,
    cache: Arc<dyn TokenCache>,
}

impl UserTokenManager {
    /// Creates a manager against the production endpoints.
    pub fn new(
        developer_token: DeveloperToken,
        client_id: impl Into<String>,
        redirect_uri: impl Into<String>,
        cache: Arc<dyn TokenCache>,
    ) -> AppleMusicResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(EXCHANGE_TIMEOUT)
            .build()
            .map_err(|err| AppleMusicError::Configuration {
                message: format!("failed to build HTTP client: {err}"),
            })?;

        Ok(Self {
            http,
            developer_token,
            client_id: client_id.into(),
            redirect_uri: redirect_uri.into(),
            auth_endpoint: Url::parse(DEFAULT_AUTH_ENDPOINT)?,
            token_endpoint: Url::parse(DEFAULT_TOKEN_ENDPOINT)?,
            server_token_endpoint: Url::parse(DEFAULT_SERVER_TOKEN_ENDPOINT)?,
            cache,
        })
    }

    /// Overrides the authorization and token endpoints.
    pub fn with_endpoints(mut self, auth_endpoint: Url, token_endpoint: Url) -> Self {
        self.auth_endpoint = auth_endpoint;
        self.token_endpoint = token_endpoint;
        self
    }

    /// Overrides the server-token endpoint.
    pub fn with_server_token_endpoint(mut self, endpoint: Url) -> Self {
        self.server_token_endpoint = endpoint;
        self
    }

    /// Builds the URL to redirect a user to for authorization.
    ///
    /// `state` is threaded through verbatim; the caller validates it on the
    /// return trip.
    pub fn authorize_url(&self, state: &str) -> Url {
        let mut url = self.auth_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", SCOPE_MUSICKIT)
            .append_pair("access_type", "offline")
            .append_pair("state", state);
        url
    }

    /// Exchanges an authorization code for a user token.
    #[instrument(skip(self, code))]
    pub async fn exchange_code(&self, code: &str) -> AppleMusicResult<UserToken> {
        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("client_id", self.client_id.as_str()),
        ];

        let response = self
            .http
            .post(self.token_endpoint.clone())
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| AppleMusicError::Transport {
                message: format!("failed to read token endpoint response: {err}"),
            })?;

        if !status.is_success() {
            return Err(AppleMusicError::Exchange {
                message: format!(
                    "token endpoint returned {}: {}",
                    status.as_u16(),
                    body.trim()
                ),
            });
        }

        let grant: TokenGrantResponse =
            serde_json::from_str(&body).map_err(|err| AppleMusicError::Exchange {
                message: format!("malformed token endpoint response: {err}"),
            })?;

        debug!("exchanged authorization code for user token");
        Ok(grant.into_user_token(None))
    }

    /// Refreshes an expired user token.
    ///
    /// Fails with [`AppleMusicError::Refresh`] when the record carries no
    /// refresh token.
    #[instrument(skip(self, token))]
    pub async fn refresh_token(&self, token: &UserToken) -> AppleMusicResult<UserToken> {
        let refresh = token
            .refresh_token
            .as_deref()
            .ok_or_else(|| AppleMusicError::Refresh {
                message: "no refresh token on record".to_string(),
            })?;

        let form = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh),
            ("client_id", self.client_id.as_str()),
        ];

        let response = self
            .http
            .post(self.token_endpoint.clone())
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| AppleMusicError::Transport {
                message: format!("failed to read token endpoint response: {err}"),
            })?;

        if !status.is_success() {
            return Err(AppleMusicError::Refresh {
                message: format!(
                    "token endpoint returned {}: {}",
                    status.as_u16(),
                    body.trim()
                ),
            });
        }

        let grant: TokenGrantResponse =
            serde_json::from_str(&body).map_err(|err| AppleMusicError::Refresh {
                message: format!("malformed token endpoint response: {err}"),
            })?;

        debug!("refreshed user token");
        Ok(grant.into_user_token(token.refresh_token.as_deref()))
    }

    /// Returns the user's token, refreshing through the cache when expired.
    ///
    /// A cache miss is [`AppleMusicError::TokenNotFound`]; there is no
    /// bootstrap path here. A fresh cached token is returned without touching
    /// the network. An expired one is refreshed exactly once and saved back
    /// before this returns.
    #[instrument(skip(self))]
    pub async fn user_token(&self, user_id: &str) -> AppleMusicResult<UserToken> {
        let cached = self.cache.get(user_id).await?;
        if !cached.is_expired() {
            debug!(user_id, "returning cached user token");
            return Ok(cached);
        }

        debug!(user_id, "cached user token expired, refreshing");
        let refreshed = self.refresh_token(&cached).await?;
        self.cache.save(user_id, refreshed.clone()).await?;
        Ok(refreshed)
    }

    /// Trades an opaque device token for a Music-User-Token.
    ///
    /// Posts the token as a form field authenticated with the developer
    /// token. Anything but a 200 is [`AppleMusicError::ServerToken`]; a 200
    /// with a malformed body is [`AppleMusicError::Decode`].
    #[instrument(skip(self, device_token))]
    pub async fn request_user_token(
        &self,
        device_token: &str,
    ) -> AppleMusicResult<UserTokenResponse> {
        let form = [("music-user-token", device_token)];

        let response = self
            .http
            .post(self.server_token_endpoint.clone())
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.developer_token.as_str()),
            )
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| AppleMusicError::Transport {
                message: format!("failed to read server token response: {err}"),
            })?;

        if status != StatusCode::OK {
            return Err(AppleMusicError::ServerToken {
                status_code: status.as_u16(),
                message: String::from_utf8_lossy(&body).trim().to_string(),
            });
        }

        debug!("obtained user token from server token endpoint");
        decode_body(status.as_u16(), &body)
    }
}

impl fmt::Debug for UserTokenManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserTokenManager")
            .field("client_id", &self.client_id)
            .field("redirect_uri", &self.redirect_uri)
            .field("auth_endpoint", &self.auth_endpoint.as_str())
            .field("token_endpoint", &self.token_endpoint.as_str())
            .field("server_token_endpoint", &self.server_token_endpoint.as_str())
            .field("developer_token", &"***redacted***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token_cache::MemoryTokenCache;
    use std::collections::HashMap;

    fn manager() -> UserTokenManager {
        UserTokenManager::new(
            DeveloperToken::from_token("test-developer-token"),
            "com.example.app",
            "https://example.com/callback",
            Arc::new(MemoryTokenCache::new()),
        )
        .unwrap()
    }

    #[test]
    fn authorize_url_carries_all_params() {
        let url = manager().authorize_url("xyzzy");

        assert_eq!(url.host_str(), Some("appleid.apple.com"));
        assert_eq!(url.path(), "/auth/authorize");

        let params: HashMap<String, String> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(params["client_id"], "com.example.app");
        assert_eq!(params["redirect_uri"], "https://example.com/callback");
        assert_eq!(params["response_type"], "code");
        assert_eq!(params["scope"], "musickit");
        assert_eq!(params["access_type"], "offline");
        assert_eq!(params["state"], "xyzzy");
        assert_eq!(params.len(), 6);
    }

    #[test]
    fn endpoint_overrides_take_effect() {
        let auth = Url::parse("http://localhost:9000/authorize").unwrap();
        let token = Url::parse("http://localhost:9000/token").unwrap();
        let m = manager().with_endpoints(auth, token);

        let url = m.authorize_url("s");
        assert_eq!(url.host_str(), Some("localhost"));
        assert_eq!(url.path(), "/authorize");
    }

    #[test]
    fn grant_reply_becomes_absolute_token() {
        let grant = TokenGrantResponse {
            access_token: "at".to_string(),
            token_type: "bearer".to_string(),
            expires_in: 3600,
            refresh_token: Some("rt".to_string()),
        };

        let token = grant.into_user_token(None);
        assert_eq!(token.access_token, "at");
        assert_eq!(token.token_type, "bearer");
        assert_eq!(token.refresh_token.as_deref(), Some("rt"));

        let expires_at = token.expires_at.unwrap();
        let delta = (expires_at - Utc::now()).num_seconds();
        assert!((3598..=3600).contains(&delta), "unexpected delta {delta}");
    }

    #[test]
    fn missing_refresh_token_carries_over() {
        let grant = TokenGrantResponse {
            access_token: "at".to_string(),
            token_type: String::new(),
            expires_in: 0,
            refresh_token: None,
        };

        let token = grant.into_user_token(Some("old-refresh"));
        assert_eq!(token.refresh_token.as_deref(), Some("old-refresh"));
        assert_eq!(token.token_type, "Bearer");
        assert!(token.expires_at.is_none());
    }

    #[test]
    fn debug_redacts_developer_token() {
        let rendered = format!("{:?}", manager());
        assert!(!rendered.contains("test-developer-token"));
        assert!(rendered.contains("***redacted***"));
    }
}
