//! HTTP transport: authenticated request construction, single-attempt
//! dispatch, and the layered response-decoding pipeline.

use std::fmt;
use std::sync::RwLock;
use std::time::Duration;

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT,
};
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, info};
use url::Url;

use crate::config::{ClientConfig, LogLevel};
use crate::errors::{ApiError, ApiErrorBody, AppleMusicError, AppleMusicResult, DecodeKind};

/// Header carrying the user token. Lowercase per HTTP/2 conventions;
/// matching is case-insensitive either way.
pub const MUSIC_USER_TOKEN_HEADER: &str = "music-user-token";

/// Longest body preview attached to a non-JSON decode failure.
const BODY_PREVIEW_LIMIT: usize = 100;

/// Bytes of surrounding body shown for a JSON syntax error.
const SYNTAX_CONTEXT_RADIUS: usize = 20;

/// HTTP client for the Apple Music API.
///
/// Owns a connection pool, the request configuration, and the auth tokens.
/// Requests are built with the configured headers, sent exactly once, and
/// decoded through a staged pipeline that distinguishes empty, non-JSON,
/// and schema-mismatched bodies.
pub struct AppleMusicClient {
    http: reqwest::Client,
    config: ClientConfig,
    developer_token: RwLock<Option<SecretString>>,
    user_token: RwLock<Option<SecretString>>,
}

impl AppleMusicClient {
    /// Creates a client from a full configuration.
    pub fn new(mut config: ClientConfig) -> AppleMusicResult<Self> {
        Url::parse(&config.base_url)?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| AppleMusicError::Configuration {
                message: format!("failed to build HTTP client: {err}"),
            })?;

        let developer_token = RwLock::new(config.developer_token.take());
        let user_token = RwLock::new(config.user_token.take());

        Ok(Self {
            http,
            config,
            developer_token,
            user_token,
        })
    }

    /// Starts a builder with default configuration.
    pub fn builder() -> AppleMusicClientBuilder {
        AppleMusicClientBuilder::default()
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Replaces the developer token used for `Authorization`.
    pub fn set_developer_token(&self, token: impl Into<String>) {
        *self.developer_token.write().unwrap() = Some(SecretString::new(token.into()));
    }

    /// Replaces the user token sent as `Music-User-Token`.
    pub fn set_user_token(&self, token: impl Into<String>) {
        *self.user_token.write().unwrap() = Some(SecretString::new(token.into()));
    }

    /// True when a user token is configured.
    pub fn has_user_token(&self) -> bool {
        self.user_token.read().unwrap().is_some()
    }

    fn build_url(&self, path: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        let version = self.config.api_version.trim_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{version}/{path}")
    }

    /// Builds a request with the standard header set.
    ///
    /// Fixed headers go in first, then the configured static headers, then
    /// the auth headers. Auth goes last so a static header can never
    /// override it.
    pub fn new_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> AppleMusicResult<reqwest::Request> {
        let url = self.build_url(path);

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, header_value("user-agent", &self.config.user_agent)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        for (name, value) in &self.config.headers {
            headers.insert(header_name(name)?, header_value(name, value)?);
        }

        if let Some(token) = self.developer_token.read().unwrap().as_ref() {
            let mut value = header_value(
                "authorization",
                &format!("Bearer {}", token.expose_secret()),
            )?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        if let Some(token) = self.user_token.read().unwrap().as_ref() {
            let mut value = header_value(MUSIC_USER_TOKEN_HEADER, token.expose_secret())?;
            value.set_sensitive(true);
            headers.insert(HeaderName::from_static(MUSIC_USER_TOKEN_HEADER), value);
        }

        let mut builder = self.http.request(method, &url).headers(headers);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        Ok(builder.build()?)
    }

    /// Sends a request. Exactly one attempt; there is no retry.
    ///
    /// Non-2xx responses are routed through the error-body pipeline and come
    /// back as `Err`.
    pub async fn execute(&self, request: reqwest::Request) -> AppleMusicResult<reqwest::Response> {
        if self.config.log_level >= LogLevel::Info {
            info!(method = %request.method(), url = %request.url(), "sending request");
        }
        if self.config.log_level >= LogLevel::Debug {
            debug!(headers = ?request.headers(), "request headers");
        }

        let response = self.http.execute(request).await?;

        let status = response.status();
        if self.config.log_level >= LogLevel::Info {
            info!(status = status.as_u16(), "received response");
        }

        if !status.is_success() {
            return Err(self.error_from_response(response).await);
        }

        Ok(response)
    }

    /// Turns a non-2xx response into the classified error.
    async fn error_from_response(&self, response: reqwest::Response) -> AppleMusicError {
        let status = response.status().as_u16();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(err) => {
                return AppleMusicError::Transport {
                    message: format!("failed to read error response body: {err}"),
                }
            }
        };

        if self.config.log_level >= LogLevel::Error {
            error!(
                status,
                body = %String::from_utf8_lossy(&body),
                "request failed"
            );
        }

        match decode_body::<ApiErrorBody>(status, &body) {
            Ok(parsed) => AppleMusicError::Api(ApiError::new(status, parsed.errors)),
            Err(err) => err,
        }
    }

    /// Decodes a successful response body into `T`.
    pub async fn decode_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> AppleMusicResult<T> {
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|err| AppleMusicError::Transport {
                message: format!("failed to read response body: {err}"),
            })?;

        if self.config.log_level >= LogLevel::Debug {
            debug!(status, body = %String::from_utf8_lossy(&body), "response body");
        }

        decode_body(status, &body)
    }

    /// GET `path` and decode the response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> AppleMusicResult<T> {
        let request = self.new_request(Method::GET, path, None::<&()>)?;
        let response = self.execute(request).await?;
        self.decode_response(response).await
    }

    /// POST `body` to `path` and decode the response.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> AppleMusicResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.new_request(Method::POST, path, Some(body))?;
        let response = self.execute(request).await?;
        self.decode_response(response).await
    }

    /// PUT `body` to `path` and decode the response.
    pub async fn put<T, B>(&self, path: &str, body: &B) -> AppleMusicResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.new_request(Method::PUT, path, Some(body))?;
        let response = self.execute(request).await?;
        self.decode_response(response).await
    }

    /// DELETE `path` and decode the response.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> AppleMusicResult<T> {
        let request = self.new_request(Method::DELETE, path, None::<&()>)?;
        let response = self.execute(request).await?;
        self.decode_response(response).await
    }

    /// POST `body` to `path`, ignoring the response body. For endpoints that
    /// answer 202/204 with nothing to decode.
    pub async fn post_empty<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> AppleMusicResult<()> {
        let request = self.new_request(Method::POST, path, Some(body))?;
        self.execute(request).await?;
        Ok(())
    }

    /// DELETE `path`, ignoring the response body.
    pub async fn delete_empty(&self, path: &str) -> AppleMusicResult<()> {
        let request = self.new_request(Method::DELETE, path, None::<&()>)?;
        self.execute(request).await?;
        Ok(())
    }
}

impl fmt::Debug for AppleMusicClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppleMusicClient")
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for [`AppleMusicClient`].
#[derive(Debug, Default)]
pub struct AppleMusicClientBuilder {
    config: ClientConfig,
}

impl AppleMusicClientBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.config.api_version = api_version.into();
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Adds a static header sent with every request. Auth headers cannot be
    /// overridden this way.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.headers.push((name.into(), value.into()));
        self
    }

    pub fn developer_token(mut self, token: impl Into<String>) -> Self {
        self.config.developer_token = Some(SecretString::new(token.into()));
        self
    }

    pub fn user_token(mut self, token: impl Into<String>) -> Self {
        self.config.user_token = Some(SecretString::new(token.into()));
        self
    }

    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.config.log_level = level;
        self
    }

    pub fn build(self) -> AppleMusicResult<AppleMusicClient> {
        AppleMusicClient::new(self.config)
    }
}

fn header_name(name: &str) -> AppleMusicResult<HeaderName> {
    HeaderName::from_bytes(name.as_bytes()).map_err(|_| AppleMusicError::Configuration {
        message: format!("invalid header name: {name:?}"),
    })
}

fn header_value(name: &str, value: &str) -> AppleMusicResult<HeaderValue> {
    // The value is withheld from the message: it may be a credential.
    HeaderValue::from_str(value).map_err(|_| AppleMusicError::Configuration {
        message: format!("invalid value for header {name:?}"),
    })
}

/// Decodes `body` into `T` through the staged pipeline: empty, whitespace,
/// non-JSON preview, then schema mismatch with syntax-error context.
pub(crate) fn decode_body<T: DeserializeOwned>(
    status_code: u16,
    body: &[u8],
) -> AppleMusicResult<T> {
    if body.is_empty() {
        return Err(AppleMusicError::Decode {
            status_code,
            kind: DecodeKind::EmptyBody,
        });
    }

    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        return Err(AppleMusicError::Decode {
            status_code,
            kind: DecodeKind::WhitespaceBody,
        });
    }

    if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
        return Err(AppleMusicError::Decode {
            status_code,
            kind: DecodeKind::NotJson {
                preview: preview(&text),
            },
        });
    }

    serde_json::from_slice(body).map_err(|err| AppleMusicError::Decode {
        status_code,
        kind: DecodeKind::Schema {
            context: syntax_context(&err, body),
            message: err.to_string(),
        },
    })
}

/// First [`BODY_PREVIEW_LIMIT`] characters of the body, with an ellipsis
/// when truncated. Counts characters, not bytes, so multi-byte text never
/// splits.
fn preview(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= BODY_PREVIEW_LIMIT {
        trimmed.to_string()
    } else {
        let cut: String = trimmed.chars().take(BODY_PREVIEW_LIMIT).collect();
        format!("{cut}...")
    }
}

/// For a JSON syntax error, the byte offset plus the surrounding body
/// bytes. Schema-level errors get no context; the serde message already
/// names the field.
fn syntax_context(err: &serde_json::Error, body: &[u8]) -> Option<String> {
    if !err.is_syntax() && !err.is_eof() {
        return None;
    }
    let offset = byte_offset(body, err.line(), err.column())?;
    let start = offset.saturating_sub(SYNTAX_CONTEXT_RADIUS);
    let end = (offset + SYNTAX_CONTEXT_RADIUS).min(body.len());
    let slice = String::from_utf8_lossy(&body[start..end]);
    Some(format!("byte {offset}: {slice:?}"))
}

/// Converts serde_json's one-based line/column into a byte offset.
fn byte_offset(body: &[u8], line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let mut offset = 0;
    for _ in 1..line {
        let newline = body[offset..].iter().position(|b| *b == b'\n')?;
        offset += newline + 1;
    }
    Some((offset + column.saturating_sub(1)).min(body.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Envelope {
        data: Vec<String>,
    }

    fn client() -> AppleMusicClient {
        AppleMusicClient::builder().build().unwrap()
    }

    #[test]
    fn build_url_joins_segments() {
        let client = client();
        assert_eq!(
            client.build_url("catalog/us/songs/123"),
            "https://api.music.apple.com/v1/catalog/us/songs/123"
        );
    }

    #[test]
    fn build_url_trims_duplicate_slashes() {
        let client = AppleMusicClient::builder()
            .base_url("https://example.com/")
            .api_version("/v1/")
            .build()
            .unwrap();
        assert_eq!(
            client.build_url("/catalog/us/songs"),
            "https://example.com/v1/catalog/us/songs"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = AppleMusicClient::builder()
            .base_url("not a url")
            .build()
            .unwrap_err();
        assert!(matches!(err, AppleMusicError::Configuration { .. }), "{err}");
    }

    #[test]
    fn request_carries_standard_headers() {
        let client = AppleMusicClient::builder()
            .developer_token("dev-token")
            .user_token("user-token")
            .header("X-Request-Id", "req-1")
            .build()
            .unwrap();

        let request = client
            .new_request(Method::GET, "catalog/us/songs/1", None::<&()>)
            .unwrap();
        let headers = request.headers();

        assert_eq!(
            headers.get(USER_AGENT).unwrap().to_str().unwrap(),
            crate::config::DEFAULT_USER_AGENT
        );
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
        assert_eq!(headers.get("X-Request-Id").unwrap(), "req-1");
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer dev-token");
        assert_eq!(headers.get(MUSIC_USER_TOKEN_HEADER).unwrap(), "user-token");
    }

    #[test]
    fn static_headers_cannot_override_auth() {
        let client = AppleMusicClient::builder()
            .developer_token("dev-token")
            .header("Authorization", "Bearer forged")
            .build()
            .unwrap();

        let request = client
            .new_request(Method::GET, "catalog/us/songs/1", None::<&()>)
            .unwrap();
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "Bearer dev-token"
        );
    }

    #[test]
    fn set_user_token_takes_effect_on_next_request() {
        let client = client();
        let request = client
            .new_request(Method::GET, "me/library/songs", None::<&()>)
            .unwrap();
        assert!(request.headers().get(MUSIC_USER_TOKEN_HEADER).is_none());

        client.set_user_token("fresh-token");
        let request = client
            .new_request(Method::GET, "me/library/songs", None::<&()>)
            .unwrap();
        assert_eq!(
            request.headers().get(MUSIC_USER_TOKEN_HEADER).unwrap(),
            "fresh-token"
        );
    }

    #[test]
    fn invalid_static_header_value_keeps_value_out_of_message() {
        let client = AppleMusicClient::builder()
            .header("X-Secret", "bad\nvalue")
            .build()
            .unwrap();

        let err = client
            .new_request(Method::GET, "catalog/us/songs/1", None::<&()>)
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("X-Secret"), "{message}");
        assert!(!message.contains("bad\nvalue"), "{message}");
    }

    #[test]
    fn decode_empty_body() {
        let err = decode_body::<Envelope>(500, b"").unwrap_err();
        match err {
            AppleMusicError::Decode { status_code, kind } => {
                assert_eq!(status_code, 500);
                assert!(matches!(kind, DecodeKind::EmptyBody));
            }
            other => panic!("expected Decode, got {other}"),
        }
    }

    #[test]
    fn decode_whitespace_body() {
        let err = decode_body::<Envelope>(502, b"  \n\t ").unwrap_err();
        match err {
            AppleMusicError::Decode { kind, .. } => {
                assert!(matches!(kind, DecodeKind::WhitespaceBody));
            }
            other => panic!("expected Decode, got {other}"),
        }
    }

    #[test]
    fn decode_non_json_body_carries_preview() {
        let err = decode_body::<Envelope>(503, b"<html>Service Unavailable</html>").unwrap_err();
        match err {
            AppleMusicError::Decode {
                kind: DecodeKind::NotJson { preview },
                ..
            } => assert_eq!(preview, "<html>Service Unavailable</html>"),
            other => panic!("expected NotJson, got {other}"),
        }
    }

    #[test]
    fn long_preview_is_truncated_with_ellipsis() {
        let body = "x".repeat(300);
        let err = decode_body::<Envelope>(503, body.as_bytes()).unwrap_err();
        match err {
            AppleMusicError::Decode {
                kind: DecodeKind::NotJson { preview },
                ..
            } => {
                assert_eq!(preview.chars().count(), BODY_PREVIEW_LIMIT + 3);
                assert!(preview.ends_with("..."));
            }
            other => panic!("expected NotJson, got {other}"),
        }
    }

    #[test]
    fn preview_respects_char_boundaries() {
        // 150 two-byte characters; a byte-indexed cut would split one.
        let body = "é".repeat(150);
        let err = decode_body::<Envelope>(503, body.as_bytes()).unwrap_err();
        match err {
            AppleMusicError::Decode {
                kind: DecodeKind::NotJson { preview },
                ..
            } => assert_eq!(preview.chars().count(), BODY_PREVIEW_LIMIT + 3),
            other => panic!("expected NotJson, got {other}"),
        }
    }

    #[test]
    fn decode_schema_mismatch_names_field() {
        let err = decode_body::<Envelope>(200, br#"{"data": "oops"}"#).unwrap_err();
        match err {
            AppleMusicError::Decode {
                kind: DecodeKind::Schema { message, context },
                ..
            } => {
                assert!(message.contains("invalid type"), "{message}");
                assert!(context.is_none());
            }
            other => panic!("expected Schema, got {other}"),
        }
    }

    #[test]
    fn decode_truncated_json_carries_offset_context() {
        let body = br#"{"data": ["one", "two""#;
        let err = decode_body::<Envelope>(200, body).unwrap_err();
        match err {
            AppleMusicError::Decode {
                kind: DecodeKind::Schema { context, .. },
                ..
            } => {
                let context = context.expect("syntax error should carry context");
                assert!(context.starts_with("byte "), "{context}");
            }
            other => panic!("expected Schema, got {other}"),
        }
    }

    #[test]
    fn decode_valid_body() {
        let envelope: Envelope = decode_body(200, br#"{"data": ["one", "two"]}"#).unwrap();
        assert_eq!(envelope.data, vec!["one", "two"]);
    }

    #[test]
    fn byte_offset_walks_lines() {
        let body = b"line one\nline two\nline three";
        assert_eq!(byte_offset(body, 1, 1), Some(0));
        assert_eq!(byte_offset(body, 2, 1), Some(9));
        assert_eq!(byte_offset(body, 3, 5), Some(22));
        assert_eq!(byte_offset(body, 9, 1), None);
    }

    #[test]
    fn debug_omits_tokens() {
        let client = AppleMusicClient::builder()
            .developer_token("dev-secret")
            .user_token("user-secret")
            .build()
            .unwrap();
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("dev-secret"));
        assert!(!rendered.contains("user-secret"));
    }
}
