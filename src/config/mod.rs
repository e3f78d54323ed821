//! Client configuration.
//!
//! A [`ClientConfig`] is built once (usually through
//! [`AppleMusicClient::builder`](crate::client::AppleMusicClient::builder))
//! and consumed by every request. Configuration comes from the caller only;
//! there is no environment or file loading in this crate.

use std::fmt;
use std::time::Duration;

use secrecy::SecretString;

/// Default API host.
pub const DEFAULT_BASE_URL: &str = "https://api.music.apple.com";

/// Default API version path segment.
pub const DEFAULT_API_VERSION: &str = "v1";

/// Default `User-Agent` header value.
pub const DEFAULT_USER_AGENT: &str =
    concat!("integrations-applemusic/", env!("CARGO_PKG_VERSION"));

/// Default request timeout for catalog calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How much request and response detail the transport emits through
/// `tracing`.
///
/// Levels are ordered: a level enables everything below it. With no
/// subscriber installed the events go nowhere, so even `Debug` costs almost
/// nothing and can never fail a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    /// Emit nothing.
    #[default]
    None,
    /// Emit failed requests and their bodies.
    Error,
    /// Emit request and response lines.
    Info,
    /// Emit response bodies as well.
    Debug,
}

/// Settings consumed by [`AppleMusicClient`](crate::client::AppleMusicClient).
#[derive(Clone)]
pub struct ClientConfig {
    /// API host, scheme included.
    pub base_url: String,
    /// Version path segment between the host and every endpoint path.
    pub api_version: String,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Static headers added to every request, in insertion order. Applied
    /// before the auth headers, so they can never displace authentication.
    pub headers: Vec<(String, String)>,
    /// Developer token sent as `Authorization: Bearer <token>`.
    pub developer_token: Option<SecretString>,
    /// Music User Token sent as `Music-User-Token`.
    pub user_token: Option<SecretString>,
    /// Diagnostic verbosity of the transport.
    pub log_level: LogLevel,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            headers: Vec::new(),
            developer_token: None,
            user_token: None,
            log_level: LogLevel::None,
        }
    }
}

impl ClientConfig {
    /// A config with every default in place.
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("headers", &self.headers)
            .field(
                "developer_token",
                &self.developer_token.as_ref().map(|_| "***redacted***"),
            )
            .field(
                "user_token",
                &self.user_token.as_ref().map(|_| "***redacted***"),
            )
            .field("log_level", &self.log_level)
            .finish()
    }
}
