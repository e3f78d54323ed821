//! Error types for the Apple Music client.
//!
//! Everything fallible in this crate returns [`AppleMusicResult`]. Remote
//! failures surface as [`ApiError`] values classified by status code;
//! everything else gets its own variant so callers can match on exactly
//! what went wrong instead of parsing strings.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type AppleMusicResult<T> = Result<T, AppleMusicError>;

/// Broad classification of a remote API failure, derived from the HTTP
/// status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 401 or 403: missing, expired, or insufficient credentials.
    Authentication,
    /// Any other 4xx: the request itself was rejected.
    InvalidRequest,
    /// 429: the caller is being throttled.
    RateLimit,
    /// 5xx: the service failed.
    Server,
    /// Anything outside the 4xx and 5xx ranges.
    Unknown,
}

impl ErrorKind {
    /// Maps an HTTP status code to its kind.
    ///
    /// Arms are matched top-down, and 429 sits above the generic 4xx range
    /// so throttling is never reported as a plain invalid request.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => ErrorKind::Authentication,
            429 => ErrorKind::RateLimit,
            400..=499 => ErrorKind::InvalidRequest,
            500..=599 => ErrorKind::Server,
            _ => ErrorKind::Unknown,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Authentication => "authentication",
            ErrorKind::InvalidRequest => "invalid_request",
            ErrorKind::RateLimit => "rate_limit",
            ErrorKind::Server => "server",
            ErrorKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// One entry from the API's structured error body.
///
/// The service sends these under an `errors` array; all fields are optional
/// on the wire and default to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ErrorDetail {
    pub id: String,
    pub title: String,
    pub detail: String,
    pub status: String,
    pub code: String,
}

/// Wire shape of an error response body.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

/// A classified failure returned by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code of the response.
    pub status_code: u16,
    /// Structured sub-errors from the body, in wire order.
    pub errors: Vec<ErrorDetail>,
}

impl ApiError {
    pub fn new(status_code: u16, errors: Vec<ErrorDetail>) -> Self {
        Self { status_code, errors }
    }

    /// The error's kind, derived from the status code at read time.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::from_status(self.status_code)
    }

    /// Human-readable message assembled from the sub-errors.
    ///
    /// Joins `"<title>: <detail>"` entries with `"; "` when the body carried
    /// structured errors, otherwise falls back to a status-code line.
    pub fn message(&self) -> String {
        if self.errors.is_empty() {
            return format!("API error (status code: {})", self.status_code);
        }
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|err| format!("{}: {}", err.title, err.detail))
            .collect();
        parts.join("; ")
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            write!(f, "API error (status code: {})", self.status_code)
        } else {
            write!(
                f,
                "API error (status code: {}): {}",
                self.status_code,
                self.message()
            )
        }
    }
}

impl std::error::Error for ApiError {}

/// The stage at which response-body decoding failed.
///
/// Stages are checked in order on the buffered body, so a failure names the
/// first thing wrong with it rather than a generic parse error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeKind {
    /// The body was zero bytes.
    EmptyBody,
    /// The body contained only whitespace.
    WhitespaceBody,
    /// The body did not look like JSON. Carries a truncated preview.
    NotJson { preview: String },
    /// The body was JSON but did not match the expected shape. Syntax
    /// errors carry the byte offset and surrounding body context.
    Schema {
        message: String,
        context: Option<String>,
    },
}

impl fmt::Display for DecodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeKind::EmptyBody => f.write_str("empty response body"),
            DecodeKind::WhitespaceBody => f.write_str("whitespace-only response body"),
            DecodeKind::NotJson { preview } => {
                write!(f, "non-JSON response body: {preview}")
            }
            DecodeKind::Schema {
                message,
                context: Some(context),
            } => write!(f, "{message} (near {context})"),
            DecodeKind::Schema {
                message,
                context: None,
            } => f.write_str(message),
        }
    }
}

/// Errors produced by the Apple Music client.
#[derive(Error, Debug)]
pub enum AppleMusicError {
    /// The developer token private key could not be parsed.
    #[error("failed to parse signing key: {message}")]
    KeyParse { message: String },

    /// Developer token signing failed.
    #[error("failed to sign developer token: {message}")]
    Signing { message: String },

    /// A token could not be decoded during local introspection.
    #[error("failed to parse token: {message}")]
    TokenParse { message: String },

    /// A token decoded but its claims were unusable.
    #[error("invalid token claims: {message}")]
    TokenClaim { message: String },

    /// The authorization-code exchange failed.
    #[error("authorization code exchange failed: {message}")]
    Exchange { message: String },

    /// The refresh-token grant failed.
    #[error("token refresh failed: {message}")]
    Refresh { message: String },

    /// No token is cached for the user.
    #[error("no token found for user: {user_id}")]
    TokenNotFound { user_id: String },

    /// A token cache backend failed.
    #[error("token cache error: {message}")]
    Cache { message: String },

    /// The server token endpoint rejected the request.
    #[error("user token request failed (status code: {status_code}): {message}")]
    ServerToken { status_code: u16, message: String },

    /// The request never produced a usable response.
    #[error("transport error: {message}")]
    Transport { message: String },

    /// A response body could not be decoded.
    #[error("failed to decode response (status code: {status_code}): {kind}")]
    Decode { status_code: u16, kind: DecodeKind },

    /// The API answered with an error status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A single-resource lookup came back with no data.
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    /// The client or a request was built from invalid input.
    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl AppleMusicError {
    /// The kind of the underlying API error, when this is one.
    pub fn api_kind(&self) -> Option<ErrorKind> {
        match self {
            AppleMusicError::Api(err) => Some(err.kind()),
            _ => None,
        }
    }

    /// True when this is an API error classified as an authentication
    /// failure. Any other error value answers `false`.
    pub fn is_authentication_error(&self) -> bool {
        self.api_kind() == Some(ErrorKind::Authentication)
    }

    /// True when this is an API error classified as an invalid request.
    pub fn is_invalid_request_error(&self) -> bool {
        self.api_kind() == Some(ErrorKind::InvalidRequest)
    }

    /// True when this is an API error classified as rate limiting.
    pub fn is_rate_limit_error(&self) -> bool {
        self.api_kind() == Some(ErrorKind::RateLimit)
    }

    /// True when this is an API error classified as a server failure.
    pub fn is_server_error(&self) -> bool {
        self.api_kind() == Some(ErrorKind::Server)
    }
}

impl From<reqwest::Error> for AppleMusicError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppleMusicError::Transport {
                message: format!("request timed out: {err}"),
            }
        } else if err.is_connect() {
            AppleMusicError::Transport {
                message: format!("connection failed: {err}"),
            }
        } else {
            AppleMusicError::Transport {
                message: err.to_string(),
            }
        }
    }
}

impl From<url::ParseError> for AppleMusicError {
    fn from(err: url::ParseError) -> Self {
        AppleMusicError::Configuration {
            message: format!("invalid URL: {err}"),
        }
    }
}
