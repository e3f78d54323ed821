//! # Apple Music API Client
//!
//! Rust client for the Apple Music web API.
//!
//! ## Features
//!
//! - Catalog, library, playlist, search, recommendation, and radio services
//! - ES256 developer token issuance with local expiry introspection
//! - OAuth-style user token flows with pluggable, cache-through storage
//! - Classified API errors with type-check predicates
//! - Staged response decoding that names what was wrong with a bad body
//! - Secure credential handling with `SecretString`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use integrations_applemusic::auth::DeveloperToken;
//! use integrations_applemusic::{AppleMusic, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let private_key = std::fs::read("AuthKey.p8")?;
//!     let token = DeveloperToken::new("TEAM_ID", "KEY_ID", &private_key, "media.com.example")?;
//!
//!     let music = AppleMusic::new(ClientConfig::default())?;
//!     music.set_developer_token(&token);
//!
//!     let song = music.catalog.song("1613600188").await?;
//!     println!("{}", song.attributes.name);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - `client` - HTTP transport, request construction, response decoding
//! - `config` - Client configuration and log levels
//! - `auth` - Developer tokens, user token flows, token caching
//! - `errors` - Error taxonomy, classification, predicates
//! - `services` - Typed endpoint wrappers
//! - `types` - Resource models and request options

#![forbid(unsafe_code)]

pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod services;
pub mod types;

mod apple_music;

pub use apple_music::AppleMusic;
pub use client::{AppleMusicClient, AppleMusicClientBuilder, MUSIC_USER_TOKEN_HEADER};
pub use config::{
    ClientConfig, LogLevel, DEFAULT_API_VERSION, DEFAULT_BASE_URL, DEFAULT_TIMEOUT,
    DEFAULT_USER_AGENT,
};
pub use errors::{ApiError, AppleMusicError, AppleMusicResult, DecodeKind, ErrorDetail, ErrorKind};
