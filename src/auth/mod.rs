//! Authentication: developer token issuance, user token flows, and token
//! caching.

mod developer_token;
mod token_cache;
mod user_token;

pub use developer_token::{DeveloperToken, DeveloperTokenConfig, DEFAULT_TOKEN_LIFETIME_DAYS};
pub use token_cache::{MemoryTokenCache, MockTokenCache, TokenCache, UserToken};
pub use user_token::{
    UserTokenManager, UserTokenResponse, DEFAULT_AUTH_ENDPOINT, DEFAULT_SERVER_TOKEN_ENDPOINT,
    DEFAULT_TOKEN_ENDPOINT, SCOPE_MUSICKIT,
};
