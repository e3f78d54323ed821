//! Token cache abstraction and the in-memory default.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AppleMusicError, AppleMusicResult};

/// A user's tokens plus expiry bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserToken {
    /// Bearer token sent as `Music-User-Token`.
    pub access_token: String,
    /// Token type reported by the token endpoint, normally `Bearer`.
    pub token_type: String,
    /// Refresh token, when the grant included one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Absolute expiry. `None` means the token never expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl UserToken {
    /// True once the expiry has passed. Tokens without an expiry never
    /// expire.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Utc::now() >= expires_at,
            None => false,
        }
    }
}

/// Storage for per-user tokens, keyed by a caller-chosen user identifier.
///
/// At most one record exists per user and saving replaces unconditionally.
/// The crate ships [`MemoryTokenCache`]; deployments that need durability
/// implement this trait over their own store and hand it to
/// [`UserTokenManager`](crate::auth::UserTokenManager).
#[async_trait]
pub trait TokenCache: Send + Sync {
    /// Returns the token saved for `user_id`, or
    /// [`AppleMusicError::TokenNotFound`].
    async fn get(&self, user_id: &str) -> AppleMusicResult<UserToken>;

    /// Saves `token` under `user_id`, replacing any existing record.
    async fn save(&self, user_id: &str, token: UserToken) -> AppleMusicResult<()>;
}

/// In-memory cache. Process-local: contents are gone when it drops.
#[derive(Debug, Default)]
pub struct MemoryTokenCache {
    tokens: Mutex<HashMap<String, UserToken>>,
}

impl MemoryTokenCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenCache for MemoryTokenCache {
    async fn get(&self, user_id: &str) -> AppleMusicResult<UserToken> {
        let tokens = self.tokens.lock().unwrap();
        tokens
            .get(user_id)
            .cloned()
            .ok_or_else(|| AppleMusicError::TokenNotFound {
                user_id: user_id.to_string(),
            })
    }

    async fn save(&self, user_id: &str, token: UserToken) -> AppleMusicResult<()> {
        let mut tokens = self.tokens.lock().unwrap();
        tokens.insert(user_id.to_string(), token);
        Ok(())
    }
}

/// Cache double for tests: records every call and can be primed to fail.
#[derive(Debug, Default)]
pub struct MockTokenCache {
    tokens: Mutex<HashMap<String, UserToken>>,
    get_calls: Mutex<Vec<String>>,
    save_calls: Mutex<Vec<(String, UserToken)>>,
    should_fail: Mutex<bool>,
}

impl MockTokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a token without recording a call.
    pub fn prime(&self, user_id: &str, token: UserToken) {
        self.tokens
            .lock()
            .unwrap()
            .insert(user_id.to_string(), token);
    }

    /// Makes every subsequent call fail with a cache error.
    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    pub fn get_calls(&self) -> Vec<String> {
        self.get_calls.lock().unwrap().clone()
    }

    pub fn save_calls(&self) -> Vec<(String, UserToken)> {
        self.save_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenCache for MockTokenCache {
    async fn get(&self, user_id: &str) -> AppleMusicResult<UserToken> {
        self.get_calls.lock().unwrap().push(user_id.to_string());
        if *self.should_fail.lock().unwrap() {
            return Err(AppleMusicError::Cache {
                message: "mock cache failure".to_string(),
            });
        }
        let tokens = self.tokens.lock().unwrap();
        tokens
            .get(user_id)
            .cloned()
            .ok_or_else(|| AppleMusicError::TokenNotFound {
                user_id: user_id.to_string(),
            })
    }

    async fn save(&self, user_id: &str, token: UserToken) -> AppleMusicResult<()> {
        self.save_calls
            .lock()
            .unwrap()
            .push((user_id.to_string(), token.clone()));
        if *self.should_fail.lock().unwrap() {
            return Err(AppleMusicError::Cache {
                message: "mock cache failure".to_string(),
            });
        }
        self.tokens
            .lock()
            .unwrap()
            .insert(user_id.to_string(), token);
        Ok(())
    }
}
