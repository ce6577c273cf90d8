//! Short-lived bearer token minting.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::config::Secret;
use crate::error::Result;

/// Default lifetime of a minted token.
pub const DEFAULT_TOKEN_TTL_SECONDS: u64 = 10;

/// Claims carried by every API token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer, the account's API key.
    pub iss: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Mints HS256 tokens from an API key and secret.
///
/// Tokens are single-request credentials: callers mint a fresh one for every
/// network call instead of caching.
#[derive(Clone)]
pub struct TokenMinter {
    api_key: Secret,
    api_secret: Secret,
    ttl: Duration,
}

impl TokenMinter {
    pub fn new(api_key: Secret, api_secret: Secret, ttl_seconds: u64) -> Self {
        Self {
            api_key,
            api_secret,
            ttl: Duration::seconds(ttl_seconds as i64),
        }
    }

    /// Mint a token valid from `now` for the configured lifetime.
    pub fn mint_at(&self, now: DateTime<Utc>) -> Result<String> {
        let claims = Claims {
            iss: self.api_key.expose().to_string(),
            exp: (now + self.ttl).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.api_secret.expose().as_bytes()),
        )?;
        Ok(token)
    }

    /// Mint a token valid from the current wall-clock time.
    pub fn mint(&self) -> Result<String> {
        self.mint_at(Utc::now())
    }
}
