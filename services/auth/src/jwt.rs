//! JWT service for the mock token endpoint
//!
//! Tokens are signed with HS256 using a shared secret, so the upstream API can
//! verify the bearer tokens the console sends without a key exchange.

use anyhow::Result;
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared signing secret
    pub secret: String,
    /// Token lifetime in seconds
    pub token_ttl_seconds: u64,
}

impl JwtConfig {
    /// Build the JWT configuration from the auth settings
    pub fn from_settings(settings: &common::config::AuthSettings) -> Self {
        Self {
            secret: settings.jwt_secret.clone(),
            token_ttl_seconds: settings.token_ttl_seconds,
        }
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username the token was issued to
    pub sub: String,
    /// Unique token ID
    pub jti: Uuid,
    /// Issued at time
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
}

/// A signed token together with its absolute expiry
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: JwtConfig,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        JwtService {
            encoding_key,
            decoding_key,
            validation,
            config,
        }
    }

    /// Issue a token for `username` valid from `now`
    pub fn issue(&self, username: &str, now: DateTime<Utc>) -> Result<IssuedToken> {
        let ttl = i64::try_from(self.config.token_ttl_seconds)?;
        let iat = now.timestamp();
        let exp = iat
            .checked_add(ttl)
            .ok_or_else(|| anyhow::anyhow!("Token lifetime overflows"))?;

        let claims = Claims {
            sub: username.to_string(),
            jti: Uuid::new_v4(),
            iat,
            exp,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        let expires_at = DateTime::from_timestamp(exp, 0)
            .ok_or_else(|| anyhow::anyhow!("Token expiry out of range"))?;

        info!("Issued token {} for {}", claims.jti, username);
        Ok(IssuedToken { token, expires_at })
    }

    /// Validate a token and return the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }

    /// Get the token lifetime in seconds
    pub fn token_ttl_seconds(&self) -> u64 {
        self.config.token_ttl_seconds
    }
}
