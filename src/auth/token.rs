//! Access token handling
//!
//! Tokens are self-contained signed assertions of subject + expiry (HS256).
//! There is no server-side session store and no revocation before expiry.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Token signing configuration
///
/// Constructed once at startup from [`AppConfig`](crate::config::AppConfig)
/// and passed down explicitly; nothing here is read from the environment.
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token lifetime in minutes
    pub ttl_minutes: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, ttl_minutes: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl_minutes,
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-to-secret".to_string(),
            ttl_minutes: 60,
        }
    }
}

/// Token claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Random per-token id; two tokens minted within the same second for the
    /// same subject still differ
    pub jti: String,
}

/// Create a signed token for a subject using the configured TTL
pub fn issue_token(subject: &str, config: &JwtConfig) -> Result<String, jsonwebtoken::errors::Error> {
    issue_token_with_ttl(subject, config.ttl_minutes, config)
}

/// Create a signed token with an explicit TTL in minutes
pub fn issue_token_with_ttl(
    subject: &str,
    ttl_minutes: i64,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let exp = Utc::now() + Duration::minutes(ttl_minutes);
    let claims = Claims {
        sub: subject.to_string(),
        exp: exp.timestamp(),
        jti: uuid::Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify a token and return its subject.
///
/// Returns `None` on signature mismatch, malformed input, or expiry in the
/// past; callers treat all three as "unauthenticated".
pub fn verify_token(token: &str, config: &JwtConfig) -> Option<String> {
    let mut validation = Validation::default();
    // No leeway: an expired token is expired.
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .ok()
    .map(|data| data.claims.sub)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_and_verify_round_trip() {
        let config = JwtConfig::default();
        let token = issue_token("manager", &config).unwrap();
        assert_eq!(verify_token(&token, &config).as_deref(), Some("manager"));
    }

    #[test]
    fn two_tokens_for_one_subject_differ() {
        let config = JwtConfig::default();
        let a = issue_token("manager", &config).unwrap();
        let b = issue_token("manager", &config).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = JwtConfig::default();
        let token = issue_token_with_ttl("manager", -1, &config).unwrap();
        assert_eq!(verify_token(&token, &config), None);
    }

    #[test]
    fn malformed_token_is_rejected() {
        let config = JwtConfig::default();
        assert_eq!(verify_token("not-a-token", &config), None);
        assert_eq!(verify_token("", &config), None);
    }

    #[test]
    fn foreign_signature_is_rejected() {
        let ours = JwtConfig::default();
        let theirs = JwtConfig::new("some-other-secret", 60);
        let token = issue_token("manager", &theirs).unwrap();
        assert_eq!(verify_token(&token, &ours), None);
    }
}
