//! JWT token generation and validation
//!
//! Implements the bearer-token side of authentication with HMAC-SHA256
//! signing. Tokens are self-contained: subject, issue time and expiry are
//! carried in the claims and verified against the process-wide signing key.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use uuid::Uuid;

/// Claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Token issuer (always "aegis-api")
    pub iss: String,
    /// Subject - user ID
    pub sub: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: u64,
    /// Expiration timestamp (Unix epoch)
    pub exp: u64,
}

impl Claims {
    /// The user id this token is bound to.
    pub fn subject(&self) -> Result<Uuid, JwtError> {
        Uuid::parse_str(&self.sub).map_err(|_| JwtError::Malformed)
    }
}

/// JWT token generation and validation errors
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to encode JWT: {0}")]
    Encoding(jsonwebtoken::errors::Error),

    #[error("Malformed token")]
    Malformed,

    #[error("Invalid token signature")]
    BadSignature,

    #[error("Token has expired")]
    Expired,

    #[error("System time error: {0}")]
    SystemTime(#[from] std::time::SystemTimeError),
}

/// JWT configuration
///
/// Loaded once at startup and shared through application state; the signing
/// key is immutable for the lifetime of the process, and rotating it
/// invalidates every previously issued token.
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for HMAC signing (must be at least 256 bits)
    pub secret: String,
    /// Token lifetime in seconds (default: 3600 = 1 hour)
    pub ttl_secs: u64,
    /// Token issuer identifier
    pub issuer: String,
}

// The signing key must never reach the logs, so Debug is written by hand.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("ttl_secs", &self.ttl_secs)
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "development-secret-key-change-in-production".to_string(),
            ttl_secs: 3600, // 1 hour
            issuer: "aegis-api".to_string(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "development-secret-key-change-in-production".to_string()),
            ttl_secs: std::env::var("JWT_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "aegis-api".to_string()),
        }
    }
}

/// Issue a signed access token bound to the given user id.
///
/// The expiry is `now + ttl_secs` from the configuration.
///
/// # Returns
///
/// * `Ok(String)` - Encoded JWT token
/// * `Err(JwtError)` - If token generation fails
pub fn issue_token(config: &JwtConfig, user_id: Uuid) -> Result<String, JwtError> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();

    let claims = Claims {
        iss: config.issuer.clone(),
        sub: user_id.to_string(),
        iat: now,
        exp: now + config.ttl_secs,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(JwtError::Encoding)
}

/// Validate an access token and extract its claims.
///
/// A token is accepted only when the signature verifies against the
/// configured key and the current time is before `exp`. Failures are split
/// into three kinds - [`JwtError::Malformed`], [`JwtError::BadSignature`]
/// and [`JwtError::Expired`] - so callers can log the cause; the HTTP
/// boundary collapses all of them into one generic unauthorized response.
pub fn verify_token(config: &JwtConfig, token: &str) -> Result<Claims, JwtError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::BadSignature,
        _ => JwtError::Malformed,
    })?;

    Ok(token_data.claims)
}
