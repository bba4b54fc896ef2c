//! Authentication service layer
//!
//! Business logic for user registration, login, profile retrieval, and
//! logout, orchestrating the credential store, the password hasher, and the
//! token issuer.

use super::jwt::{issue_token, JwtConfig};
use super::password::{hash_password_with_config, verify_password, PasswordConfig, PasswordError};
use crate::error::AppError;
use aegis_core::{NewUser, User, UserStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// User registration request
///
/// Fields default to empty strings when absent, so a missing field surfaces
/// as a per-field validation message rather than a deserialization error.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[serde(default)]
    #[validate(
        length(min = 1, message = "password must not be empty"),
        must_match(
            other = "password_confirmation",
            message = "password confirmation does not match"
        )
    )]
    pub password: String,
    #[serde(default)]
    pub password_confirmation: String,
}

/// User login request
///
/// Deliberately not field-validated: any pair that matches no stored
/// credential gets the same generic 401, so `/login` has a single failure
/// shape and leaks nothing about which part was wrong.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Authentication service
pub struct AuthService {
    store: Arc<dyn UserStore>,
    jwt: JwtConfig,
    password_config: PasswordConfig,
    /// Verification target for logins with an unknown email. Comparing
    /// against this hash keeps the unknown-email path as expensive as the
    /// wrong-password path, so response timing cannot enumerate accounts.
    fallback_hash: String,
}

impl AuthService {
    /// Create a new authentication service with default hashing parameters.
    pub fn new(store: Arc<dyn UserStore>, jwt: JwtConfig) -> Result<Self, PasswordError> {
        Self::with_password_config(store, jwt, PasswordConfig::default())
    }

    /// Create a service with custom hashing parameters.
    pub fn with_password_config(
        store: Arc<dyn UserStore>,
        jwt: JwtConfig,
        password_config: PasswordConfig,
    ) -> Result<Self, PasswordError> {
        let fallback_hash =
            hash_password_with_config("aegis.login.fallback", &password_config)?;

        Ok(Self {
            store,
            jwt,
            password_config,
            fallback_hash,
        })
    }

    /// Register a new user.
    ///
    /// Validates the request (non-empty name, well-formed email, non-empty
    /// password matching its confirmation), hashes the password, and creates
    /// the record. Nothing is written when validation fails, and no token is
    /// issued on success - login is a separate, explicit step.
    pub async fn register(&self, request: RegisterRequest) -> Result<User, AppError> {
        request.validate()?;

        let password_hash = hash_password_with_config(&request.password, &self.password_config)
            .map_err(|e| AppError::Internal(format!("failed to hash password: {e}")))?;

        let user = self
            .store
            .create(NewUser::new(request.name, request.email, password_hash))
            .await?;

        tracing::info!(user_id = %user.id, "registered new user");
        Ok(user)
    }

    /// Log in with email and password, returning a bearer token.
    ///
    /// Both failure causes - unknown email and wrong password - answer with
    /// the same [`AppError::InvalidCredentials`] after the same amount of
    /// hashing work.
    pub async fn login(&self, request: LoginRequest) -> Result<String, AppError> {
        let user = self.store.find_by_email(&request.email).await;

        let password_ok = match &user {
            Some(user) => verify_password(&request.password, &user.password_hash)
                .map_err(|e| AppError::Internal(format!("failed to verify password: {e}")))?,
            None => {
                // Burn one verification against the fallback hash; the
                // result is discarded.
                let _ = verify_password(&request.password, &self.fallback_hash);
                false
            }
        };

        match user {
            Some(user) if password_ok => {
                let token = issue_token(&self.jwt, user.id)
                    .map_err(|e| AppError::Internal(format!("failed to issue token: {e}")))?;
                tracing::debug!(user_id = %user.id, "login succeeded");
                Ok(token)
            }
            _ => Err(AppError::InvalidCredentials),
        }
    }

    /// Load the profile for a verified token subject.
    ///
    /// A valid token whose subject no longer resolves to a record is treated
    /// as unauthorized rather than not-found, so a stale token cannot be
    /// used to probe which accounts exist.
    pub async fn profile(&self, user_id: Uuid) -> Result<User, AppError> {
        self.store
            .find_by_id(user_id)
            .await
            .ok_or(AppError::Unauthorized)
    }

    /// Acknowledge a logout.
    ///
    /// Tokens are self-contained and not tracked server-side, so there is no
    /// session record to delete: the presented token remains technically
    /// usable until its natural expiry. Reaching this method at all means
    /// the middleware verified a currently-valid token.
    pub async fn logout(&self, user_id: Uuid) -> Result<(), AppError> {
        tracing::debug!(user_id = %user_id, "logout acknowledged");
        Ok(())
    }
}
