/// Authentication middleware for protecting routes
///
/// Extracts the bearer token from the Authorization header and verifies it
/// against the signing configuration held in application state. On success,
/// the token subject is added to request extensions as [`AuthenticatedUser`].
use super::jwt::{verify_token, JwtError};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Identity extracted from a verified bearer token.
///
/// Extracted in handlers with `Extension<AuthenticatedUser>`. This is the
/// only channel through which an authenticated identity reaches a handler -
/// there is no ambient "current user" accessor.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

/// Authentication middleware errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingAuthHeader,

    #[error("Invalid Authorization header format")]
    InvalidAuthHeader,

    #[error(transparent)]
    InvalidToken(#[from] JwtError),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // One body for every failure kind: the caller must not learn
        // whether the token was missing, malformed, forged or expired.
        tracing::debug!(reason = %self, "rejected bearer credential");

        let body = serde_json::json!({
            "status": false,
            "message": "Unauthorized",
        });

        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

/// Authentication middleware that requires a valid bearer token.
///
/// This middleware:
/// 1. Extracts the Authorization header
/// 2. Validates the `Bearer <token>` format
/// 3. Verifies the token signature and expiry via the state's [`JwtConfig`]
/// 4. Adds [`AuthenticatedUser`] to request extensions
///
/// The signing configuration is read from [`AppState`], where it was loaded
/// once at startup.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidAuthHeader)?;

    let claims = verify_token(&state.jwt, token)?;
    let user_id = claims.subject()?;

    request
        .extensions_mut()
        .insert(AuthenticatedUser { user_id });

    Ok(next.run(request).await)
}
