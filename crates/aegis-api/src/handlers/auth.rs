//! Authentication API handlers
//!
//! HTTP endpoints for user registration, login, profile retrieval, and
//! logout.
//!
//! Author: hephaex@gmail.com

use crate::auth::{AuthenticatedUser, LoginRequest, RegisterRequest};
use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

/// Registration response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    /// HTTP status code, mirrored into the body
    pub status: u16,
    pub message: String,
}

/// Login response carrying the bearer token
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub status: bool,
    pub message: String,
    pub token: String,
}

/// Public profile fields
///
/// The only user representation that ever leaves the service: id, name, and
/// email. There is no field for the password hash to even be mapped into.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileData {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Profile response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    pub status: bool,
    pub message: String,
    pub data: ProfileData,
}

/// Logout response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LogoutResponse {
    pub status: bool,
    pub message: String,
}

/// Register a new user account
///
/// # Responses
///
/// * `200 OK` - User successfully registered; no token is issued
/// * `400 Bad Request` - Validation failed or email already registered
#[utoipa::path(
    post,
    path = "/register",
    tag = "user",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User registered successfully", body = RegisterResponse),
        (status = 400, description = "Validation error", body = crate::error::ValidationErrorResponse),
    )
)]
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.auth.register(request).await?;

    Ok(Json(RegisterResponse {
        status: 200,
        message: "Registration successful".to_string(),
    }))
}

/// Authenticate a user and return a bearer token
///
/// # Responses
///
/// * `200 OK` - Authentication successful, token returned
/// * `401 Unauthorized` - Invalid credentials; the message never says
///   whether the email or the password was wrong
#[utoipa::path(
    post,
    path = "/login",
    tag = "user",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse),
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let token = state.auth.login(request).await?;

    Ok(Json(LoginResponse {
        status: true,
        message: "Logged in successfully".to_string(),
        token,
    }))
}

/// Get the authenticated user's profile
///
/// Requires a valid bearer token.
#[utoipa::path(
    get,
    path = "/show",
    tag = "user",
    responses(
        (status = 200, description = "Profile data", body = ProfileResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn show_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, AppError> {
    let record = state.auth.profile(user.user_id).await?;

    Ok(Json(ProfileResponse {
        status: true,
        message: "Profile data".to_string(),
        data: ProfileData {
            id: record.id,
            name: record.name,
            email: record.email,
        },
    }))
}

/// Log out the current session
///
/// Requires a valid bearer token. Tokens are stateless, so the presented
/// token stays technically usable until its expiry elapses.
#[utoipa::path(
    get,
    path = "/logout",
    tag = "user",
    responses(
        (status = 200, description = "Logout successful", body = LogoutResponse),
        (status = 401, description = "Unauthorized", body = crate::error::ErrorResponse),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, AppError> {
    state.auth.logout(user.user_id).await?;

    Ok(Json(LogoutResponse {
        status: true,
        message: "Logged out successfully".to_string(),
    }))
}
