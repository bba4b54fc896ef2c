//! Authentication module
//!
//! This module provides the authentication core:
//! - Token issuance and verification (JWT, HMAC-SHA256)
//! - Password hashing with Argon2id
//! - Middleware for bearer-token request authentication
//! - The service orchestrating registration, login, profile, and logout

pub mod jwt;
pub mod middleware;
pub mod password;
pub mod service;

pub use jwt::{issue_token, verify_token, Claims, JwtConfig, JwtError};
pub use middleware::{auth_middleware, AuthError, AuthenticatedUser};
pub use password::{hash_password, verify_password, PasswordConfig, PasswordError};
pub use service::{AuthService, LoginRequest, RegisterRequest};
