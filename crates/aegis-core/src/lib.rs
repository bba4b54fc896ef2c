//! Aegis Core - Domain models, credential store, and shared types
//!
//! This crate defines the core abstractions used throughout the Aegis system:
//! - User account model
//! - Credential store contract and in-memory implementation
//! - Configuration management

pub mod config;
pub mod store;

pub use config::{AppConfig, ConfigError, LoggingConfig, ServerConfig};
pub use store::{MemoryUserStore, StoreError, UserStore};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user account.
///
/// The password hash is carried for credential verification but is never
/// serialized: every outward-facing representation of a user omits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, assigned at creation and immutable afterwards
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address, unique across all accounts (case-insensitive)
    pub email: String,

    /// Argon2id hash in PHC string format
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Whitelisted input for creating a user record.
///
/// Records are only ever built from these three fields. Request payloads are
/// deserialized into their own typed structs and converted explicitly, so
/// arbitrary body fields can never reach the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }
}
