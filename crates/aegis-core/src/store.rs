//! Credential store
//!
//! Owns every [`User`] record in the system. The contract is deliberately
//! narrow: accounts are created and read, never updated or deleted.
//!
//! Email uniqueness is enforced inside [`UserStore::create`] itself, under a
//! single write guard, so two concurrent registrations for the same address
//! cannot both succeed.

use crate::{NewUser, User};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Credential store errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,
}

/// Canonical form of an email address for uniqueness comparison.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// Storage contract for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create a new account.
    ///
    /// Fails with [`StoreError::DuplicateEmail`] when the address is already
    /// taken, compared case-insensitively. The check and the insert are
    /// atomic with respect to concurrent `create` calls.
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// Look up an account by email, case-insensitively.
    async fn find_by_email(&self, email: &str) -> Option<User>;

    /// Look up an account by id.
    async fn find_by_id(&self, id: Uuid) -> Option<User>;
}

/// In-memory user store.
///
/// Backed by a `tokio` read-write lock over the record map plus an email
/// index keyed by the normalized address. Read paths (login, profile) take
/// the shared lock; only registration takes the exclusive one.
#[derive(Default)]
pub struct MemoryUserStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    by_email: HashMap<String, Uuid>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let key = normalize_email(&new_user.email);
        let mut inner = self.inner.write().await;

        if inner.by_email.contains_key(&key) {
            return Err(StoreError::DuplicateEmail);
        }

        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: Utc::now(),
        };

        inner.by_email.insert(key, user.id);
        inner.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Option<User> {
        let inner = self.inner.read().await;
        let id = inner.by_email.get(&normalize_email(email))?;
        inner.users.get(id).cloned()
    }

    async fn find_by_id(&self, id: Uuid) -> Option<User> {
        let inner = self.inner.read().await;
        inner.users.get(&id).cloned()
    }
}
