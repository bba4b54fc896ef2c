//! Application state management
//!
//! Author: hephaex@gmail.com

use crate::auth::{AuthService, JwtConfig, PasswordError};
use aegis_core::{AppConfig, MemoryUserStore};
use std::sync::Arc;

/// Application state shared across handlers
///
/// Everything here is read-only after startup: the configuration, the
/// signing key, and the service (which owns the credential store).
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// Token signing configuration, loaded once at startup
    pub jwt: JwtConfig,
    /// Authentication service
    pub auth: AuthService,
}

impl AppState {
    /// Create new application state with config
    pub fn new(config: AppConfig) -> Result<Self, PasswordError> {
        let jwt = JwtConfig::from_env();
        let store = Arc::new(MemoryUserStore::new());
        let auth = AuthService::new(store, jwt.clone())?;

        Ok(Self { config, jwt, auth })
    }

    /// State for integration tests: default config, a fresh store, and
    /// lightweight hashing parameters so the suite stays fast.
    #[cfg(feature = "test-utils")]
    pub fn for_testing() -> Self {
        use crate::auth::PasswordConfig;

        let jwt = JwtConfig::default();
        let store = Arc::new(MemoryUserStore::new());
        let auth = AuthService::with_password_config(
            store,
            jwt.clone(),
            PasswordConfig {
                memory_cost: 4096,
                time_cost: 1,
                parallelism: 1,
                output_len: Some(32),
            },
        )
        .expect("test hashing parameters are valid");

        Self {
            config: AppConfig::default(),
            jwt,
            auth,
        }
    }
}
