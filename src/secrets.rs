use async_trait::async_trait;
use parking_lot::Mutex;

use crate::config::Config;
use crate::error::BridgeError;

/// Source of the shared secret the access gate compares credentials
/// against.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetch the current secret. Fails with
    /// [`BridgeError::SecretUnavailable`] when the secret is unset or the
    /// store cannot be reached.
    async fn current_secret(&self) -> Result<String, BridgeError>;
}

// ---------------------------------------------------------------------------
// In-memory implementation
// ---------------------------------------------------------------------------

/// Holds the secret in process memory. An unset secret behaves like an
/// unreachable store: every lookup fails.
#[derive(Default)]
pub struct MemorySecretStore {
    secret: Mutex<Option<String>>,
}

impl MemorySecretStore {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Mutex::new(Some(secret.into())),
        }
    }

    /// A store with no secret configured.
    pub fn unset() -> Self {
        Self::default()
    }

    pub fn set(&self, secret: impl Into<String>) {
        *self.secret.lock() = Some(secret.into());
    }
}

#[async_trait]
impl SecretStore for MemorySecretStore {
    async fn current_secret(&self) -> Result<String, BridgeError> {
        self.secret
            .lock()
            .clone()
            .ok_or_else(|| BridgeError::SecretUnavailable("secret not set".to_string()))
    }
}

// ---------------------------------------------------------------------------
// Environment-backed implementation
// ---------------------------------------------------------------------------

/// Reads the secret from an environment variable on every lookup, so a
/// rotated value is picked up without a restart.
pub struct EnvSecretStore {
    var: String,
}

impl EnvSecretStore {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_key_var.clone())
    }
}

#[async_trait]
impl SecretStore for EnvSecretStore {
    async fn current_secret(&self) -> Result<String, BridgeError> {
        std::env::var(&self.var)
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| BridgeError::SecretUnavailable(format!("{} is unset", self.var)))
    }
}
