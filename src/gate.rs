//! Access gate: shared-secret authorization for connection attempts.

use std::sync::Arc;

use crate::secrets::SecretStore;

/// Principal label attached to every allowed connection.
const PRINCIPAL: &str = "authenticated-user";

/// Context for one connection attempt.
#[derive(Debug, Clone)]
pub struct ConnectContext {
    /// Transport-assigned id for the attempting connection.
    pub connection_id: String,
}

impl ConnectContext {
    pub fn new(connection_id: impl Into<String>) -> Self {
        Self {
            connection_id: connection_id.into(),
        }
    }
}

/// What an allowed caller may do: receive pushes on exactly one connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grant {
    pub principal: String,
    /// The only connection the transport layer may push to under this
    /// decision.
    pub connection_id: String,
}

/// Outcome of one authorization check. Produced once per connection
/// attempt, never cached or persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision {
    Allow(Grant),
    Deny,
}

impl AuthDecision {
    pub fn is_allow(&self) -> bool {
        matches!(self, AuthDecision::Allow(_))
    }
}

/// Validates a credential presented at connection time against the shared
/// secret.
#[derive(Clone)]
pub struct AccessGate {
    secrets: Arc<dyn SecretStore>,
}

impl AccessGate {
    pub fn new(secrets: Arc<dyn SecretStore>) -> Self {
        Self { secrets }
    }

    /// Decide whether a connection attempt is admitted.
    ///
    /// A missing credential is rejected before any secret lookup. A failed
    /// lookup also denies: the gate fails closed.
    pub async fn authorize(&self, credential: Option<&str>, ctx: &ConnectContext) -> AuthDecision {
        let Some(presented) = credential else {
            tracing::debug!(connection_id = %ctx.connection_id, "no credential presented");
            return AuthDecision::Deny;
        };

        let expected = match self.secrets.current_secret().await {
            Ok(secret) => secret,
            Err(err) => {
                tracing::warn!(
                    connection_id = %ctx.connection_id,
                    %err,
                    "secret lookup failed, denying"
                );
                return AuthDecision::Deny;
            }
        };

        if presented != expected {
            tracing::debug!(connection_id = %ctx.connection_id, "credential mismatch");
            return AuthDecision::Deny;
        }

        AuthDecision::Allow(Grant {
            principal: PRINCIPAL.to_string(),
            connection_id: ctx.connection_id.clone(),
        })
    }
}
