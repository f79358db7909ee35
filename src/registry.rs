//! Connection registry: the single source of truth for who can currently
//! receive a push.

use std::sync::Arc;

use crate::error::BridgeError;
use crate::store::{ConnectionRecord, ConnectionStore};

/// Tracks currently-reachable connections over a [`ConnectionStore`].
///
/// An id is present exactly while its peer is believed reachable: added on
/// a successful open signal, removed on an explicit close or when a push
/// reports the peer permanently gone.
#[derive(Clone)]
pub struct ConnectionRegistry {
    store: Arc<dyn ConnectionStore>,
}

impl ConnectionRegistry {
    pub fn new(store: Arc<dyn ConnectionStore>) -> Self {
        Self { store }
    }

    /// Register a newly-opened connection. Adding an already-present id is
    /// a no-op, not an error.
    pub async fn add(&self, id: &str) -> Result<(), BridgeError> {
        self.store.put(ConnectionRecord::new(id)).await?;
        tracing::debug!(connection_id = %id, "connection registered");
        Ok(())
    }

    /// Drop a connection. Removing an absent id is a no-op; duplicate close
    /// and eviction signals are expected.
    pub async fn remove(&self, id: &str) -> Result<(), BridgeError> {
        self.store.delete(id).await?;
        tracing::debug!(connection_id = %id, "connection dropped");
        Ok(())
    }

    /// Snapshot of every registered connection id. Adds and removes that
    /// land while a broadcast is in flight are not reflected in its
    /// snapshot.
    pub async fn list_all(&self) -> Result<Vec<String>, BridgeError> {
        self.store.scan_all_ids().await
    }
}
