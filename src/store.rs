use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::error::BridgeError;

/// Durable record for one open connection.
///
/// `connected_at` is informational only; delivery decisions are made from
/// the id alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub id: String,
    pub connected_at: DateTime<Utc>,
}

impl ConnectionRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            connected_at: Utc::now(),
        }
    }
}

/// Abstraction over the persistent store backing the connection registry.
///
/// Backed by an external key-value service in production and by
/// [`MemoryConnectionStore`] in tests and single-process deployments.
/// Implementations must provide per-key atomic put/delete; no cross-key
/// transactions are assumed.
#[async_trait]
pub trait ConnectionStore: Send + Sync {
    /// Store a record under its id. Re-storing a present id must leave the
    /// store consistent; callers treat it as a no-op.
    async fn put(&self, record: ConnectionRecord) -> Result<(), BridgeError>;

    /// Delete the record for `id` if present.
    async fn delete(&self, id: &str) -> Result<(), BridgeError>;

    /// Scan all stored connection ids. The result is a point-in-time
    /// snapshot; concurrent mutations may or may not be reflected.
    async fn scan_all_ids(&self) -> Result<Vec<String>, BridgeError>;
}

// ---------------------------------------------------------------------------
// In-memory implementation (tests / single-process deployments)
// ---------------------------------------------------------------------------

/// `DashMap`-backed store: per-key atomicity without a global lock.
#[derive(Default)]
pub struct MemoryConnectionStore {
    records: DashMap<String, ConnectionRecord>,
}

impl MemoryConnectionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionStore for MemoryConnectionStore {
    async fn put(&self, record: ConnectionRecord) -> Result<(), BridgeError> {
        // Keep the original connected_at when the same id is re-announced.
        self.records.entry(record.id.clone()).or_insert(record);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), BridgeError> {
        self.records.remove(id);
        Ok(())
    }

    async fn scan_all_ids(&self) -> Result<Vec<String>, BridgeError> {
        Ok(self.records.iter().map(|e| e.key().clone()).collect())
    }
}
