//! Push transport abstraction and an in-process reference implementation.

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::mpsc;

/// Outcome of one push attempt, as a closed set the broker matches over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    /// The payload reached the peer.
    Delivered,
    /// The peer is permanently unreachable and its registry entry should
    /// be pruned. A transport-level timeout is not Gone.
    Gone,
    /// Any other delivery error. The registry entry is left alone; the
    /// attempt may succeed on a later broadcast.
    Failed(String),
}

/// Pushes a serialized event to one named connection.
#[async_trait]
pub trait PushTransport: Send + Sync {
    async fn push_to(&self, id: &str, payload: &str) -> PushOutcome;
}

// ---------------------------------------------------------------------------
// In-process implementation (tests / single-process deployments)
// ---------------------------------------------------------------------------

/// Channel-backed transport for single-process hosting environments.
///
/// Each open connection hands its sender half to [`LocalTransport::attach`];
/// the hosting environment forwards the receiver to the socket. A dropped
/// receiver reads as a gone peer on the next push.
#[derive(Default)]
pub struct LocalTransport {
    peers: DashMap<String, mpsc::UnboundedSender<String>>,
}

impl LocalTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the sending half for a connection id and return the
    /// receiving half.
    pub fn attach(&self, id: impl Into<String>) -> mpsc::UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.peers.insert(id.into(), tx);
        rx
    }

    /// Forget a connection id, e.g. after the socket closes.
    pub fn detach(&self, id: &str) {
        self.peers.remove(id);
    }
}

#[async_trait]
impl PushTransport for LocalTransport {
    async fn push_to(&self, id: &str, payload: &str) -> PushOutcome {
        let Some(peer) = self.peers.get(id) else {
            return PushOutcome::Gone;
        };
        match peer.send(payload.to_string()) {
            Ok(()) => PushOutcome::Delivered,
            // The receiving half is dropped once the socket goes away.
            Err(_) => PushOutcome::Gone,
        }
    }
}
