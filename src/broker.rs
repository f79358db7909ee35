//! Broadcast dispatcher: one inbound event fanned out to every registered
//! connection, with per-connection outcome classification.

use std::sync::Arc;

use futures_util::future;
use serde_json::Value;

use crate::error::{BridgeError, DeliveryFailure};
use crate::registry::ConnectionRegistry;
use crate::transport::{PushOutcome, PushTransport};

/// Summary of one completed broadcast, for logging and diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReceipt {
    /// Connections the event reached.
    pub delivered: usize,
    /// Connections pruned after the transport reported them gone.
    pub pruned: usize,
}

/// Per-connection delivery classification, after gone-pruning.
enum Delivery {
    Delivered,
    Pruned,
    Failed(DeliveryFailure),
}

/// Fans one event out to all registered connections.
#[derive(Clone)]
pub struct EventBroker {
    registry: ConnectionRegistry,
    transport: Arc<dyn PushTransport>,
}

impl EventBroker {
    pub fn new(registry: ConnectionRegistry, transport: Arc<dyn PushTransport>) -> Self {
        Self {
            registry,
            transport,
        }
    }

    /// Deliver `event` to every connection registered at the start of the
    /// call.
    ///
    /// Deliveries run concurrently and are all awaited before the broadcast
    /// concludes, so one slow peer delays but never hides another's
    /// outcome. Peers reported gone are pruned from the registry and do not
    /// fail the broadcast; any other delivery error fails the whole
    /// operation once every attempt has settled. If the registry snapshot
    /// itself cannot be taken there is nothing to deliver to and the
    /// broadcast aborts.
    pub async fn broadcast(&self, event: &Value) -> Result<BroadcastReceipt, BridgeError> {
        let ids = self.registry.list_all().await?;

        // Serialize once; every connection receives the same text.
        let payload = event.to_string();

        let attempts = ids.iter().map(|id| self.deliver(id, &payload));
        let outcomes = future::join_all(attempts).await;

        let mut receipt = BroadcastReceipt::default();
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                Delivery::Delivered => receipt.delivered += 1,
                Delivery::Pruned => receipt.pruned += 1,
                Delivery::Failed(failure) => failures.push(failure),
            }
        }

        if !failures.is_empty() {
            tracing::error!(
                failed = failures.len(),
                delivered = receipt.delivered,
                pruned = receipt.pruned,
                "broadcast completed with delivery failures"
            );
            return Err(BridgeError::DeliveryFailed { failures });
        }

        tracing::info!(
            delivered = receipt.delivered,
            pruned = receipt.pruned,
            "broadcast complete"
        );
        Ok(receipt)
    }

    /// One delivery attempt, with a gone peer absorbed into a registry
    /// prune.
    async fn deliver(&self, id: &str, payload: &str) -> Delivery {
        match self.transport.push_to(id, payload).await {
            PushOutcome::Delivered => Delivery::Delivered,
            PushOutcome::Gone => {
                tracing::warn!(connection_id = %id, "peer gone, pruning connection");
                // Best effort: an entry that survives a failed prune is
                // pruned again on the next broadcast.
                if let Err(err) = self.registry.remove(id).await {
                    tracing::warn!(connection_id = %id, %err, "failed to prune gone connection");
                }
                Delivery::Pruned
            }
            PushOutcome::Failed(reason) => Delivery::Failed(DeliveryFailure {
                connection_id: id.to_string(),
                reason,
            }),
        }
    }
}
