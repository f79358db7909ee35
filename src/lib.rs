pub mod broker;
pub mod config;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod registry;
pub mod secrets;
pub mod store;
pub mod transport;

use std::sync::Arc;

use broker::EventBroker;
use config::Config;
use gate::AccessGate;
use registry::ConnectionRegistry;
use secrets::SecretStore;
use store::ConnectionStore;
use transport::PushTransport;

/// Shared bridge state handed to every handler invocation.
///
/// The three external collaborators (connection store, secret store, push
/// transport) are constructed once per process and injected here, so tests
/// can substitute in-memory implementations for all of them.
#[derive(Clone)]
pub struct BridgeState {
    pub registry: ConnectionRegistry,
    pub gate: AccessGate,
    pub broker: EventBroker,
    pub config: Arc<Config>,
}

impl BridgeState {
    /// Wire the collaborators into a ready-to-use state.
    pub fn new(
        store: Arc<dyn ConnectionStore>,
        secrets: Arc<dyn SecretStore>,
        transport: Arc<dyn PushTransport>,
        config: Config,
    ) -> Self {
        let registry = ConnectionRegistry::new(store);
        Self {
            gate: AccessGate::new(secrets),
            broker: EventBroker::new(registry.clone(), transport),
            registry,
            config: Arc::new(config),
        }
    }
}
