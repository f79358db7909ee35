//! Shared test harness: a `BridgeState` wired over in-memory collaborators,
//! plus scripted doubles for failure injection.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

use async_trait::async_trait;
use parking_lot::Mutex;

use pushbridge::config::Config;
use pushbridge::error::BridgeError;
use pushbridge::secrets::{MemorySecretStore, SecretStore};
use pushbridge::store::{ConnectionRecord, ConnectionStore, MemoryConnectionStore};
use pushbridge::transport::{PushOutcome, PushTransport};
use pushbridge::BridgeState;

static INIT: Once = Once::new();

/// Install a test subscriber once so `RUST_LOG=debug cargo test` shows
/// bridge tracing.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

// ---------------------------------------------------------------------------
// Scripted transport
// ---------------------------------------------------------------------------

/// Transport double. Outcomes are scripted per connection id (anything
/// unscripted is delivered) and every push is recorded.
#[derive(Default)]
pub struct ScriptedTransport {
    outcomes: Mutex<HashMap<String, PushOutcome>>,
    pushes: Mutex<Vec<(String, String)>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(&self, id: &str, outcome: PushOutcome) {
        self.outcomes.lock().insert(id.to_string(), outcome);
    }

    /// Every `(connection id, payload)` pushed so far.
    pub fn pushes(&self) -> Vec<(String, String)> {
        self.pushes.lock().clone()
    }

    pub fn pushes_to(&self, id: &str) -> usize {
        self.pushes.lock().iter().filter(|(to, _)| to == id).count()
    }
}

#[async_trait]
impl PushTransport for ScriptedTransport {
    async fn push_to(&self, id: &str, payload: &str) -> PushOutcome {
        self.pushes
            .lock()
            .push((id.to_string(), payload.to_string()));
        self.outcomes
            .lock()
            .get(id)
            .cloned()
            .unwrap_or(PushOutcome::Delivered)
    }
}

// ---------------------------------------------------------------------------
// Failure-injecting doubles
// ---------------------------------------------------------------------------

/// Store double whose every operation fails as unreachable.
pub struct UnreachableStore;

#[async_trait]
impl ConnectionStore for UnreachableStore {
    async fn put(&self, _record: ConnectionRecord) -> Result<(), BridgeError> {
        Err(BridgeError::StoreUnavailable("store offline".to_string()))
    }

    async fn delete(&self, _id: &str) -> Result<(), BridgeError> {
        Err(BridgeError::StoreUnavailable("store offline".to_string()))
    }

    async fn scan_all_ids(&self) -> Result<Vec<String>, BridgeError> {
        Err(BridgeError::StoreUnavailable("store offline".to_string()))
    }
}

/// Secret store double that counts lookups.
pub struct CountingSecretStore {
    inner: MemorySecretStore,
    lookups: AtomicUsize,
}

impl CountingSecretStore {
    pub fn new(secret: &str) -> Self {
        Self {
            inner: MemorySecretStore::new(secret),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn unset() -> Self {
        Self {
            inner: MemorySecretStore::unset(),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecretStore for CountingSecretStore {
    async fn current_secret(&self) -> Result<String, BridgeError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.current_secret().await
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

pub const TEST_API_KEY: &str = "test-api-key";

pub struct TestBridge {
    pub state: BridgeState,
    pub transport: Arc<ScriptedTransport>,
}

/// A bridge over in-memory collaborators and the scripted transport.
pub fn bridge() -> TestBridge {
    init_tracing();
    let transport = Arc::new(ScriptedTransport::new());
    let state = BridgeState::new(
        Arc::new(MemoryConnectionStore::new()),
        Arc::new(MemorySecretStore::new(TEST_API_KEY)),
        transport.clone(),
        Config::default(),
    );
    TestBridge { state, transport }
}

/// A bridge whose registry store is unreachable.
pub fn bridge_with_unreachable_store() -> TestBridge {
    init_tracing();
    let transport = Arc::new(ScriptedTransport::new());
    let state = BridgeState::new(
        Arc::new(UnreachableStore),
        Arc::new(MemorySecretStore::new(TEST_API_KEY)),
        transport.clone(),
        Config::default(),
    );
    TestBridge { state, transport }
}
