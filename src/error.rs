use thiserror::Error;

/// Errors surfaced at the bridge boundary.
///
/// There is no `Gone` variant: permanent peer unreachability is an expected
/// delivery outcome (`PushOutcome::Gone`) that the broker absorbs into a
/// registry prune instead of reporting as a failure.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The registry's backing store could not be reached.
    #[error("connection store unavailable: {0}")]
    StoreUnavailable(String),

    /// The shared secret could not be retrieved. The access gate converts
    /// this into a deny; it is never allowed to look like an admission.
    #[error("secret store unavailable: {0}")]
    SecretUnavailable(String),

    /// One or more delivery attempts in a broadcast failed transiently.
    #[error("delivery failed for {} connection(s): {}", .failures.len(), summarize(.failures))]
    DeliveryFailed { failures: Vec<DeliveryFailure> },
}

/// Diagnostic detail for a single failed delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryFailure {
    pub connection_id: String,
    pub reason: String,
}

fn summarize(failures: &[DeliveryFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{}: {}", f.connection_id, f.reason))
        .collect::<Vec<_>>()
        .join("; ")
}
