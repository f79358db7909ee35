//! Boundary adapters invoked by the hosting environment: connection
//! lifecycle signals and the inbound event trigger.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use crate::BridgeState;

/// Status-plus-diagnostic result returned to the hosting environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalResponse {
    pub status: StatusCode,
    pub body: String,
}

impl SignalResponse {
    fn ok(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.into(),
        }
    }

    fn failure(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

impl IntoResponse for SignalResponse {
    fn into_response(self) -> Response {
        (self.status, self.body).into_response()
    }
}

/// Open signal: admit `connection_id` into the registry.
///
/// Authorization, when enabled, has already run upstream through
/// `AccessGate::authorize`. A failure here is a connection-establishment
/// failure; the transport layer is expected to reject the socket.
pub async fn handle_connect(state: &BridgeState, connection_id: &str) -> SignalResponse {
    match state.registry.add(connection_id).await {
        Ok(()) => SignalResponse::ok("Connected"),
        Err(err) => {
            tracing::error!(connection_id = %connection_id, %err, "connect failed");
            SignalResponse::failure(format!("Failed to connect: {err}"))
        }
    }
}

/// Close signal: drop `connection_id` from the registry.
///
/// A failure is surfaced but must not stop the transport from completing
/// the close.
pub async fn handle_disconnect(state: &BridgeState, connection_id: &str) -> SignalResponse {
    match state.registry.remove(connection_id).await {
        Ok(()) => SignalResponse::ok("Disconnected"),
        Err(err) => {
            tracing::error!(connection_id = %connection_id, %err, "disconnect failed");
            SignalResponse::failure(format!("Failed to disconnect: {err}"))
        }
    }
}

/// Inbound event trigger: broadcast `event` to every registered
/// connection.
///
/// Events arrive at least once; a duplicate event simply causes a
/// duplicate broadcast.
pub async fn handle_event(state: &BridgeState, event: &Value) -> SignalResponse {
    match state.broker.broadcast(event).await {
        Ok(_) => SignalResponse::ok("Data sent."),
        Err(err) => {
            tracing::error!(%err, "broadcast failed");
            SignalResponse::failure(format!("Failed to send data: {err}"))
        }
    }
}
