use super::types::{ErrorResponse, MessageResponse, RelayRequest};
use crate::{
    Error, Result,
    backend::{BackendReply, TodoBackend},
    config::{FailureMode, RelayConfig},
};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{Instrument, Span, error, field, info, info_span};
use uuid::Uuid;

/// Body returned in `report` mode whenever the relay did not go through.
pub const REPORTED_ERROR_MESSAGE: &str = "There was an error";

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn TodoBackend>,
    pub relay: Arc<RelayConfig>,
}

impl AppState {
    pub fn new(backend: Arc<dyn TodoBackend>, relay: RelayConfig) -> Self {
        Self {
            backend,
            relay: Arc::new(relay),
        }
    }
}

/// Forwards the posted todo request to the backend and answers with the
/// configured success message. The backend's body never reaches the caller.
pub async fn relay(State(state): State<AppState>, body: Bytes) -> Response {
    let relay_id = Uuid::new_v4();
    let span = info_span!("relay", %relay_id, method = field::Empty);

    let outcome = relay_once(&state, &body).instrument(span).await;

    match (outcome, state.relay.failure_mode) {
        (Ok(_), _) => (
            StatusCode::OK,
            Json(MessageResponse::new(state.relay.success_message.as_str())),
        )
            .into_response(),
        (Err(e), FailureMode::Passthrough) => {
            error!("Relay {} failed: {}", relay_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Relay error: {}", e),
                }),
            )
                .into_response()
        }
        (Err(e), FailureMode::Report) => {
            error!("Relay {} failed: {}", relay_id, e);
            (
                StatusCode::BAD_REQUEST,
                Json(MessageResponse::new(REPORTED_ERROR_MESSAGE)),
            )
                .into_response()
        }
    }
}

async fn relay_once(state: &AppState, body: &[u8]) -> Result<BackendReply> {
    let request: RelayRequest = serde_json::from_slice(body)
        .map_err(|e| Error::invalid_request(format!("Body is not a relay request: {}", e)))?;

    Span::current().record("method", request.method.as_str());
    info!("Relaying {} request to todos backend", request.method);

    let reply = state
        .backend
        .forward(request.method, request.data.as_ref())
        .await?;

    info!(status = reply.status, body = %reply.body, "Todos backend responded");

    if state.relay.failure_mode == FailureMode::Report {
        if !reply.is_success() {
            return Err(Error::backend_response(reply.status, "non-success status"));
        }
        if !reply.has_truthy_body() {
            return Err(Error::backend_response(reply.status, "empty response"));
        }
    }

    Ok(reply)
}
