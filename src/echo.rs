//! `GET /trace` endpoint handler.
//!
//! Waits for the configured echo delay, standing in for real downstream
//! work, then reports the trace identifier the handler observed.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::middleware::TraceIdentifier;
use crate::server::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct TraceResponse {
    pub trace_identifier: String,
}

pub async fn trace_handler(
    State(state): State<Arc<AppState>>,
    trace_identifier: TraceIdentifier,
) -> Json<TraceResponse> {
    if !state.echo_delay.is_zero() {
        tokio::time::sleep(state.echo_delay).await;
    }

    tracing::info!(trace_identifier = %trace_identifier, "trace requested");

    Json(TraceResponse {
        trace_identifier: trace_identifier.into_inner(),
    })
}
