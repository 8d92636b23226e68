//! Axum server setup, shared application state, and graceful shutdown.
//!
//! Contains [`AppState`] (the `Arc`-shared state holding the correlation
//! options, echo delay, and uptime), [`build_router`] for constructing the
//! Axum router with its middleware stack, and [`shutdown_signal`] for
//! SIGTERM / Ctrl+C handling.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::Request;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::echo::trace_handler;
use crate::health::health_handler;
use crate::middleware::{
    assign_trace_identifier, CorrelationIdOptions, CorrelationIdRouterExt, TraceIdentifier,
};

#[derive(Debug)]
pub struct AppState {
    pub correlation: CorrelationIdOptions,
    pub echo_delay: Duration,
    pub start_time: Instant,
}

impl AppState {
    #[must_use]
    pub fn new(correlation: CorrelationIdOptions, echo_delay: Duration) -> Self {
        Self {
            correlation,
            echo_delay,
            start_time: Instant::now(),
        }
    }
}

fn make_request_span(request: &Request) -> tracing::Span {
    let trace_identifier = request
        .extensions()
        .get::<TraceIdentifier>()
        .map_or("-", TraceIdentifier::as_str);

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        trace_identifier = %trace_identifier,
    )
}

/// Layers run outermost first: the host id is assigned, the correlation
/// header may replace it, and only then is the request span opened so it
/// records the final identifier.
pub fn build_router(state: Arc<AppState>) -> Router {
    let correlation = state.correlation.clone();

    Router::new()
        .route("/health", get(health_handler))
        .route("/trace", get(trace_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .use_correlation_id(correlation)
        .layer(axum::middleware::from_fn(assign_trace_identifier))
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C"),
        () = terminate => tracing::info!("received SIGTERM"),
    }
}
