//! `correlation-id run` — start the server.
//!
//! Loads the optional config file, applies CLI / environment overrides,
//! and serves the Axum router until SIGTERM or Ctrl+C.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::cli::RunArgs;
use crate::config::model::Config;
use crate::config::{self, validation};
use crate::error::CorrelationError;
use crate::logging;
use crate::middleware::CorrelationIdOptions;
use crate::server::{self, AppState};

pub async fn execute(args: RunArgs) -> Result<(), CorrelationError> {
    let log_format = logging::resolve_format(args.pretty, args.json);
    logging::init(&args.log_level, log_format);

    let file_config = match config::resolve_config_path(args.config.as_deref()).await {
        Some(path) => {
            let config = config::load(&path).await?;
            tracing::info!(path = %path.display(), "loaded config file");
            config
        }
        None => Config::default(),
    };
    let config = apply_overrides(file_config, &args);

    for warning in validation::validate(&config) {
        tracing::warn!(
            field = %warning.field,
            suggestion = warning.suggestion.as_deref().unwrap_or(""),
            "{}",
            warning.message
        );
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let header = config.correlation.header().to_string();

    let state = Arc::new(AppState::new(
        config.correlation,
        Duration::from_millis(config.server.echo_delay_ms),
    ));
    let router = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        addr = %addr,
        header = %header,
        "correlation-id started"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    tracing::info!("correlation-id stopped");
    Ok(())
}

/// Explicit flags (or their environment variables) win over the file.
fn apply_overrides(mut config: Config, args: &RunArgs) -> Config {
    if let Some(ref host) = args.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(delay) = args.echo_delay_ms {
        config.server.echo_delay_ms = delay;
    }
    if let Some(ref header) = args.header {
        config.correlation = CorrelationIdOptions::new(header.clone());
    }
    config
}
