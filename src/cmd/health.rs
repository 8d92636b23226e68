//! `correlation-id health` — check the health of a running instance.
//!
//! Sends a `GET /health` request to the specified URL and displays
//! the response as formatted text or raw JSON.

use super::client;
use crate::cli::HealthArgs;
use crate::error::CorrelationError;
use crate::health::HealthResponse;

pub async fn execute(args: HealthArgs) -> Result<(), CorrelationError> {
    let url = format!("{}/health", args.url.trim_end_matches('/'));
    let (status, body) = client::get(&url, None).await?;

    if !status.is_success() {
        return Err(CorrelationError::HealthCheckFailed(status));
    }

    if args.json {
        println!("{}", String::from_utf8_lossy(&body));
        return Ok(());
    }

    match serde_json::from_slice::<HealthResponse>(&body) {
        Ok(health) => {
            println!("\u{2713} correlation-id is healthy ({})", args.url);
            println!("  version:            {}", health.version);
            println!("  uptime:             {}", format_uptime(health.uptime_seconds));
            println!("  correlation header: {}", health.correlation_header);
        }
        Err(e) => {
            eprintln!("Failed to parse health response: {e}");
            println!("{}", String::from_utf8_lossy(&body));
        }
    }

    Ok(())
}

fn format_uptime(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}
