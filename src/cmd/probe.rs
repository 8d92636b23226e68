//! `correlation-id probe` — verify correlation against a running instance.
//!
//! Sends `GET /trace` with the correlation header set and reports the
//! trace identifier the server observed, and whether it matched.

use http::header::{HeaderName, HeaderValue};

use super::client;
use crate::cli::ProbeArgs;
use crate::echo::TraceResponse;
use crate::error::CorrelationError;

pub async fn execute(args: ProbeArgs) -> Result<(), CorrelationError> {
    let sent = args
        .id
        .clone()
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let name = HeaderName::from_bytes(args.header.as_bytes())
        .map_err(|_| CorrelationError::InvalidHeader(format!("bad name '{}'", args.header)))?;
    let value = HeaderValue::from_str(&sent)
        .map_err(|_| CorrelationError::InvalidHeader(format!("bad value '{sent}'")))?;

    let url = format!("{}/trace", args.url.trim_end_matches('/'));
    let (status, body) = client::get(&url, Some((name, value))).await?;

    if !status.is_success() {
        return Err(CorrelationError::ProbeFailed(status));
    }

    let observed = serde_json::from_slice::<TraceResponse>(&body)
        .map_err(|e| CorrelationError::HttpRequest {
            source: Box::new(e),
        })?
        .trace_identifier;
    let matched = observed == sent;

    if args.json {
        println!(
            "{}",
            serde_json::json!({
                "header": args.header,
                "sent": sent,
                "observed": observed,
                "matched": matched,
            })
        );
    } else if matched {
        println!("\u{2713} {} propagated ({})", args.header, args.url);
        println!("  trace identifier: {observed}");
    } else {
        println!("\u{2717} {} not applied ({})", args.header, args.url);
        println!("  sent:             {sent}");
        println!("  trace identifier: {observed}");
    }

    Ok(())
}
