//! Config lints.
//!
//! [`validate`] never rejects a config: the middleware accepts any header
//! name. It reports settings that silently disable correlation or look
//! like mistakes, so `validate` and `run` can surface them.

use axum::http::HeaderName;

use super::model::Config;
use crate::error::ConfigWarning;
use crate::middleware::CorrelationIdOptions;

pub fn validate(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();
    let header = config.correlation.header();

    if header.is_empty() {
        warnings.push(ConfigWarning {
            field: "correlation.header".into(),
            message: "header name is empty, correlation ids will never be applied".into(),
            suggestion: Some(format!(
                "remove the field to use '{}'",
                CorrelationIdOptions::DEFAULT_HEADER
            )),
        });
    } else if HeaderName::from_bytes(header.as_bytes()).is_err() {
        let trimmed = header.trim();
        let fixable = trimmed != header && HeaderName::from_bytes(trimmed.as_bytes()).is_ok();
        warnings.push(ConfigWarning {
            field: "correlation.header".into(),
            message: format!("'{header}' is not a valid HTTP header name and will never match"),
            suggestion: fixable.then(|| format!("did you mean '{trimmed}'?")),
        });
    }

    if config.server.port == 0 {
        warnings.push(ConfigWarning {
            field: "server.port".into(),
            message: "port 0 binds a random ephemeral port".into(),
            suggestion: None,
        });
    }

    warnings
}

pub fn format_validation_report(path: &str, config: &Config) -> String {
    let lines = [
        format!("{path} is valid"),
        format!("  listen:             {}:{}", config.server.host, config.server.port),
        format!("  correlation header: {}", config.correlation.header()),
        format!("  echo delay:         {}ms", config.server.echo_delay_ms),
    ];
    lines.join("\n")
}
