//! Configuration for the correlation middleware.

use serde::{Deserialize, Serialize};

fn default_header() -> String {
    CorrelationIdOptions::DEFAULT_HEADER.to_string()
}

/// Options for [`CorrelationIdMiddleware`](super::CorrelationIdMiddleware).
///
/// Built once at startup and moved into the middleware, after which it is
/// only ever read. The header name is not validated: an empty or malformed
/// name simply never matches an inbound header.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CorrelationIdOptions {
    #[serde(default = "default_header")]
    header: String,
}

impl CorrelationIdOptions {
    pub const DEFAULT_HEADER: &'static str = "X-Correlation-Id";

    #[must_use]
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
        }
    }

    /// Name of the request header consulted for a correlation id.
    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }
}

impl Default for CorrelationIdOptions {
    fn default() -> Self {
        Self {
            header: default_header(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_x_correlation_id() {
        assert_eq!(CorrelationIdOptions::default().header(), "X-Correlation-Id");
    }

    #[test]
    fn accepts_any_header_name() {
        assert_eq!(CorrelationIdOptions::new("").header(), "");
        assert_eq!(
            CorrelationIdOptions::new("not a header").header(),
            "not a header"
        );
    }

    #[test]
    fn missing_header_field_uses_default() {
        let options: CorrelationIdOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, CorrelationIdOptions::default());
    }

    #[test]
    fn rejects_unknown_fields() {
        let result = serde_json::from_str::<CorrelationIdOptions>(r#"{"headr": "X-Id"}"#);
        assert!(result.is_err());
    }
}
