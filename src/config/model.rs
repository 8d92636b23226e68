//! Serde data structures for the service configuration file.
//!
//! Contains [`Config`] (the root) and [`ServerConfig`]. The correlation
//! section is [`CorrelationIdOptions`] itself. All types use
//! `deny_unknown_fields` for strict parsing.

use serde::{Deserialize, Serialize};

use crate::middleware::CorrelationIdOptions;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ECHO_DELAY_MS: u64 = 5;

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

const fn default_echo_delay_ms() -> u64 {
    DEFAULT_ECHO_DELAY_MS
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub correlation: CorrelationIdOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Delay before `GET /trace` answers, in milliseconds.
    #[serde(default = "default_echo_delay_ms")]
    pub echo_delay_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            echo_delay_ms: default_echo_delay_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.correlation.header(), "X-Correlation-Id");
    }

    #[test]
    fn partial_sections_fill_defaults() {
        let json = r#"{"server": {"port": 8080}, "correlation": {"header": "X-Req"}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.echo_delay_ms, 5);
        assert_eq!(config.correlation.header(), "X-Req");
    }

    #[test]
    fn unknown_top_level_field_is_rejected() {
        assert!(serde_json::from_str::<Config>(r#"{"routes": []}"#).is_err());
    }
}
