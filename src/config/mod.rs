//! Configuration loading and linting.
//!
//! A config file is optional. [`resolve_config_path`] picks an explicit
//! path or auto-detects one in the working directory, [`load`] reads and
//! parses it, and [`parse_config_str`] dispatches on the file extension to
//! the enabled format backends. CLI flags are merged on top in
//! [`cmd::run`](crate::cmd::run).

pub mod model;
pub mod validation;

use std::path::{Path, PathBuf};

use crate::error::CorrelationError;
use model::Config;

pub const CANDIDATES: &[&str] = &[
    "correlation-id.yaml",
    "correlation-id.yml",
    "correlation-id.json",
    "correlation-id.toml",
];

/// Parse a config string based on file extension.
pub fn parse_config_str(
    ext: &str,
    content: &str,
    path_display: &str,
) -> Result<Config, CorrelationError> {
    match ext {
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => serde_yml::from_str(content).map_err(|e| CorrelationError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        #[cfg(feature = "json")]
        "json" => serde_json::from_str(content).map_err(|e| CorrelationError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        #[cfg(feature = "toml")]
        "toml" => toml::from_str(content).map_err(|e| CorrelationError::ConfigParse {
            path: path_display.to_string(),
            source: Box::new(e),
        }),

        other => Err(CorrelationError::UnsupportedFormat(other.to_string())),
    }
}

/// The explicit path if given, otherwise the first of [`CANDIDATES`]
/// present in the working directory.
pub async fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    for name in CANDIDATES {
        let path = PathBuf::from(name);
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tracing::info!(path = %path.display(), "auto-detected config file");
            return Some(path);
        }
    }

    None
}

pub async fn load(path: &Path) -> Result<Config, CorrelationError> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CorrelationError::ConfigFileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            CorrelationError::Io(e)
        }
    })?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    parse_config_str(ext, &content, &path.display().to_string())
}
