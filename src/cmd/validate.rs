//! `correlation-id validate` — check a configuration file.
//!
//! Parses the config file and reports lints in either human-readable
//! text or machine-readable JSON. Lints are warnings: a file that parses
//! is valid.

use crate::cli::{ValidateArgs, ValidateFormat};
use crate::config::{parse_config_str, validation};
use crate::error::CorrelationError;

pub fn execute(args: &ValidateArgs) -> Result<(), CorrelationError> {
    let path = &args.config;

    if !path.exists() {
        return Err(CorrelationError::ConfigFileNotFound { path: path.clone() });
    }

    let content = std::fs::read_to_string(path)?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let config = parse_config_str(ext, &content, &path.display().to_string())?;
    let warnings = validation::validate(&config);

    match args.format {
        ValidateFormat::Text => {
            println!(
                "\u{2713} {}",
                validation::format_validation_report(&path.display().to_string(), &config)
            );
            if !warnings.is_empty() {
                eprintln!("\n{} warnings:", warnings.len());
                for warning in &warnings {
                    eprintln!("{warning}");
                }
            }
        }
        ValidateFormat::Json => {
            let json_warnings: Vec<serde_json::Value> = warnings
                .iter()
                .map(|w| {
                    serde_json::json!({
                        "field": w.field,
                        "message": w.message,
                        "suggestion": w.suggestion,
                    })
                })
                .collect();
            println!(
                "{}",
                serde_json::json!({
                    "valid": true,
                    "header": config.correlation.header(),
                    "warnings": json_warnings,
                })
            );
        }
    }

    Ok(())
}
