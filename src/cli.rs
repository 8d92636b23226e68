//! Command-line interface definitions using clap derive macros.
//!
//! Contains the top-level [`Cli`] parser, the [`Commands`] enum for
//! subcommands (run, validate, health, probe), and their associated
//! argument structs. Every `run` flag has an environment variable
//! equivalent for container deployments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::middleware::CorrelationIdOptions;

#[derive(Parser)]
#[command(
    name = "correlation-id",
    version,
    about = "HTTP service demonstrating correlation id propagation",
    propagate_version = true,
    after_help = "\x1b[1mQuick start:\x1b[0m\n  \
        correlation-id run                            Start on :3000\n  \
        correlation-id run --header X-Request-Id      Use a custom header\n  \
        correlation-id probe --id abc-123             Check a running instance"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the server
    Run(Box<RunArgs>),

    /// Validate a config file without starting
    Validate(ValidateArgs),

    /// Check health of a running instance
    Health(HealthArgs),

    /// Send a correlation id to a running instance and show what it observed
    Probe(ProbeArgs),
}

/// Flags left unset fall back to the config file, then to built-in defaults.
#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        correlation-id run                                  Auto-detect config\n  \
        correlation-id run -c correlation-id.yaml           Specific config file\n  \
        correlation-id run -p 8080 --pretty                 Local dev mode")]
pub struct RunArgs {
    /// Config file path (.yaml, .json, .toml)
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Listen port [default: 3000]
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Listen address [default: 0.0.0.0]
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Request header carrying the correlation id [default: X-Correlation-Id]
    #[arg(long, env = "CORRELATION_HEADER")]
    pub header: Option<String>,

    /// Delay before `GET /trace` responds, in milliseconds [default: 5]
    #[arg(long, env = "ECHO_DELAY_MS")]
    pub echo_delay_ms: Option<u64>,

    // -- Logging --
    /// Log level
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Force pretty (human-readable) log output
    #[arg(long)]
    pub pretty: bool,

    /// Force JSON log output (overrides TTY detection)
    #[arg(long, conflicts_with = "pretty")]
    pub json: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Config file to validate
    #[arg(default_value = "correlation-id.yaml")]
    pub config: PathBuf,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: ValidateFormat,
}

#[derive(Args)]
pub struct HealthArgs {
    /// URL of the running instance
    #[arg(default_value = "http://localhost:3000")]
    pub url: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ProbeArgs {
    /// URL of the running instance
    #[arg(default_value = "http://localhost:3000")]
    pub url: String,

    /// Correlation id to send (a random UUID when omitted)
    #[arg(long)]
    pub id: Option<String>,

    /// Header to send the id in
    #[arg(long, default_value = CorrelationIdOptions::DEFAULT_HEADER)]
    pub header: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ValidateFormat {
    Text,
    Json,
}
