//! Correlation id propagation for axum services.
//!
//! A request that carries a correlation header (by default
//! `X-Correlation-Id`) has its per-request trace identifier replaced with
//! the header's value; every other request keeps the identifier the host
//! assigned. The crate ships the middleware and a small demo service that
//! exercises it.
//!
//! # Architecture
//!
//! - [`middleware`] -- The correlation middleware, its options, the
//!   ambient [`TraceIdentifier`](middleware::TraceIdentifier), and the
//!   router registration helper.
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (run, validate, health, probe).
//! - [`config`] -- Optional config file loading and lints.
//! - [`error`] -- Unified error types using `thiserror`.
//! - [`echo`] -- `GET /trace` handler reporting the observed trace identifier.
//! - [`health`] -- `GET /health` endpoint handler.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//! - [`server`] -- Axum server setup, shared application state, and
//!   graceful shutdown.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `yaml` | YAML config file support _(enabled by default)_ |
//! | `json` | JSON config file support |
//! | `toml` | TOML config file support |

#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod cmd;
pub mod config;
pub mod echo;
pub mod error;
pub mod health;
pub mod logging;
pub mod middleware;
pub mod server;
