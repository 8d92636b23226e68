//! Correlation id propagation for axum.
//!
//! [`assign_trace_identifier`] gives every request a host-generated
//! [`TraceIdentifier`]; [`correlation_id_middleware`] then replaces it with
//! the value of a configurable inbound header when one is sent. Register
//! with [`CorrelationIdRouterExt::use_correlation_id`].

pub mod correlation;
pub mod options;
pub mod trace_identifier;

pub use correlation::{
    correlation_id_middleware, use_correlation_id, CorrelationIdMiddleware,
    CorrelationIdRouterExt,
};
pub use options::CorrelationIdOptions;
pub use trace_identifier::{assign_trace_identifier, TraceContext, TraceIdentifier};
