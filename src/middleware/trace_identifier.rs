//! The ambient per-request trace identifier.
//!
//! Axum has no built-in request id, so the host side lives here:
//! [`TraceIdentifier`] is stored in request extensions,
//! [`assign_trace_identifier`] gives every request a fresh UUID v4 before
//! any other middleware sees it, and the [`TraceContext`] trait is the
//! narrow view of a request that the correlation middleware works against.

use std::convert::Infallible;
use std::fmt;

use axum::extract::{FromRequestParts, Request};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TraceIdentifier(String);

impl TraceIdentifier {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// A fresh host-assigned identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TraceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Request view consumed by the correlation middleware: read-only headers
/// plus a read/write trace identifier.
pub trait TraceContext {
    fn headers(&self) -> &HeaderMap;
    fn trace_identifier(&self) -> Option<&str>;
    fn set_trace_identifier(&mut self, id: String);
}

impl<B> TraceContext for axum::http::Request<B> {
    fn headers(&self) -> &HeaderMap {
        axum::http::Request::headers(self)
    }

    fn trace_identifier(&self) -> Option<&str> {
        self.extensions()
            .get::<TraceIdentifier>()
            .map(TraceIdentifier::as_str)
    }

    fn set_trace_identifier(&mut self, id: String) {
        self.extensions_mut().insert(TraceIdentifier(id));
    }
}

/// Host middleware: assigns a generated [`TraceIdentifier`] unless one is
/// already present. Install it outside the correlation middleware.
pub async fn assign_trace_identifier(mut request: Request, next: Next) -> Response {
    if request.extensions().get::<TraceIdentifier>().is_none() {
        request.extensions_mut().insert(TraceIdentifier::generate());
    }
    next.run(request).await
}

/// Extracts the current identifier. A request that never passed through
/// [`assign_trace_identifier`] gets one generated and stored on first use.
impl<S> FromRequestParts<S> for TraceIdentifier
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .extensions
            .get::<Self>()
            .cloned()
            .unwrap_or_else(|| {
                let id = Self::generate();
                parts.extensions.insert(id.clone());
                id
            });
        Ok(id)
    }
}
