//! Replaces the ambient trace identifier with an inbound correlation header.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderName};
use axum::middleware::Next;
use axum::response::Response;
use axum::Router;

use super::options::CorrelationIdOptions;
use super::trace_identifier::TraceContext;

/// Per-application middleware state: the options plus the header name
/// parsed once up front.
#[derive(Debug)]
pub struct CorrelationIdMiddleware {
    options: CorrelationIdOptions,
    header_name: Option<HeaderName>,
}

impl CorrelationIdMiddleware {
    #[must_use]
    pub fn new(options: CorrelationIdOptions) -> Self {
        let header_name = HeaderName::from_bytes(options.header().as_bytes()).ok();
        if header_name.is_none() {
            tracing::debug!(
                header = %options.header(),
                "correlation header is not a valid HTTP header name and will never match"
            );
        }
        Self {
            options,
            header_name,
        }
    }

    #[must_use]
    pub const fn options(&self) -> &CorrelationIdOptions {
        &self.options
    }

    /// Overwrite the trace identifier of `context` with the configured
    /// header's value. Returns whether the identifier was replaced.
    ///
    /// A header that is missing or carries only empty values leaves the
    /// identifier untouched. Repeated headers are joined with `,`, skipping
    /// empty ones.
    pub fn apply<C>(&self, context: &mut C) -> bool
    where
        C: TraceContext + ?Sized,
    {
        let Some(name) = &self.header_name else {
            return false;
        };

        let Some(correlation_id) = combined_value(context.headers(), name) else {
            tracing::trace!(
                header = %self.options.header(),
                trace_identifier = context.trace_identifier().unwrap_or("-"),
                "no correlation header, keeping trace identifier"
            );
            return false;
        };

        tracing::debug!(
            header = %self.options.header(),
            correlation_id = %correlation_id,
            previous = context.trace_identifier().unwrap_or("-"),
            "applying correlation id"
        );
        context.set_trace_identifier(correlation_id);
        true
    }
}

fn combined_value(headers: &HeaderMap, name: &HeaderName) -> Option<String> {
    let mut values = headers
        .get_all(name)
        .iter()
        .filter(|v| !v.as_bytes().is_empty())
        .map(|v| String::from_utf8_lossy(v.as_bytes()));

    let first = values.next()?.into_owned();
    Some(values.fold(first, |mut acc, v| {
        acc.push(',');
        acc.push_str(&v);
        acc
    }))
}

pub async fn correlation_id_middleware(
    State(middleware): State<Arc<CorrelationIdMiddleware>>,
    mut request: Request,
    next: Next,
) -> Response {
    middleware.apply(&mut request);
    next.run(request).await
}

/// Installs [`correlation_id_middleware`] on a router.
///
/// Axum layers wrap everything added before them, so call this after the
/// routes it should cover and before
/// [`assign_trace_identifier`](super::assign_trace_identifier).
pub trait CorrelationIdRouterExt {
    #[must_use]
    fn use_correlation_id(self, options: CorrelationIdOptions) -> Self;
}

impl<S> CorrelationIdRouterExt for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn use_correlation_id(self, options: CorrelationIdOptions) -> Self {
        use_correlation_id(self, options)
    }
}

pub fn use_correlation_id<S>(router: Router<S>, options: CorrelationIdOptions) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let middleware = Arc::new(CorrelationIdMiddleware::new(options));
    router.layer(axum::middleware::from_fn_with_state(
        middleware,
        correlation_id_middleware,
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::middleware::trace_identifier::{assign_trace_identifier, TraceIdentifier};
    use axum::body::Body;
    use axum::routing::get;
    use tower::ServiceExt;

    const EXPECTED: &str = "{BEBC13D6-7AD0-4CCF-9D86-9B3697A64EAB}";

    fn request_with(headers: &[(&str, &str)]) -> axum::http::Request<()> {
        let mut builder = axum::http::Request::builder();
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let mut request = builder.body(()).unwrap();
        request.set_trace_identifier("host-assigned".into());
        request
    }

    fn app(options: CorrelationIdOptions) -> Router {
        Router::new()
            .route("/", get(|id: TraceIdentifier| async move { id.into_inner() }))
            .use_correlation_id(options)
            .layer(axum::middleware::from_fn(assign_trace_identifier))
    }

    async fn observed_id(app: Router, headers: &[(&str, &str)]) -> String {
        let mut builder = axum::http::Request::builder().uri("/");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let response = app
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn applies_configured_header() {
        let middleware = CorrelationIdMiddleware::new(CorrelationIdOptions::default());
        let mut request = request_with(&[("X-Correlation-Id", EXPECTED)]);

        assert!(middleware.apply(&mut request));
        assert_eq!(request.trace_identifier(), Some(EXPECTED));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let options = CorrelationIdOptions::new("x-CORRELATION-id");
        let middleware = CorrelationIdMiddleware::new(options);
        let mut request = request_with(&[("X-Correlation-ID", "abc")]);

        assert!(middleware.apply(&mut request));
        assert_eq!(request.trace_identifier(), Some("abc"));
    }

    #[test]
    fn missing_header_keeps_identifier() {
        let middleware = CorrelationIdMiddleware::new(CorrelationIdOptions::default());
        let mut request = request_with(&[("X-Custom-Correlation-Id", EXPECTED)]);

        assert!(!middleware.apply(&mut request));
        assert_eq!(request.trace_identifier(), Some("host-assigned"));
    }

    #[test]
    fn empty_value_is_treated_as_absent() {
        let middleware = CorrelationIdMiddleware::new(CorrelationIdOptions::default());
        let mut request = request_with(&[("X-Correlation-Id", "")]);

        assert!(!middleware.apply(&mut request));
        assert_eq!(request.trace_identifier(), Some("host-assigned"));
    }

    #[test]
    fn repeated_header_values_are_joined() {
        let middleware = CorrelationIdMiddleware::new(CorrelationIdOptions::default());
        let mut request = request_with(&[("X-Correlation-Id", "a"), ("X-Correlation-Id", "b")]);

        assert!(middleware.apply(&mut request));
        assert_eq!(request.trace_identifier(), Some("a,b"));
    }

    #[test]
    fn repeated_empty_values_are_treated_as_absent() {
        let middleware = CorrelationIdMiddleware::new(CorrelationIdOptions::default());
        let mut request = request_with(&[("X-Correlation-Id", ""), ("X-Correlation-Id", "")]);

        assert!(!middleware.apply(&mut request));
        assert_eq!(request.trace_identifier(), Some("host-assigned"));
    }

    #[test]
    fn empty_values_are_skipped_when_joining() {
        let middleware = CorrelationIdMiddleware::new(CorrelationIdOptions::default());
        let mut request = request_with(&[("X-Correlation-Id", "a"), ("X-Correlation-Id", "")]);

        assert!(middleware.apply(&mut request));
        assert_eq!(request.trace_identifier(), Some("a"));

        let mut request = request_with(&[("X-Correlation-Id", ""), ("X-Correlation-Id", "b")]);
        assert!(middleware.apply(&mut request));
        assert_eq!(request.trace_identifier(), Some("b"));
    }

    #[test]
    fn non_utf8_value_is_accepted() {
        let middleware = CorrelationIdMiddleware::new(CorrelationIdOptions::default());
        let mut request = request_with(&[]);
        request.headers_mut().insert(
            "x-correlation-id",
            axum::http::HeaderValue::from_bytes(b"id-\xff").unwrap(),
        );

        assert!(middleware.apply(&mut request));
        assert_eq!(request.trace_identifier(), Some("id-\u{fffd}"));
    }

    #[test]
    fn invalid_header_name_never_matches() {
        for name in ["", "not a header", "bad\nname"] {
            let middleware = CorrelationIdMiddleware::new(CorrelationIdOptions::new(name));
            let mut request = request_with(&[("X-Correlation-Id", EXPECTED)]);

            assert!(!middleware.apply(&mut request));
            assert_eq!(request.trace_identifier(), Some("host-assigned"));
        }
    }

    #[test]
    fn same_input_yields_same_identifier() {
        let middleware = CorrelationIdMiddleware::new(CorrelationIdOptions::default());
        let mut first = request_with(&[("X-Correlation-Id", EXPECTED)]);
        let mut second = request_with(&[("X-Correlation-Id", EXPECTED)]);

        middleware.apply(&mut first);
        middleware.apply(&mut second);
        assert_eq!(first.trace_identifier(), second.trace_identifier());
    }

    #[tokio::test]
    async fn downstream_observes_header_value() {
        let app = app(CorrelationIdOptions::default());
        let id = observed_id(app, &[("X-Correlation-Id", EXPECTED)]).await;
        assert_eq!(id, EXPECTED);
    }

    #[tokio::test]
    async fn downstream_observes_host_identifier_without_header() {
        let id = observed_id(app(CorrelationIdOptions::default()), &[]).await;
        assert!(uuid::Uuid::parse_str(&id).is_ok());
    }

    #[tokio::test]
    async fn custom_header_replaces_default() {
        let options = CorrelationIdOptions::new("X-SomeOtherHeader");

        let id = observed_id(app(options.clone()), &[("X-SomeOtherHeader", EXPECTED)]).await;
        assert_eq!(id, EXPECTED);

        let id = observed_id(app(options), &[("X-Correlation-Id", EXPECTED)]).await;
        assert_ne!(id, EXPECTED);
    }

    #[tokio::test]
    async fn next_runs_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let app = Router::new()
            .route(
                "/",
                get(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    async { "ok" }
                }),
            )
            .use_correlation_id(CorrelationIdOptions::default());

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/")
                    .header("X-Correlation-Id", EXPECTED)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), axum::http::StatusCode::OK);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn response_is_passed_through_unmodified() {
        let app = Router::new()
            .route(
                "/",
                get(|| async { ([("x-upstream", "yes")], axum::http::StatusCode::ACCEPTED) }),
            )
            .use_correlation_id(CorrelationIdOptions::default());

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/")
                    .header("X-Correlation-Id", EXPECTED)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), axum::http::StatusCode::ACCEPTED);
        assert_eq!(response.headers().get("x-upstream").unwrap(), "yes");
        assert!(response.headers().get("x-correlation-id").is_none());
    }
}
