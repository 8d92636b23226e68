//! Minimal HTTP GET helper shared by the `health` and `probe` subcommands.

use bytes::Bytes;
use http_body_util::BodyExt;
use http::header::{HeaderName, HeaderValue};
use http::StatusCode;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use crate::error::CorrelationError;

const REQUEST_TIMEOUT_SECS: u64 = 10;

pub async fn get(
    url: &str,
    header: Option<(HeaderName, HeaderValue)>,
) -> Result<(StatusCode, Bytes), CorrelationError> {
    let uri: hyper::Uri =
        url.parse().map_err(
            |e: hyper::http::uri::InvalidUri| CorrelationError::UriParse {
                source: Box::new(e),
            },
        )?;

    let connector = hyper_util::client::legacy::connect::HttpConnector::new();
    let client = Client::builder(TokioExecutor::new()).build(connector);

    let mut builder = hyper::Request::builder().uri(uri);
    if let Some((name, value)) = header {
        builder = builder.header(name, value);
    }
    let req = builder
        .body(http_body_util::Full::new(Bytes::new()))
        .map_err(|e| CorrelationError::HttpRequest {
            source: Box::new(e),
        })?;

    let response = tokio::time::timeout(
        std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS),
        client.request(req),
    )
    .await
    .map_err(|_| CorrelationError::HttpRequest {
        source: format!("request to {url} timed out after {REQUEST_TIMEOUT_SECS}s").into(),
    })?
    .map_err(|e| CorrelationError::HttpRequest {
        source: Box::new(e),
    })?;

    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .map_err(|e| CorrelationError::HttpRequest {
            source: Box::new(e),
        })?
        .to_bytes();

    Ok((status, body))
}
