//! Response handling and upstream error mapping.
//!
//! # Responsibilities
//! - Stream the upstream response back to the client
//! - Strip hop-by-hop headers
//! - Map forwarding failures to gateway status codes
//!
//! # Design Decisions
//! - Status, headers and body are otherwise passed through unmodified
//! - Upstream timeouts result in 504 Gateway Timeout, other failures in 502

use axum::body::Body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::routing::director::DirectError;
use crate::security::headers::strip_hop_by_hop;

/// Failures on the per-request forwarding path.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The director could not build a valid upstream URI.
    #[error("failed to rewrite request: {0}")]
    Rewrite(#[from] DirectError),

    /// The upstream could not be reached or the exchange failed midway.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Rewrite(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::Upstream(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let message = match &self {
            ProxyError::Rewrite(_) => "Failed to route request",
            ProxyError::Upstream(_) => "Upstream request failed",
        };
        (self.status(), message).into_response()
    }
}

/// Convert an upstream response into the response sent to the client.
pub fn client_response(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    let mut headers = upstream.headers().clone();
    strip_hop_by_hop(&mut headers);

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_error_is_internal() {
        let err = ProxyError::Rewrite(DirectError::InvalidUri(
            axum::http::uri::PathAndQuery::try_from("bad path")
                .map(|_| ())
                .map_err(axum::http::Error::from)
                .unwrap_err(),
        ));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
