//! Request director.
//!
//! # Responsibilities
//! - Attach `Authorization: Basic base64("x-access-token:<token>")`
//! - Drop X-Forwarded-For
//! - Rewrite scheme, host, path and Host header for the chosen upstream
//!
//! # Design Decisions
//! - Auth fails open: without a token the request is still forwarded, but any
//!   client-supplied Authorization is removed first
//! - Query strings are carried over untouched

use std::sync::Arc;

use axum::http::header::{AUTHORIZATION, HOST};
use axum::http::uri::PathAndQuery;
use axum::http::{HeaderValue, Request, Uri};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::auth::TokenSource;
use crate::routing::matcher::classify;
use crate::routing::upstream::{Upstream, Upstreams};
use crate::security::headers::scrub_forwarded_for;

/// Basic-auth username GitHub accepts alongside an installation token.
pub const TOKEN_USERNAME: &str = "x-access-token";

/// Error rewriting a request.
#[derive(Debug, thiserror::Error)]
pub enum DirectError {
    #[error("rewritten URI is invalid: {0}")]
    InvalidUri(#[from] axum::http::Error),
}

/// Rewrites inbound requests so they can be sent to the real upstream.
#[derive(Clone)]
pub struct Director {
    tokens: Arc<dyn TokenSource>,
    upstreams: Upstreams,
}

impl Director {
    pub fn new(tokens: Arc<dyn TokenSource>, upstreams: Upstreams) -> Self {
        Self { tokens, upstreams }
    }

    /// Prepare `req` for forwarding and return the upstream it now targets.
    pub async fn direct<B>(&self, req: &mut Request<B>) -> Result<Upstream, DirectError> {
        match self.tokens.current_token().await {
            Ok(token) => match basic_auth_value(&token) {
                Some(value) => {
                    req.headers_mut().insert(AUTHORIZATION, value);
                }
                None => {
                    tracing::warn!("Installation token is not a valid header value");
                    req.headers_mut().remove(AUTHORIZATION);
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "Failed to get installation token, forwarding without credentials");
                req.headers_mut().remove(AUTHORIZATION);
            }
        }

        scrub_forwarded_for(req.headers_mut());

        self.rewrite_target(req)
    }

    fn rewrite_target<B>(&self, req: &mut Request<B>) -> Result<Upstream, DirectError> {
        let classification = classify(req.uri().path());
        let upstream = classification.upstream;
        let origin = self.upstreams.origin(upstream);

        let path_and_query = match req.uri().query() {
            Some(query) => format!("{}?{}", classification.path, query),
            None => classification.path.into_owned(),
        };
        let path_and_query = PathAndQuery::try_from(path_and_query).map_err(axum::http::Error::from)?;

        let uri = Uri::builder()
            .scheme(origin.scheme().clone())
            .authority(origin.authority().clone())
            .path_and_query(path_and_query)
            .build()?;

        let host = HeaderValue::from_str(origin.authority().as_str())
            .map_err(axum::http::Error::from)?;

        *req.uri_mut() = uri;
        req.headers_mut().insert(HOST, host);

        Ok(upstream)
    }
}

/// `Basic base64("x-access-token:<token>")`, marked sensitive.
fn basic_auth_value(token: &str) -> Option<HeaderValue> {
    let encoded = BASE64.encode(format!("{}:{}", TOKEN_USERNAME, token));
    let mut value = HeaderValue::from_str(&format!("Basic {}", encoded)).ok()?;
    value.set_sensitive(true);
    Some(value)
}
