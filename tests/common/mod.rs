//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::Deserialize;
use tokio::net::TcpListener;

use gh_app_proxy::auth::{AuthError, AuthResult, TokenSource};
use gh_app_proxy::routing::{Director, Upstreams};
use gh_app_proxy::{HttpServer, Shutdown};

/// What a mock upstream saw.
#[derive(Debug, Deserialize)]
pub struct Echo {
    pub upstream: String,
    pub method: String,
    pub path: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl Echo {
    /// Decoded `Authorization: Basic ...` credentials, if any.
    pub fn basic_credentials(&self) -> Option<String> {
        let value = self.headers.get("authorization")?;
        let encoded = value.strip_prefix("Basic ")?;
        String::from_utf8(BASE64.decode(encoded).ok()?).ok()
    }
}

async fn echo(name: &'static str, request: Request<Body>) -> Response {
    let path = request.uri().path();

    if path == "/redirect" {
        return (
            StatusCode::FOUND,
            [(header::LOCATION, "https://github.com/login")],
        )
            .into_response();
    }
    if let Some(code) = path.strip_prefix("/status/") {
        let status = code.parse().ok().and_then(|c| StatusCode::from_u16(c).ok());
        return (status.unwrap_or(StatusCode::BAD_REQUEST), format!("status from {}", name))
            .into_response();
    }

    let method = request.method().to_string();
    let path = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_default();

    let mut headers = BTreeMap::new();
    for (key, value) in request.headers() {
        headers.insert(
            key.as_str().to_string(),
            value.to_str().unwrap_or_default().to_string(),
        );
    }

    let body = axum::body::to_bytes(request.into_body(), usize::MAX)
        .await
        .unwrap_or_default();

    Json(serde_json::json!({
        "upstream": name,
        "method": method,
        "path": path,
        "headers": headers,
        "body": String::from_utf8_lossy(&body),
    }))
    .into_response()
}

/// Start a mock upstream echoing each request back as JSON.
pub async fn start_upstream(name: &'static str) -> SocketAddr {
    let app = Router::new().fallback(move |request: Request<Body>| echo(name, request));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    addr
}

/// An address nothing is listening on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Start the proxy over plain HTTP, forwarding to the given upstreams.
pub async fn start_proxy(
    tokens: Arc<dyn TokenSource>,
    web: SocketAddr,
    api: SocketAddr,
) -> (SocketAddr, Shutdown) {
    let upstreams = Upstreams::new(
        format!("http://{}", web).parse().unwrap(),
        format!("http://{}", api).parse().unwrap(),
    );
    let server = HttpServer::new(Director::new(tokens, upstreams)).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Client that neither follows redirects nor honours proxy env vars.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

/// Always returns the same token.
pub struct StaticToken(pub &'static str);

#[async_trait]
impl TokenSource for StaticToken {
    async fn current_token(&self) -> AuthResult<String> {
        Ok(self.0.to_string())
    }
}

/// Always fails, as if the installation had been revoked.
pub struct RevokedInstallation;

#[async_trait]
impl TokenSource for RevokedInstallation {
    async fn current_token(&self) -> AuthResult<String> {
        Err(AuthError::Rejected {
            status: reqwest::StatusCode::NOT_FOUND,
            body: r#"{"message":"Not Found"}"#.into(),
        })
    }
}
