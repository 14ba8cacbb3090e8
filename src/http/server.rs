//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router routing every path and method to the proxy handler
//! - Wire up middleware (tracing)
//! - Serve over TLS (production) or plain TCP (tests)
//! - Dispatch requests through the director and forward them upstream
//! - Observability (metrics, structured logs)

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use axum_server::tls_rustls::RustlsConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::http::request::upstream_request;
use crate::http::response::{client_response, ProxyError};
use crate::observability::metrics;
use crate::routing::Director;

/// How long in-flight requests may drain after shutdown is signalled.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub director: Arc<Director>,
    pub client: reqwest::Client,
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server forwarding through a default upstream client.
    pub fn new(director: Director) -> Result<Self, reqwest::Error> {
        let client = build_upstream_client()?;
        Ok(Self::with_client(director, client))
    }

    /// Create a server using the given upstream client.
    pub fn with_client(director: Director, client: reqwest::Client) -> Self {
        let state = AppState {
            director: Arc::new(director),
            client,
        };

        Self {
            router: Self::build_router(state),
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// The fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve plain HTTP on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Serve HTTPS on `addr` until `shutdown` fires.
    pub async fn run_tls(
        self,
        addr: SocketAddr,
        tls: RustlsConfig,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let handle = axum_server::Handle::new();

        let shutdown_handle = handle.clone();
        tokio::spawn(async move {
            let _ = shutdown.recv().await;
            tracing::info!("Draining in-flight requests");
            shutdown_handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
        });

        tracing::info!(address = %addr, "HTTPS server starting");

        axum_server::bind_rustls(addr, tls)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }
}

/// Build the client used to reach the upstream origins.
///
/// Redirects are returned to the caller rather than followed, and TLS below
/// 1.2 is refused.
pub fn build_upstream_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .min_tls_version(reqwest::tls::Version::TLS_1_2)
        .redirect(reqwest::redirect::Policy::none())
        .connect_timeout(Duration::from_secs(10))
        .build()
}

/// Main proxy handler.
/// Directs the request to its upstream and streams the response back.
async fn proxy_handler(State(state): State<AppState>, mut request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let upstream = match state.director.direct(&mut request).await {
        Ok(upstream) => upstream,
        Err(e) => {
            tracing::error!(method = %method, path = %path, error = %e, "Failed to direct request");
            let err = ProxyError::from(e);
            metrics::record_request(&method, err.status().as_u16(), "none", start_time);
            return err.into_response();
        }
    };

    tracing::debug!(
        method = %method,
        path = %path,
        upstream = %upstream,
        target = %request.uri(),
        "Proxying request"
    );

    match upstream_request(&state.client, request).send().await {
        Ok(response) => {
            let status = response.status();
            metrics::record_request(&method, status.as_u16(), upstream.as_str(), start_time);
            tracing::debug!(
                method = %method,
                path = %path,
                upstream = %upstream,
                status = %status,
                "Upstream responded"
            );
            client_response(response)
        }
        Err(e) => {
            let err = ProxyError::from(e);
            tracing::error!(
                method = %method,
                path = %path,
                upstream = %upstream,
                error = %err,
                "Upstream error"
            );
            metrics::record_request(&method, err.status().as_u16(), upstream.as_str(), start_time);
            err.into_response()
        }
    }
}
