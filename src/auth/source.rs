//! Cached installation token source.
//!
//! # Responsibilities
//! - Hand out a currently valid installation token to any number of callers
//! - Refresh lazily when the cached token is missing or close to expiry
//! - Ensure racing callers share one refresh instead of each exchanging
//!
//! # Design Decisions
//! - Cached token lives in an `ArcSwapOption`: fresh reads never take a lock
//! - Refreshes are serialized by an async mutex; the cache is re-checked after
//!   acquiring it so waiters pick up the token the winner stored
//! - Waiters queued behind a failed attempt share its error instead of
//!   exchanging again; failures are still never cached for later callers

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::Mutex;

use crate::auth::error::{AuthError, AuthResult};
use crate::auth::token::InstallationToken;
use crate::observability::metrics;

/// Refresh when less than this much lifetime remains.
pub const DEFAULT_REFRESH_LEEWAY_SECS: i64 = 60;

/// Something that can supply a valid installation token on demand.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Return a token that is not expired at the instant it is returned.
    async fn current_token(&self) -> AuthResult<String>;
}

/// One round-trip to the token issuer.
#[async_trait]
pub trait TokenExchange: Send + Sync {
    async fn exchange(&self) -> AuthResult<InstallationToken>;
}

/// A [`TokenSource`] caching the result of a [`TokenExchange`].
pub struct CachingTokenSource<E> {
    exchange: E,
    cached: ArcSwapOption<InstallationToken>,
    refresh: Mutex<RefreshRound>,
    attempts: AtomicU64,
    leeway: Duration,
}

/// Outcome of the most recent completed exchange.
#[derive(Default)]
struct RefreshRound {
    failure: Option<String>,
}

impl<E: TokenExchange> CachingTokenSource<E> {
    pub fn new(exchange: E) -> Self {
        Self {
            exchange,
            cached: ArcSwapOption::empty(),
            refresh: Mutex::new(RefreshRound::default()),
            attempts: AtomicU64::new(0),
            leeway: Duration::seconds(DEFAULT_REFRESH_LEEWAY_SECS),
        }
    }

    /// Override the refresh leeway.
    pub fn with_leeway(mut self, leeway: Duration) -> Self {
        self.leeway = leeway;
        self
    }

    fn fresh_token(&self) -> Option<String> {
        let cached = self.cached.load();
        cached
            .as_deref()
            .filter(|token| token.is_fresh(self.leeway))
            .map(|token| token.token.clone())
    }

    async fn refresh(&self) -> AuthResult<String> {
        let token = match self.exchange.exchange().await {
            Ok(token) => token,
            Err(e) => {
                metrics::record_token_refresh("failure");
                return Err(e);
            }
        };

        if token.is_expired_at(Utc::now()) {
            metrics::record_token_refresh("failure");
            return Err(AuthError::Expired(token.expires_at));
        }

        metrics::record_token_refresh("success");
        tracing::info!(expires_at = %token.expires_at, "Installation token refreshed");

        let value = token.token.clone();
        self.cached.store(Some(Arc::new(token)));
        Ok(value)
    }
}

#[async_trait]
impl<E: TokenExchange> TokenSource for CachingTokenSource<E> {
    async fn current_token(&self) -> AuthResult<String> {
        if let Some(token) = self.fresh_token() {
            return Ok(token);
        }

        let seen = self.attempts.load(Ordering::Acquire);
        let mut round = self.refresh.lock().await;

        // Another caller may have refreshed while we waited.
        if let Some(token) = self.fresh_token() {
            return Ok(token);
        }

        // An attempt finished while we waited and failed: share its outcome.
        if self.attempts.load(Ordering::Acquire) != seen {
            if let Some(message) = &round.failure {
                return Err(AuthError::RefreshFailed(message.clone()));
            }
        }

        let result = self.refresh().await;
        round.failure = result.as_ref().err().map(ToString::to_string);
        self.attempts.fetch_add(1, Ordering::Release);
        result
    }
}
