//! Per-client rate limiting.
//!
//! Each client IP gets its own token bucket sized by [`RateLimitConfig`].
//! The client is the peer address of the connection. With
//! `RATE_LIMIT_TRUST_PROXY` set, the first `x-forwarded-for` entry is used
//! instead. Requests with no usable address share the `unknown` bucket.
//!
//! [`RateLimitConfig`]: crate::config::RateLimitConfig

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use rollcall_core::AppError;

use crate::state::{AppState, ClientRateLimiter};

const PRUNE_INTERVAL: Duration = Duration::from_secs(60);

fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>, trust_proxy: bool) -> String {
    let forwarded = trust_proxy
        .then(|| {
            headers
                .get("x-forwarded-for")
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.split(',').next())
                .map(str::trim)
                .filter(|ip| !ip.is_empty())
                .map(str::to_string)
        })
        .flatten();

    forwarded
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Drops buckets that have refilled completely so the key map does not grow
/// with every client ever seen.
pub fn spawn_limiter_pruning(limiter: Arc<ClientRateLimiter>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PRUNE_INTERVAL);
        loop {
            interval.tick().await;
            limiter.retain_recent();
            limiter.shrink_to_fit();
            debug!(clients = limiter.len(), "Pruned rate limiter buckets");
        }
    })
}

pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    if !state.rate_limit_config.enabled {
        return next.run(req).await;
    }

    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let key = client_key(req.headers(), peer, state.rate_limit_config.trust_proxy);

    if state.rate_limiter.check_key(&key).is_err() {
        warn!(client = %key, path = %req.uri().path(), "Rate limit exceeded");
        return AppError::too_many_requests("Too many requests, please slow down")
            .into_response();
    }

    next.run(req).await
}
