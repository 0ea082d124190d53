//! Fixed-window request limiting per client address

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;

use crate::error::AppError;

pub const DEFAULT_MAX_REQUESTS: u32 = 100;
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(15 * 60);
/// One reverse proxy in front of the gateway
pub const DEFAULT_TRUSTED_PROXY_HOPS: usize = 1;
pub const LIMIT_MESSAGE: &str = "Too many requests from this IP, please try again later.";

/// Stale windows are swept once the table grows past this many clients
const PRUNE_THRESHOLD: usize = 10_000;
/// Minimum spacing between two sweeps
const PRUNE_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window: Duration,
    /// Proxies whose `X-Forwarded-For` entries are believed, counted from the
    /// right. 0 ignores the header and keys on the socket peer.
    pub trusted_proxy_hops: usize,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_MAX_REQUESTS,
            window: DEFAULT_WINDOW,
            trusted_proxy_hops: DEFAULT_TRUSTED_PROXY_HOPS,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    windows: DashMap<String, Window>,
    last_prune: Mutex<Instant>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: DashMap::new(),
            last_prune: Mutex::new(Instant::now()),
        }
    }

    /// Count one request from `client`; `false` once its window is full.
    pub fn check(&self, client: &str) -> bool {
        self.check_at(client, Instant::now())
    }

    fn check_at(&self, client: &str, now: Instant) -> bool {
        if self.windows.len() > PRUNE_THRESHOLD {
            self.maybe_prune(now);
        }

        let mut entry = self.windows.entry(client.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });
        if now.duration_since(entry.started) >= self.config.window {
            *entry = Window {
                started: now,
                count: 0,
            };
        }
        if entry.count >= self.config.max_requests {
            return false;
        }
        entry.count += 1;
        true
    }

    /// Sweep at most once per `PRUNE_INTERVAL`; concurrent callers skip.
    fn maybe_prune(&self, now: Instant) {
        let Ok(mut last) = self.last_prune.try_lock() else {
            return;
        };
        if now.saturating_duration_since(*last) < PRUNE_INTERVAL {
            return;
        }
        *last = now;
        drop(last);
        self.prune(now);
    }

    fn prune(&self, now: Instant) {
        let window = self.config.window;
        self.windows
            .retain(|_, w| now.duration_since(w.started) < window);
    }

    /// The address a request is counted against.
    ///
    /// With `n` trusted hops the client is the `n`-th `X-Forwarded-For` entry
    /// from the right (the one the outermost trusted proxy appended), clamped
    /// to the leftmost entry. Entries further left are client-supplied and
    /// never used.
    fn client_key(&self, request: &Request) -> String {
        let hops = self.config.trusted_proxy_hops;
        if hops > 0 {
            let forwarded = request
                .headers()
                .get("x-forwarded-for")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| {
                    v.rsplit(',')
                        .map(str::trim)
                        .filter(|hop| !hop.is_empty())
                        .take(hops)
                        .last()
                });
            if let Some(ip) = forwarded {
                return ip.to_string();
            }
        }

        request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// Middleware rejecting clients that exhausted their window with 429.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let client = limiter.client_key(&request);
    if !limiter.check(&client) {
        tracing::warn!(client = %client, "Rate limit exceeded");
        return AppError::TooManyRequests(LIMIT_MESSAGE.to_string()).into_response();
    }
    next.run(request).await
}
