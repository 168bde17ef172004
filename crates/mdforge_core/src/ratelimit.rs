//! Per-identity sliding-window admission control.

use crate::config::Config;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Sentinel identity for callers whose origin cannot be resolved.
///
/// All such callers share a single bucket; this is a documented degenerate
/// case, not an error.
pub const UNKNOWN_IDENTITY: &str = "unknown";

/// Sliding-window log rate limiter keyed by caller identity.
///
/// The identity map lives inside the limiter value, which is owned by the
/// service's state object. Stale entries are pruned lazily on each `admit`
/// call and the pruned list is stored back even on rejection, so windows
/// self-clean without a background task.
#[derive(Debug)]
pub struct RateLimiter {
    windows: Mutex<HashMap<String, Vec<Instant>>>,
    window: Duration,
    limit: usize,
}

impl RateLimiter {
    /// Create a limiter admitting `limit` requests per `window` per identity.
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            window,
            limit,
        }
    }

    /// Create a limiter from the service configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.rate_limit_max_requests,
            Duration::from_secs(config.rate_limit_window_secs),
        )
    }

    /// Admit or reject a request from `identity` observed at `now`.
    ///
    /// Prunes entries older than the window, rejects when the remaining
    /// count has reached the limit, and otherwise records `now` and admits.
    /// Identities never affect each other.
    pub fn admit(&self, identity: &str, now: Instant) -> bool {
        let mut windows = match self.windows.lock() {
            Ok(guard) => guard,
            Err(_) => {
                tracing::error!("Rate limiter state poisoned; rejecting request");
                return false;
            }
        };
        let entries = windows.entry(identity.to_string()).or_default();
        entries.retain(|&t| now.duration_since(t) < self.window);
        if entries.len() >= self.limit {
            return false;
        }
        entries.push(now);
        true
    }

    /// Number of identities currently tracked.
    pub fn tracked_identities(&self) -> usize {
        self.windows.lock().map(|map| map.len()).unwrap_or(0)
    }
}
