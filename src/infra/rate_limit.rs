//! In-process fixed-window rate limiting.
//!
//! Tracks request counts per client key; each key's window resets once its
//! duration has elapsed. Sits behind the rate-limit middleware tiers.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct Window {
    started_at: Instant,
    count: u64,
}

/// Fixed-window request counter keyed by client identifier.
pub struct RateLimiter {
    windows: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Record a hit for `key` and return `(count, allowed)` for the current
    /// window. `count` includes the hit being recorded.
    pub fn check(&self, key: &str, limit: u64, window: Duration) -> (u64, bool) {
        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let now = Instant::now();
        let entry = windows.entry(key.to_string()).or_insert(Window {
            started_at: now,
            count: 0,
        });

        if now.duration_since(entry.started_at) >= window {
            entry.started_at = now;
            entry.count = 0;
        }

        entry.count += 1;
        (entry.count, entry.count <= limit)
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
