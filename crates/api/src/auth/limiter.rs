//! Per-account login throttling backed by `governor`.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::clock::{Clock, DefaultClock};
use governor::state::keyed::DashMapStateStore;
use governor::{Quota, RateLimiter};
use solace_core::error::CoreError;

type KeyedLimiter = RateLimiter<String, DashMapStateStore<String>, DefaultClock>;

/// Limits login attempts per (normalized) email address.
#[derive(Clone)]
pub struct LoginLimiter {
    limiter: Arc<KeyedLimiter>,
}

impl LoginLimiter {
    /// Allow `per_minute` attempts per key, replenished evenly over a minute.
    /// A value of zero is treated as one.
    pub fn new(per_minute: u32) -> Self {
        let burst = NonZeroU32::new(per_minute).unwrap_or(NonZeroU32::MIN);
        Self::with_quota(Quota::per_minute(burst))
    }

    pub fn with_quota(quota: Quota) -> Self {
        Self {
            limiter: Arc::new(RateLimiter::dashmap(quota)),
        }
    }

    /// Number of keys currently tracked.
    pub fn len(&self) -> usize {
        self.limiter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limiter.is_empty()
    }

    /// Drop keys whose quota has fully replenished.
    pub fn retain_recent(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    /// Run [`retain_recent`](Self::retain_recent) every `every` until the
    /// returned handle is aborted.
    pub fn spawn_cleanup(&self, every: Duration) -> tokio::task::JoinHandle<()> {
        let limiter = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                let before = limiter.len();
                limiter.retain_recent();
                tracing::debug!(before, after = limiter.len(), "Pruned login limiter keys");
            }
        })
    }

    /// Record an attempt for `key`, rejecting it once the quota is spent.
    pub fn check(&self, key: &str) -> Result<(), CoreError> {
        self.limiter.check_key(&key.to_string()).map_err(|not_until| {
            let retry_after = not_until
                .wait_time_from(DefaultClock::default().now())
                .as_secs()
                .max(1);
            tracing::warn!(key, retry_after, "Login rate limit exceeded");
            CoreError::rate_limited_with(format!(
                "Too many login attempts. Try again in {retry_after} seconds"
            ))
        })
    }
}
