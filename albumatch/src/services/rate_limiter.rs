//! Request pacing for the search service
//!
//! Callers await [`RateLimit::until_ready`] before every request. Two
//! strategies are available:
//! - [`MinIntervalGate`]: at least `interval` between consecutive permits
//! - [`TokenBucket`]: governor-backed bucket, safe to share between
//!   concurrent workers

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::Quota;
use std::num::NonZeroU32;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Default pause between search requests
pub const DEFAULT_SEARCH_INTERVAL_MS: u64 = 700;

/// Pacing policy shared by everything that issues search requests
#[async_trait]
pub trait RateLimit: Send + Sync {
    /// Wait until the next request may be sent
    async fn until_ready(&self);
}

/// Rate limiting strategy selected by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RateLimitStrategy {
    /// Fixed minimum interval between requests
    #[default]
    Interval,
    /// Token bucket with burst 1
    Bucket,
}

impl FromStr for RateLimitStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "interval" => Ok(Self::Interval),
            "bucket" | "token-bucket" => Ok(Self::Bucket),
            other => Err(format!(
                "unknown rate limit strategy '{}' (expected 'interval' or 'bucket')",
                other
            )),
        }
    }
}

/// Build the limiter for `strategy`
///
/// A zero interval disables pacing regardless of strategy.
pub fn build_rate_limiter(strategy: RateLimitStrategy, interval: Duration) -> Arc<dyn RateLimit> {
    match strategy {
        RateLimitStrategy::Bucket => match TokenBucket::new(interval) {
            Some(bucket) => Arc::new(bucket),
            None => Arc::new(MinIntervalGate::new(interval)),
        },
        RateLimitStrategy::Interval => Arc::new(MinIntervalGate::new(interval)),
    }
}

/// Enforces a minimum interval between consecutive permits
///
/// The first permit is granted immediately.
pub struct MinIntervalGate {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl MinIntervalGate {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

#[async_trait]
impl RateLimit for MinIntervalGate {
    async fn until_ready(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                tracing::debug!("Rate limiting: waiting {:?}", wait_time);
                tokio::time::sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }
}

/// Token bucket refilling one permit per `interval`
pub struct TokenBucket {
    limiter: governor::RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl TokenBucket {
    /// Returns `None` for a zero interval, which governor cannot express
    pub fn new(interval: Duration) -> Option<Self> {
        let quota = Quota::with_period(interval)?.allow_burst(NonZeroU32::MIN);
        Some(Self {
            limiter: governor::RateLimiter::direct(quota),
        })
    }
}

#[async_trait]
impl RateLimit for TokenBucket {
    async fn until_ready(&self) {
        self.limiter.until_ready().await;
    }
}
