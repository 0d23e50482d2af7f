//! Per-client request rate limiting

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::ClientId;

/// Token-bucket rate limiter keyed by IPC client
///
/// Each client starts with a full bucket of `burst` tokens. Tokens flow back
/// continuously at `burst` per `period`, so a client that stays under the
/// rate is never refused.
#[derive(Debug)]
pub struct RateLimiter {
    burst: u32,
    period: Duration,
    buckets: HashMap<ClientId, Bucket>,
}

#[derive(Debug)]
struct Bucket {
    tokens: f64,
    updated_at: Instant,
}

impl RateLimiter {
    /// Allow `burst` requests per `period` for each client
    pub fn new(burst: u32, period: Duration) -> Self {
        Self {
            burst,
            period,
            buckets: HashMap::new(),
        }
    }

    /// Returns `true` if the request is allowed, `false` if rate limited
    pub fn check(&mut self, client_id: &ClientId) -> bool {
        self.check_at(client_id, Instant::now())
    }

    /// Same as [`RateLimiter::check`], at an explicit instant
    pub fn check_at(&mut self, client_id: &ClientId, now: Instant) -> bool {
        let capacity = f64::from(self.burst);
        let per_sec = if self.period.is_zero() {
            f64::INFINITY
        } else {
            capacity / self.period.as_secs_f64()
        };

        let bucket = self.buckets.entry(client_id.clone()).or_insert(Bucket {
            tokens: capacity,
            updated_at: now,
        });

        let elapsed = now.saturating_duration_since(bucket.updated_at);
        bucket.tokens = (bucket.tokens + elapsed.as_secs_f64() * per_sec).min(capacity);
        bucket.updated_at = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Forget a client, e.g. after it disconnects
    pub fn remove_client(&mut self, client_id: &ClientId) {
        self.buckets.remove(client_id);
    }

    pub fn tracked_clients(&self) -> usize {
        self.buckets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_burst_then_refuses() {
        let mut limiter = RateLimiter::new(5, Duration::from_secs(1));
        let client = ClientId::new();
        let t0 = Instant::now();

        for _ in 0..5 {
            assert!(limiter.check_at(&client, t0));
        }
        assert!(!limiter.check_at(&client, t0));
    }

    #[test]
    fn refills_over_time() {
        let mut limiter = RateLimiter::new(2, Duration::from_secs(1));
        let client = ClientId::new();
        let t0 = Instant::now();

        assert!(limiter.check_at(&client, t0));
        assert!(limiter.check_at(&client, t0));
        assert!(!limiter.check_at(&client, t0));

        // Half a period returns one token
        let t1 = t0 + Duration::from_millis(500);
        assert!(limiter.check_at(&client, t1));
        assert!(!limiter.check_at(&client, t1));
    }

    #[test]
    fn clients_have_separate_buckets() {
        let mut limiter = RateLimiter::new(1, Duration::from_secs(1));
        let client1 = ClientId::new();
        let client2 = ClientId::new();
        let t0 = Instant::now();

        assert!(limiter.check_at(&client1, t0));
        assert!(!limiter.check_at(&client1, t0));
        assert!(limiter.check_at(&client2, t0));
    }

    #[test]
    fn remove_client_resets_bucket() {
        let mut limiter = RateLimiter::new(1, Duration::from_secs(60));
        let client = ClientId::new();
        let t0 = Instant::now();

        assert!(limiter.check_at(&client, t0));
        assert!(!limiter.check_at(&client, t0));

        limiter.remove_client(&client);
        assert_eq!(limiter.tracked_clients(), 0);
        assert!(limiter.check_at(&client, t0));
    }
}
