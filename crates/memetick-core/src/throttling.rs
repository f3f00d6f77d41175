use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// In-memory quota gate for providers with hard request budgets.
///
/// There is deliberately no retry queue behind this: a request that misses
/// the budget fails its tier immediately and the resolver falls through to
/// the next provider.
#[derive(Clone)]
pub struct RateGate {
    limiter: Arc<DirectRateLimiter>,
}

impl RateGate {
    pub fn new(quota_window: Duration, quota_limit: u32) -> Self {
        Self {
            limiter: Arc::new(RateLimiter::direct(quota_from_window(
                quota_window,
                quota_limit,
            ))),
        }
    }

    /// The keyed quote provider's free tier: five requests per minute.
    pub fn alphavantage_free_tier() -> Self {
        Self::new(Duration::from_secs(60), 5)
    }

    /// Tries to take one unit of rate budget.
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

fn quota_from_window(quota_window: Duration, quota_limit: u32) -> Quota {
    let safe_limit = quota_limit.max(1);
    let burst = NonZeroU32::new(safe_limit).expect("safe limit must be non-zero");

    let seconds_per_cell = (quota_window.as_secs_f64() / f64::from(safe_limit)).max(0.001);
    let period = Duration::from_secs_f64(seconds_per_cell);

    Quota::with_period(period)
        .expect("period is always greater than zero")
        .allow_burst(burst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denies_once_quota_is_exhausted() {
        let gate = RateGate::new(Duration::from_secs(60), 5);

        for _ in 0..5 {
            assert!(gate.try_acquire());
        }
        assert!(!gate.try_acquire());
    }

    #[test]
    fn zero_limit_is_clamped_to_one() {
        let gate = RateGate::new(Duration::from_secs(60), 0);
        assert!(gate.try_acquire());
        assert!(!gate.try_acquire());
    }
}
