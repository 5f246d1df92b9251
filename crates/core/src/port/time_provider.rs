// Time Provider Port (for testability)

use std::sync::atomic::{AtomicI64, Ordering};

/// Source of record timestamps (allows fixed clocks in tests)
pub trait TimeProvider: Send + Sync {
    /// Current time in milliseconds since epoch
    fn now_millis(&self) -> i64;
}

/// Wall clock (production)
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Manually advanced clock
pub struct FixedTimeProvider {
    now: AtomicI64,
}

impl FixedTimeProvider {
    pub fn new(now_millis: i64) -> Self {
        Self {
            now: AtomicI64::new(now_millis),
        }
    }

    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl TimeProvider for FixedTimeProvider {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_advances() {
        let clock = FixedTimeProvider::new(1_000);
        assert_eq!(clock.now_millis(), 1_000);
        clock.advance(500);
        assert_eq!(clock.now_millis(), 1_500);
    }
}
