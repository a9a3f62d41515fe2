// Clock Port (for testability)

use chrono::{DateTime, Utc};

/// Wall-clock source (allows mocking in tests)
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    /// Current UTC time at the clock's native resolution
    fn now(&self) -> DateTime<Utc>;
}

/// System clock (production)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        let now = Utc::now();
        tracing::trace!(unix_millis = now.timestamp_millis(), "Read system clock");
        now
    }
}
