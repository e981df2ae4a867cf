use chrono::Local;

use rollover_core::Clock;
use rollover_domain::Instant;

/// Real-time clock backed by the local wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Local::now().naive_local()
    }
}
