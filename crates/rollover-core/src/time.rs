use chrono::NaiveDate;

use rollover_domain::Instant;

/// Clock abstracts access to the current instant so the engine remains deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current wall-clock instant in the user's calendar.
    fn now(&self) -> Instant;

    /// Returns the current date. Defaults to `now().date()`.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub Instant);

impl Clock for FixedClock {
    fn now(&self) -> Instant {
        self.0
    }
}
