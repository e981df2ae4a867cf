use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::common::{Anchor, Instant};

/// One accounting cycle `[start, end]`, both ends inclusive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeriodWindow {
    pub start: Instant,
    pub end: Instant,
}

impl PeriodWindow {
    pub fn new(start: Instant, end: Instant) -> Result<Self, PeriodWindowError> {
        if end < start {
            return Err(PeriodWindowError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    /// Zero-duration window anchored at `at`.
    pub fn at(at: Instant) -> Self {
        Self { start: at, end: at }
    }

    pub fn contains(&self, instant: Instant) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// True when no time elapses between start and end.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn scope(&self, now: Instant) -> WindowScope {
        if now < self.start {
            WindowScope::Future
        } else if now > self.end {
            WindowScope::Past
        } else {
            WindowScope::Current
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Errors that can occur when constructing [`PeriodWindow`] values.
pub enum PeriodWindowError {
    InvalidRange,
}

impl fmt::Display for PeriodWindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodWindowError::InvalidRange => f.write_str("period window end must not precede start"),
        }
    }
}

impl std::error::Error for PeriodWindowError {}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Where a window sits relative to a reference instant.
pub enum WindowScope {
    Past,
    Current,
    Future,
}

/// Cadence unit of a budget period.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BudgetPeriodKind {
    Daily,
    Weekly,
    Monthly,
    Custom,
}

/// Cadence of a budget: unit, multiplier and (for monthly budgets) the day anchor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BudgetPeriodSpec {
    pub kind: BudgetPeriodKind,
    pub amount: u32,
    #[serde(default)]
    pub anchor: Anchor,
}

impl BudgetPeriodSpec {
    pub fn daily(every: u32) -> Self {
        Self::new(BudgetPeriodKind::Daily, every, Anchor::First)
    }

    pub fn weekly(every: u32) -> Self {
        Self::new(BudgetPeriodKind::Weekly, every, Anchor::First)
    }

    /// Monthly cadence ending on day `day` counted from the given anchor.
    pub fn monthly(day: u32, anchor: Anchor) -> Self {
        Self::new(BudgetPeriodKind::Monthly, day, anchor)
    }

    /// Custom cadence; `fallback_days` is used when the current window is empty.
    pub fn custom(fallback_days: u32) -> Self {
        Self::new(BudgetPeriodKind::Custom, fallback_days, Anchor::First)
    }

    pub fn new(kind: BudgetPeriodKind, amount: u32, anchor: Anchor) -> Self {
        Self {
            kind,
            amount,
            anchor,
        }
    }
}

impl Default for BudgetPeriodSpec {
    fn default() -> Self {
        Self::monthly(1, Anchor::First)
    }
}

impl fmt::Display for BudgetPeriodSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.amount) {
            (BudgetPeriodKind::Daily, 1) => f.write_str("Daily"),
            (BudgetPeriodKind::Daily, n) => write!(f, "Every {} Days", n),
            (BudgetPeriodKind::Weekly, 1) => f.write_str("Weekly"),
            (BudgetPeriodKind::Weekly, n) => write!(f, "Every {} Weeks", n),
            (BudgetPeriodKind::Monthly, n) => write!(f, "Monthly (day {} {})", n, self.anchor),
            (BudgetPeriodKind::Custom, _) => f.write_str("Custom"),
        }
    }
}
