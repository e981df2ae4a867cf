//! Derived, read-only views over budgets and recurring schedules.

use std::fmt;

use rust_decimal::{prelude::ToPrimitive, Decimal};

use rollover_domain::{
    calendar::{whole_days_between, whole_months_between},
    Budget, Instant, RecurringSpec,
};

/// Share of the available amount already spent.
///
/// Returns `1.0` when nothing is available or the ratio would be negative.
pub fn progress(budget: &Budget) -> f64 {
    let available = budget.available();
    if available.is_zero() {
        return 1.0;
    }
    let ratio = (budget.spent_amount / available).to_f64().unwrap_or(1.0);
    if ratio < 0.0 {
        1.0
    } else {
        ratio
    }
}

pub fn is_over_budget(budget: &Budget) -> bool {
    budget.spent_amount > budget.available()
}

/// Amount left to spend in the current window, never negative.
pub fn remaining_to_spend(budget: &Budget) -> Decimal {
    budget.remaining().max(Decimal::ZERO)
}

/// Relative due-date group of a recurring item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DueBucket {
    Overdue(u32),
    Today,
    Tomorrow,
    InDays(u32),
    NextMonth,
    InMonths(u32),
}

impl DueBucket {
    /// Buckets `date` by its whole-day and whole-month distance from `now`.
    pub fn for_date(date: Instant, now: Instant) -> Self {
        let days = whole_days_between(now, date);
        match days {
            d if d < 0 => DueBucket::Overdue((-d) as u32),
            0 => DueBucket::Today,
            1 => DueBucket::Tomorrow,
            d => match whole_months_between(now, date) {
                m if m <= 0 => DueBucket::InDays(d as u32),
                1 => DueBucket::NextMonth,
                m => DueBucket::InMonths(m as u32),
            },
        }
    }

    fn sort_key(&self) -> (u8, i64) {
        match *self {
            DueBucket::Overdue(days) => (0, -(days as i64)),
            DueBucket::Today => (1, 0),
            DueBucket::Tomorrow => (2, 0),
            DueBucket::InDays(days) => (3, days as i64),
            DueBucket::NextMonth => (4, 0),
            DueBucket::InMonths(months) => (5, months as i64),
        }
    }
}

impl fmt::Display for DueBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DueBucket::Overdue(1) => f.write_str("overdue by 1 day"),
            DueBucket::Overdue(days) => write!(f, "overdue by {} days", days),
            DueBucket::Today => f.write_str("due today"),
            DueBucket::Tomorrow => f.write_str("due tomorrow"),
            DueBucket::InDays(days) => write!(f, "due in {} days", days),
            DueBucket::NextMonth => f.write_str("due next month"),
            DueBucket::InMonths(months) => write!(f, "due in {} months", months),
        }
    }
}

/// Groups recurring specs by due bucket, earliest bucket first. Items keep
/// their input order within a bucket.
pub fn group_by_due<'a, I>(specs: I, now: Instant) -> Vec<(DueBucket, Vec<&'a RecurringSpec>)>
where
    I: IntoIterator<Item = &'a RecurringSpec>,
{
    let mut groups: Vec<(DueBucket, Vec<&'a RecurringSpec>)> = Vec::new();
    for spec in specs.into_iter().filter(|spec| spec.is_recurring()) {
        let bucket = DueBucket::for_date(spec.date, now);
        match groups.iter_mut().find(|(existing, _)| *existing == bucket) {
            Some((_, items)) => items.push(spec),
            None => groups.push((bucket, vec![spec])),
        }
    }
    groups.sort_by_key(|(bucket, _)| bucket.sort_key());
    groups
}
