use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::common::{Anchor, Instant};

/// Occurrence cadence of a recurring transaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum RecurringKind {
    /// Not a recurring item.
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    /// Fixed day of month counted from the configured anchor.
    Custom,
    SelectedWeekdays,
}

/// Schedule attached to a recurring transaction template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecurringSpec {
    pub kind: RecurringKind,
    /// Next due date.
    pub date: Instant,
    pub amount: u32,
    #[serde(default)]
    pub repeated_count: u32,
    #[serde(default)]
    pub anchor: Anchor,
    #[serde(default)]
    pub weekdays: Vec<Weekday>,
    pub last_occurred: Instant,
}

impl RecurringSpec {
    pub fn new(kind: RecurringKind, date: Instant, amount: u32) -> Self {
        Self {
            kind,
            date,
            amount,
            repeated_count: 0,
            anchor: Anchor::First,
            weekdays: Vec::new(),
            last_occurred: date,
        }
    }

    pub fn daily(date: Instant, every: u32) -> Self {
        Self::new(RecurringKind::Daily, date, every)
    }

    pub fn weekly(date: Instant, every: u32) -> Self {
        Self::new(RecurringKind::Weekly, date, every)
    }

    pub fn monthly(date: Instant, every: u32) -> Self {
        Self::new(RecurringKind::Monthly, date, every)
    }

    /// Due on day `day` of each month, counted from `anchor`.
    pub fn day_of_month(date: Instant, day: u32, anchor: Anchor) -> Self {
        let mut spec = Self::new(RecurringKind::Custom, date, day);
        spec.anchor = anchor;
        spec
    }

    pub fn selected_weekdays(date: Instant, weekdays: impl IntoIterator<Item = Weekday>) -> Self {
        let mut spec = Self::new(RecurringKind::SelectedWeekdays, date, 1);
        for weekday in weekdays {
            if !spec.weekdays.contains(&weekday) {
                spec.weekdays.push(weekday);
            }
        }
        spec
    }

    pub fn is_recurring(&self) -> bool {
        self.kind != RecurringKind::None
    }
}

impl fmt::Display for RecurringSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.amount) {
            (RecurringKind::None, _) => f.write_str("Once"),
            (RecurringKind::Daily, 1) => f.write_str("Daily"),
            (RecurringKind::Daily, n) => write!(f, "Every {} Days", n),
            (RecurringKind::Weekly, 1) => f.write_str("Weekly"),
            (RecurringKind::Weekly, n) => write!(f, "Every {} Weeks", n),
            (RecurringKind::Monthly, 1) => f.write_str("Monthly"),
            (RecurringKind::Monthly, n) => write!(f, "Every {} Months", n),
            (RecurringKind::Custom, n) => write!(f, "Monthly (day {} {})", n, self.anchor),
            (RecurringKind::SelectedWeekdays, _) => {
                let names: Vec<String> = self.weekdays.iter().map(|day| day.to_string()).collect();
                f.write_str(&names.join(", "))
            }
        }
    }
}
