//! Shared aliases and small enums used across budgeting primitives.

use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Wall-clock instant in the user's calendar.
pub type Instant = NaiveDateTime;

/// Exact decimal amount of money.
pub type Money = Decimal;

/// Selects whether a day-of-month offset counts from the start or the end of the month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Anchor {
    #[default]
    First,
    Last,
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Anchor::First => "from start",
            Anchor::Last => "from end",
        };
        f.write_str(label)
    }
}
