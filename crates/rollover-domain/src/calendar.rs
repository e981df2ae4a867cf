//! Pure calendar arithmetic over wall-clock instants.
//!
//! Every helper is total: dates that do not exist in the target month (such as
//! February 30) are clamped to the last valid day, and results outside the
//! representable range saturate instead of panicking.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::common::{Anchor, Instant};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Supplies the week-start configuration used by week-relative helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    week_start: Weekday,
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new(Weekday::Mon)
    }
}

impl Calendar {
    pub fn new(week_start: Weekday) -> Self {
        Self { week_start }
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Position of `weekday` within a week beginning at the configured start (0..=6).
    pub fn weekday_index(&self, weekday: Weekday) -> u32 {
        (weekday.num_days_from_monday() + 7 - self.week_start.num_days_from_monday()) % 7
    }

    pub fn start_of_week(&self, instant: Instant) -> Instant {
        let offset = self.weekday_index(instant.weekday()) as i64;
        add_days(start_of_day(instant), -offset)
    }

    pub fn end_of_week(&self, instant: Instant) -> Instant {
        end_of_day(add_days(self.start_of_week(instant), 6))
    }
}

pub fn start_of_day(instant: Instant) -> Instant {
    instant.date().and_time(NaiveTime::MIN)
}

/// Last representable millisecond of the day (23:59:59.999).
pub fn end_of_day(instant: Instant) -> Instant {
    start_of_day(instant) + Duration::milliseconds(MILLIS_PER_DAY - 1)
}

pub fn end_of_date(date: NaiveDate) -> Instant {
    end_of_day(date.and_time(NaiveTime::MIN))
}

pub fn start_of_month(instant: Instant) -> Instant {
    let date = instant.date();
    start_of_day(add_days(instant, -(date.day() as i64 - 1)))
}

pub fn end_of_month(instant: Instant) -> Instant {
    let first = start_of_month(instant);
    end_of_day(add_days(first, days_in_month_of(instant) as i64 - 1))
}

pub fn add_days(instant: Instant, days: i64) -> Instant {
    instant
        .checked_add_signed(Duration::days(days))
        .unwrap_or(if days >= 0 {
            NaiveDateTime::MAX
        } else {
            NaiveDateTime::MIN
        })
}

/// Shifts by whole months keeping the time of day, clamping the day-of-month
/// when the target month is shorter.
pub fn add_months(instant: Instant, months: i32) -> Instant {
    let date = instant.date();
    let (year, month) = shift_month(date.year(), date.month(), months);
    date_clamped(year, month, date.day()).and_time(instant.time())
}

/// Builds the date for `day` in the given month, clamped to the month's length.
pub fn date_clamped(year: i32, month: u32, day: u32) -> NaiveDate {
    let day = day.clamp(1, days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(if year > 0 {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    })
}

/// Day `offset` of the month counted from `anchor`: `(3, First)` is the 3rd,
/// `(1, Last)` the last day. Offsets beyond the month length clamp.
pub fn anchored_date(year: i32, month: u32, offset: u32, anchor: Anchor) -> NaiveDate {
    let day = match anchor {
        Anchor::First => offset,
        Anchor::Last => (days_in_month(year, month) + 1).saturating_sub(offset),
    };
    date_clamped(year, month, day)
}

/// Returns the `(year, month)` pair that lies `months` after the given month.
pub fn shift_month(year: i32, month: u32, months: i32) -> (i32, u32) {
    let index = year as i64 * 12 + month as i64 - 1 + months as i64;
    (index.div_euclid(12) as i32, index.rem_euclid(12) as u32 + 1)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

pub fn days_in_month_of(instant: Instant) -> u32 {
    let date = instant.date();
    days_in_month(date.year(), date.month())
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Signed count of calendar days from `from` to `to`, ignoring time of day.
pub fn whole_days_between(from: Instant, to: Instant) -> i64 {
    (to.date() - from.date()).num_days()
}

/// Number of calendar days covered by `[from, to]`, both ends included.
/// Returns 0 when `to` precedes `from`.
pub fn days_between_inclusive(from: Instant, to: Instant) -> i64 {
    let days = whole_days_between(from, to);
    if days < 0 {
        0
    } else {
        days + 1
    }
}

/// Elapsed time from `start` to `end` expressed in days, rounded up.
pub fn whole_days_spanned(start: Instant, end: Instant) -> i64 {
    let millis = (end - start).num_milliseconds();
    if millis <= 0 {
        return 0;
    }
    (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
}

/// Signed count of complete calendar months from `from` to `to`.
pub fn whole_months_between(from: Instant, to: Instant) -> i32 {
    let (a, b) = (from.date(), to.date());
    let mut months = (b.year() - a.year()) * 12 + b.month() as i32 - a.month() as i32;
    if months > 0 && b.day() < a.day() {
        months -= 1;
    } else if months < 0 && b.day() > a.day() {
        months += 1;
    }
    months
}

/// Every calendar date from `from` to `to`, both included.
pub fn dates_between(from: Instant, to: Instant) -> Vec<NaiveDate> {
    let (first, last) = (from.date(), to.date());
    first.iter_days().take_while(|date| *date <= last).collect()
}

/// Start of the first day strictly after `instant` that falls on `weekday`.
pub fn next_weekday_after(instant: Instant, weekday: Weekday) -> Instant {
    let current = instant.weekday().num_days_from_monday() as i64;
    let target = weekday.num_days_from_monday() as i64;
    let mut delta = (target - current).rem_euclid(7);
    if delta == 0 {
        delta = 7;
    }
    add_days(start_of_day(instant), delta)
}
