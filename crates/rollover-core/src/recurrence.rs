//! Recurring occurrence state machine and posting of due occurrences.

use chrono::{Datelike, NaiveTime};
use tracing::{debug, warn};
use uuid::Uuid;

use rollover_domain::{
    calendar::{add_days, add_months, anchored_date, next_weekday_after, shift_month, start_of_day},
    Anchor, Calendar, Instant, RecurringKind, RecurringSpec, Transaction,
};

use crate::{
    catch_up::{catch_up, CatchUp},
    CoreError,
};

/// Rejects specs that cannot produce a next occurrence.
pub fn validate_recurring(spec: &RecurringSpec) -> Result<(), CoreError> {
    match spec.kind {
        RecurringKind::None => return Ok(()),
        RecurringKind::SelectedWeekdays => {
            if spec.weekdays.is_empty() {
                return Err(CoreError::InvalidSpec(
                    "selected weekdays recurrence has no weekdays".into(),
                ));
            }
        }
        RecurringKind::Monthly if i32::try_from(spec.amount).is_err() => {
            return Err(CoreError::InvalidSpec(format!(
                "monthly recurrence amount {} is out of range",
                spec.amount
            )));
        }
        RecurringKind::Daily
        | RecurringKind::Weekly
        | RecurringKind::Monthly
        | RecurringKind::Custom => {
            if spec.amount == 0 {
                return Err(CoreError::InvalidSpec(format!(
                    "{:?} recurrence needs an amount of at least 1",
                    spec.kind
                )));
            }
        }
    }
    if spec.last_occurred > spec.date {
        return Err(CoreError::InvalidSpec(
            "last occurrence is after the next due date".into(),
        ));
    }
    Ok(())
}

/// Computes the due date following `spec.date`, or `None` for non-recurring specs.
pub fn next_due_date(spec: &RecurringSpec, calendar: &Calendar) -> Option<Instant> {
    let from = spec.date;
    let amount = spec.amount as i64;
    let next = match spec.kind {
        RecurringKind::None => return None,
        RecurringKind::Daily => start_of_day(add_days(from, amount)),
        RecurringKind::Weekly => start_of_day(add_days(from, amount * 7)),
        RecurringKind::Monthly => {
            start_of_day(add_months(from, i32::try_from(spec.amount).ok()?))
        }
        RecurringKind::Custom => day_of_month_after(from, spec.amount, spec.anchor),
        RecurringKind::SelectedWeekdays => {
            let mut weekdays = spec.weekdays.clone();
            weekdays.sort_by_key(|day| calendar.weekday_index(*day));
            let current = calendar.weekday_index(from.weekday());
            let target = weekdays
                .iter()
                .find(|day| calendar.weekday_index(**day) > current)
                .or_else(|| weekdays.first())?;
            next_weekday_after(from, *target)
        }
    };
    Some(next)
}

// The anchored day counts as passed once the due date has reached it.
fn day_of_month_after(from: Instant, offset: u32, anchor: Anchor) -> Instant {
    let date = start_of_day(from).date();
    let (mut year, mut month) = (date.year(), date.month());
    if date.day() >= anchored_date(year, month, offset, anchor).day() {
        (year, month) = shift_month(year, month, 1);
    }
    anchored_date(year, month, offset, anchor).and_time(NaiveTime::MIN)
}

/// Moves `spec` to its next occurrence, recording the current due date as
/// `last_occurred`.
///
/// Non-recurring specs are returned unchanged, as are specs whose next date
/// cannot be resolved to a later instant.
pub fn advance_recurring(
    spec: &RecurringSpec,
    calendar: &Calendar,
) -> Result<RecurringSpec, CoreError> {
    validate_recurring(spec)?;
    let Some(next) = next_due_date(spec, calendar) else {
        return Ok(spec.clone());
    };
    if next <= spec.date {
        warn!(kind = ?spec.kind, date = %spec.date, "could not resolve next occurrence");
        return Ok(spec.clone());
    }

    let mut advanced = spec.clone();
    advanced.last_occurred = spec.date;
    advanced.date = next;
    advanced.repeated_count += 1;
    debug!(kind = ?spec.kind, from = %spec.date, to = %next, "recurrence advanced");
    Ok(advanced)
}

/// Advances `spec` until its due date is today or later.
pub fn catch_up_recurring(
    spec: RecurringSpec,
    now: Instant,
    calendar: &Calendar,
    max_steps: usize,
) -> Result<CatchUp<RecurringSpec>, CoreError> {
    let today = start_of_day(now);
    catch_up(
        spec,
        |candidate| !candidate.is_recurring() || start_of_day(candidate.date) >= today,
        |candidate| candidate.date,
        |candidate| advance_recurring(&candidate, calendar),
        max_steps,
    )
}

/// Posts the template's current occurrence.
///
/// Returns the posted instance (dated at the due date, linked to the template)
/// and the template advanced to its next occurrence. The instance id is derived
/// from the template id and the due date, so posting the same occurrence again
/// yields the same document.
pub fn post_occurrence(
    template: &Transaction,
    calendar: &Calendar,
) -> Result<(Transaction, Transaction), CoreError> {
    let spec = template
        .recurring
        .as_ref()
        .filter(|spec| spec.is_recurring())
        .ok_or_else(|| {
            CoreError::InvalidSpec(format!("transaction {} is not a recurring template", template.id))
        })?;

    let mut posted = template.clone();
    posted.id = occurrence_id(template.id, spec.date);
    posted.date = spec.date;
    posted.recurring = None;
    posted.template_id = Some(template.id);

    let advanced = advance_recurring(spec, calendar)?;
    let mut next_template = template.clone();
    next_template.date = advanced.date;
    next_template.recurring = Some(advanced);
    Ok((posted, next_template))
}

/// Stable identity of the occurrence of `template_id` due at `due`.
pub fn occurrence_id(template_id: Uuid, due: Instant) -> Uuid {
    Uuid::new_v5(&template_id, due.format("%Y-%m-%dT%H:%M:%S%.3f").to_string().as_bytes())
}

/// Posts every occurrence due on or before `now`, at most `max_occurrences`.
pub fn post_due_occurrences(
    template: &Transaction,
    now: Instant,
    calendar: &Calendar,
    max_occurrences: usize,
) -> Result<(Vec<Transaction>, Transaction), CoreError> {
    let mut current = template.clone();
    let mut posted = Vec::new();
    while let Some(spec) = current.recurring.as_ref().filter(|spec| spec.is_recurring()) {
        if spec.date > now {
            break;
        }
        if posted.len() >= max_occurrences {
            warn!(template = %template.id, posted = posted.len(), "occurrence posting limit reached");
            break;
        }
        let before = spec.date;
        let (instance, next) = post_occurrence(&current, calendar)?;
        posted.push(instance);
        current = next;
        if current.recurring.as_ref().map(|spec| spec.date) == Some(before) {
            break;
        }
    }
    Ok((posted, current))
}
