//! Budget period state machine: advancing a budget's window to the next cycle.

use chrono::Datelike;
use rust_decimal::Decimal;
use tracing::debug;

use rollover_domain::{
    calendar::{
        add_days, anchored_date, end_of_date, end_of_day, shift_month, start_of_day,
        whole_days_spanned,
    },
    Anchor, Budget, BudgetPeriodKind, BudgetPeriodSpec, Instant, PeriodWindow, Transaction,
};

use crate::{
    catch_up::{catch_up, CatchUp},
    CoreError,
};

/// Computes the end of the window that follows `window` under `period`.
///
/// The result is always strictly after `window.end` for `period.amount >= 1`.
pub fn next_window_end(period: &BudgetPeriodSpec, window: &PeriodWindow) -> Instant {
    let from = window.end;
    let amount = period.amount as i64;
    match period.kind {
        BudgetPeriodKind::Daily => end_of_day(add_days(start_of_day(from), amount)),
        BudgetPeriodKind::Weekly => end_of_day(add_days(from, amount * 7)),
        BudgetPeriodKind::Monthly => match period.anchor {
            Anchor::First => monthly_from_first(from, period.amount),
            Anchor::Last => {
                let date = from.date();
                let (year, month) = shift_month(date.year(), date.month(), 1);
                end_of_date(anchored_date(year, month, period.amount, Anchor::Last))
            }
        },
        BudgetPeriodKind::Custom => {
            let span = whole_days_spanned(window.start, window.end);
            if span > 0 {
                return add_days(end_of_day(from), span);
            }
            // Empty window: cover `amount` calendar days starting today.
            let end = end_of_day(add_days(from, amount - 1));
            if end > from {
                end
            } else {
                add_days(end, 1)
            }
        }
    }
}

// Equal day-of-month counts as already reached, so the target always lies
// after `from`.
fn monthly_from_first(from: Instant, day: u32) -> Instant {
    let date = start_of_day(from).date();
    let (mut year, mut month) = (date.year(), date.month());
    if date.day() >= anchored_date(year, month, day, Anchor::First).day() {
        (year, month) = shift_month(year, month, 1);
    }
    end_of_date(anchored_date(year, month, day, Anchor::First))
}

/// Closes the current window and opens the next one.
///
/// The closing window is archived, and unspent allotment carried over, only when
/// it has a non-zero duration and does not contain `now`.
pub fn advance_budget(budget: &Budget, now: Instant) -> Budget {
    let mut next = budget.clone();
    advance_budget_in_place(&mut next, now);
    next
}

/// In-place form of [`advance_budget`]; only the new history entry is allocated.
pub fn advance_budget_in_place(budget: &mut Budget, now: Instant) {
    let closing = budget.window;
    if !closing.is_empty() && !closing.contains(now) {
        let entry = budget.snapshot();
        budget.history.push(entry);
        if budget.carryover {
            if let Some(allotted) = budget.budget_amount {
                if budget.spent_amount < allotted {
                    budget.carryover_amount += allotted - budget.spent_amount;
                }
            }
        }
    }
    budget.window = PeriodWindow {
        start: closing.end,
        end: next_window_end(&budget.period, &closing),
    };
    budget.spent_amount = Decimal::ZERO;

    debug!(
        budget = %budget.id,
        start = %budget.window.start,
        end = %budget.window.end,
        carryover = %budget.carryover_amount,
        "budget window advanced"
    );
}

/// Advances `budget` until `now` no longer lies past its window.
///
/// A window that starts after `now` is treated as current.
pub fn catch_up_budget(
    budget: Budget,
    now: Instant,
    max_steps: usize,
) -> Result<CatchUp<Budget>, CoreError> {
    if budget.period.amount == 0 {
        return Err(CoreError::InvalidSpec(format!(
            "budget {} has a zero period amount",
            budget.id
        )));
    }
    catch_up(
        budget,
        |candidate| now <= candidate.window.end,
        |candidate| candidate.window.end,
        |mut candidate| {
            advance_budget_in_place(&mut candidate, now);
            Ok(candidate)
        },
        max_steps,
    )
}

/// Posts a transaction's amount against the budget when it belongs to the
/// budget's categories and falls in the current window.
pub fn apply_transaction(budget: &mut Budget, transaction: &Transaction) -> bool {
    if !counts_toward(budget, transaction) {
        return false;
    }
    budget.record_spending(transaction.amount);
    true
}

/// Reverses [`apply_transaction`] for a deleted or edited posting.
pub fn revert_transaction(budget: &mut Budget, transaction: &Transaction) -> bool {
    if !counts_toward(budget, transaction) {
        return false;
    }
    budget.release_spending(transaction.amount);
    true
}

fn counts_toward(budget: &Budget, transaction: &Transaction) -> bool {
    transaction
        .category_id
        .map(|category| budget.covers_category(category))
        .unwrap_or(false)
        && budget.window.contains(transaction.date)
}
