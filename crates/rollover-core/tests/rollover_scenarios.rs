use chrono::{NaiveDate, NaiveTime, Weekday};
use rollover_core::{advance_budget, advance_recurring, catch_up_budget};
use rollover_domain::{
    Anchor, Budget, BudgetPeriodSpec, Calendar, Instant, PeriodWindow, RecurringKind,
    RecurringSpec,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> Instant {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn eod(y: i32, m: u32, d: u32) -> Instant {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_time(NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap())
}

fn budget(period: BudgetPeriodSpec, created: Instant) -> Budget {
    Budget::new(
        "Household",
        "house",
        [Uuid::new_v4()],
        Some(dec!(100)),
        period,
        created,
    )
    .with_carryover(true)
}

fn later() -> Instant {
    at(2035, 6, 1, 0, 0)
}

#[test]
fn daily_budget_scenario() {
    let mut current = budget(BudgetPeriodSpec::daily(1), at(2022, 1, 27, 22, 31));
    let mut ends = Vec::new();
    let mut carryovers = Vec::new();
    for _ in 0..4 {
        current = advance_budget(&current, later());
        ends.push(current.window.end);
        carryovers.push(current.carryover_amount);
    }
    assert_eq!(
        ends,
        vec![eod(2022, 1, 28), eod(2022, 1, 29), eod(2022, 1, 30), eod(2022, 1, 31)]
    );
    assert_eq!(carryovers, vec![dec!(0), dec!(100), dec!(200), dec!(300)]);
}

#[test]
fn monthly_anchor_last_scenario() {
    let mut current = budget(
        BudgetPeriodSpec::monthly(28, Anchor::Last),
        at(2022, 1, 27, 0, 0),
    );
    let mut ends = Vec::new();
    for _ in 0..3 {
        current = advance_budget(&current, later());
        ends.push(current.window.end);
    }
    assert_eq!(ends, vec![eod(2022, 2, 1), eod(2022, 3, 4), eod(2022, 4, 3)]);
}

#[test]
fn monthly_anchor_first_clamps_in_february() {
    let start = budget(BudgetPeriodSpec::monthly(31, Anchor::First), at(2022, 2, 3, 0, 0));
    assert_eq!(advance_budget(&start, later()).window.end, eod(2022, 2, 28));
}

#[test]
fn selected_weekdays_scenario() {
    // 2022-01-26 is a Wednesday.
    let spec = RecurringSpec::selected_weekdays(at(2022, 1, 26, 0, 0), [Weekday::Mon, Weekday::Wed]);
    let next = advance_recurring(&spec, &Calendar::default()).unwrap();
    assert_eq!(next.date, at(2022, 1, 31, 0, 0));
    assert_eq!(next.last_occurred, at(2022, 1, 26, 0, 0));
}

#[test]
fn budget_windows_strictly_advance() {
    let periods = [
        BudgetPeriodSpec::daily(1),
        BudgetPeriodSpec::daily(3),
        BudgetPeriodSpec::weekly(1),
        BudgetPeriodSpec::weekly(4),
        BudgetPeriodSpec::monthly(1, Anchor::First),
        BudgetPeriodSpec::monthly(31, Anchor::First),
        BudgetPeriodSpec::monthly(1, Anchor::Last),
        BudgetPeriodSpec::monthly(31, Anchor::Last),
        BudgetPeriodSpec::custom(5),
    ];
    for period in periods {
        let mut current = budget(period, at(2023, 12, 30, 17, 45));
        for _ in 0..40 {
            let next = advance_budget(&current, later());
            assert!(
                next.window.end > current.window.end,
                "{} did not advance past {}",
                period,
                current.window.end
            );
            assert_eq!(next.window.start, current.window.end);
            current = next;
        }
    }
}

#[test]
fn recurring_dates_strictly_advance() {
    let start = at(2024, 1, 29, 0, 0);
    let specs = [
        RecurringSpec::daily(start, 1),
        RecurringSpec::weekly(start, 2),
        RecurringSpec::monthly(start, 1),
        RecurringSpec::day_of_month(start, 30, Anchor::First),
        RecurringSpec::day_of_month(start, 2, Anchor::Last),
        RecurringSpec::selected_weekdays(start, [Weekday::Fri]),
    ];
    let calendar = Calendar::default();
    for spec in specs {
        let mut current = spec;
        for _ in 0..30 {
            let next = advance_recurring(&current, &calendar).unwrap();
            assert!(next.date > current.date, "{} stalled at {}", current, current.date);
            assert!(next.last_occurred <= next.date);
            current = next;
        }
        assert_eq!(current.repeated_count, 30);
    }
}

#[test]
fn carryover_is_conserved() {
    let mut current = advance_budget(
        &budget(BudgetPeriodSpec::weekly(1), at(2022, 5, 2, 8, 0)),
        later(),
    );
    for spent in [dec!(0), dec!(99.99), dec!(100), dec!(150), dec!(12.5)] {
        current.spent_amount = spent;
        let before = current.carryover_amount;
        let next = advance_budget(&current, later());
        let expected = if spent < dec!(100) {
            before + (dec!(100) - spent)
        } else {
            before
        };
        assert_eq!(next.carryover_amount, expected);
        assert_eq!(next.spent_amount, Decimal::ZERO);
        current = next;
    }
    assert_eq!(current.history.len(), 5);
}

#[test]
fn archived_history_is_append_only() {
    let mut current = advance_budget(
        &budget(BudgetPeriodSpec::daily(1), at(2022, 1, 1, 0, 0)),
        later(),
    );
    current.spent_amount = dec!(20);
    let first = advance_budget(&current, later());
    let archived = first.history.clone();
    let second = advance_budget(&first, later());
    assert_eq!(&second.history[..archived.len()], &archived[..]);
    assert_eq!(second.history.len(), archived.len() + 1);
}

#[test]
fn round_trip_through_json_preserves_behaviour() {
    let mut original = advance_budget(
        &budget(BudgetPeriodSpec::monthly(15, Anchor::First), at(2022, 1, 3, 9, 0)),
        later(),
    );
    original.spent_amount = dec!(42.17);
    let json = serde_json::to_string(&original).unwrap();
    let reloaded: Budget = serde_json::from_str(&json).unwrap();
    assert_eq!(reloaded, original);
    assert_eq!(advance_budget(&reloaded, later()), advance_budget(&original, later()));

    let spec = RecurringSpec::day_of_month(at(2022, 1, 3, 0, 0), 2, Anchor::Last);
    let reloaded_spec: RecurringSpec =
        serde_json::from_str(&serde_json::to_string(&spec).unwrap()).unwrap();
    let calendar = Calendar::default();
    assert_eq!(
        advance_recurring(&reloaded_spec, &calendar).unwrap(),
        advance_recurring(&spec, &calendar).unwrap()
    );
}

#[test]
fn long_absence_catches_up_in_one_call() {
    let start = budget(BudgetPeriodSpec::monthly(1, Anchor::First), at(2020, 3, 10, 12, 0))
        .with_window(PeriodWindow::new(at(2020, 3, 1, 0, 0), eod(2020, 3, 31)).unwrap());
    let now = at(2022, 7, 4, 8, 0);
    let result = catch_up_budget(start, now, 1_000).unwrap();
    assert!(result.value.window.contains(now));
    assert_eq!(result.value.window.end, eod(2022, 8, 1));
    assert_eq!(result.value.history.len(), result.steps);
}

#[test]
fn none_kind_never_moves() {
    let spec = RecurringSpec::new(RecurringKind::None, at(2022, 1, 1, 0, 0), 1);
    let next = advance_recurring(&spec, &Calendar::default()).unwrap();
    assert_eq!(next, spec);
}
