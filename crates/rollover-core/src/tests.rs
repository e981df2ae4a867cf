use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{NaiveDate, Weekday};
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::{BudgetStore, CoreError, FixedClock, MemoryStore, RolloverService};
use rollover_domain::{
    Budget, BudgetPeriodSpec, Calendar, Instant, RecurringSpec, Transaction,
};

fn at(y: i32, m: u32, d: u32, h: u32) -> Instant {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

fn service(now: Instant) -> RolloverService<MemoryStore, FixedClock> {
    RolloverService::new(MemoryStore::new(), FixedClock(now), Calendar::default())
}

fn weekly_budget() -> Budget {
    Budget::new(
        "Dining",
        "fork",
        [Uuid::new_v4()],
        Some(dec!(80)),
        BudgetPeriodSpec::weekly(1),
        at(2022, 1, 3, 10),
    )
    .with_carryover(true)
}

#[test]
fn create_budget_rejects_invalid_budgets() {
    let svc = service(at(2022, 1, 3, 12));
    let mut budget = weekly_budget();
    budget.icon.clear();

    let err = svc.create_budget(&budget).unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
    assert!(svc.store().load_budget(budget.id).is_err());
}

#[test]
fn refresh_budget_rolls_forward_and_saves() {
    let svc = service(at(2022, 1, 26, 12));
    let budget = weekly_budget();
    svc.create_budget(&budget).expect("create budget");

    let report = svc.refresh_budget(budget.id).expect("refresh");
    // Windows end on Jan 10, 17, 24 and 31.
    assert_eq!(report.steps, 4);
    assert_eq!(report.archived, 3);
    assert_eq!(report.carryover_added, dec!(240));
    assert!(report.window.contains(at(2022, 1, 26, 12)));

    let stored = svc.store().load_budget(budget.id).expect("stored");
    assert_eq!(stored.window, report.window);
    assert_eq!(stored.history.len(), 3);
}

#[test]
fn refresh_of_current_budget_is_a_no_op() {
    let svc = service(at(2022, 1, 26, 12));
    let budget = weekly_budget();
    svc.create_budget(&budget).expect("create budget");
    svc.refresh_budget(budget.id).expect("first refresh");

    let again = svc.refresh_budget(budget.id).expect("second refresh");
    assert_eq!(again.steps, 0);
    assert_eq!(again.archived, 0);
    assert_eq!(again.carryover_added, dec!(0));
}

#[test]
fn refresh_honours_step_bound() {
    let svc = service(at(2030, 1, 1, 0)).with_max_steps(10);
    let budget = weekly_budget();
    svc.create_budget(&budget).expect("create budget");

    let err = svc.refresh_budget(budget.id).unwrap_err();
    assert!(matches!(err, CoreError::CatchUpLimit { steps: 10 }));
}

#[test]
fn missing_documents_are_reported() {
    let svc = service(at(2022, 1, 1, 0));
    let id = Uuid::new_v4();
    assert!(matches!(svc.refresh_budget(id), Err(CoreError::BudgetNotFound(found)) if found == id));
    assert!(matches!(svc.post_recurring(id), Err(CoreError::TransactionNotFound(_))));
}

#[test]
fn post_recurring_saves_instances_and_template() {
    let svc = service(at(2022, 3, 15, 9));
    let template = Transaction::new("Rent", dec!(950), None, at(2022, 1, 1, 0))
        .with_recurring(RecurringSpec::monthly(at(2022, 1, 1, 0), 1));
    svc.store().save_transaction(&template).expect("seed");

    let report = svc.post_recurring(template.id).expect("post");
    assert_eq!(report.posted.len(), 3);
    assert_eq!(report.next_due, Some(at(2022, 4, 1, 0)));

    let all = svc.store().transactions().expect("list");
    assert_eq!(all.len(), 4);
    let stored_template = svc.store().load_transaction(template.id).expect("template");
    let spec = stored_template.recurring.expect("spec");
    assert_eq!(spec.repeated_count, 3);
    assert_eq!(spec.last_occurred, at(2022, 3, 1, 0));
}

#[test]
fn post_recurring_rejects_broken_specs() {
    let svc = service(at(2022, 3, 15, 9));
    let template = Transaction::new("Gym", dec!(30), None, at(2022, 1, 1, 0))
        .with_recurring(RecurringSpec::selected_weekdays(at(2022, 1, 1, 0), Vec::<Weekday>::new()));
    svc.store().save_transaction(&template).expect("seed");

    assert!(matches!(
        svc.post_recurring(template.id),
        Err(CoreError::InvalidSpec(_))
    ));
}

#[test]
fn refresh_rolls_stored_budget_without_icon() {
    let svc = service(at(2022, 1, 26, 12));
    let budget = weekly_budget();
    svc.create_budget(&budget).expect("create budget");

    let mut json = serde_json::to_value(&budget).expect("to json");
    json.as_object_mut().expect("object").remove("icon");
    let stored: Budget = serde_json::from_value(json).expect("from json");
    assert!(stored.icon.is_empty());
    svc.store().save_budget(&stored).expect("overwrite");

    let report = svc.refresh_budget(budget.id).expect("refresh");
    assert_eq!(report.steps, 4);
}

/// Store whose transaction writes fail once a countdown reaches zero.
struct FlakyStore {
    inner: MemoryStore,
    writes_left: AtomicUsize,
}

impl FlakyStore {
    fn failing_after(writes: usize) -> Self {
        Self {
            inner: MemoryStore::new(),
            writes_left: AtomicUsize::new(writes),
        }
    }

    fn heal(&self) {
        self.writes_left.store(usize::MAX, Ordering::SeqCst);
    }
}

impl BudgetStore for FlakyStore {
    fn load_budget(&self, id: Uuid) -> Result<Budget, CoreError> {
        self.inner.load_budget(id)
    }

    fn save_budget(&self, budget: &Budget) -> Result<(), CoreError> {
        self.inner.save_budget(budget)
    }

    fn load_transaction(&self, id: Uuid) -> Result<Transaction, CoreError> {
        self.inner.load_transaction(id)
    }

    fn save_transaction(&self, transaction: &Transaction) -> Result<(), CoreError> {
        let left = self.writes_left.load(Ordering::SeqCst);
        if left == 0 {
            return Err(CoreError::Storage("disk full".into()));
        }
        self.writes_left.store(left - 1, Ordering::SeqCst);
        self.inner.save_transaction(transaction)
    }
}

#[test]
fn retry_after_partial_post_does_not_duplicate() {
    let template = Transaction::new("Rent", dec!(950), None, at(2022, 1, 1, 0))
        .with_recurring(RecurringSpec::monthly(at(2022, 1, 1, 0), 1));
    // One write seeds the template, two instances succeed, the third fails.
    let store = FlakyStore::failing_after(3);
    store.save_transaction(&template).expect("seed");
    let svc = RolloverService::new(store, FixedClock(at(2022, 3, 15, 9)), Calendar::default());

    assert!(matches!(
        svc.post_recurring(template.id),
        Err(CoreError::Storage(_))
    ));
    let untouched = svc.store().load_transaction(template.id).expect("template");
    assert_eq!(untouched.recurring.expect("spec").repeated_count, 0);

    svc.store().heal();
    let report = svc.post_recurring(template.id).expect("retry");
    assert_eq!(report.posted.len(), 3);
    assert_eq!(svc.store().inner.transactions().expect("list").len(), 4);
}
