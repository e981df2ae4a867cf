//! Orchestrates load → catch up → save against the persistence collaborator.

use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use rollover_domain::{Budget, Calendar, Instant, PeriodWindow};

use crate::{
    budget_rollover::catch_up_budget,
    catch_up::DEFAULT_MAX_STEPS,
    recurrence::{post_due_occurrences, validate_recurring},
    storage::BudgetStore,
    time::Clock,
    CoreError,
};

/// Outcome of bringing a stored budget up to date.
#[derive(Debug, Clone, PartialEq)]
pub struct RolloverReport {
    pub budget_id: Uuid,
    pub steps: usize,
    pub archived: usize,
    pub carryover_added: Decimal,
    pub window: PeriodWindow,
}

/// Outcome of posting the due occurrences of a recurring template.
#[derive(Debug, Clone, PartialEq)]
pub struct RecurringReport {
    pub template_id: Uuid,
    pub posted: Vec<Uuid>,
    pub next_due: Option<Instant>,
}

/// Applies the rollover engine to stored documents. Callers must serialize
/// refreshes of the same document; saves are whole-document overwrites.
pub struct RolloverService<S, C> {
    store: S,
    clock: C,
    calendar: Calendar,
    max_steps: usize,
}

impl<S: BudgetStore, C: Clock> RolloverService<S, C> {
    pub fn new(store: S, clock: C, calendar: Calendar) -> Self {
        Self {
            store,
            clock,
            calendar,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// Validates and stores a new budget.
    pub fn create_budget(&self, budget: &Budget) -> Result<(), CoreError> {
        budget.validate()?;
        self.store.save_budget(budget)
    }

    /// Rolls the stored budget forward until its window is current, saving it
    /// only when at least one window closed. Field validation happens once, in
    /// [`Self::create_budget`]; a zero cadence is still rejected here.
    pub fn refresh_budget(&self, id: Uuid) -> Result<RolloverReport, CoreError> {
        let budget = self.store.load_budget(id)?;
        let archived_before = budget.history.len();
        let carryover_before = budget.carryover_amount;

        let caught_up = catch_up_budget(budget, self.clock.now(), self.max_steps)?;
        let budget = caught_up.value;
        let report = RolloverReport {
            budget_id: id,
            steps: caught_up.steps,
            archived: budget.history.len() - archived_before,
            carryover_added: budget.carryover_amount - carryover_before,
            window: budget.window,
        };
        if caught_up.steps > 0 {
            self.store.save_budget(&budget)?;
            info!(
                budget = %id,
                steps = report.steps,
                archived = report.archived,
                "budget rolled over"
            );
        }
        Ok(report)
    }

    /// Posts every occurrence of the stored template that is due now.
    ///
    /// Posted instances are saved first and the advanced template last, only
    /// after every instance write succeeded. Instance ids are stable per due
    /// date, so retrying after a partial failure overwrites the instances
    /// already stored instead of duplicating them.
    pub fn post_recurring(&self, template_id: Uuid) -> Result<RecurringReport, CoreError> {
        let template = self.store.load_transaction(template_id)?;
        if let Some(spec) = template.recurring.as_ref() {
            validate_recurring(spec)?;
        }
        let (posted, next) =
            post_due_occurrences(&template, self.clock.now(), &self.calendar, self.max_steps)?;
        for instance in &posted {
            self.store.save_transaction(instance)?;
        }
        if !posted.is_empty() {
            self.store.save_transaction(&next)?;
            info!(template = %template_id, posted = posted.len(), "recurring occurrences posted");
        }
        Ok(RecurringReport {
            template_id,
            posted: posted.iter().map(|txn| txn.id).collect(),
            next_due: next.recurring.as_ref().map(|spec| spec.date),
        })
    }
}
