use std::{collections::BTreeSet, fmt};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    common::{Instant, Money},
    period::{BudgetPeriodSpec, PeriodWindow},
};

/// A spending allotment over one or more categories that renews every period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub categories: BTreeSet<Uuid>,
    #[serde(default)]
    pub budget_amount: Option<Money>,
    #[serde(default)]
    pub spent_amount: Money,
    #[serde(default)]
    pub carryover: bool,
    #[serde(default)]
    pub carryover_amount: Money,
    pub period: BudgetPeriodSpec,
    pub window: PeriodWindow,
    pub created_at: Instant,
    #[serde(default)]
    pub history: Vec<BudgetHistoryEntry>,
    #[serde(default)]
    pub order: i32,
}

impl Budget {
    /// Creates a budget whose first window is empty at `created_at`; the first
    /// rollover opens the first real period.
    pub fn new(
        name: impl Into<String>,
        icon: impl Into<String>,
        categories: impl IntoIterator<Item = Uuid>,
        budget_amount: Option<Money>,
        period: BudgetPeriodSpec,
        created_at: Instant,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            icon: icon.into(),
            categories: categories.into_iter().collect(),
            budget_amount,
            spent_amount: Decimal::ZERO,
            carryover: false,
            carryover_amount: Decimal::ZERO,
            period,
            window: PeriodWindow::at(created_at),
            created_at,
            history: Vec::new(),
            order: 0,
        }
    }

    pub fn with_window(mut self, window: PeriodWindow) -> Self {
        self.window = window;
        self
    }

    pub fn with_carryover(mut self, enabled: bool) -> Self {
        self.carryover = enabled;
        self
    }

    pub fn covers_category(&self, category_id: Uuid) -> bool {
        self.categories.contains(&category_id)
    }

    /// Allotment plus accumulated carryover.
    pub fn available(&self) -> Money {
        self.budget_amount.unwrap_or(Decimal::ZERO) + self.carryover_amount
    }

    pub fn remaining(&self) -> Money {
        self.available() - self.spent_amount
    }

    pub fn record_spending(&mut self, amount: Money) {
        self.spent_amount += amount;
    }

    /// Reverses a previous posting; spend never drops below zero.
    pub fn release_spending(&mut self, amount: Money) {
        self.spent_amount = (self.spent_amount - amount).max(Decimal::ZERO);
    }

    /// Freezes the current window into an immutable history record.
    pub fn snapshot(&self) -> BudgetHistoryEntry {
        BudgetHistoryEntry {
            window: self.window,
            budget_amount: self.budget_amount,
            spent_amount: self.spent_amount,
            carryover_amount: self.carryover_amount,
            categories: self.categories.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        let mut issues = Vec::new();
        if self.name.trim().is_empty() {
            issues.push(BudgetIssue::MissingName);
        }
        if self.icon.trim().is_empty() {
            issues.push(BudgetIssue::MissingIcon);
        }
        if self.categories.is_empty() {
            issues.push(BudgetIssue::NoCategories);
        }
        if self.period.amount == 0 {
            issues.push(BudgetIssue::ZeroCadence);
        }
        if issues.is_empty() {
            Ok(())
        } else {
            Err(BudgetValidationError { issues })
        }
    }
}

/// Archived state of a closed budget window. Never mutated once recorded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetHistoryEntry {
    pub window: PeriodWindow,
    pub budget_amount: Option<Money>,
    pub spent_amount: Money,
    pub carryover_amount: Money,
    pub categories: BTreeSet<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetIssue {
    MissingName,
    MissingIcon,
    NoCategories,
    ZeroCadence,
}

impl fmt::Display for BudgetIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetIssue::MissingName => "name is required",
            BudgetIssue::MissingIcon => "icon is required",
            BudgetIssue::NoCategories => "at least one category is required",
            BudgetIssue::ZeroCadence => "period amount must be at least 1",
        };
        f.write_str(label)
    }
}

/// Every rule a budget failed, reported before any rollover is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetValidationError {
    pub issues: Vec<BudgetIssue>,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.issues.iter().map(ToString::to_string).collect();
        write!(f, "invalid budget: {}", labels.join(", "))
    }
}

impl std::error::Error for BudgetValidationError {}
