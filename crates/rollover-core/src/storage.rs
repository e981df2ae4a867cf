use std::{collections::HashMap, sync::Mutex};

use uuid::Uuid;

use rollover_domain::{Budget, Transaction};

use crate::CoreError;

/// Persistence collaborator: whole-document load and last-write-wins save.
pub trait BudgetStore: Send + Sync {
    fn load_budget(&self, id: Uuid) -> Result<Budget, CoreError>;
    fn save_budget(&self, budget: &Budget) -> Result<(), CoreError>;
    fn load_transaction(&self, id: Uuid) -> Result<Transaction, CoreError>;
    fn save_transaction(&self, transaction: &Transaction) -> Result<(), CoreError>;
}

/// Process-local store keeping full document copies.
#[derive(Debug, Default)]
pub struct MemoryStore {
    budgets: Mutex<HashMap<Uuid, Budget>>,
    transactions: Mutex<HashMap<Uuid, Transaction>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transactions(&self) -> Result<Vec<Transaction>, CoreError> {
        let guard = self
            .transactions
            .lock()
            .map_err(|err| CoreError::Storage(err.to_string()))?;
        let mut all: Vec<Transaction> = guard.values().cloned().collect();
        all.sort_by_key(|txn| txn.date);
        Ok(all)
    }
}

impl BudgetStore for MemoryStore {
    fn load_budget(&self, id: Uuid) -> Result<Budget, CoreError> {
        let guard = self
            .budgets
            .lock()
            .map_err(|err| CoreError::Storage(err.to_string()))?;
        guard.get(&id).cloned().ok_or(CoreError::BudgetNotFound(id))
    }

    fn save_budget(&self, budget: &Budget) -> Result<(), CoreError> {
        let mut guard = self
            .budgets
            .lock()
            .map_err(|err| CoreError::Storage(err.to_string()))?;
        guard.insert(budget.id, budget.clone());
        Ok(())
    }

    fn load_transaction(&self, id: Uuid) -> Result<Transaction, CoreError> {
        let guard = self
            .transactions
            .lock()
            .map_err(|err| CoreError::Storage(err.to_string()))?;
        guard
            .get(&id)
            .cloned()
            .ok_or(CoreError::TransactionNotFound(id))
    }

    fn save_transaction(&self, transaction: &Transaction) -> Result<(), CoreError> {
        let mut guard = self
            .transactions
            .lock()
            .map_err(|err| CoreError::Storage(err.to_string()))?;
        guard.insert(transaction.id, transaction.clone());
        Ok(())
    }
}
