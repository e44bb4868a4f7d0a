//! In-memory store for exercising the conversation without a database.

use std::sync::{
    Mutex,
    atomic::{AtomicI64, Ordering},
};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use engine::{EngineError, Expense, ExpenseFilter, ExpenseStore, NewExpense};
use sea_orm::DbErr;

#[derive(Default)]
pub(crate) struct MemoryStore {
    expenses: Mutex<Vec<Expense>>,
    filters: Mutex<Vec<ExpenseFilter>>,
    next_id: AtomicI64,
    fail: bool,
}

impl MemoryStore {
    /// A store whose every call fails with a database error.
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn expenses(&self) -> Vec<Expense> {
        self.expenses.lock().unwrap().clone()
    }

    /// Filters passed to `retrieve`, in call order.
    pub(crate) fn filters(&self) -> Vec<ExpenseFilter> {
        self.filters.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), EngineError> {
        if self.fail {
            return Err(DbErr::Custom("store unavailable".to_string()).into());
        }
        Ok(())
    }
}

#[async_trait]
impl ExpenseStore for MemoryStore {
    async fn insert(&self, expense: NewExpense) -> Result<Expense, EngineError> {
        self.check()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let saved = Expense {
            id,
            user_id: expense.user_id,
            category: expense.category,
            amount: expense.amount,
            comment: expense.comment,
            created_at: Utc.with_ymd_and_hms(2021, 5, 15, 12, 0, 0).unwrap(),
        };
        self.expenses.lock().unwrap().push(saved.clone());
        Ok(saved)
    }

    async fn retrieve(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>, EngineError> {
        self.filters.lock().unwrap().push(filter.clone());
        self.check()?;
        let expenses = self.expenses.lock().unwrap();
        let mut found = Vec::new();
        for expense in expenses.iter().rev() {
            if filter.matches(expense, chrono_tz::UTC)? {
                found.push(expense.clone());
            }
        }
        Ok(found)
    }
}
