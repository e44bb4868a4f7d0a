//! Storage seam used by the conversation layer.

use async_trait::async_trait;

use crate::{Expense, ExpenseFilter, NewExpense, ResultEngine};

/// Append-only expense storage.
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Stores a new expense. The store assigns id and creation time.
    async fn insert(&self, expense: NewExpense) -> ResultEngine<Expense>;

    /// Returns the expenses matching every constraint of `filter`, newest
    /// first.
    async fn retrieve(&self, filter: &ExpenseFilter) -> ResultEngine<Vec<Expense>>;
}
