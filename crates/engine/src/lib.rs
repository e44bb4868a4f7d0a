//! Expense bookkeeping: the category catalog, fuzzy category matching,
//! filters, aggregation and the SQLite-backed expense store.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use sea_orm::{QueryFilter, QueryOrder, prelude::*};

pub use aggregate::sum_by_category;
pub use error::EngineError;
pub use expenses::{Expense, NewExpense};
pub use filter::{ExpenseFilter, Predicate};
pub use money::Money;
pub use store::ExpenseStore;

pub mod aggregate;
pub mod catalog;
mod error;
mod expenses;
mod filter;
pub mod matcher;
mod money;
mod store;

type ResultEngine<T> = Result<T, EngineError>;

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub struct Engine {
    database: DatabaseConnection,
    timezone: Tz,
    clock: Clock,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("database", &self.database)
            .field("timezone", &self.timezone)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Time zone used to interpret calendar filters.
    #[must_use]
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Stores a new expense, stamping it with the current time.
    pub async fn add_expense(&self, expense: NewExpense) -> ResultEngine<Expense> {
        if expense.amount.is_negative() {
            return Err(EngineError::InvalidAmount(
                "amount must not be negative".to_string(),
            ));
        }

        let created_at = (self.clock)();
        let model = expense
            .into_active_model(created_at)
            .insert(&self.database)
            .await?;
        Ok(model.into())
    }

    /// Lists expenses matching `filter`, newest first.
    pub async fn expenses(&self, filter: &ExpenseFilter) -> ResultEngine<Vec<Expense>> {
        let Some(predicates) = filter.predicates(self.timezone)? else {
            return Ok(Vec::new());
        };

        let models = expenses::Entity::find()
            .apply_predicates(&predicates)
            .order_by_desc(expenses::Column::CreatedAt)
            .order_by_desc(expenses::Column::Id)
            .all(&self.database)
            .await?;

        // Month-of-year has no range form; it is checked on the loaded rows.
        let residual: Vec<&Predicate> = predicates
            .iter()
            .filter(|p| matches!(p, Predicate::MonthOfYear(_)))
            .collect();

        Ok(models
            .into_iter()
            .map(Expense::from)
            .filter(|e| residual.iter().all(|p| p.matches(e, self.timezone)))
            .collect())
    }
}

#[async_trait]
impl ExpenseStore for Engine {
    async fn insert(&self, expense: NewExpense) -> ResultEngine<Expense> {
        self.add_expense(expense).await
    }

    async fn retrieve(&self, filter: &ExpenseFilter) -> ResultEngine<Vec<Expense>> {
        self.expenses(filter).await
    }
}

/// Adds predicate constraints to a query. Values are always passed as bound
/// parameters.
trait ApplyExpensePredicates: QueryFilter + Sized {
    fn apply_predicates(self, predicates: &[Predicate]) -> Self;
}

impl<T> ApplyExpensePredicates for T
where
    T: QueryFilter + Sized,
{
    fn apply_predicates(mut self, predicates: &[Predicate]) -> Self {
        for predicate in predicates {
            self = match predicate {
                Predicate::CreatedWithin { from, to } => self
                    .filter(expenses::Column::CreatedAt.gte(*from))
                    .filter(expenses::Column::CreatedAt.lt(*to)),
                Predicate::CategoryIs(category) => {
                    self.filter(expenses::Column::Category.eq(category.as_str()))
                }
                Predicate::MonthOfYear(_) => self,
            };
        }
        self
    }
}

/// The builder for `Engine`
pub struct EngineBuilder {
    database: DatabaseConnection,
    timezone: Tz,
    clock: Clock,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            database: DatabaseConnection::default(),
            timezone: Tz::UTC,
            clock: Arc::new(Utc::now),
        }
    }
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Time zone for calendar filters (default UTC).
    pub fn timezone(mut self, timezone: Tz) -> EngineBuilder {
        self.timezone = timezone;
        self
    }

    /// Source of creation timestamps (default `Utc::now`).
    pub fn clock<F>(mut self, clock: F) -> EngineBuilder
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
            timezone: self.timezone,
            clock: self.clock,
        })
    }
}
