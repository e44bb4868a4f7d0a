//! Expense records.
//!
//! An `Expense` is immutable once stored: the store assigns `id` and
//! `created_at`, and nothing in the engine updates or deletes rows.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::{EngineError, Money, ResultEngine};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub user_id: String,
    pub category: String,
    pub amount: Money,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for a new expense, before the store assigns id and timestamp.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewExpense {
    pub user_id: String,
    pub category: String,
    pub amount: Money,
    pub comment: String,
}

impl NewExpense {
    pub fn new(
        user_id: impl Into<String>,
        category: impl Into<String>,
        amount: Money,
        comment: impl Into<String>,
    ) -> ResultEngine<Self> {
        if amount.is_negative() {
            return Err(EngineError::InvalidAmount(
                "amount must not be negative".to_string(),
            ));
        }
        Ok(Self {
            user_id: user_id.into(),
            category: category.into(),
            amount,
            comment: comment.into(),
        })
    }

    pub(crate) fn into_active_model(self, created_at: DateTime<Utc>) -> ActiveModel {
        ActiveModel {
            id: ActiveValue::NotSet,
            user_id: ActiveValue::Set(self.user_id),
            category: ActiveValue::Set(self.category),
            amount_minor: ActiveValue::Set(self.amount.cents()),
            comment: ActiveValue::Set(self.comment),
            created_at: ActiveValue::Set(created_at),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: String,
    pub category: String,
    pub amount_minor: i64,
    pub comment: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Expense {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            category: model.category,
            amount: Money::new(model.amount_minor),
            comment: model.comment,
            created_at: model.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_expense_rejects_negative_amount() {
        let err = NewExpense::new("1", "Φαγητό", Money::new(-1), "").unwrap_err();
        assert!(matches!(err, EngineError::InvalidAmount(_)));
    }

    #[test]
    fn new_expense_accepts_zero_and_empty_comment() {
        let new = NewExpense::new("1", "Άλλο", Money::ZERO, "").unwrap();
        assert_eq!(new.amount, Money::ZERO);
        assert!(new.comment.is_empty());
    }
}
