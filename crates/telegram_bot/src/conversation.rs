//! Per-state handling of free text inside an open session.

use engine::{ExpenseFilter, ExpenseStore, NewExpense, matcher, sum_by_category};
use teloxide::types::UserId;

use crate::{
    parsing::{ParseError, parse_amount, parse_query},
    state::SessionState,
    ui::{self, Keyboard, Reply},
};

/// Result of feeding one text message to a session.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Step {
    /// `None` closes the session.
    pub next: Option<SessionState>,
    pub replies: Vec<Reply>,
}

impl Step {
    fn stay(state: SessionState, reply: Reply) -> Self {
        Self {
            next: Some(state),
            replies: vec![reply],
        }
    }

    fn done(replies: Vec<Reply>) -> Self {
        Self {
            next: None,
            replies,
        }
    }
}

pub(crate) struct Context<'a> {
    pub user_id: UserId,
    pub store: &'a dyn ExpenseStore,
}

pub(crate) async fn advance(state: SessionState, text: &str, ctx: &Context<'_>) -> Step {
    match state {
        SessionState::AwaitingCategory => {
            let category = text.to_string();
            tracing::debug!(user = ctx.user_id.0, %category, "category chosen");
            Step::stay(
                SessionState::AwaitingAmount { category },
                Reply::text(ui::ASK_AMOUNT).with_keyboard(Keyboard::Remove),
            )
        }
        SessionState::AwaitingAmount { category } => match parse_amount(text) {
            Ok(amount) => Step::stay(
                SessionState::AwaitingComment { category, amount },
                Reply::text(ui::ASK_COMMENT),
            ),
            Err(err) => {
                tracing::debug!(user = ctx.user_id.0, input = text, "{err}");
                Step::stay(
                    SessionState::AwaitingAmount { category },
                    Reply::text(ui::REASK_AMOUNT),
                )
            }
        },
        SessionState::AwaitingComment { category, amount } => {
            let user_id = ctx.user_id.0.to_string();
            let expense = match NewExpense::new(user_id, category, amount, text) {
                Ok(expense) => expense,
                Err(err) => {
                    tracing::error!("refusing expense: {err}");
                    return Step::done(vec![Reply::text(ui::SAVE_FAILED)]);
                }
            };
            match ctx.store.insert(expense).await {
                Ok(saved) => {
                    tracing::info!(
                        user = ctx.user_id.0,
                        id = saved.id,
                        category = %saved.category,
                        amount = %saved.amount,
                        "expense recorded"
                    );
                    Step::done(vec![Reply::text(ui::SAVED)])
                }
                Err(err) => {
                    tracing::error!("failed to store expense: {err}");
                    Step::done(vec![Reply::text(ui::SAVE_FAILED)])
                }
            }
        }
        SessionState::AwaitingSpecificQuery => {
            let query = match parse_query(text) {
                Ok(query) => query,
                Err(err) => {
                    let reask = match err {
                        ParseError::InvalidMonth => ui::REASK_MONTH,
                        ParseError::InvalidYear | ParseError::InvalidAmount => ui::REASK_YEAR,
                    };
                    return Step::stay(SessionState::AwaitingSpecificQuery, Reply::text(reask));
                }
            };

            let mut replies = Vec::new();
            let mut filter = ExpenseFilter {
                year: Some(query.year),
                month: query.month,
                ..ExpenseFilter::default()
            };
            if let Some(raw) = query.category {
                match matcher::resolve(&raw) {
                    Some(category) => filter = filter.with_category(category),
                    None => {
                        tracing::debug!(input = %raw, "no category matches");
                        replies.push(Reply::text(ui::CATEGORY_NOT_FOUND));
                    }
                }
            }

            replies.push(summary(ctx.store, &filter).await);
            Step::done(replies)
        }
    }
}

/// Retrieves the expenses matching `filter` and renders their totals.
pub(crate) async fn summary(store: &dyn ExpenseStore, filter: &ExpenseFilter) -> Reply {
    match store.retrieve(filter).await {
        Ok(expenses) if expenses.is_empty() => Reply::text(ui::NOTHING_FOUND),
        Ok(expenses) => {
            let totals = sum_by_category(&expenses);
            Reply::text(ui::render_summary(&ui::summary_title(filter), &totals))
        }
        Err(err) => {
            tracing::error!("failed to retrieve expenses: {err}");
            Reply::text(ui::QUERY_FAILED)
        }
    }
}

#[cfg(test)]
mod tests {
    use engine::{Money, catalog};

    use super::*;
    use crate::testing::MemoryStore;

    fn ctx(store: &MemoryStore) -> Context<'_> {
        Context {
            user_id: UserId(7),
            store,
        }
    }

    #[tokio::test]
    async fn category_is_kept_verbatim() {
        let store = MemoryStore::default();
        let step = advance(
            SessionState::AwaitingCategory,
            " κάτι  άλλο ",
            &ctx(&store),
        )
        .await;
        assert_eq!(
            step.next,
            Some(SessionState::AwaitingAmount {
                category: " κάτι  άλλο ".to_string()
            })
        );
        assert_eq!(step.replies[0].keyboard, Keyboard::Remove);
    }

    #[tokio::test]
    async fn amount_with_comma_moves_to_comment() {
        let store = MemoryStore::default();
        let state = SessionState::AwaitingAmount {
            category: catalog::FOOD.to_string(),
        };

        let step = advance(state, "12,5", &ctx(&store)).await;

        assert_eq!(
            step.next,
            Some(SessionState::AwaitingComment {
                category: catalog::FOOD.to_string(),
                amount: Money::new(1250),
            })
        );
        assert_eq!(step.replies, vec![Reply::text(ui::ASK_COMMENT)]);
    }

    #[tokio::test]
    async fn bad_amount_asks_again() {
        let store = MemoryStore::default();
        let state = SessionState::AwaitingAmount {
            category: catalog::FOOD.to_string(),
        };

        let step = advance(state.clone(), "abc", &ctx(&store)).await;

        assert_eq!(step.next, Some(state));
        assert_eq!(step.replies, vec![Reply::text(ui::REASK_AMOUNT)]);
    }

    #[tokio::test]
    async fn comment_stores_and_closes() {
        let store = MemoryStore::default();
        let state = SessionState::AwaitingComment {
            category: catalog::FOOD.to_string(),
            amount: Money::new(720),
        };

        let step = advance(state, "lunch", &ctx(&store)).await;

        assert_eq!(step.next, None);
        assert_eq!(step.replies, vec![Reply::text(ui::SAVED)]);
        let saved = store.expenses();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].user_id, "7");
        assert_eq!(saved[0].comment, "lunch");
    }

    #[tokio::test]
    async fn failed_insert_closes_with_failure() {
        let store = MemoryStore::failing();
        let state = SessionState::AwaitingComment {
            category: catalog::FOOD.to_string(),
            amount: Money::new(720),
        };

        let step = advance(state, "lunch", &ctx(&store)).await;

        assert_eq!(step.next, None);
        assert_eq!(step.replies, vec![Reply::text(ui::SAVE_FAILED)]);
    }

    #[tokio::test]
    async fn query_resolves_fuzzy_category() {
        let store = MemoryStore::default();

        let step = advance(
            SessionState::AwaitingSpecificQuery,
            "2021 5 ψιλικα",
            &ctx(&store),
        )
        .await;

        assert_eq!(step.next, None);
        assert_eq!(step.replies, vec![Reply::text(ui::NOTHING_FOUND)]);
        assert_eq!(
            store.filters(),
            vec![ExpenseFilter::month(2021, 5).with_category(catalog::PSILIKA)]
        );
    }

    #[tokio::test]
    async fn unknown_category_is_dropped_with_notice() {
        let store = MemoryStore::default();

        let step = advance(
            SessionState::AwaitingSpecificQuery,
            "2021 5 xyz123",
            &ctx(&store),
        )
        .await;

        assert_eq!(step.replies[0], Reply::text(ui::CATEGORY_NOT_FOUND));
        assert_eq!(store.filters(), vec![ExpenseFilter::month(2021, 5)]);
    }

    #[tokio::test]
    async fn bad_month_asks_again() {
        let store = MemoryStore::default();

        let step = advance(SessionState::AwaitingSpecificQuery, "2021 13", &ctx(&store)).await;

        assert_eq!(step.next, Some(SessionState::AwaitingSpecificQuery));
        assert_eq!(step.replies, vec![Reply::text(ui::REASK_MONTH)]);
        assert!(store.filters().is_empty());
    }

    #[tokio::test]
    async fn failed_query_reports_failure() {
        let store = MemoryStore::failing();

        let step = advance(SessionState::AwaitingSpecificQuery, "2021", &ctx(&store)).await;

        assert_eq!(step.next, None);
        assert_eq!(step.replies, vec![Reply::text(ui::QUERY_FAILED)]);
    }
}
