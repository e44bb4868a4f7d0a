//! Per-category totals.

use std::collections::HashMap;

use crate::{Expense, Money};

/// Sums amounts per category.
///
/// Keys are exactly the categories present in `expenses`. No grand-total
/// entry is added: callers that want one sum the values.
#[must_use]
pub fn sum_by_category(expenses: &[Expense]) -> HashMap<String, Money> {
    let mut totals: HashMap<String, Money> = HashMap::new();
    for expense in expenses {
        *totals.entry(expense.category.clone()).or_default() += expense.amount;
    }
    totals
}
