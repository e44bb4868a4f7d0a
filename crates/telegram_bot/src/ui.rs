use std::collections::HashMap;

use engine::{ExpenseFilter, Money, catalog};
use teloxide::types::{KeyboardButton, KeyboardMarkup};

pub(crate) const ASK_CATEGORY: &str = "Καινούριο έξοδο ε;\nΕπίλεξε κατηγορία:";
pub(crate) const ASK_AMOUNT: &str = "Πόσα ξόδεψες;";
pub(crate) const REASK_AMOUNT: &str = "Δεν μπορώ να καταλάβω πόσα ξόδεψες. Πες μου ξανά.";
pub(crate) const ASK_COMMENT: &str = "Δώσε μου και ένα σχόλιο.";
pub(crate) const SAVED: &str = "Ευχαριστώ! Τα κατέγραψα.";
pub(crate) const SAVE_FAILED: &str = "Κάτι πήγε λάθος. Ξεκίνα ξανά με /new.";
pub(crate) const ASK_QUERY: &str =
    "Γράψε τον χρόνο, τον μήνα και την κατηγορία (π.χ. 2021 5 Ψιλικά).";
pub(crate) const REASK_YEAR: &str = "Δεν μπορώ να καταλάβω τον χρόνο. Πες μου ξανά.";
pub(crate) const REASK_MONTH: &str = "Δεν μπορώ να καταλάβω τον μήνα. Πες μου ξανά.";
pub(crate) const CATEGORY_NOT_FOUND: &str =
    "Η συγκεκριμένη κατηγορία δεν βρέθηκε, υπολογίζω για όλες.";
pub(crate) const QUERY_FAILED: &str = "Κάτι πήγε στραβά. Προσπάθησε ξανά.";
pub(crate) const NOTHING_FOUND: &str = "Δεν βρήκα τίποτα.";
pub(crate) const CANCELLED: &str = "Έγινε ακύρωση. Όλα καλά.";
pub(crate) const NOT_YOU: &str = "Εσένα δεν σου μιλάω (ακόμα).";

/// What to do with the custom keyboard when a reply is sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keyboard {
    Unchanged,
    Categories,
    Remove,
}

/// An outbound message for the chat the triggering update came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Keyboard,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: Keyboard::Unchanged,
        }
    }

    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = keyboard;
        self
    }
}

pub(crate) fn category_keyboard() -> KeyboardMarkup {
    let rows: Vec<Vec<KeyboardButton>> = catalog::keyboard_rows()
        .map(|row| row.iter().map(|name| KeyboardButton::new(*name)).collect())
        .collect();
    KeyboardMarkup::new(rows).resize_keyboard()
}

pub(crate) fn help_text() -> &'static str {
    "Δεν καταλαβαίνω τι λες. Μπορείς όμως να κάνεις τα εξής:\n\
     /new για να δηλώσεις ένα καινούριο έξοδο\n\
     /month για να δεις τι έχεις ξοδέψει σύνολο αυτόν τον μήνα\n\
     /month_specific για να δεις τι έχεις ξοδέψει βάσει χρόνου, μήνα και κατηγορίας\n\
     /cancel για να ακυρώσεις ό,τι κάνουμε"
}

/// Heading naming the period (and category) a summary covers.
pub(crate) fn summary_title(filter: &ExpenseFilter) -> String {
    let period = match (filter.year, filter.month) {
        (Some(year), Some(month)) => format!("Έξοδα για {month}/{year}"),
        (Some(year), None) => format!("Έξοδα για το {year}"),
        (None, Some(month)) => format!("Έξοδα για τον μήνα {month}"),
        (None, None) => "Έξοδα".to_string(),
    };
    match &filter.category {
        Some(category) => format!("{period} ({category}):"),
        None => format!("{period}:"),
    }
}

/// Renders per-category totals, catalog categories first in catalog order,
/// then free-text ones by name, followed by the overall total.
pub(crate) fn render_summary(title: &str, totals: &HashMap<String, Money>) -> String {
    let mut rows: Vec<(&String, &Money)> = totals.iter().collect();
    rows.sort_by(|(a, _), (b, _)| {
        let rank = |name: &str| catalog::position(name).unwrap_or(usize::MAX);
        rank(a).cmp(&rank(b)).then_with(|| a.cmp(b))
    });

    let mut text = String::from(title);
    for (category, amount) in rows {
        text.push_str(&format!("\n- {category}: {amount}"));
    }
    let total: Money = totals.values().sum();
    text.push_str(&format!("\n\nΣύνολο: {total}"));
    text
}
