//! The fixed list of spending categories.
//!
//! The same list feeds the category keyboard shown to users and the fuzzy
//! matcher, so what users can pick and what free text can resolve to never
//! diverge.

pub const PSILIKA: &str = "Ψιλικά";
pub const FOOD: &str = "Φαγητό";
pub const LESSONS: &str = "Ψ/Γ/Πιλάτες";
pub const PURCHASES: &str = "Αγορές";
pub const COFFEE: &str = "Καφέδες";
pub const ENTERTAINMENT: &str = "Διασκέδαση";
pub const GAS: &str = "Βενζίνες";
pub const BILLS: &str = "Λογαριασμοί";
pub const SUPERMARKET: &str = "Σούπερ-Λαική";
pub const OTHER: &str = "Άλλο";

const CATEGORIES: [&str; 10] = [
    PSILIKA,
    FOOD,
    LESSONS,
    PURCHASES,
    COFFEE,
    ENTERTAINMENT,
    GAS,
    BILLS,
    SUPERMARKET,
    OTHER,
];

/// Buttons per keyboard row.
const ROW_LEN: usize = 5;

/// All categories, in catalog order.
#[must_use]
pub fn list() -> &'static [&'static str] {
    &CATEGORIES
}

/// Position of `name` in the catalog (exact match).
#[must_use]
pub fn position(name: &str) -> Option<usize> {
    CATEGORIES.iter().position(|c| *c == name)
}

/// The catalog split into keyboard rows.
pub fn keyboard_rows() -> impl Iterator<Item = &'static [&'static str]> {
    CATEGORIES.chunks(ROW_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_ten_distinct_entries() {
        let all = list();
        assert_eq!(all.len(), 10);
        for (idx, name) in all.iter().enumerate() {
            assert_eq!(position(name), Some(idx));
        }
    }

    #[test]
    fn keyboard_covers_catalog_in_order() {
        let rows: Vec<_> = keyboard_rows().collect();
        assert_eq!(rows.len(), 2);
        let flat: Vec<&str> = rows.concat();
        assert_eq!(flat, list());
    }

    #[test]
    fn unknown_names_have_no_position() {
        assert_eq!(position("ψιλικά"), None);
        assert_eq!(position(""), None);
    }
}
