//! Resolves free text typed by users to a catalog category.

use deunicode::deunicode_char;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::catalog;

/// Inputs closer than this many edits to a category match it.
const MAX_DISTANCE: usize = 3;

/// Returns the first catalog category (in catalog order) whose slug is
/// fewer than [`MAX_DISTANCE`] edits away from the slug of `input`.
///
/// The first hit wins even when a later category is closer.
#[must_use]
pub fn resolve(input: &str) -> Option<&'static str> {
    let needle = slug(input);
    if needle.is_empty() {
        return None;
    }

    catalog::list()
        .iter()
        .copied()
        .find(|category| strsim::levenshtein(&needle, &slug(category)) < MAX_DISTANCE)
}

/// URL-safe form of `input`: accents dropped, letters transliterated to
/// lowercase ASCII, every run of anything else collapsed to a single `-`.
pub(crate) fn slug(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_dash = false;
    for ch in input.nfkd().filter(|c| !is_combining_mark(*c)) {
        let ascii = deunicode_char(ch).unwrap_or(" ");
        for ch in ascii.chars() {
            if ch.is_ascii_alphanumeric() {
                if pending_dash && !out.is_empty() {
                    out.push('-');
                }
                pending_dash = false;
                out.push(ch.to_ascii_lowercase());
            } else {
                pending_dash = true;
            }
        }
    }
    out
}
