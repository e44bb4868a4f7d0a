use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Expense amount in **integer cents**.
///
/// Amounts typed by users are decimals with up to two fractional digits, so
/// storing cents keeps sums exact. Expenses are never negative: parsing
/// rejects a leading minus sign.
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!("12,50".parse::<Money>().unwrap(), Money::new(1250));
/// assert_eq!("12.5".parse::<Money>().unwrap().cents(), 1250);
/// assert_eq!(Money::new(720).to_string(), "7.20€");
/// assert!("-3".parse::<Money>().is_err());
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates an amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}€", abs / 100, abs % 100)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses a user-typed decimal amount.
    ///
    /// `,` is accepted as the fractional separator and replaced by `.`
    /// before parsing. At most two fractional digits are allowed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| EngineError::InvalidAmount(reason.to_string());

        let normalized = s.trim().replace(',', ".");
        if normalized.is_empty() {
            return Err(invalid("empty amount"));
        }
        if normalized.starts_with('-') {
            return Err(invalid("amount must not be negative"));
        }
        let normalized = normalized.strip_prefix('+').unwrap_or(&normalized);

        let (units, fraction) = match normalized.split_once('.') {
            Some((units, fraction)) => (units, fraction),
            None => (normalized, ""),
        };
        // "5." and ".5" are both fine, "." alone is not.
        if units.is_empty() && fraction.is_empty() {
            return Err(invalid("invalid amount"));
        }
        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if !all_digits(units) || !all_digits(fraction) {
            return Err(invalid("invalid amount"));
        }
        if fraction.len() > 2 {
            return Err(invalid("too many decimals"));
        }

        let units: i64 = if units.is_empty() {
            0
        } else {
            units.parse().map_err(|_| invalid("amount too large"))?
        };
        let cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid("invalid amount"))? * 10,
            _ => fraction.parse().map_err(|_| invalid("invalid amount"))?,
        };

        units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .map(Money)
            .ok_or_else(|| invalid("amount too large"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_eur() {
        assert_eq!(Money::new(0).to_string(), "0.00€");
        assert_eq!(Money::new(5).to_string(), "0.05€");
        assert_eq!(Money::new(1250).to_string(), "12.50€");
        assert_eq!(Money::new(100_000).to_string(), "1000.00€");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("12,50".parse::<Money>().unwrap().cents(), 1250);
        assert_eq!("12.50".parse::<Money>().unwrap().cents(), 1250);
        assert_eq!("12,5".parse::<Money>().unwrap().cents(), 1250);
        assert_eq!("7".parse::<Money>().unwrap().cents(), 700);
        assert_eq!(" 0.99 ".parse::<Money>().unwrap().cents(), 99);
        assert_eq!(".5".parse::<Money>().unwrap().cents(), 50);
        assert_eq!("3.".parse::<Money>().unwrap().cents(), 300);
        assert_eq!("+4".parse::<Money>().unwrap().cents(), 400);
    }

    #[test]
    fn parse_rejects_garbage() {
        for input in ["", " ", "abc", ".", "1.2.3", "12€", "1 000", "12.345"] {
            assert!(input.parse::<Money>().is_err(), "{input:?} should not parse");
        }
    }

    #[test]
    fn parse_rejects_negative_amounts() {
        assert_eq!(
            "-1,00".parse::<Money>().unwrap_err(),
            EngineError::InvalidAmount("amount must not be negative".to_string())
        );
    }

    #[test]
    fn sums_over_iterators() {
        let amounts = [Money::new(120), Money::new(80), Money::new(1)];
        assert_eq!(amounts.iter().sum::<Money>(), Money::new(201));
        assert_eq!(Vec::<Money>::new().into_iter().sum::<Money>(), Money::ZERO);
    }
}
