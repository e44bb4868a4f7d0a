//! Query filters over stored expenses.
//!
//! An [`ExpenseFilter`] is what callers build; [`ExpenseFilter::predicates`]
//! lowers it to a flat list of [`Predicate`]s that the store turns into bound
//! query parameters. Calendar fields are interpreted in a caller-provided
//! time zone and become half-open UTC ranges on `created_at`.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use crate::{EngineError, Expense, ResultEngine};

/// Optional constraints over expenses. `None` means "any".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpenseFilter {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
}

/// A single lowered constraint. A row matches when every predicate holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Predicate {
    /// `from <= created_at < to`.
    CreatedWithin {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },
    CategoryIs(String),
    /// Calendar month of `created_at` in the filter's time zone, any year.
    MonthOfYear(u32),
}

impl ExpenseFilter {
    /// Everything recorded in `month` of `year`.
    #[must_use]
    pub fn month(year: i32, month: u32) -> Self {
        Self {
            year: Some(year),
            month: Some(month),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Lowers the filter into predicates.
    ///
    /// Returns `Ok(None)` when the constraints cannot overlap (for instance a
    /// date outside the requested year), so the store can skip the query.
    pub fn predicates(&self, tz: Tz) -> ResultEngine<Option<Vec<Predicate>>> {
        if let Some(month) = self.month
            && !(1..=12).contains(&month)
        {
            return Err(EngineError::InvalidFilter(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }

        let mut ranges: Vec<(NaiveDate, NaiveDate)> = Vec::new();
        let mut predicates = Vec::new();

        match (self.year, self.month) {
            (Some(year), Some(month)) => {
                let start = calendar_date(year, month, 1)?;
                let end = if month == 12 {
                    calendar_date(year + 1, 1, 1)?
                } else {
                    calendar_date(year, month + 1, 1)?
                };
                ranges.push((start, end));
            }
            (Some(year), None) => {
                ranges.push((calendar_date(year, 1, 1)?, calendar_date(year + 1, 1, 1)?));
            }
            (None, Some(month)) => predicates.push(Predicate::MonthOfYear(month)),
            (None, None) => {}
        }

        if let Some(date) = self.date {
            let next = date
                .succ_opt()
                .ok_or_else(|| EngineError::InvalidFilter(format!("date out of range: {date}")))?;
            ranges.push((date, next));
        }

        if let Some((first, rest)) = ranges.split_first() {
            let (mut start, mut end) = *first;
            for (s, e) in rest {
                start = start.max(*s);
                end = end.min(*e);
            }
            if start >= end {
                return Ok(None);
            }
            predicates.insert(
                0,
                Predicate::CreatedWithin {
                    from: local_midnight(tz, start)?,
                    to: local_midnight(tz, end)?,
                },
            );
        }

        if let Some(category) = &self.category {
            predicates.push(Predicate::CategoryIs(category.clone()));
        }

        Ok(Some(predicates))
    }

    /// Evaluates the filter against an already loaded expense.
    pub fn matches(&self, expense: &Expense, tz: Tz) -> ResultEngine<bool> {
        Ok(match self.predicates(tz)? {
            None => false,
            Some(predicates) => predicates.iter().all(|p| p.matches(expense, tz)),
        })
    }
}

impl Predicate {
    #[must_use]
    pub fn matches(&self, expense: &Expense, tz: Tz) -> bool {
        match self {
            Predicate::CreatedWithin { from, to } => {
                *from <= expense.created_at && expense.created_at < *to
            }
            Predicate::CategoryIs(category) => expense.category == *category,
            Predicate::MonthOfYear(month) => {
                expense.created_at.with_timezone(&tz).month() == *month
            }
        }
    }
}

fn calendar_date(year: i32, month: u32, day: u32) -> ResultEngine<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| EngineError::InvalidFilter(format!("no such date: {year}-{month}-{day}")))
}

/// First instant of `date` in `tz`, as UTC.
///
/// Where midnight falls into a DST gap the day starts an hour later.
fn local_midnight(tz: Tz, date: NaiveDate) -> ResultEngine<DateTime<Utc>> {
    let midnight = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            tz.from_local_datetime(&(midnight + TimeDelta::hours(1)))
                .earliest()
        })
        .map(|t| t.with_timezone(&Utc))
        .ok_or_else(|| EngineError::InvalidFilter(format!("no local midnight on {date}")))
}
