use engine::Money;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub(crate) enum ParseError {
    #[error("μη έγκυρο ποσό")]
    InvalidAmount,
    #[error("μη έγκυρος χρόνος")]
    InvalidYear,
    #[error("μη έγκυρος μήνας")]
    InvalidMonth,
}

/// Year, optional month and optional raw category text of a specific query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct QueryInput {
    pub year: i32,
    pub month: Option<u32>,
    pub category: Option<String>,
}

/// Parses an amount written with `.` or `,` as decimal separator.
pub(crate) fn parse_amount(input: &str) -> Result<Money, ParseError> {
    input.parse::<Money>().map_err(|_| ParseError::InvalidAmount)
}

/// Parses `"<year> [<month>] [<category text>]"`.
///
/// The category is every token after the month joined by a single space; it
/// is left unresolved here.
pub(crate) fn parse_query(input: &str) -> Result<QueryInput, ParseError> {
    let mut tokens = input.split_whitespace();

    let year = tokens
        .next()
        .and_then(|t| t.parse::<i32>().ok())
        .filter(|y| (1..=9999).contains(y))
        .ok_or(ParseError::InvalidYear)?;

    let month = match tokens.next() {
        None => None,
        Some(token) => Some(
            token
                .parse::<u32>()
                .ok()
                .filter(|m| (1..=12).contains(m))
                .ok_or(ParseError::InvalidMonth)?,
        ),
    };

    let rest: Vec<&str> = tokens.collect();
    let category = (!rest.is_empty()).then(|| rest.join(" "));

    Ok(QueryInput {
        year,
        month,
        category,
    })
}
