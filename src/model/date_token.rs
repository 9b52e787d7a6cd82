//! Localized "DD Mon YYYY" date tokens, e.g. `10 Mar 2025` or `17 Agu 2024`.

use chrono::{Datelike, NaiveDate};

use crate::error::ParseError;

/// Month abbreviations used by the project data, indexed by month - 1.
pub const MONTH_TOKENS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// English spellings for the four months whose abbreviation differs.
const ENGLISH_TOKENS: [(&str, u32); 4] = [("May", 5), ("Aug", 8), ("Oct", 10), ("Dec", 12)];

/// Look up a month abbreviation, returning the month number (1-12).
pub fn month_number(token: &str) -> Option<u32> {
    MONTH_TOKENS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(token))
        .map(|idx| idx as u32 + 1)
        .or_else(|| {
            ENGLISH_TOKENS
                .iter()
                .find(|(m, _)| m.eq_ignore_ascii_case(token))
                .map(|(_, n)| *n)
        })
}

/// Parse a date token into a local calendar day.
pub fn parse(input: &str) -> Result<NaiveDate, ParseError> {
    let mut parts = input.split_whitespace();
    let (Some(day), Some(month), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(ParseError::Shape {
            input: input.to_string(),
        });
    };

    let day_num: u32 = day.parse().map_err(|_| ParseError::Day {
        token: day.to_string(),
    })?;
    let month_num = month_number(month).ok_or_else(|| ParseError::UnknownMonth {
        token: month.to_string(),
    })?;
    if year.len() != 4 {
        return Err(ParseError::Year {
            token: year.to_string(),
        });
    }
    let year_num: i32 = year.parse().map_err(|_| ParseError::Year {
        token: year.to_string(),
    })?;

    NaiveDate::from_ymd_opt(year_num, month_num, day_num).ok_or(ParseError::OutOfRange {
        day: day_num,
        month: month_num,
        year: year_num,
    })
}

/// Format a date as a full token, e.g. `05 Agu 2025`.
pub fn format(date: NaiveDate) -> String {
    format!("{} {}", format_short(date), date.year())
}

/// Format a date without the year, used for axis labels.
pub fn format_short(date: NaiveDate) -> String {
    format!("{:02} {}", date.day(), MONTH_TOKENS[date.month0() as usize])
}
