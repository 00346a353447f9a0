use chrono::NaiveDate;
use thiserror::Error;

/// Sitting dates are always written day first.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

#[derive(Error, Debug)]
pub enum DateError {
    #[error("invalid sitting date {0:?}, expected DD-MM-YYYY")]
    Invalid(String),
}

pub fn parse_sitting_date(s: &str) -> Result<NaiveDate, DateError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| DateError::Invalid(s.to_string()))
}

pub fn format_sitting_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Every calendar day from `start` to `end`, both inclusive.
///
/// An `end` before `start` gives no days.
pub fn sitting_dates(start: &str, end: &str) -> Result<Vec<NaiveDate>, DateError> {
    let start = parse_sitting_date(start)?;
    let end = parse_sitting_date(end)?;
    Ok(start.iter_days().take_while(|d| *d <= end).collect())
}
