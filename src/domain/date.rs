//! Transaction dates
//!
//! Orders carry a calendar date exchanged as `dd-mm-yyyy` text.

use chrono::NaiveDate;

use super::DomainError;

/// chrono format for dd-mm-yyyy
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Parse a transaction date in strict dd-mm-yyyy form.
///
/// chrono alone accepts single-digit days and months and signed or
/// over-long years, so the shape is checked first: exactly two digits,
/// dash, two digits, dash, four digits.
pub fn parse_transaction_date(value: &str) -> Result<NaiveDate, DomainError> {
    if !has_day_month_year_shape(value) {
        return Err(DomainError::invalid_date(value));
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| DomainError::invalid_date(value))
}

/// Format a date back to dd-mm-yyyy
pub fn format_transaction_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn has_day_month_year_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
