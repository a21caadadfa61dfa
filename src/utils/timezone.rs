use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use thiserror::Error;

/// Error types for timezone operations
#[derive(Debug, Error)]
pub enum TimezoneError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

/// Parse a timezone string
pub fn parse_timezone(tz_str: &str) -> Result<Tz, TimezoneError> {
    tz_str
        .trim()
        .parse()
        .map_err(|_| TimezoneError::InvalidTimezone(tz_str.to_string()))
}

/// The current calendar date in the given timezone
pub fn today_in(timezone: &Tz) -> NaiveDate {
    Utc::now().with_timezone(timezone).date_naive()
}
