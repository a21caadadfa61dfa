/// Pure date utilities for matching "D MonthName" birth dates
use chrono::{Datelike, NaiveDate};

/// Indonesian month names, January first
pub const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Check if a date matches month and day (ignoring year)
pub fn matches_birthday(month: u32, day: u32, target_month: u32, target_day: u32) -> bool {
    month == target_month && day == target_day
}

/// Validate if a month/day combination is valid
pub fn is_valid_date(month: u32, day: u32) -> bool {
    let max_day = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => 29, // Allow Feb 29 for leap years
        _ => return false,
    };

    (1..=max_day).contains(&day)
}

/// Look up a month number (1-12) from its Indonesian name, ignoring case
pub fn month_from_name(name: &str) -> Option<u32> {
    MONTH_NAMES
        .iter()
        .position(|m| m.eq_ignore_ascii_case(name))
        .map(|idx| idx as u32 + 1)
}

/// Get the Indonesian month name from a month number (1-12)
pub fn get_month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|idx| MONTH_NAMES.get(idx as usize))
        .copied()
        .unwrap_or("Unknown")
}

/// Parse "D MonthName" into (month, day).
///
/// Anything after the month token (a year, usually) is ignored. Returns `None`
/// for missing tokens, a non-numeric day, an unknown month or a day the month
/// can never have.
///
/// The month name is matched ignoring ASCII case, so "15 oktober" and
/// "15 OKTOBER" are accepted as well as the canonical "15 Oktober".
pub fn parse_birth_date(date_str: &str) -> Option<(u32, u32)> {
    let mut parts = date_str.split_whitespace();
    let day = parts.next()?.parse::<u32>().ok()?;
    let month = month_from_name(parts.next()?)?;

    is_valid_date(month, day).then_some((month, day))
}

/// Check whether a birth date string falls on the given day
pub fn is_birthday_on(date_str: &str, today: NaiveDate) -> bool {
    parse_birth_date(date_str)
        .is_some_and(|(month, day)| matches_birthday(month, day, today.month(), today.day()))
}

/// Format a date as "Day MonthName" (e.g., "15 Maret")
pub fn format_date_display(month: u32, day: u32) -> String {
    format!("{} {}", day, get_month_name(month))
}
