//! Date and time utility functions
//!
//! Due dates are stored as `YYYY-MM-DD` strings and timestamps as RFC 3339
//! strings. This module parses them, classifies due dates relative to today
//! and formats them for people (e.g., "yesterday", "today", "tomorrow").

use chrono::{Datelike, Duration, Local, NaiveDate, SecondsFormat, Utc, Weekday};
use serde::Serialize;

/// Date format used for due dates
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a date string in YYYY-MM-DD format to NaiveDate
///
/// # Arguments
/// * `date_str` - Date string in YYYY-MM-DD format
///
/// # Returns
/// * `Result<NaiveDate, chrono::ParseError>` - Parsed date or parse error
pub fn parse_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(date_str, DUE_DATE_FORMAT)
}

/// Format a NaiveDate to YYYY-MM-DD string
pub fn format_ymd(d: NaiveDate) -> String {
    d.format(DUE_DATE_FORMAT).to_string()
}

/// Current local date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Format current local date to YYYY-MM-DD string
pub fn format_today() -> String {
    format_ymd(today())
}

/// Format date with offset from today to YYYY-MM-DD string
pub fn format_date_with_offset(days_offset: i64) -> String {
    format_ymd(today() + Duration::days(days_offset))
}

/// Current UTC time as an RFC 3339 timestamp with millisecond precision
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Where a card's due date sits relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DueStatus {
    /// No due date, or an unparseable one
    NoDueDate,
    /// Marked complete; the date no longer matters
    Completed,
    Overdue,
    DueToday,
    /// Due within the "soon" window after today
    DueSoon,
    Later,
}

/// Classify a due date against `today`.
///
/// `soon_days` is the number of days after today still counted as soon.
pub fn due_status(due_date: Option<&str>, is_completed: bool, today: NaiveDate, soon_days: i64) -> DueStatus {
    let Some(due) = due_date.and_then(|d| parse_date(d).ok()) else {
        return DueStatus::NoDueDate;
    };
    if is_completed {
        return DueStatus::Completed;
    }

    match (due - today).num_days() {
        diff if diff < 0 => DueStatus::Overdue,
        0 => DueStatus::DueToday,
        diff if diff <= soon_days => DueStatus::DueSoon,
        _ => DueStatus::Later,
    }
}

/// Format a date string in human-readable form relative to the local date
pub fn format_human_date(date_str: &str) -> String {
    format_human_date_from(date_str, today())
}

/// Format a date string in human-readable form relative to `today`
///
/// Unparseable input is returned unchanged.
pub fn format_human_date_from(date_str: &str, today: NaiveDate) -> String {
    let input_date = match parse_date(date_str) {
        Ok(date) => date,
        Err(_) => return date_str.to_string(),
    };

    let days_diff = (input_date - today).num_days();

    match days_diff {
        -1 => "yesterday".to_string(),
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        diff if diff > 1 && diff <= 7 => format!("next {}", weekday_name(input_date.weekday())),
        diff if (-7..-1).contains(&diff) => format!("last {}", weekday_name(input_date.weekday())),
        diff if diff > 7 && diff <= 30 => format!("in {} days", diff),
        diff if (-30..-7).contains(&diff) => format!("{} days ago", -diff),
        _ => {
            if input_date.year() == today.year() {
                input_date.format("%b %d").to_string()
            } else {
                input_date.format("%b %d, %Y").to_string()
            }
        }
    }
}

/// Get a human-readable weekday name
fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
