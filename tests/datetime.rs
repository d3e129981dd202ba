use chrono::{Duration, Local, NaiveDate};
use workshift::utils::datetime::*;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_format_ymd() {
    assert_eq!(format_ymd(day(2025, 1, 15)), "2025-01-15");
}

#[test]
fn test_parse_date() {
    assert_eq!(parse_date("2025-01-15").unwrap(), day(2025, 1, 15));
    assert!(parse_date("15/01/2025").is_err());
    assert!(parse_date("2025-02-30").is_err());
}

#[test]
fn test_format_date_with_offset() {
    let tomorrow = (Local::now() + Duration::days(1)).format("%Y-%m-%d").to_string();
    assert_eq!(format_date_with_offset(1), tomorrow);
    assert_eq!(format_date_with_offset(0), format_today());
}

#[test]
fn test_now_rfc3339() {
    let now = now_rfc3339();
    assert!(now.ends_with('Z'));
    assert!(chrono::DateTime::parse_from_rfc3339(&now).is_ok());
}

#[test]
fn test_format_human_date_today() {
    let today = Local::now().format("%Y-%m-%d").to_string();
    assert_eq!(format_human_date(&today), "today");
}

#[test]
fn test_format_human_date_tomorrow() {
    let tomorrow = (Local::now() + Duration::days(1)).format("%Y-%m-%d").to_string();
    assert_eq!(format_human_date(&tomorrow), "tomorrow");
}

#[test]
fn test_format_human_date_yesterday() {
    let yesterday = (Local::now() - Duration::days(1)).format("%Y-%m-%d").to_string();
    assert_eq!(format_human_date(&yesterday), "yesterday");
}

#[test]
fn test_format_human_date_relative_ranges() {
    let today = day(2025, 1, 15); // Wednesday
    assert_eq!(format_human_date_from("2025-01-18", today), "next Saturday");
    assert_eq!(format_human_date_from("2025-01-12", today), "last Sunday");
    assert_eq!(format_human_date_from("2025-01-25", today), "in 10 days");
    assert_eq!(format_human_date_from("2025-01-05", today), "10 days ago");
    assert_eq!(format_human_date_from("2025-03-01", today), "Mar 01");
    assert_eq!(format_human_date_from("2026-03-01", today), "Mar 01, 2026");
    assert_eq!(format_human_date_from("someday", today), "someday");
}

#[test]
fn test_due_status() {
    let today = day(2025, 1, 15);
    assert_eq!(due_status(None, false, today, 3), DueStatus::NoDueDate);
    assert_eq!(due_status(Some("garbage"), false, today, 3), DueStatus::NoDueDate);
    assert_eq!(due_status(Some("2025-01-14"), false, today, 3), DueStatus::Overdue);
    assert_eq!(due_status(Some("2025-01-14"), true, today, 3), DueStatus::Completed);
    assert_eq!(due_status(Some("2025-01-15"), false, today, 3), DueStatus::DueToday);
    assert_eq!(due_status(Some("2025-01-18"), false, today, 3), DueStatus::DueSoon);
    assert_eq!(due_status(Some("2025-01-19"), false, today, 3), DueStatus::Later);
    assert_eq!(due_status(Some("2025-01-16"), false, today, 0), DueStatus::Later);
}

#[test]
fn test_due_status_serializes_snake_case() {
    assert_eq!(serde_json::to_string(&DueStatus::DueSoon).unwrap(), "\"due_soon\"");
    assert_eq!(serde_json::to_string(&DueStatus::NoDueDate).unwrap(), "\"no_due_date\"");
}
