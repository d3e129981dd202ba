//! Input validation shared by the API operations.

use super::error::{ApiError, ApiResult};
use crate::constants::{PASSWORD_MIN_LEN, USERNAME_MAX_LEN, USERNAME_MIN_LEN};
use crate::utils::datetime;

/// Trimmed non-empty text of at most `max` characters.
pub fn required_text(field: &str, value: &str, max: usize) -> ApiResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation(format!("{} cannot be empty", field)));
    }
    if trimmed.chars().count() > max {
        return Err(ApiError::validation(format!("{} cannot exceed {} characters", field, max)));
    }
    Ok(trimmed.to_string())
}

/// Trimmed optional text; blank input becomes `None`.
pub fn optional_text(field: &str, value: Option<&str>, max: usize) -> ApiResult<Option<String>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => required_text(field, text, max).map(Some),
    }
}

/// Lowercased username of letters, digits, '_' and '-'.
pub fn username(value: &str) -> ApiResult<String> {
    let trimmed = value.trim().to_lowercase();
    let len = trimmed.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(ApiError::validation(format!(
            "Username must be {} to {} characters",
            USERNAME_MIN_LEN, USERNAME_MAX_LEN
        )));
    }
    if !trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        return Err(ApiError::validation(
            "Username may only contain letters, digits, '_' and '-'",
        ));
    }
    Ok(trimmed)
}

/// Lowercased email with one '@', a non-empty local part and a dotted domain.
pub fn email(value: &str) -> ApiResult<String> {
    let trimmed = value.trim().to_lowercase();
    let valid = match trimmed.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !trimmed.contains(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(ApiError::validation(format!("'{}' is not a valid email address", value.trim())));
    }
    Ok(trimmed)
}

pub fn password(value: &str) -> ApiResult<()> {
    if value.chars().count() < PASSWORD_MIN_LEN {
        return Err(ApiError::validation(format!(
            "Password must be at least {} characters",
            PASSWORD_MIN_LEN
        )));
    }
    Ok(())
}

/// A `YYYY-MM-DD` due date, or `None` when cleared.
pub fn due_date(value: Option<&str>) -> ApiResult<Option<String>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(date) => datetime::parse_date(date)
            .map(|d| Some(datetime::format_ymd(d)))
            .map_err(|_| ApiError::validation(format!("Due date '{}' is not in YYYY-MM-DD format", date))),
    }
}
