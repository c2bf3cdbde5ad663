use crate::error::{ApiError, ApiResult};
use crate::model::attendance::AttendanceStatus;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

static EMPLOYEE_CODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("employee code pattern compiles"));

pub const EMPLOYEE_CODE_MAX: usize = 50;
pub const FULL_NAME_MIN: usize = 2;
pub const FULL_NAME_MAX: usize = 100;
pub const EMAIL_MAX: usize = 255;
pub const DEPARTMENT_MAX: usize = 100;

/// Trims the value and enforces a character-count window.
pub fn non_empty(field: &str, value: &str, min: usize, max: usize) -> ApiResult<String> {
    let value = value.trim();
    let len = value.chars().count();

    if len == 0 {
        return Err(ApiError::validation(field, format!("{} cannot be empty", field)));
    }
    if len < min {
        return Err(ApiError::validation(
            field,
            format!("{} must be at least {} characters", field, min),
        ));
    }
    if len > max {
        return Err(ApiError::validation(
            field,
            format!("{} must be at most {} characters", field, max),
        ));
    }

    Ok(value.to_string())
}

pub fn employee_code(value: &str) -> ApiResult<String> {
    let code = non_empty("employee_code", value, 1, EMPLOYEE_CODE_MAX)?;
    if !EMPLOYEE_CODE_PATTERN.is_match(&code) {
        return Err(ApiError::validation(
            "employee_code",
            "employee_code may only contain letters, digits, '-' and '_'",
        ));
    }
    Ok(code)
}

pub fn full_name(value: &str) -> ApiResult<String> {
    non_empty("full_name", value, FULL_NAME_MIN, FULL_NAME_MAX)
}

pub fn department(value: &str) -> ApiResult<String> {
    non_empty("department", value, 1, DEPARTMENT_MAX)
}

/// Returns the trimmed, lowercased address.
pub fn email(value: &str) -> ApiResult<String> {
    let email = non_empty("email", value, 1, EMAIL_MAX)?.to_lowercase();
    if !EMAIL_PATTERN.is_match(&email) {
        return Err(ApiError::validation("email", "Invalid email format"));
    }
    Ok(email)
}

pub fn not_in_future(date: NaiveDate, today: NaiveDate) -> ApiResult<NaiveDate> {
    if date > today {
        return Err(ApiError::InvalidDate(date));
    }
    Ok(date)
}

pub fn attendance_status(value: &str) -> ApiResult<AttendanceStatus> {
    value
        .trim()
        .parse()
        .map_err(|_| ApiError::InvalidStatus(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(email("  John@Co.com ").unwrap(), "john@co.com");
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for bad in ["", "plain", "a@b", "a@b.c", "@co.com", "john doe@co.com"] {
            assert!(
                matches!(email(bad), Err(ApiError::Validation { .. })),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn employee_code_charset() {
        assert_eq!(employee_code(" EMP-001_a ").unwrap(), "EMP-001_a");
        assert!(employee_code("EMP 001").is_err());
        assert!(employee_code("   ").is_err());
        assert!(employee_code(&"X".repeat(EMPLOYEE_CODE_MAX + 1)).is_err());
    }

    #[test]
    fn full_name_needs_two_characters() {
        assert!(full_name("J").is_err());
        assert_eq!(full_name("  Jo ").unwrap(), "Jo");
    }

    #[test]
    fn future_dates_are_invalid() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        assert!(not_in_future(today, today).is_ok());
        assert!(not_in_future(today.pred_opt().unwrap(), today).is_ok());
        assert!(matches!(
            not_in_future(today.succ_opt().unwrap(), today),
            Err(ApiError::InvalidDate(_))
        ));
    }

    #[test]
    fn status_accepts_both_literals_in_any_case() {
        assert_eq!(attendance_status("Present").unwrap(), AttendanceStatus::Present);
        assert_eq!(attendance_status(" absent ").unwrap(), AttendanceStatus::Absent);
        assert!(matches!(
            attendance_status("Late"),
            Err(ApiError::InvalidStatus(s)) if s == "Late"
        ));
    }
}
