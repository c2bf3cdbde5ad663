//! Error taxonomy shared by the services and the HTTP layer.
//!
//! Every variant maps to one fixed status code and renders the standard
//! `{success: false, error, status_code, details}` envelope.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use chrono::NaiveDate;
use serde_json::{Value, json};
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Employee with ID {0} not found")]
    EmployeeNotFound(i64),

    #[error("Employee with employee_code '{0}' already exists")]
    DuplicateEmployeeCode(String),

    #[error("Employee with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Attendance for employee {employee_id} on {date} already exists")]
    DuplicateAttendance { employee_id: i64, date: NaiveDate },

    #[error("Invalid date: {0}. Date cannot be in the future.")]
    InvalidDate(NaiveDate),

    #[error("Invalid status '{0}'. Status must be 'Present' or 'Absent'")]
    InvalidStatus(String),

    #[error("{message}")]
    Validation { field: String, message: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    fn details(&self) -> Value {
        match self {
            ApiError::EmployeeNotFound(id) => json!({ "employee_id": id }),
            ApiError::DuplicateEmployeeCode(code) => {
                json!({ "field": "employee_code", "value": code })
            }
            ApiError::DuplicateEmail(email) => json!({ "field": "email", "value": email }),
            ApiError::DuplicateAttendance { employee_id, date } => {
                json!({ "employee_id": employee_id, "date": date })
            }
            ApiError::InvalidDate(date) => json!({ "date": date }),
            ApiError::InvalidStatus(status) => json!({ "field": "status", "value": status }),
            ApiError::Validation { field, .. } => json!({ "field": field }),
            ApiError::Database(_) => json!({}),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::EmployeeNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::DuplicateEmployeeCode(_)
            | ApiError::DuplicateEmail(_)
            | ApiError::DuplicateAttendance { .. } => StatusCode::CONFLICT,
            ApiError::InvalidDate(_) | ApiError::InvalidStatus(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // sqlx messages stay in the log, never in the body
        let message = match self {
            ApiError::Database(e) => {
                tracing::error!(error = %e, "Database operation failed");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(status).json(json!({
            "success": false,
            "error": message,
            "status_code": status.as_u16(),
            "details": self.details(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_fixed_statuses() {
        let day = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        let cases = [
            (ApiError::EmployeeNotFound(7), StatusCode::NOT_FOUND),
            (ApiError::DuplicateEmployeeCode("EMP001".into()), StatusCode::CONFLICT),
            (ApiError::DuplicateEmail("a@b.co".into()), StatusCode::CONFLICT),
            (
                ApiError::DuplicateAttendance { employee_id: 1, date: day },
                StatusCode::CONFLICT,
            ),
            (ApiError::InvalidDate(day), StatusCode::BAD_REQUEST),
            (ApiError::InvalidStatus("Late".into()), StatusCode::BAD_REQUEST),
            (
                ApiError::validation("email", "Invalid email format"),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::Database(sqlx::Error::RowNotFound),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status_code(), expected, "{:?}", err);
        }
    }

    #[test]
    fn messages_name_the_offending_value() {
        assert_eq!(
            ApiError::EmployeeNotFound(42).to_string(),
            "Employee with ID 42 not found"
        );
        let day = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        assert_eq!(
            ApiError::DuplicateAttendance { employee_id: 3, date: day }.to_string(),
            "Attendance for employee 3 on 2024-05-02 already exists"
        );
    }
}
