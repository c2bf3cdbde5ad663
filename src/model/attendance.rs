use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

/// Terminal status of a day; fixed when the record is created.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr, ToSchema,
)]
#[strum(ascii_case_insensitive)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl TryFrom<String> for AttendanceStatus {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Attendance row joined with the owning employee's display fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 10,
        "employee_id": 1,
        "date": "2024-01-15",
        "status": "Present",
        "created_at": "2024-01-15T09:30:00",
        "employee_name": "John Doe",
        "employee_code": "EMP001"
    })
)]
pub struct AttendanceRecord {
    pub id: i64,
    pub employee_id: i64,
    pub date: NaiveDate,
    #[sqlx(try_from = "String")]
    pub status: AttendanceStatus,
    pub created_at: NaiveDateTime,
    pub employee_name: String,
    pub employee_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AttendanceSummary {
    pub employee_id: i64,
    pub employee_name: String,
    pub total_days: i64,
    pub present_days: i64,
    pub absent_days: i64,
    #[schema(example = 75.0)]
    pub attendance_percentage: f64,
}

impl AttendanceSummary {
    pub fn new(employee_id: i64, employee_name: String, present_days: i64, absent_days: i64) -> Self {
        let total_days = present_days + absent_days;
        let attendance_percentage = if total_days > 0 {
            (present_days as f64 / total_days as f64 * 10_000.0).round() / 100.0
        } else {
            0.0
        };

        Self {
            employee_id,
            employee_name,
            total_days,
            present_days,
            absent_days,
            attendance_percentage,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct MarkAttendance {
    #[schema(example = 1)]
    pub employee_id: i64,
    #[schema(example = "2024-01-15")]
    pub date: NaiveDate,
    /// `Present` or `Absent`; checked by the ledger so a bad literal is a 400.
    #[schema(example = "Present")]
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceFilter {
    pub date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub employee_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_of_present_days() {
        let summary = AttendanceSummary::new(1, "John Doe".into(), 3, 1);
        assert_eq!(summary.total_days, 4);
        assert_eq!(summary.attendance_percentage, 75.0);
    }

    #[test]
    fn percentage_is_zero_without_records() {
        let summary = AttendanceSummary::new(1, "John Doe".into(), 0, 0);
        assert_eq!(summary.total_days, 0);
        assert_eq!(summary.attendance_percentage, 0.0);
    }

    #[test]
    fn percentage_rounds_to_two_places() {
        let summary = AttendanceSummary::new(1, "John Doe".into(), 2, 1);
        assert_eq!(summary.attendance_percentage, 66.67);
    }

    #[test]
    fn status_round_trips_through_its_literal() {
        assert_eq!(AttendanceStatus::Present.as_ref(), "Present");
        assert_eq!(
            AttendanceStatus::try_from("ABSENT".to_string()).unwrap(),
            AttendanceStatus::Absent
        );
        assert!(AttendanceStatus::try_from("Late".to_string()).is_err());
    }
}
