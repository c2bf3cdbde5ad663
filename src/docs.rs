use crate::model::attendance::{AttendanceRecord, AttendanceStatus, AttendanceSummary, MarkAttendance};
use crate::model::employee::{CreateEmployee, Employee, UpdateEmployee};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Lite API",
        version = "1.0.0",
        description = r#"
## HRMS Lite

Employee registry and daily attendance ledger.

- **Employees**: create, list, view, update and delete employee records.
  Deleting an employee removes all of their attendance.
- **Attendance**: mark one `Present`/`Absent` status per employee per day,
  browse records, view an employee's history and summary.

### Response Format
Every response is wrapped as `{ success, data, total?, message? }`.
Errors use `{ success: false, error, status_code, details }`.
"#,
    ),
    paths(
        crate::api::health::index,
        crate::api::health::health_check,

        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::mark_attendance,
        crate::api::attendance::list_attendance,
        crate::api::attendance::employee_attendance,
        crate::api::attendance::attendance_summary
    ),
    components(
        schemas(
            Employee,
            CreateEmployee,
            UpdateEmployee,
            AttendanceStatus,
            AttendanceRecord,
            AttendanceSummary,
            MarkAttendance
        )
    ),
    tags(
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
        (name = "Health", description = "Service information and health"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/employees",
            "/api/employees/{employee_id}",
            "/api/attendance",
            "/api/attendance/employee/{employee_id}",
            "/api/attendance/summary/{employee_id}",
            "/health",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
