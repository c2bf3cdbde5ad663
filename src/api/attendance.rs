use crate::{
    api::response::ApiResponse,
    clock::Clock,
    model::attendance::{AttendanceFilter, AttendanceSummary, MarkAttendance},
    services::attendance_service,
    utils::db_utils::Pagination,
};
use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::SqlitePool;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttendanceQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    /// Exact day (YYYY-MM-DD)
    pub date: Option<NaiveDate>,
    /// Inclusive range start (YYYY-MM-DD)
    pub start_date: Option<NaiveDate>,
    /// Inclusive range end (YYYY-MM-DD)
    pub end_date: Option<NaiveDate>,
    pub employee_id: Option<i64>,
}

/// Mark attendance
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = MarkAttendance,
    responses(
        (status = 201, description = "Attendance marked successfully", body = Object, example = json!({
            "success": true,
            "data": {
                "id": 1,
                "employee_id": 1,
                "date": "2024-01-15",
                "status": "Present",
                "created_at": "2024-01-15T09:30:00",
                "employee_name": "John Doe",
                "employee_code": "EMP001"
            },
            "message": "Attendance marked successfully"
        })),
        (status = 400, description = "Future date or unknown status"),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Attendance already marked for that day", body = Object, example = json!({
            "success": false,
            "error": "Attendance for employee 1 on 2024-01-15 already exists",
            "status_code": 409,
            "details": { "employee_id": 1, "date": "2024-01-15" }
        })),
        (status = 422, description = "Malformed input")
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    pool: web::Data<SqlitePool>,
    clock: web::Data<dyn Clock>,
    payload: web::Json<MarkAttendance>,
) -> actix_web::Result<impl Responder> {
    let record =
        attendance_service::mark_attendance(pool.get_ref(), clock.get_ref(), &payload).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(record, "Attendance marked successfully")))
}

#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Paginated attendance records", body = Object, example = json!({
            "success": true,
            "data": [],
            "total": 0,
            "message": "Attendance records retrieved successfully"
        })),
        (status = 422, description = "Invalid filter or pagination")
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    pool: web::Data<SqlitePool>,
    query: web::Query<AttendanceQuery>,
) -> actix_web::Result<impl Responder> {
    let query = query.into_inner();
    let page = Pagination::new(query.skip, query.limit)?;
    let filter = AttendanceFilter {
        date: query.date,
        start_date: query.start_date,
        end_date: query.end_date,
        employee_id: query.employee_id,
    };

    let result = attendance_service::list_attendance(pool.get_ref(), &filter, page).await?;

    Ok(HttpResponse::Ok().json(
        ApiResponse::ok(result.items, "Attendance records retrieved successfully")
            .with_total(result.total),
    ))
}

/// Attendance history of one employee, newest first
#[utoipa::path(
    get,
    path = "/api/attendance/employee/{employee_id}",
    params(
        ("employee_id" = i64, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Attendance records for the employee"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Attendance"
)]
pub async fn employee_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();
    let records = attendance_service::attendance_for_employee(pool.get_ref(), employee_id).await?;
    let total = records.len() as i64;

    Ok(HttpResponse::Ok().json(
        ApiResponse::ok(
            records,
            format!("Attendance records for employee {} retrieved", employee_id),
        )
        .with_total(total),
    ))
}

#[utoipa::path(
    get,
    path = "/api/attendance/summary/{employee_id}",
    params(
        ("employee_id" = i64, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Present/absent counts and percentage", body = AttendanceSummary),
        (status = 404, description = "Employee not found")
    ),
    tag = "Attendance"
)]
pub async fn attendance_summary(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let summary = attendance_service::attendance_summary(pool.get_ref(), path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(
        summary,
        "Attendance summary retrieved successfully",
    )))
}
