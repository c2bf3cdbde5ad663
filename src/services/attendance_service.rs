use crate::{
    clock::Clock,
    error::{ApiError, ApiResult},
    model::attendance::{AttendanceFilter, AttendanceRecord, AttendanceSummary, MarkAttendance},
    services::employee_service::find_employee,
    utils::db_utils::{Page, Pagination, is_foreign_key_violation, is_unique_violation},
    utils::validators,
};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info};

/// Attendance joined with the owner's display fields; nothing here is stored twice.
macro_rules! enriched_select {
    () => {
        r#"
        SELECT
            a.id,
            a.employee_id,
            a.date,
            a.status,
            a.created_at,
            e.full_name AS employee_name,
            e.employee_code AS employee_code
        FROM attendance a
        JOIN employees e ON e.id = a.employee_id
        "#
    };
}

/// Records a day's status for an employee.
///
/// Checks run in order: employee exists, date not in the future, status
/// literal, no record for the same day. The INSERT runs as one statement
/// outside any transaction, so a concurrent writer that wins the race shows
/// up here as a unique or foreign-key violation and maps to the same errors.
pub async fn mark_attendance(
    pool: &SqlitePool,
    clock: &dyn Clock,
    payload: &MarkAttendance,
) -> ApiResult<AttendanceRecord> {
    let employee_id = payload.employee_id;

    if find_employee(pool, employee_id).await?.is_none() {
        return Err(ApiError::EmployeeNotFound(employee_id));
    }

    let date = validators::not_in_future(payload.date, clock.today())?;
    let status = validators::attendance_status(&payload.status)?;

    let existing = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM attendance WHERE employee_id = ? AND date = ?",
    )
    .bind(employee_id)
    .bind(date)
    .fetch_optional(pool)
    .await?;

    if existing.is_some() {
        return Err(ApiError::DuplicateAttendance { employee_id, date });
    }

    let result = sqlx::query(
        r#"
        INSERT INTO attendance (employee_id, date, status, created_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(employee_id)
    .bind(date)
    .bind(status.to_string())
    .bind(clock.now())
    .execute(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::DuplicateAttendance { employee_id, date }
        } else if is_foreign_key_violation(&e) {
            ApiError::EmployeeNotFound(employee_id)
        } else {
            ApiError::Database(e)
        }
    })?;

    let id = result.last_insert_rowid();
    // the JOIN comes back empty if the employee was deleted in the meantime
    let record = sqlx::query_as::<_, AttendanceRecord>(concat!(enriched_select!(), " WHERE a.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(ApiError::EmployeeNotFound(employee_id))?;

    info!(id, employee_id, %date, %status, "Attendance marked");
    Ok(record)
}

fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, filter: &AttendanceFilter) {
    qb.push(" WHERE 1 = 1");

    if let Some(date) = filter.date {
        qb.push(" AND a.date = ").push_bind(date);
    }
    if let Some(start) = filter.start_date {
        qb.push(" AND a.date >= ").push_bind(start);
    }
    if let Some(end) = filter.end_date {
        qb.push(" AND a.date <= ").push_bind(end);
    }
    if let Some(employee_id) = filter.employee_id {
        qb.push(" AND a.employee_id = ").push_bind(employee_id);
    }
}

/// Page of enriched records in insertion order, with the filtered total.
pub async fn list_attendance(
    pool: &SqlitePool,
    filter: &AttendanceFilter,
    page: Pagination,
) -> ApiResult<Page<AttendanceRecord>> {
    if let (Some(start), Some(end)) = (filter.start_date, filter.end_date) {
        if start > end {
            return Err(ApiError::validation(
                "start_date",
                "start_date must not be after end_date",
            ));
        }
    }

    let mut count_query = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM attendance a");
    push_filters(&mut count_query, filter);
    let total = count_query
        .build_query_scalar::<i64>()
        .fetch_one(pool)
        .await?;

    let mut data_query = QueryBuilder::<Sqlite>::new(enriched_select!());
    push_filters(&mut data_query, filter);
    data_query
        .push(" ORDER BY a.id ASC LIMIT ")
        .push_bind(page.limit)
        .push(" OFFSET ")
        .push_bind(page.skip);

    debug!(sql = %data_query.sql(), ?filter, ?page, "Fetching attendance");

    let items = data_query
        .build_query_as::<AttendanceRecord>()
        .fetch_all(pool)
        .await?;

    Ok(Page { items, total })
}

/// Every record of one employee, most recent day first.
pub async fn attendance_for_employee(
    pool: &SqlitePool,
    employee_id: i64,
) -> ApiResult<Vec<AttendanceRecord>> {
    let mut conn = pool.acquire().await?;

    if find_employee(&mut *conn, employee_id).await?.is_none() {
        return Err(ApiError::EmployeeNotFound(employee_id));
    }

    let records = sqlx::query_as::<_, AttendanceRecord>(concat!(
        enriched_select!(),
        " WHERE a.employee_id = ? ORDER BY a.date DESC"
    ))
    .bind(employee_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(records)
}

pub async fn attendance_summary(
    pool: &SqlitePool,
    employee_id: i64,
) -> ApiResult<AttendanceSummary> {
    let mut conn = pool.acquire().await?;

    let employee = find_employee(&mut *conn, employee_id)
        .await?
        .ok_or(ApiError::EmployeeNotFound(employee_id))?;

    let (present, absent) = sqlx::query_as::<_, (i64, i64)>(
        r#"
        SELECT
            COALESCE(SUM(CASE WHEN status = 'Present' THEN 1 ELSE 0 END), 0),
            COALESCE(SUM(CASE WHEN status = 'Absent' THEN 1 ELSE 0 END), 0)
        FROM attendance
        WHERE employee_id = ?
        "#,
    )
    .bind(employee_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(AttendanceSummary::new(
        employee_id,
        employee.full_name,
        present,
        absent,
    ))
}
