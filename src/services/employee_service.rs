use crate::{
    clock::Clock,
    error::{ApiError, ApiResult},
    model::employee::{CreateEmployee, Employee, EmployeeFilter, UpdateEmployee},
    utils::db_utils::{Page, Pagination, contains_pattern, violates_unique_column},
    utils::validators,
};
use sqlx::{Executor, QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info};

const EMPLOYEE_COLUMNS: &str =
    "id, employee_code, full_name, email, department, created_at, updated_at";

pub(crate) async fn find_employee<'e, E>(executor: E, id: i64) -> Result<Option<Employee>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Employee>(
        r#"
        SELECT id, employee_code, full_name, email, department, created_at, updated_at
        FROM employees
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await
}

async fn id_by_code<'e, E>(executor: E, employee_code: &str) -> Result<Option<i64>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar::<_, i64>("SELECT id FROM employees WHERE employee_code = ?")
        .bind(employee_code)
        .fetch_optional(executor)
        .await
}

async fn id_by_email<'e, E>(executor: E, email: &str) -> Result<Option<i64>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar::<_, i64>("SELECT id FROM employees WHERE email = ?")
        .bind(email)
        .fetch_optional(executor)
        .await
}

/// Maps a unique violation that slipped past the pre-checks to its duplicate kind.
fn duplicate_error(err: sqlx::Error, employee_code: &str, email: &str) -> ApiError {
    if violates_unique_column(&err, "employees", "employee_code") {
        ApiError::DuplicateEmployeeCode(employee_code.to_string())
    } else if violates_unique_column(&err, "employees", "email") {
        ApiError::DuplicateEmail(email.to_string())
    } else {
        ApiError::Database(err)
    }
}

/// Pre-checks read outside any transaction. The INSERT runs as one statement,
/// so a lost race surfaces as a unique violation.
pub async fn create_employee(
    pool: &SqlitePool,
    clock: &dyn Clock,
    payload: &CreateEmployee,
) -> ApiResult<Employee> {
    let employee_code = validators::employee_code(&payload.employee_code)?;
    let full_name = validators::full_name(&payload.full_name)?;
    let email = validators::email(&payload.email)?;
    let department = validators::department(&payload.department)?;

    if id_by_code(pool, &employee_code).await?.is_some() {
        return Err(ApiError::DuplicateEmployeeCode(employee_code));
    }
    if id_by_email(pool, &email).await?.is_some() {
        return Err(ApiError::DuplicateEmail(email));
    }

    let now = clock.now();
    let result = sqlx::query(
        r#"
        INSERT INTO employees
        (employee_code, full_name, search_name, email, department, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&employee_code)
    .bind(&full_name)
    .bind(full_name.to_lowercase())
    .bind(&email)
    .bind(&department)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| duplicate_error(e, &employee_code, &email))?;

    let id = result.last_insert_rowid();
    let employee = find_employee(pool, id)
        .await?
        .ok_or(ApiError::EmployeeNotFound(id))?;

    info!(id, employee_code = %employee.employee_code, "Employee created");
    Ok(employee)
}

pub async fn get_employee(pool: &SqlitePool, id: i64) -> ApiResult<Employee> {
    find_employee(pool, id)
        .await?
        .ok_or(ApiError::EmployeeNotFound(id))
}

fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, filter: &EmployeeFilter) {
    qb.push(" WHERE 1 = 1");

    if let Some(department) = &filter.department {
        qb.push(" AND department = ").push_bind(department.clone());
    }
    if let Some(search) = &filter.search {
        // SQLite only folds ASCII, so both sides are lowercased here
        qb.push(" AND search_name LIKE ")
            .push_bind(contains_pattern(&search.trim().to_lowercase()))
            .push(" ESCAPE '\\'");
    }
}

/// Page of employees in insertion order, with the filtered total.
pub async fn list_employees(
    pool: &SqlitePool,
    filter: &EmployeeFilter,
    page: Pagination,
) -> ApiResult<Page<Employee>> {
    let mut count_query = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM employees");
    push_filters(&mut count_query, filter);
    let total: i64 = count_query.build_query_scalar::<i64>().fetch_one(pool).await?;

    let mut data_query =
        QueryBuilder::<Sqlite>::new(format!("SELECT {} FROM employees", EMPLOYEE_COLUMNS));
    push_filters(&mut data_query, filter);
    data_query
        .push(" ORDER BY id ASC LIMIT ")
        .push_bind(page.limit)
        .push(" OFFSET ")
        .push_bind(page.skip);

    debug!(sql = %data_query.sql(), ?filter, ?page, "Fetching employees");

    let items = data_query
        .build_query_as::<Employee>()
        .fetch_all(pool)
        .await?;

    Ok(Page { items, total })
}

pub async fn update_employee(
    pool: &SqlitePool,
    clock: &dyn Clock,
    id: i64,
    payload: &UpdateEmployee,
) -> ApiResult<Employee> {
    let full_name = payload.full_name.as_deref().map(validators::full_name).transpose()?;
    let email = payload.email.as_deref().map(validators::email).transpose()?;
    let department = payload.department.as_deref().map(validators::department).transpose()?;

    if full_name.is_none() && email.is_none() && department.is_none() {
        return Err(ApiError::validation("body", "No fields provided for update"));
    }

    let current = find_employee(pool, id)
        .await?
        .ok_or(ApiError::EmployeeNotFound(id))?;

    if let Some(email) = &email {
        if id_by_email(pool, email).await?.is_some_and(|owner| owner != id) {
            return Err(ApiError::DuplicateEmail(email.clone()));
        }
    }

    let mut update = QueryBuilder::<Sqlite>::new("UPDATE employees SET ");
    {
        let mut set = update.separated(", ");
        if let Some(full_name) = &full_name {
            set.push("full_name = ").push_bind_unseparated(full_name.clone());
            set.push("search_name = ").push_bind_unseparated(full_name.to_lowercase());
        }
        if let Some(email) = &email {
            set.push("email = ").push_bind_unseparated(email.clone());
        }
        if let Some(department) = &department {
            set.push("department = ").push_bind_unseparated(department.clone());
        }
        set.push("updated_at = ").push_bind_unseparated(clock.now());
    }
    update.push(" WHERE id = ").push_bind(id);

    let updated = update
        .build()
        .execute(pool)
        .await
        .map_err(|e| duplicate_error(e, &current.employee_code, email.as_deref().unwrap_or("")))?
        .rows_affected();

    // deleted between the read and the write
    if updated == 0 {
        return Err(ApiError::EmployeeNotFound(id));
    }

    let employee = find_employee(pool, id)
        .await?
        .ok_or(ApiError::EmployeeNotFound(id))?;

    info!(id, "Employee updated");
    Ok(employee)
}

/// Removes the employee and every attendance row it owns in one transaction.
/// Returns the number of attendance rows removed.
pub async fn delete_employee(pool: &SqlitePool, id: i64) -> ApiResult<u64> {
    let mut tx = pool.begin().await?;

    // The first statement writes, so the transaction takes the write lock
    // up front and never has to upgrade a read lock.
    let attendance_removed = sqlx::query("DELETE FROM attendance WHERE employee_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let deleted = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if deleted == 0 {
        // dropping `tx` rolls the attendance delete back
        return Err(ApiError::EmployeeNotFound(id));
    }

    tx.commit().await?;

    info!(id, attendance_removed, "Employee deleted");
    Ok(attendance_removed)
}
