use crate::{
    api::response::ApiResponse,
    clock::Clock,
    model::employee::{CreateEmployee, Employee, EmployeeFilter, UpdateEmployee},
    services::employee_service,
    utils::db_utils::Pagination,
};
use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use sqlx::SqlitePool;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmployeeQuery {
    /// Number of records to skip
    pub skip: Option<i64>,
    /// Max records to return (1-500)
    pub limit: Option<i64>,
    /// Exact department match
    pub department: Option<String>,
    /// Case-insensitive name search
    pub search: Option<String>,
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created successfully", body = Object, example = json!({
            "success": true,
            "data": {
                "id": 1,
                "employee_code": "EMP001",
                "full_name": "John Doe",
                "email": "john@co.com",
                "department": "Engineering",
                "created_at": "2024-01-15T09:30:00",
                "updated_at": "2024-01-15T09:30:00"
            },
            "message": "Employee created successfully"
        })),
        (status = 409, description = "Duplicate employee_code or email"),
        (status = 422, description = "Malformed input")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    pool: web::Data<SqlitePool>,
    clock: web::Data<dyn Clock>,
    payload: web::Json<CreateEmployee>,
) -> actix_web::Result<impl Responder> {
    let employee =
        employee_service::create_employee(pool.get_ref(), clock.get_ref(), &payload).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(employee, "Employee created successfully")))
}

#[utoipa::path(
    get,
    path = "/api/employees",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Paginated employee list", body = Object, example = json!({
            "success": true,
            "data": [],
            "total": 0,
            "message": "Employees retrieved successfully"
        })),
        (status = 422, description = "Invalid pagination")
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    pool: web::Data<SqlitePool>,
    query: web::Query<EmployeeQuery>,
) -> actix_web::Result<impl Responder> {
    let query = query.into_inner();
    let page = Pagination::new(query.skip, query.limit)?;
    let filter = EmployeeFilter {
        department: query.department.filter(|d| !d.trim().is_empty()),
        search: query.search.filter(|s| !s.trim().is_empty()),
    };

    let result = employee_service::list_employees(pool.get_ref(), &filter, page).await?;

    Ok(HttpResponse::Ok().json(
        ApiResponse::ok(result.items, "Employees retrieved successfully").with_total(result.total),
    ))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id" = i64, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "success": false,
            "error": "Employee with ID 1 not found",
            "status_code": 404,
            "details": { "employee_id": 1 }
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let employee = employee_service::get_employee(pool.get_ref(), path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(employee, "Employee retrieved successfully")))
}

/// Update Employee
#[utoipa::path(
    put,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id" = i64, Path, description = "Employee ID")
    ),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated successfully", body = Employee),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Email already in use"),
        (status = 422, description = "Malformed input")
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    pool: web::Data<SqlitePool>,
    clock: web::Data<dyn Clock>,
    path: web::Path<i64>,
    payload: web::Json<UpdateEmployee>,
) -> actix_web::Result<impl Responder> {
    let employee = employee_service::update_employee(
        pool.get_ref(),
        clock.get_ref(),
        path.into_inner(),
        &payload,
    )
    .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(employee, "Employee updated successfully")))
}

/// Delete Employee (cascades to attendance)
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id" = i64, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "success": true,
            "data": null,
            "message": "Employee with ID 1 deleted successfully"
        })),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    employee_service::delete_employee(pool.get_ref(), employee_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(
        (),
        format!("Employee with ID {} deleted successfully", employee_id),
    )))
}
