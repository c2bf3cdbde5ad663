use crate::{api::response::ApiResponse, config::Config, db};
use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use sqlx::SqlitePool;

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "API information")),
    tag = "Health"
)]
pub async fn index(config: web::Data<Config>) -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::ok(
        json!({
            "name": config.app_title,
            "version": config.app_version,
            "docs": "/swagger-ui/",
            "health": "/health"
        }),
        format!("Welcome to {}", config.app_title),
    ))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "API and database are reachable"),
        (status = 503, description = "Database unreachable")
    ),
    tag = "Health"
)]
pub async fn health_check(pool: web::Data<SqlitePool>, config: web::Data<Config>) -> impl Responder {
    match db::ping(pool.get_ref()).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::ok(
            json!({
                "status": "healthy",
                "database": "connected",
                "environment": config.environment.as_ref(),
                "version": config.app_version
            }),
            "API is running",
        )),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            HttpResponse::ServiceUnavailable().json(json!({
                "success": false,
                "error": "Database unreachable",
                "status_code": 503,
                "details": {}
            }))
        }
    }
}
