use crate::{
    api::{attendance, employee, health},
    config::Config,
    error::ApiError,
};
use actix_web::web;

/// Registers every route plus the extractor configs that turn malformed
/// bodies, query strings and path segments into the 422 envelope.
pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::validation("body", err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| ApiError::validation("query", err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| ApiError::validation("path", err.to_string()).into()),
    );

    // Public, unprefixed
    cfg.service(web::resource("/").route(web::get().to(health::index)))
        .service(web::resource("/health").route(web::get().to(health::health_check)));

    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    // /employees/{employee_id}
                    .service(
                        web::resource("/{employee_id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::put().to(employee::update_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    // /attendance
                    .service(
                        web::resource("")
                            .route(web::post().to(attendance::mark_attendance))
                            .route(web::get().to(attendance::list_attendance)),
                    )
                    // /attendance/employee/{employee_id}
                    .service(
                        web::resource("/employee/{employee_id}")
                            .route(web::get().to(attendance::employee_attendance)),
                    )
                    // /attendance/summary/{employee_id}
                    .service(
                        web::resource("/summary/{employee_id}")
                            .route(web::get().to(attendance::attendance_summary)),
                    ),
            ),
    );
}
