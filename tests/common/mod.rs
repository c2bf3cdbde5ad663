#![allow(dead_code)]
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test;
use actix_web::web::Data;
use actix_web::{App, Error};
use chrono::NaiveDate;
use hrms_lite::clock::{Clock, FixedClock};
use hrms_lite::config::Config;
use hrms_lite::db::init_db;
use hrms_lite::routes;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use std::sync::Arc;

/// "Today" for every HTTP test.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

pub async fn test_pool() -> SqlitePool {
    init_db("sqlite::memory:", 1).await.unwrap()
}

/// Same wiring as the binary minus middleware, with a pinned clock.
pub fn test_app(
    pool: SqlitePool,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<BoxBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let config = Config::default();
    let clock: Arc<dyn Clock> = Arc::new(FixedClock::on(today()));

    App::new()
        .app_data(Data::new(pool))
        .app_data(Data::from(clock))
        .app_data(Data::new(config.clone()))
        .configure(move |cfg| routes::configure(cfg, &config))
}

pub fn employee_body(code: &str, email: &str) -> Value {
    json!({
        "employee_code": code,
        "full_name": format!("Person {}", code),
        "email": email,
        "department": "Engineering"
    })
}

/// Calls the service and decodes the JSON envelope.
pub async fn send<S, R>(app: &S, req: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}
