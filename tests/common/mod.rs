#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use rollcall::config::{AttendanceConfig, CorsConfig, JwtConfig, RateLimitConfig};
use rollcall::router::init_router;
use rollcall::state::AppState;
use rollcall_attendance::UnknownStatusPolicy;
use rollcall_auth::{create_access_token, permissions};
use sqlx::PgPool;
use uuid::Uuid;

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-at-least-32-characters".to_string(),
        access_token_expiry: 3600,
    }
}

pub fn unlimited() -> RateLimitConfig {
    RateLimitConfig {
        enabled: false,
        ..RateLimitConfig::default()
    }
}

pub fn build_app(pool: PgPool, rate_limit: RateLimitConfig, policy: UnknownStatusPolicy) -> Router {
    dotenvy::dotenv().ok();
    let state = AppState::new(
        pool,
        test_jwt_config(),
        CorsConfig::from_env(),
        rate_limit,
        AttendanceConfig {
            unknown_status_policy: policy,
        },
    );
    init_router(state)
}

pub fn setup_test_app(pool: PgPool) -> Router {
    build_app(pool, unlimited(), UnknownStatusPolicy::Ignore)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Token scoped to `school_id` carrying every permission.
pub fn admin_token(school_id: Uuid) -> String {
    token_with(school_id, &permissions::ALL)
}

pub fn token_with(school_id: Uuid, granted: &[&str]) -> String {
    create_access_token(
        Uuid::new_v4(),
        "clerk@school.test",
        Some(school_id),
        granted.iter().map(|p| p.to_string()).collect(),
        &test_jwt_config(),
    )
    .unwrap()
}

pub async fn create_test_school(pool: &PgPool) -> Uuid {
    sqlx::query_scalar("INSERT INTO schools (name) VALUES ($1) RETURNING id")
        .bind(format!("Test School {}", Uuid::new_v4()))
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_session(
    pool: &PgPool,
    school_id: Uuid,
    name: &str,
    start: NaiveDate,
    end: NaiveDate,
    is_active: bool,
) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO academic_sessions (school_id, name, start_date, end_date, is_active)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id",
    )
    .bind(school_id)
    .bind(name)
    .bind(start)
    .bind(end)
    .bind(is_active)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// The active 2024-2025 session (April 1 2024 to March 31 2025).
pub async fn create_active_session(pool: &PgPool, school_id: Uuid) -> Uuid {
    create_test_session(
        pool,
        school_id,
        "2024-2025",
        date(2024, 4, 1),
        date(2025, 3, 31),
        true,
    )
    .await
}

pub async fn create_test_student(
    pool: &PgPool,
    school_id: Uuid,
    admission_no: &str,
    roll_number: i32,
    class_name: &str,
    section: &str,
) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO students (school_id, admission_no, roll_number, first_name, last_name, class_name, section)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING id",
    )
    .bind(school_id)
    .bind(admission_no)
    .bind(roll_number)
    .bind("Student")
    .bind(admission_no)
    .bind(class_name)
    .bind(section)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_holiday(
    pool: &PgPool,
    school_id: Uuid,
    session_id: Uuid,
    holiday_date: NaiveDate,
    name: &str,
) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO holidays (school_id, academic_session_id, holiday_date, name)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind(school_id)
    .bind(session_id)
    .bind(holiday_date)
    .bind(name)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Writes a record directly, bypassing status parsing.
pub async fn insert_raw_attendance(
    pool: &PgPool,
    school_id: Uuid,
    session_id: Uuid,
    student_id: Uuid,
    attendance_date: NaiveDate,
    status: &str,
) {
    sqlx::query(
        "INSERT INTO attendance_records (school_id, academic_session_id, student_id, attendance_date, status)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(school_id)
    .bind(session_id)
    .bind(student_id)
    .bind(attendance_date)
    .bind(status)
    .execute(pool)
    .await
    .unwrap();
}

pub fn get(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub fn delete(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, token: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
