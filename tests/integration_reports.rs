mod common;

use axum::http::{StatusCode, header};
use common::{
    admin_token, build_app, create_active_session, create_test_holiday, create_test_school,
    create_test_student, date, get, insert_raw_attendance, json_body, setup_test_app, token_with,
    unlimited,
};
use http_body_util::BodyExt;
use rollcall_attendance::UnknownStatusPolicy;
use rollcall_auth::permissions;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

struct Fixture {
    school_id: Uuid,
    marked: Uuid,
    unmarked: Uuid,
}

/// Session 2024-2025 with one holiday on Wednesday April 10 and two students
/// in class 5-A. The first is marked P, L, HD and A on April 1-4.
async fn seed_class(pool: &PgPool) -> Fixture {
    let school_id = create_test_school(pool).await;
    let session_id = create_active_session(pool, school_id).await;
    create_test_holiday(pool, school_id, session_id, date(2024, 4, 10), "Founders Day").await;

    let marked = create_test_student(pool, school_id, "ADM-1", 1, "5", "A").await;
    let unmarked = create_test_student(pool, school_id, "ADM-2", 2, "5", "A").await;
    create_test_student(pool, school_id, "ADM-3", 1, "6", "A").await;

    for (day, status) in [(1, "present"), (2, "late"), (3, "half_day"), (4, "A")] {
        insert_raw_attendance(pool, school_id, session_id, marked, date(2024, 4, day), status)
            .await;
    }

    Fixture {
        school_id,
        marked,
        unmarked,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_yearly_report(pool: PgPool) {
    let fixture = seed_class(&pool).await;
    let app = setup_test_app(pool.clone());

    let response = app
        .oneshot(get(
            "/api/reports/attendance/yearly?class_name=5&section=A",
            &admin_token(fixture.school_id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["session_name"], "2024-2025");
    assert_eq!(body["session_year"], "2024-2025");

    let students = body["students"].as_array().unwrap();
    assert_eq!(students.len(), 2);
    assert_eq!(students[0]["serial_no"], 1);
    assert_eq!(students[0]["student_id"], fixture.marked.to_string());
    assert_eq!(students[1]["serial_no"], 2);

    let april = &students[0]["monthly_data"][0];
    assert_eq!(april["month_name"], "April");
    assert_eq!(april["working_days"], 25);
    assert_eq!(april["holidays"], 1);
    assert_eq!(april["present"], 1);
    assert_eq!(april["late"], 1);
    assert_eq!(april["half_day"], 1);
    assert_eq!(april["absent"], 22);
    assert_eq!(april["attendance_percentage"], 12.0);

    // 365 days, 52 Sundays, 1 holiday
    assert_eq!(students[0]["monthly_data"].as_array().unwrap().len(), 12);
    assert_eq!(students[0]["total_working_days"], 312);
    assert_eq!(students[0]["total_absent"], 309);
    assert_eq!(students[0]["attendance_percentage"], 0.96);
    assert_eq!(students[0]["attendance_grade"], "F");
    assert_eq!(students[0]["attendance_color"], "danger");

    assert_eq!(students[1]["total_present"], 0);
    assert_eq!(students[1]["total_absent"], 312);

    let statistics = body["monthly_statistics"].as_array().unwrap();
    assert_eq!(statistics.len(), 12);
    assert_eq!(statistics[0]["students"], 2);
    assert_eq!(statistics[0]["total_present"], 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_yearly_report_is_repeatable(pool: PgPool) {
    let fixture = seed_class(&pool).await;
    let app = setup_test_app(pool.clone());
    let token = admin_token(fixture.school_id);

    let mut bodies = Vec::new();
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(get("/api/reports/attendance/yearly?class_name=5", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        bodies.push(json_body(response).await);
    }

    assert_eq!(bodies[0], bodies[1]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_yearly_report(pool: PgPool) {
    let fixture = seed_class(&pool).await;
    let app = setup_test_app(pool.clone());
    let token = admin_token(fixture.school_id);

    let response = app
        .clone()
        .oneshot(get(
            &format!("/api/reports/attendance/students/{}/yearly", fixture.unmarked),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["admission_no"], "ADM-2");
    assert_eq!(body["total_working_days"], 312);
    assert_eq!(body["attendance_percentage"], 0.0);

    let response = app
        .oneshot(get(
            &format!("/api/reports/attendance/students/{}/yearly", Uuid::new_v4()),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_yearly_report_without_session(pool: PgPool) {
    let school_id = create_test_school(&pool).await;
    create_test_student(&pool, school_id, "ADM-1", 1, "5", "A").await;
    let app = setup_test_app(pool.clone());

    let response = app
        .oneshot(get("/api/reports/attendance/yearly", &admin_token(school_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["session_name"], "");
    assert_eq!(body["session_year"], "");
    assert_eq!(body["students"][0]["total_working_days"], 0);
    assert_eq!(body["students"][0]["attendance_grade"], "N/A");
    assert_eq!(body["students"][0]["attendance_color"], "secondary");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_monthly_register(pool: PgPool) {
    let fixture = seed_class(&pool).await;
    let app = setup_test_app(pool.clone());

    let response = app
        .oneshot(get(
            "/api/reports/attendance/monthly?month=April%202024&class_name=5&section=A",
            &admin_token(fixture.school_id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["year"], 2024);
    assert_eq!(body["month"], 4);
    assert_eq!(body["month_name"], "April");
    assert_eq!(body["working_days"], 25);
    assert_eq!(body["holidays"][0]["date"], "2024-04-10");
    assert_eq!(body["holidays"][0]["name"], "Founders Day");

    let row = &body["students"][0];
    let days = row["days"].as_array().unwrap();
    assert_eq!(days.len(), 30);
    assert_eq!(days[0]["code"], "P");
    assert_eq!(days[2]["status"], "half_day");
    assert_eq!(days[6]["kind"], "sunday");
    assert_eq!(days[9]["kind"], "holiday");
    assert!(days[4]["status"].is_null());
    assert_eq!(row["summary"]["absent"], 22);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_monthly_register_malformed_month(pool: PgPool) {
    let school_id = create_test_school(&pool).await;
    create_active_session(&pool, school_id).await;
    let app = setup_test_app(pool.clone());

    let response = app
        .oneshot(get(
            "/api/reports/attendance/monthly?month=Smarch%202024",
            &admin_token(school_id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_status_ignored_by_default(pool: PgPool) {
    let fixture = seed_class(&pool).await;
    let session_id: Uuid = sqlx::query_scalar("SELECT id FROM academic_sessions WHERE school_id = $1")
        .bind(fixture.school_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    insert_raw_attendance(&pool, fixture.school_id, session_id, fixture.unmarked, date(2024, 4, 5), "sick")
        .await;
    let app = setup_test_app(pool.clone());

    let response = app
        .oneshot(get(
            &format!("/api/reports/attendance/students/{}/yearly", fixture.unmarked),
            &admin_token(fixture.school_id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["total_present"], 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_status_rejected_under_reject_policy(pool: PgPool) {
    let fixture = seed_class(&pool).await;
    let session_id: Uuid = sqlx::query_scalar("SELECT id FROM academic_sessions WHERE school_id = $1")
        .bind(fixture.school_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    insert_raw_attendance(&pool, fixture.school_id, session_id, fixture.unmarked, date(2024, 4, 5), "sick")
        .await;
    let app = build_app(pool.clone(), unlimited(), UnknownStatusPolicy::Reject);

    let response = app
        .oneshot(get(
            "/api/reports/attendance/yearly?class_name=5",
            &admin_token(fixture.school_id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_yearly_export_is_xlsx(pool: PgPool) {
    let fixture = seed_class(&pool).await;
    let app = setup_test_app(pool.clone());

    let response = app
        .oneshot(get(
            "/api/reports/attendance/yearly/export?class_name=5",
            &admin_token(fixture.school_id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"yearly-attendance-2024-2025.xlsx\""
    );

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.starts_with(b"PK"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_reports_require_permission(pool: PgPool) {
    let school_id = create_test_school(&pool).await;
    let app = setup_test_app(pool.clone());

    let response = app
        .oneshot(get(
            "/api/reports/attendance/yearly",
            &token_with(school_id, &[permissions::ATTENDANCE_READ]),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
