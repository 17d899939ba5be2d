mod common;

use axum::http::StatusCode;
use common::{
    admin_token, create_active_session, create_test_holiday, create_test_school,
    create_test_session, date, delete, get, json_body, post_json, setup_test_app,
};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_create_holiday_in_active_session(pool: PgPool) {
    let school_id = create_test_school(&pool).await;
    let session_id = create_active_session(&pool, school_id).await;
    let app = setup_test_app(pool.clone());

    let response = app
        .oneshot(post_json(
            "/api/holidays",
            &admin_token(school_id),
            json!({ "holiday_date": "2024-08-15", "name": "Independence Day" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["holiday_date"], "2024-08-15");
    assert_eq!(body["academic_session_id"], session_id.to_string());
    assert_eq!(body["is_active"], true);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_holiday_outside_session(pool: PgPool) {
    let school_id = create_test_school(&pool).await;
    create_active_session(&pool, school_id).await;
    let app = setup_test_app(pool.clone());

    let response = app
        .oneshot(post_json(
            "/api/holidays",
            &admin_token(school_id),
            json!({ "holiday_date": "2025-08-15", "name": "Independence Day" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_holiday_without_session(pool: PgPool) {
    let school_id = create_test_school(&pool).await;
    let app = setup_test_app(pool.clone());

    let response = app
        .oneshot(post_json(
            "/api/holidays",
            &admin_token(school_id),
            json!({ "holiday_date": "2024-08-15", "name": "Independence Day" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_holiday_date_rejected(pool: PgPool) {
    let school_id = create_test_school(&pool).await;
    let session_id = create_active_session(&pool, school_id).await;
    create_test_holiday(&pool, school_id, session_id, date(2024, 8, 15), "Independence Day").await;
    let app = setup_test_app(pool.clone());

    let response = app
        .oneshot(post_json(
            "/api/holidays",
            &admin_token(school_id),
            json!({ "holiday_date": "2024-08-15", "name": "Flag Day" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_holidays_for_session(pool: PgPool) {
    let school_id = create_test_school(&pool).await;
    let active = create_active_session(&pool, school_id).await;
    let previous = create_test_session(&pool, school_id, "2023-2024", date(2023, 4, 1), date(2024, 3, 31), false)
        .await;
    create_test_holiday(&pool, school_id, active, date(2024, 10, 2), "Gandhi Jayanti").await;
    create_test_holiday(&pool, school_id, active, date(2024, 8, 15), "Independence Day").await;
    create_test_holiday(&pool, school_id, previous, date(2023, 8, 15), "Independence Day").await;
    let app = setup_test_app(pool.clone());
    let token = admin_token(school_id);

    let response = app.clone().oneshot(get("/api/holidays", &token)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let holidays = body.as_array().unwrap();
    assert_eq!(holidays.len(), 2);
    assert_eq!(holidays[0]["holiday_date"], "2024-08-15");
    assert_eq!(holidays[1]["holiday_date"], "2024-10-02");

    let response = app
        .oneshot(get(&format!("/api/holidays?session_id={}", previous), &token))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_holidays_without_session_is_empty(pool: PgPool) {
    let school_id = create_test_school(&pool).await;
    let app = setup_test_app(pool.clone());

    let response = app
        .oneshot(get("/api/holidays", &admin_token(school_id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!([]));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_holiday_deactivates(pool: PgPool) {
    let school_id = create_test_school(&pool).await;
    let session_id = create_active_session(&pool, school_id).await;
    let holiday = create_test_holiday(&pool, school_id, session_id, date(2024, 8, 15), "Independence Day").await;
    let app = setup_test_app(pool.clone());
    let token = admin_token(school_id);

    let response = app
        .clone()
        .oneshot(delete(&format!("/api/holidays/{}", holiday), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.clone().oneshot(get("/api/holidays", &token)).await.unwrap();
    assert_eq!(json_body(response).await, json!([]));

    let response = app
        .clone()
        .oneshot(delete(&format!("/api/holidays/{}", holiday), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The date can be declared again once the old holiday is inactive
    let response = app
        .oneshot(post_json(
            "/api/holidays",
            &token,
            json!({ "holiday_date": "2024-08-15", "name": "Independence Day" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}
