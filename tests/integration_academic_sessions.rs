mod common;

use axum::http::StatusCode;
use common::{
    admin_token, create_test_school, create_test_session, date, get, json_body, post_json,
    setup_test_app, token_with,
};
use rollcall_auth::permissions;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_create_academic_session(pool: PgPool) {
    let school_id = create_test_school(&pool).await;
    let app = setup_test_app(pool.clone());

    let response = app
        .oneshot(post_json(
            "/api/academic-sessions",
            &admin_token(school_id),
            json!({
                "name": "2024-2025",
                "start_date": "2024-04-01",
                "end_date": "2025-03-31"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["name"], "2024-2025");
    assert_eq!(body["school_id"], school_id.to_string());
    assert_eq!(body["is_active"], false);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_session_rejects_reversed_dates(pool: PgPool) {
    let school_id = create_test_school(&pool).await;
    let app = setup_test_app(pool.clone());

    let response = app
        .oneshot(post_json(
            "/api/academic-sessions",
            &admin_token(school_id),
            json!({
                "name": "Backwards",
                "start_date": "2025-03-31",
                "end_date": "2024-04-01"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_duplicate_session_name(pool: PgPool) {
    let school_id = create_test_school(&pool).await;
    create_test_session(&pool, school_id, "2024-2025", date(2024, 4, 1), date(2025, 3, 31), false)
        .await;
    let app = setup_test_app(pool.clone());

    let response = app
        .oneshot(post_json(
            "/api/academic-sessions",
            &admin_token(school_id),
            json!({
                "name": "2024-2025",
                "start_date": "2024-04-01",
                "end_date": "2025-03-31"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_session_requires_manage_permission(pool: PgPool) {
    let school_id = create_test_school(&pool).await;
    let app = setup_test_app(pool.clone());
    let token = token_with(school_id, &[permissions::SESSIONS_READ]);

    let response = app
        .oneshot(post_json(
            "/api/academic-sessions",
            &token,
            json!({
                "name": "2024-2025",
                "start_date": "2024-04-01",
                "end_date": "2025-03-31"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_request_without_token_unauthorized(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let request = axum::http::Request::builder()
        .uri("/api/academic-sessions")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_activate_session_deactivates_others(pool: PgPool) {
    let school_id = create_test_school(&pool).await;
    let old = create_test_session(&pool, school_id, "2023-2024", date(2023, 4, 1), date(2024, 3, 31), true)
        .await;
    let new = create_test_session(&pool, school_id, "2024-2025", date(2024, 4, 1), date(2025, 3, 31), false)
        .await;
    let app = setup_test_app(pool.clone());
    let token = admin_token(school_id);

    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/academic-sessions/{}/activate", new),
            &token,
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["is_active"], true);

    let response = app
        .clone()
        .oneshot(get("/api/academic-sessions/active", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["id"], new.to_string());

    let response = app
        .oneshot(get(&format!("/api/academic-sessions/{}", old), &token))
        .await
        .unwrap();
    assert_eq!(json_body(response).await["is_active"], false);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_sessions_filtered_by_active(pool: PgPool) {
    let school_id = create_test_school(&pool).await;
    create_test_session(&pool, school_id, "2023-2024", date(2023, 4, 1), date(2024, 3, 31), false)
        .await;
    create_test_session(&pool, school_id, "2024-2025", date(2024, 4, 1), date(2025, 3, 31), true)
        .await;
    let app = setup_test_app(pool.clone());
    let token = admin_token(school_id);

    let response = app
        .clone()
        .oneshot(get("/api/academic-sessions", &token))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["meta"]["total"], 2);

    let response = app
        .oneshot(get("/api/academic-sessions?is_active=true", &token))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["name"], "2024-2025");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_sessions_scoped_to_school(pool: PgPool) {
    let school_a = create_test_school(&pool).await;
    let school_b = create_test_school(&pool).await;
    let session = create_test_session(&pool, school_a, "2024-2025", date(2024, 4, 1), date(2025, 3, 31), true)
        .await;
    let app = setup_test_app(pool.clone());

    let response = app
        .clone()
        .oneshot(get(
            &format!("/api/academic-sessions/{}", session),
            &admin_token(school_b),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(get("/api/academic-sessions/active", &admin_token(school_b)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(json_body(response).await.is_null());
}
