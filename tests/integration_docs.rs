mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{json_body, setup_test_app};
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_openapi_document_served(pool: PgPool) {
    let app = setup_test_app(pool);

    let request = Request::builder()
        .uri("/api-docs/openapi.json")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["info"]["title"], "Rollcall API");
    assert!(body["paths"]["/api/attendance"].is_object());
    assert!(body["paths"]["/api/reports/attendance/monthly"].is_object());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_route_not_found(pool: PgPool) {
    let app = setup_test_app(pool);

    let request = Request::builder()
        .uri("/api/auth/login")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
