//! Admin form routes that resolve before touching the database.

#![allow(clippy::unwrap_used)]

use axum::http::{StatusCode, header};
use tower::ServiceExt;

use ansania_admin::routes;
use ansania_admin::state::AppState;
use ansania_integration_tests::{body_text, get, lazy_pool, post_form};

fn app() -> axum::Router {
    routes::app(AppState::new(lazy_pool()))
}

#[tokio::test]
async fn test_new_forms_render_empty() {
    for (path, heading) in [
        ("/banners/new", "New Banner"),
        ("/pages/new", "New Page"),
        ("/flash-sales/new", "New Flash Sale"),
        ("/vouchers/new", "New Voucher"),
    ] {
        let response = app().oneshot(get(path)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{path}");
        assert!(body_text(response).await.contains(heading), "{path}");
    }
}

#[tokio::test]
async fn test_new_voucher_defaults() {
    let response = app().oneshot(get("/vouchers/new")).await.unwrap();
    let body = body_text(response).await;

    assert!(body.contains(r#"<option value="percentage" selected>"#));
    assert!(body.contains(r#"name="is_active" value="on" checked"#));
}

#[tokio::test]
async fn test_non_numeric_id_is_not_found() {
    let response = app().oneshot(get("/banners/seven/edit")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app()
        .oneshot(post_form("/vouchers/abc", "code=SAVE10"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_submission_rerenders_form() {
    let response = app()
        .oneshot(post_form(
            "/banners",
            "title=&image_url=https%3A%2F%2Fcdn.ansania.test%2Fa.jpg",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_text(response).await;
    assert!(body.contains("title is required"));
    assert!(body.contains("cdn.ansania.test"));
}

#[tokio::test]
async fn test_invalid_update_keeps_edit_action() {
    let response = app()
        .oneshot(post_form(
            "/flash-sales/3",
            "name=Weekend&discount_percent=150&starts_at=2026-05-01T09%3A00&ends_at=2026-05-03T09%3A00",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_text(response).await;
    assert!(body.contains(r#"action="/flash-sales/3""#));
    assert!(body.contains("Edit Flash Sale #3"));
}

#[tokio::test]
async fn test_root_redirects_to_banners() {
    let response = app().oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/banners"
    );
}

#[tokio::test]
async fn test_readiness_reports_unreachable_database() {
    let response = app().oneshot(get("/health/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let response = app().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
