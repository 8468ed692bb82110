//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database)
//! GET  /                       - Redirect to /banners
//!
//! # Banners, pages, flash sales, vouchers
//! GET  /banners                - List
//! GET  /banners/new            - New form
//! POST /banners                - Create
//! GET  /banners/{id}/edit      - Edit form
//! POST /banners/{id}           - Update
//!
//! (same five routes under /pages, /flash-sales and /vouchers)
//! ```

pub mod banners;
pub mod cms_pages;
pub mod flash_sales;
pub mod resources;
pub mod vouchers;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::Redirect,
    routing::get,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::middleware::request_id_middleware;
use crate::models::{AdminEntity, Banner, CmsPage, FlashSale, Voucher};
use crate::state::AppState;

pub use resources::AdminResource;

/// Directory of static assets, relative to the workspace root.
pub const STATIC_DIR: &str = "crates/admin/static";

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .route("/", get(|| async { Redirect::to(Banner::BASE_PATH) }))
        .merge(resources::router::<Banner>())
        .merge(resources::router::<CmsPage>())
        .merge(resources::router::<FlashSale>())
        .merge(resources::router::<Voucher>())
}

/// Build the complete application with state, static files, and middleware.
pub fn app(state: AppState) -> Router {
    routes()
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        tracing::info!(
                            status = %response.status(),
                            latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                            "response"
                        );
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
