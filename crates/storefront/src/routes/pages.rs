//! Content page route handlers.
//!
//! Every content route goes through [`serve_content_page`], which resolves one
//! document per request and answers with either the rendered page or a
//! terminal 404.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use tracing::instrument;

use ansania_core::Slug;

use crate::content::{
    PageError, PageLookup, PageMetadata, generate_metadata, render, render_markdown,
};
use crate::error::AppError;
use crate::filters;
use crate::state::AppState;

/// Fixed content routes and the document slug each one serves.
pub const CONTENT_ROUTES: &[(&str, &str)] = &[
    ("/privacy-policy", "privacy-policy"),
    ("/terms-and-conditions", "terms-and-conditions"),
    ("/about-us", "about-us"),
    ("/faq", "faq"),
    ("/shipping-policy", "shipping-policy"),
    ("/return-policy", "return-policy"),
];

/// Content page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/content.html")]
pub struct ContentPageTemplate {
    pub meta: PageMetadata,
    pub updated_at: Option<NaiveDate>,
    pub content_html: String,
}

/// Not found page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/not_found.html")]
pub struct NotFoundTemplate {
    pub meta: PageMetadata,
}

/// Render the 404 page.
#[must_use]
pub fn not_found_page() -> Response {
    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            meta: PageMetadata::not_found(),
        },
    )
        .into_response()
}

/// Resolve and render the content page for `slug`.
///
/// # Errors
///
/// Returns `AppError::Content` if the content backend fails. An absent
/// document is not an error; it renders the 404 page.
#[instrument(skip(state), fields(slug = %slug))]
pub async fn serve_content_page(state: &AppState, slug: Slug) -> Result<Response, AppError> {
    let lookup = PageLookup::new(state.content(), slug);

    let meta = generate_metadata(&lookup).await?;

    match render(&lookup).await {
        Ok(document) => Ok(ContentPageTemplate {
            meta,
            updated_at: document.updated_at.map(|at| at.date_naive()),
            content_html: render_markdown(&document.content),
        }
        .into_response()),
        Err(PageError::NotFound(slug)) => {
            tracing::debug!(slug = %slug, "Content page not found");
            Ok(not_found_page())
        }
        Err(PageError::Content(e)) => Err(e.into()),
    }
}

/// Display an arbitrary published CMS page.
///
/// # Errors
///
/// Returns `AppError::Content` if the content backend fails.
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    match Slug::parse(&slug) {
        Ok(slug) => serve_content_page(&state, slug).await,
        Err(_) => Ok(not_found_page()),
    }
}

/// Create the content pages router.
pub fn router() -> Router<AppState> {
    CONTENT_ROUTES
        .iter()
        .fold(Router::new(), |router, &(path, slug)| {
            let slug = Slug::from_static(slug);
            router.route(
                path,
                get(move |State(state): State<AppState>| async move {
                    serve_content_page(&state, slug).await
                }),
            )
        })
        .route("/pages/{slug}", get(show))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_routes_are_valid_slugs() {
        for (path, slug) in CONTENT_ROUTES {
            assert!(Slug::parse(slug).is_ok(), "invalid slug for {path}");
            assert_eq!(path.trim_start_matches('/'), *slug);
        }
    }

    #[test]
    fn test_not_found_page_status() {
        assert_eq!(not_found_page().status(), StatusCode::NOT_FOUND);
    }
}
