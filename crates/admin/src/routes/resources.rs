//! Generic list, create and edit handlers.
//!
//! Each entity plugs in through [`AdminResource`] and gets the same five
//! routes:
//!
//! ```text
//! GET  {base}            - List
//! GET  {base}/new        - Empty form
//! POST {base}            - Create
//! GET  {base}/{id}/edit  - Pre-filled form
//! POST {base}/{id}       - Update
//! ```

use std::fmt;

use axum::{
    Form, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tracing::instrument;

use crate::db::AdminStore;
use crate::error::AppError;
use crate::middleware::RequestContext;
use crate::models::AdminEntity;
use crate::services::{self, FormState, Submission};
use crate::state::AppState;

/// An admin entity with a repository and pages.
pub trait AdminResource: AdminEntity + fmt::Debug {
    type Store: AdminStore<Self>;

    fn store(state: &AppState) -> Self::Store;

    fn index_page(records: Vec<Self>) -> Response;

    fn form_page(form: FormState<Self>) -> Response;
}

/// Routes for one entity, mounted at `E::BASE_PATH`.
pub fn router<E: AdminResource>() -> Router<AppState> {
    let base = E::BASE_PATH;
    Router::new()
        .route(base, get(index::<E>).post(create::<E>))
        .route(&format!("{base}/new"), get(new::<E>))
        .route(&format!("{base}/{{id}}/edit"), get(edit::<E>))
        .route(&format!("{base}/{{id}}"), post(update::<E>))
}

/// Parse a path ID; anything that isn't an integer is a missing record.
fn parse_id<E: AdminEntity>(raw: &str) -> Result<E::Id, AppError> {
    raw.parse::<i32>()
        .map(E::Id::from)
        .map_err(|_| AppError::NotFound(format!("{} {raw}", E::LABEL)))
}

fn respond<E: AdminResource>(submission: Submission<E>) -> Response {
    match submission {
        Submission::Saved { .. } => Redirect::to(E::BASE_PATH).into_response(),
        Submission::Invalid(form) => {
            (StatusCode::UNPROCESSABLE_ENTITY, E::form_page(form)).into_response()
        }
    }
}

#[instrument(skip(state), fields(entity = E::ENTITY_TYPE))]
async fn index<E: AdminResource>(State(state): State<AppState>) -> Result<Response, AppError> {
    let records = E::store(&state).list().await?;
    Ok(E::index_page(records))
}

async fn new<E: AdminResource>() -> Response {
    E::form_page(services::new_form::<E>())
}

#[instrument(skip(state), fields(entity = E::ENTITY_TYPE))]
async fn edit<E: AdminResource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id::<E>(&id)?;
    let form = services::edit_form::<E, _>(&E::store(&state), id).await?;
    Ok(E::form_page(form))
}

#[instrument(skip_all, fields(entity = E::ENTITY_TYPE))]
async fn create<E: AdminResource>(
    State(state): State<AppState>,
    context: RequestContext,
    Form(form): Form<E::Form>,
) -> Result<Response, AppError> {
    let submission = services::submit_create::<E, _, _>(
        &E::store(&state),
        state.activity(),
        context.activity_data(),
        form,
    )
    .await?;
    Ok(respond(submission))
}

#[instrument(skip(state, context, form), fields(entity = E::ENTITY_TYPE))]
async fn update<E: AdminResource>(
    State(state): State<AppState>,
    context: RequestContext,
    Path(id): Path<String>,
    Form(form): Form<E::Form>,
) -> Result<Response, AppError> {
    let id = parse_id::<E>(&id)?;
    let submission = services::submit_update::<E, _, _>(
        &E::store(&state),
        state.activity(),
        context.activity_data(),
        id,
        form,
    )
    .await?;
    Ok(respond(submission))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ansania_core::{BannerId, VoucherId};

    use super::*;
    use crate::models::{Banner, CmsPage, FlashSale, Voucher};

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id::<Banner>("7").unwrap(), BannerId::new(7));
        assert_eq!(parse_id::<Voucher>("12").unwrap(), VoucherId::new(12));
    }

    #[test]
    fn test_parse_id_rejects_non_numeric() {
        let err = parse_id::<Banner>("seven").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_empty_index_pages_render() {
        for response in [
            Banner::index_page(Vec::new()),
            CmsPage::index_page(Vec::new()),
            FlashSale::index_page(Vec::new()),
            Voucher::index_page(Vec::new()),
        ] {
            assert_eq!(response.status(), StatusCode::OK);
        }
    }
}
