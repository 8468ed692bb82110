//! Banner pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::{IntoResponse, Response};

use super::resources::AdminResource;
use crate::db::BannerRepository;
use crate::filters;
use crate::models::{AdminEntity, Banner};
use crate::services::FormState;
use crate::state::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "banners/index.html")]
pub struct BannersIndexTemplate {
    pub current_path: &'static str,
    pub banners: Vec<Banner>,
}

#[derive(Template, WebTemplate)]
#[template(path = "banners/form.html")]
pub struct BannerFormTemplate {
    pub current_path: &'static str,
    pub form: FormState<Banner>,
}

impl AdminResource for Banner {
    type Store = BannerRepository;

    fn store(state: &AppState) -> BannerRepository {
        BannerRepository::new(state.pool().clone())
    }

    fn index_page(banners: Vec<Self>) -> Response {
        BannersIndexTemplate {
            current_path: Self::BASE_PATH,
            banners,
        }
        .into_response()
    }

    fn form_page(form: FormState<Self>) -> Response {
        BannerFormTemplate {
            current_path: Self::BASE_PATH,
            form,
        }
        .into_response()
    }
}
