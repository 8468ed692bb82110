//! CMS page editor.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::{IntoResponse, Response};

use super::resources::AdminResource;
use crate::db::CmsPageRepository;
use crate::filters;
use crate::models::{AdminEntity, CmsPage};
use crate::services::FormState;
use crate::state::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "pages/index.html")]
pub struct PagesIndexTemplate {
    pub current_path: &'static str,
    pub pages: Vec<CmsPage>,
}

#[derive(Template, WebTemplate)]
#[template(path = "pages/form.html")]
pub struct PageFormTemplate {
    pub current_path: &'static str,
    pub form: FormState<CmsPage>,
}

impl AdminResource for CmsPage {
    type Store = CmsPageRepository;

    fn store(state: &AppState) -> CmsPageRepository {
        CmsPageRepository::new(state.pool().clone())
    }

    fn index_page(pages: Vec<Self>) -> Response {
        PagesIndexTemplate {
            current_path: Self::BASE_PATH,
            pages,
        }
        .into_response()
    }

    fn form_page(form: FormState<Self>) -> Response {
        PageFormTemplate {
            current_path: Self::BASE_PATH,
            form,
        }
        .into_response()
    }
}
