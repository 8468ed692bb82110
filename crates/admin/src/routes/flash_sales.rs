//! Flash sale pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::{IntoResponse, Response};

use super::resources::AdminResource;
use crate::db::FlashSaleRepository;
use crate::filters;
use crate::models::{AdminEntity, FlashSale};
use crate::services::FormState;
use crate::state::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "flash_sales/index.html")]
pub struct FlashSalesIndexTemplate {
    pub current_path: &'static str,
    pub flash_sales: Vec<FlashSale>,
}

#[derive(Template, WebTemplate)]
#[template(path = "flash_sales/form.html")]
pub struct FlashSaleFormTemplate {
    pub current_path: &'static str,
    pub form: FormState<FlashSale>,
}

impl AdminResource for FlashSale {
    type Store = FlashSaleRepository;

    fn store(state: &AppState) -> FlashSaleRepository {
        FlashSaleRepository::new(state.pool().clone())
    }

    fn index_page(flash_sales: Vec<Self>) -> Response {
        FlashSalesIndexTemplate {
            current_path: Self::BASE_PATH,
            flash_sales,
        }
        .into_response()
    }

    fn form_page(form: FormState<Self>) -> Response {
        FlashSaleFormTemplate {
            current_path: Self::BASE_PATH,
            form,
        }
        .into_response()
    }
}
