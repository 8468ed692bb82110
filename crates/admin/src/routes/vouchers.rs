//! Voucher pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::{IntoResponse, Response};

use super::resources::AdminResource;
use crate::db::VoucherRepository;
use crate::filters;
use crate::models::{AdminEntity, DiscountType, Voucher};
use crate::services::FormState;
use crate::state::AppState;

/// Discount type options for the form's select box.
pub const DISCOUNT_TYPES: &[(DiscountType, &str)] = &[
    (DiscountType::Percentage, "Percentage"),
    (DiscountType::FixedAmount, "Fixed amount"),
];

#[derive(Template, WebTemplate)]
#[template(path = "vouchers/index.html")]
pub struct VouchersIndexTemplate {
    pub current_path: &'static str,
    pub vouchers: Vec<Voucher>,
}

#[derive(Template, WebTemplate)]
#[template(path = "vouchers/form.html")]
pub struct VoucherFormTemplate {
    pub current_path: &'static str,
    pub form: FormState<Voucher>,
    pub discount_types: &'static [(DiscountType, &'static str)],
}

impl AdminResource for Voucher {
    type Store = VoucherRepository;

    fn store(state: &AppState) -> VoucherRepository {
        VoucherRepository::new(state.pool().clone())
    }

    fn index_page(vouchers: Vec<Self>) -> Response {
        VouchersIndexTemplate {
            current_path: Self::BASE_PATH,
            vouchers,
        }
        .into_response()
    }

    fn form_page(form: FormState<Self>) -> Response {
        VoucherFormTemplate {
            current_path: Self::BASE_PATH,
            form,
            discount_types: DISCOUNT_TYPES,
        }
        .into_response()
    }
}
