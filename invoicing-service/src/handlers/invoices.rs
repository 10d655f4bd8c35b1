//! Invoice form endpoints.
//!
//! A completed action answers `303 See Other` to the listing, naming the view
//! that must be re-rendered in `X-Revalidate-Path`. Failed actions answer with
//! the form state as JSON so the form can show it next to the fields.

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use uuid::Uuid;

use crate::dtos::InvoiceForm;
use crate::services::{ActionOutcome, Navigation};
use crate::startup::AppState;

pub const REVALIDATE_HEADER: &str = "x-revalidate-path";
pub const FLASH_HEADER: &str = "x-flash-message";

/// POST /dashboard/invoices
pub async fn create_invoice(
    State(state): State<AppState>,
    Form(form): Form<InvoiceForm>,
) -> Response {
    state.actions.create(&form).await.into_response()
}

/// POST /dashboard/invoices/:id
pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<InvoiceForm>,
) -> Response {
    state.actions.update(id, &form).await.into_response()
}

/// POST /dashboard/invoices/:id/delete
pub async fn delete_invoice(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    state.actions.delete(id).await.into_response()
}

impl IntoResponse for ActionOutcome {
    fn into_response(self) -> Response {
        match self {
            ActionOutcome::ValidationFailed(form_state) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(form_state)).into_response()
            }
            ActionOutcome::StoreFailed(form_state) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(form_state)).into_response()
            }
            ActionOutcome::Completed(navigation) => navigation.into_response(),
        }
    }
}

impl IntoResponse for Navigation {
    fn into_response(self) -> Response {
        let mut response = StatusCode::SEE_OTHER.into_response();
        let headers = response.headers_mut();

        headers.insert(header::LOCATION, HeaderValue::from_static(self.redirect_to));
        headers.insert(REVALIDATE_HEADER, HeaderValue::from_static(self.revalidate));
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
        if let Some(message) = self.message {
            headers.insert(FLASH_HEADER, HeaderValue::from_static(message));
        }

        response
    }
}
