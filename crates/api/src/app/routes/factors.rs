use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::{dto, services::AppServices};

/// Full factor catalog (scopes → categories → activities), for pickers.
pub async fn catalog(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    (
        StatusCode::OK,
        Json(dto::catalog_to_json(services.factors())),
    )
        .into_response()
}
