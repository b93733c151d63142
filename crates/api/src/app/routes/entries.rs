use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::context::SessionContext;

pub async fn add_entry(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Json(body): Json<dto::AddEntryRequest>,
) -> axum::response::Response {
    match services.add_entry(session.session_id(), body.into()) {
        Ok((index, item)) => (
            StatusCode::CREATED,
            Json(dto::line_item_to_json(index, &item)),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_entries(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> axum::response::Response {
    let items = services
        .list_entries(session.session_id())
        .iter()
        .enumerate()
        .map(|(index, item)| dto::line_item_to_json(index, item))
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn delete_entry(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
    Path(index): Path<usize>,
) -> axum::response::Response {
    match services.delete_entry(session.session_id(), index) {
        Ok(removed) => (
            StatusCode::OK,
            Json(dto::line_item_to_json(index, &removed)),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
