use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::{dto, services::AppServices};
use crate::context::SessionContext;

pub async fn summary(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(session): Extension<SessionContext>,
) -> axum::response::Response {
    let summary = services.summary(session.session_id());
    (StatusCode::OK, Json(dto::summary_to_json(&summary))).into_response()
}
