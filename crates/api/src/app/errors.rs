use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use carbonledger_core::DomainError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        DomainError::Configuration(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "configuration_error", msg)
        }
        DomainError::IndexOutOfRange { index, len } => json_error(
            StatusCode::NOT_FOUND,
            "index_out_of_range",
            format!("index {index} out of range for ledger of length {len}"),
        ),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
